use time::PrimitiveDateTime;

use kernel::prelude::entity::{DestructItemRequest, ItemRequest};

use crate::transfer::ItemDto;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequestDto {
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: PrimitiveDateTime,
    pub items: Vec<ItemDto>,
}

impl ItemRequestDto {
    pub fn compose(request: ItemRequest, items: Vec<ItemDto>) -> Self {
        let DestructItemRequest {
            id,
            description,
            requestor_id,
            created,
        } = request.into_destruct();
        Self {
            id: id.into(),
            description: description.into(),
            requestor_id: requestor_id.into(),
            created: created.into(),
            items,
        }
    }
}

pub struct GetItemRequestDto {
    pub id: i64,
    pub user_id: i64,
}

pub struct GetOwnItemRequestsDto {
    pub user_id: i64,
}

pub struct GetOtherItemRequestsDto {
    pub user_id: i64,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

pub struct CreateItemRequestDto {
    pub user_id: i64,
    pub description: String,
}

pub struct DeleteItemRequestDto {
    pub id: i64,
    pub user_id: i64,
}
