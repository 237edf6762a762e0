use time::PrimitiveDateTime;

use kernel::prelude::entity::{Booking, DestructItem, Item};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

impl From<Item> for ItemDto {
    fn from(value: Item) -> Self {
        let DestructItem {
            id,
            name,
            description,
            available,
            owner_id,
            request_id,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            available: available.into(),
            owner_id: owner_id.into(),
            request_id: request_id.map(Into::into),
        }
    }
}

/// The slice of a booking an item owner sees next to the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingShortDto {
    pub id: i64,
    pub booker_id: i64,
}

impl From<&Booking> for BookingShortDto {
    fn from(value: &Booking) -> Self {
        Self {
            id: *value.id().as_ref(),
            booker_id: *value.booker_id().as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDto {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemWithBookingDto {
    pub item: ItemDto,
    pub last_booking: Option<BookingShortDto>,
    pub next_booking: Option<BookingShortDto>,
    pub comments: Vec<CommentDto>,
}

pub struct GetItemDto {
    pub id: i64,
    pub user_id: i64,
}

pub struct GetOwnItemsDto {
    pub user_id: i64,
}

pub struct SearchItemDto {
    pub user_id: i64,
    pub text: String,
}

#[derive(Debug)]
pub struct CreateItemDto {
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

pub struct UpdateItemDto {
    pub id: i64,
    pub user_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

pub struct DeleteItemDto {
    pub id: i64,
    pub user_id: i64,
}

pub struct CreateCommentDto {
    pub item_id: i64,
    pub user_id: i64,
    pub text: String,
}
