use application::transfer::ItemRequestDto;
use axum::Json;
use serde::Serialize;
use time::PrimitiveDateTime;

use crate::controller::Exhaust;
use crate::route::item::response::ItemResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestResponse {
    id: i64,
    description: String,
    requestor_id: i64,
    #[serde(with = "crate::local_date_time")]
    created: PrimitiveDateTime,
    items: Vec<ItemResponse>,
}

impl From<ItemRequestDto> for ItemRequestResponse {
    fn from(
        ItemRequestDto {
            id,
            description,
            requestor_id,
            created,
            items,
        }: ItemRequestDto,
    ) -> Self {
        Self {
            id,
            description,
            requestor_id,
            created,
            items: items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

pub struct Presenter;

impl Exhaust<()> for Presenter {
    type To = ();
    fn emit(&self, output: ()) -> Self::To {
        output
    }
}

impl Exhaust<ItemRequestDto> for Presenter {
    type To = Json<ItemRequestResponse>;
    fn emit(&self, output: ItemRequestDto) -> Self::To {
        Json(ItemRequestResponse::from(output))
    }
}

impl Exhaust<Vec<ItemRequestDto>> for Presenter {
    type To = Json<Vec<ItemRequestResponse>>;
    fn emit(&self, output: Vec<ItemRequestDto>) -> Self::To {
        Json(output.into_iter().map(ItemRequestResponse::from).collect())
    }
}
