use application::transfer::{BookingShortDto, CommentDto, ItemDto, ItemWithBookingDto};
use axum::Json;
use serde::Serialize;
use time::PrimitiveDateTime;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    id: i64,
    name: String,
    description: String,
    available: bool,
    owner_id: i64,
    request_id: Option<i64>,
}

impl From<ItemDto> for ItemResponse {
    fn from(
        ItemDto {
            id,
            name,
            description,
            available,
            owner_id,
            request_id,
        }: ItemDto,
    ) -> Self {
        Self {
            id,
            name,
            description,
            available,
            owner_id,
            request_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingShortResponse {
    id: i64,
    booker_id: i64,
}

impl From<BookingShortDto> for BookingShortResponse {
    fn from(BookingShortDto { id, booker_id }: BookingShortDto) -> Self {
        Self { id, booker_id }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    id: i64,
    text: String,
    author_name: String,
    #[serde(with = "crate::local_date_time")]
    created: PrimitiveDateTime,
}

impl From<CommentDto> for CommentResponse {
    fn from(
        CommentDto {
            id,
            text,
            author_name,
            created,
        }: CommentDto,
    ) -> Self {
        Self {
            id,
            text,
            author_name,
            created,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithBookingResponse {
    #[serde(flatten)]
    item: ItemResponse,
    last_booking: Option<BookingShortResponse>,
    next_booking: Option<BookingShortResponse>,
    comments: Vec<CommentResponse>,
}

impl From<ItemWithBookingDto> for ItemWithBookingResponse {
    fn from(dto: ItemWithBookingDto) -> Self {
        Self {
            item: ItemResponse::from(dto.item),
            last_booking: dto.last_booking.map(BookingShortResponse::from),
            next_booking: dto.next_booking.map(BookingShortResponse::from),
            comments: dto.comments.into_iter().map(CommentResponse::from).collect(),
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

impl Exhaust<ItemDto> for Presenter {
    type To = Json<ItemResponse>;
    fn emit(&self, output: ItemDto) -> Self::To {
        Json(ItemResponse::from(output))
    }
}

impl Exhaust<Vec<ItemDto>> for Presenter {
    type To = Json<Vec<ItemResponse>>;
    fn emit(&self, output: Vec<ItemDto>) -> Self::To {
        Json(output.into_iter().map(ItemResponse::from).collect())
    }
}

impl Exhaust<ItemWithBookingDto> for Presenter {
    type To = Json<ItemWithBookingResponse>;
    fn emit(&self, output: ItemWithBookingDto) -> Self::To {
        Json(ItemWithBookingResponse::from(output))
    }
}

impl Exhaust<Vec<ItemWithBookingDto>> for Presenter {
    type To = Json<Vec<ItemWithBookingResponse>>;
    fn emit(&self, output: Vec<ItemWithBookingDto>) -> Self::To {
        Json(output.into_iter().map(ItemWithBookingResponse::from).collect())
    }
}

impl Exhaust<CommentDto> for Presenter {
    type To = Json<CommentResponse>;
    fn emit(&self, output: CommentDto) -> Self::To {
        Json(CommentResponse::from(output))
    }
}
