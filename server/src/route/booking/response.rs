use application::transfer::BookingDto;
use axum::Json;
use serde::Serialize;
use time::PrimitiveDateTime;

use crate::controller::Exhaust;
use crate::route::item::response::ItemResponse;
use crate::route::user::response::UserResponse;

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    id: i64,
    #[serde(with = "crate::local_date_time")]
    start: PrimitiveDateTime,
    #[serde(with = "crate::local_date_time")]
    end: PrimitiveDateTime,
    status: String,
    item: ItemResponse,
    booker: UserResponse,
}

impl From<BookingDto> for BookingResponse {
    fn from(
        BookingDto {
            id,
            start,
            end,
            status,
            item,
            booker,
        }: BookingDto,
    ) -> Self {
        Self {
            id,
            start,
            end,
            status,
            item: ItemResponse::from(item),
            booker: UserResponse::from(booker),
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

impl Exhaust<BookingDto> for Presenter {
    type To = Json<BookingResponse>;
    fn emit(&self, output: BookingDto) -> Self::To {
        Json(BookingResponse::from(output))
    }
}

impl Exhaust<Vec<BookingDto>> for Presenter {
    type To = Json<Vec<BookingResponse>>;
    fn emit(&self, output: Vec<BookingDto>) -> Self::To {
        Json(output.into_iter().map(BookingResponse::from).collect())
    }
}
