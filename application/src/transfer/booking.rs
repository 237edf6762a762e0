use time::PrimitiveDateTime;

use kernel::prelude::entity::{Booking, DestructBooking, Item, User};

use crate::transfer::{ItemDto, UserDto};

/// A booking with its item and booker resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDto {
    pub id: i64,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
    pub status: String,
    pub item: ItemDto,
    pub booker: UserDto,
}

impl BookingDto {
    pub fn compose(booking: Booking, item: Item, booker: User) -> Self {
        let DestructBooking {
            id,
            start,
            end,
            status,
            ..
        } = booking.into_destruct();
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            status: status.to_string(),
            item: ItemDto::from(item),
            booker: UserDto::from(booker),
        }
    }
}

pub struct GetBookingDto {
    pub id: i64,
    pub user_id: i64,
}

/// Listing request shared by the booker and the owner views.
pub struct GetBookingsDto {
    pub user_id: i64,
    pub state: String,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug)]
pub struct CreateBookingDto {
    pub user_id: i64,
    pub item_id: i64,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
}

#[derive(Debug)]
pub struct UpdateBookingDto {
    pub id: i64,
    pub user_id: i64,
    pub start: Option<PrimitiveDateTime>,
    pub end: Option<PrimitiveDateTime>,
    pub status: Option<String>,
    pub item_id: Option<i64>,
    pub booker_id: Option<i64>,
}

#[derive(Debug)]
pub struct ApproveBookingDto {
    pub id: i64,
    pub user_id: i64,
    pub approved: bool,
}

pub struct DeleteBookingDto {
    pub id: i64,
    pub user_id: i64,
}
