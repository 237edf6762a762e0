mod draft;
mod id;
mod period;
mod state;
mod status;

pub use self::{draft::*, id::*, period::*, state::*, status::*};
use destructure::{Destructure, Mutation};
use vodca::References;

use crate::entity::{ItemId, UserId};

/// One reservation of one item by one user for a half-open time interval.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Booking {
    id: BookingId,
    start: BookingStart,
    end: BookingEnd,
    item_id: ItemId,
    booker_id: UserId,
    status: BookingStatus,
}

impl Booking {
    pub fn new(
        id: BookingId,
        start: BookingStart,
        end: BookingEnd,
        item_id: ItemId,
        booker_id: UserId,
        status: BookingStatus,
    ) -> Self {
        Self {
            id,
            start,
            end,
            item_id,
            booker_id,
            status,
        }
    }

    pub fn period(&self) -> BookingPeriod {
        BookingPeriod::new(self.start, self.end)
    }

    pub fn is_booked_by(&self, user_id: &UserId) -> bool {
        &self.booker_id == user_id
    }
}
