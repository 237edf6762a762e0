use destructure::Destructure;
use vodca::References;

use crate::entity::{BookingEnd, BookingPeriod, BookingStart, ItemId, UserId};

/// A booking that has not been stored yet. The store assigns the id and the
/// initial `WAITING` status.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BookingDraft {
    start: BookingStart,
    end: BookingEnd,
    item_id: ItemId,
    booker_id: UserId,
}

impl BookingDraft {
    pub fn new(start: BookingStart, end: BookingEnd, item_id: ItemId, booker_id: UserId) -> Self {
        Self {
            start,
            end,
            item_id,
            booker_id,
        }
    }

    pub fn period(&self) -> BookingPeriod {
        BookingPeriod::new(self.start, self.end)
    }
}
