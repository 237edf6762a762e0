use std::cmp::Reverse;

use error_stack::Report;
use time::PrimitiveDateTime;

use crate::entity::{Booking, BookingStatus};
use crate::KernelError;

/// A listing view over bookings, derived from status and interval at query
/// time. `Unsupported` stands for any token that names no view.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum BookingState {
    #[default]
    All,
    Current,
    Future,
    Past,
    Rejected,
    Waiting,
    Unsupported,
}

impl BookingState {
    /// Tokens are matched exactly, upper case only.
    pub fn parse(token: &str) -> Self {
        match token {
            "ALL" => BookingState::All,
            "CURRENT" => BookingState::Current,
            "FUTURE" => BookingState::Future,
            "PAST" => BookingState::Past,
            "REJECTED" => BookingState::Rejected,
            "WAITING" => BookingState::Waiting,
            _ => BookingState::Unsupported,
        }
    }

    pub fn matches(&self, booking: &Booking, now: &PrimitiveDateTime) -> bool {
        let status = booking.status();
        let start = booking.start().as_ref();
        let end = booking.end().as_ref();
        match self {
            BookingState::All => true,
            BookingState::Future => {
                matches!(status, BookingStatus::Approved | BookingStatus::Waiting) && start > now
            }
            BookingState::Waiting => *status == BookingStatus::Waiting && start > now,
            BookingState::Rejected => *status == BookingStatus::Rejected,
            // Checks REJECTED, not APPROVED. Kept as the service has always
            // answered this view.
            BookingState::Current => {
                *status == BookingStatus::Rejected && start < now && end > now
            }
            BookingState::Past => *status == BookingStatus::Approved && start < now && end < now,
            BookingState::Unsupported => false,
        }
    }

    /// Filters `bookings` down to this view and orders them newest id first.
    pub fn select(
        &self,
        bookings: Vec<Booking>,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Vec<Booking>, KernelError> {
        if *self == BookingState::Unsupported {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("Unknown state: UNSUPPORTED_STATUS"));
        }
        let mut selected = bookings
            .into_iter()
            .filter(|booking| self.matches(booking, now))
            .collect::<Vec<_>>();
        selected.sort_by_key(|booking| Reverse(*booking.id()));
        Ok(selected)
    }
}

impl From<&str> for BookingState {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}
