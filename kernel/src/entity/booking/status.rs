use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

const WAITING: &str = "WAITING";
const APPROVED: &str = "APPROVED";
const REJECTED: &str = "REJECTED";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => WAITING,
            BookingStatus::Approved => APPROVED,
            BookingStatus::Rejected => REJECTED,
        }
    }

    /// Outcome of an owner decision. Each direction may be applied only once:
    /// approving an approved booking, or rejecting a rejected one, fails.
    /// Switching between the two directions is allowed.
    pub fn decide(&self, approve: bool) -> error_stack::Result<Self, KernelError> {
        match (self, approve) {
            (BookingStatus::Approved, true) => Err(Report::new(KernelError::Validation)
                .attach_printable("Booking is already approved")),
            (BookingStatus::Rejected, false) => Err(Report::new(KernelError::Validation)
                .attach_printable("Booking is already rejected")),
            (_, true) => Ok(BookingStatus::Approved),
            (_, false) => Ok(BookingStatus::Rejected),
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            WAITING => Ok(BookingStatus::Waiting),
            APPROVED => Ok(BookingStatus::Approved),
            REJECTED => Ok(BookingStatus::Rejected),
            _ => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Unknown booking status: {s}"))),
        }
    }
}
