use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct BookingStart(PrimitiveDateTime);

impl BookingStart {
    pub fn new(time: impl Into<PrimitiveDateTime>) -> Self {
        Self(time.into())
    }
}

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct BookingEnd(PrimitiveDateTime);

impl BookingEnd {
    pub fn new(time: impl Into<PrimitiveDateTime>) -> Self {
        Self(time.into())
    }
}

/// The `[start, end)` interval of a booking.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BookingPeriod {
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
}

impl BookingPeriod {
    pub fn new(start: BookingStart, end: BookingEnd) -> Self {
        Self {
            start: start.0,
            end: end.0,
        }
    }

    pub fn start(&self) -> &PrimitiveDateTime {
        &self.start
    }

    pub fn end(&self) -> &PrimitiveDateTime {
        &self.end
    }

    pub fn is_ordered(&self) -> bool {
        self.start < self.end
    }

    /// Textbook interval intersection of two half-open intervals.
    pub fn intersects(&self, other: &BookingPeriod) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The historical conflict test of the service. `self` is the requested
    /// interval, `existing` a stored one. It only reports a conflict when the
    /// requested interval sits strictly inside the existing one, or when it
    /// starts before the existing one and ends inside it. A requested interval
    /// that fully covers an existing one, or starts inside it and ends after
    /// it, is not a conflict.
    pub fn conflicts_literally(&self, existing: &BookingPeriod) -> bool {
        (self.start > existing.start && self.end < existing.end)
            || (self.end > existing.start && self.end < existing.end && self.start < existing.start)
    }
}
