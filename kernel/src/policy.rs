use std::str::FromStr;

use error_stack::Report;
use vodca::References;

use crate::entity::BookingPeriod;
use crate::KernelError;

/// Which predicate decides that a requested interval collides with a stored one.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum OverlapRule {
    /// The asymmetric test the service has always applied, see
    /// [`BookingPeriod::conflicts_literally`].
    #[default]
    Literal,
    /// `a.start < b.end AND b.start < a.end`.
    Standard,
}

impl OverlapRule {
    pub fn conflicts(&self, requested: &BookingPeriod, existing: &BookingPeriod) -> bool {
        match self {
            OverlapRule::Literal => requested.conflicts_literally(existing),
            OverlapRule::Standard => requested.intersects(existing),
        }
    }
}

impl FromStr for OverlapRule {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "literal" => Ok(OverlapRule::Literal),
            "standard" => Ok(OverlapRule::Standard),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown overlap rule: {other}"))),
        }
    }
}

/// Which bookings a requested interval is compared against.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum OverlapScope {
    /// Every booking in the system, whatever the item.
    #[default]
    Global,
    /// Only bookings of the same item.
    Item,
}

impl FromStr for OverlapScope {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(OverlapScope::Global),
            "item" => Ok(OverlapScope::Item),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown overlap scope: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, References)]
pub struct BookingPolicy {
    rule: OverlapRule,
    scope: OverlapScope,
}

impl BookingPolicy {
    pub fn new(rule: OverlapRule, scope: OverlapScope) -> Self {
        Self { rule, scope }
    }
}

pub trait DependOnBookingPolicy: 'static + Sync + Send {
    fn booking_policy(&self) -> &BookingPolicy;
}
