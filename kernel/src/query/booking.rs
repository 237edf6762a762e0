use time::PrimitiveDateTime;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Booking, BookingId, BookingPeriod, ItemId, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookingQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookingId,
    ) -> error_stack::Result<Option<Booking>, KernelError>;
    async fn find_by_booker(
        &self,
        con: &mut Self::Transaction,
        booker_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;
    /// Bookings of every item owned by `owner_id`.
    async fn find_by_owner(
        &self,
        con: &mut Self::Transaction,
        owner_id: &UserId,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;
    /// Bookings whose interval intersects `period`, optionally limited to one
    /// item and skipping one booking. Callers narrow the result with their
    /// own overlap rule.
    async fn find_overlapping(
        &self,
        con: &mut Self::Transaction,
        period: &BookingPeriod,
        item_id: Option<&ItemId>,
        excluded: Option<&BookingId>,
    ) -> error_stack::Result<Vec<Booking>, KernelError>;
    /// The booking of `item_id` that ended most recently before `now`.
    async fn find_last_by_item(
        &self,
        con: &mut Self::Transaction,
        item_id: &ItemId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError>;
    /// The booking of `item_id` that starts soonest after `now`.
    async fn find_next_by_item(
        &self,
        con: &mut Self::Transaction,
        item_id: &ItemId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError>;
    async fn find_finished_by_item_and_booker(
        &self,
        con: &mut Self::Transaction,
        item_id: &ItemId,
        booker_id: &UserId,
        now: &PrimitiveDateTime,
    ) -> error_stack::Result<Option<Booking>, KernelError>;
}

pub trait DependOnBookingQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookingQuery: BookingQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn booking_query(&self) -> &Self::BookingQuery;
}
