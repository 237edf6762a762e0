use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{ItemRequest, ItemRequestId, SelectLimit, SelectOffset, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ItemRequestQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &ItemRequestId,
    ) -> error_stack::Result<Option<ItemRequest>, KernelError>;
    /// Ordered by creation time, oldest first.
    async fn find_by_requestor(
        &self,
        con: &mut Self::Transaction,
        requestor_id: &UserId,
    ) -> error_stack::Result<Vec<ItemRequest>, KernelError>;
    /// Requests of everybody except `requestor_id`, newest first.
    async fn find_by_other_requestors(
        &self,
        con: &mut Self::Transaction,
        requestor_id: &UserId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<ItemRequest>, KernelError>;
}

pub trait DependOnItemRequestQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ItemRequestQuery: ItemRequestQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn item_request_query(&self) -> &Self::ItemRequestQuery;
}
