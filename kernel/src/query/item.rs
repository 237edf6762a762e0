use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Item, ItemId, ItemRequestId, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ItemQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &ItemId,
    ) -> error_stack::Result<Option<Item>, KernelError>;
    /// Ordered by id.
    async fn find_by_owner(
        &self,
        con: &mut Self::Transaction,
        owner_id: &UserId,
    ) -> error_stack::Result<Vec<Item>, KernelError>;
    /// Available items whose name or description contains `text`, ignoring case.
    async fn search(
        &self,
        con: &mut Self::Transaction,
        text: &str,
    ) -> error_stack::Result<Vec<Item>, KernelError>;
    async fn find_by_request(
        &self,
        con: &mut Self::Transaction,
        request_id: &ItemRequestId,
    ) -> error_stack::Result<Vec<Item>, KernelError>;
}

pub trait DependOnItemQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ItemQuery: ItemQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn item_query(&self) -> &Self::ItemQuery;
}
