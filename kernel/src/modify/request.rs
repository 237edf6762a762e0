use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{ItemRequest, ItemRequestDraft, ItemRequestId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ItemRequestModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        request: &ItemRequestDraft,
    ) -> error_stack::Result<ItemRequest, KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        request_id: &ItemRequestId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnItemRequestModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type ItemRequestModifier: ItemRequestModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn item_request_modifier(&self) -> &Self::ItemRequestModifier;
}
