use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Item, ItemDraft, ItemId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ItemModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        item: &ItemDraft,
    ) -> error_stack::Result<Item, KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        item: &Item,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        item_id: &ItemId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnItemModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type ItemModifier: ItemModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn item_modifier(&self) -> &Self::ItemModifier;
}
