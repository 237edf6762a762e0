use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Comment, ItemId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CommentQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_item(
        &self,
        con: &mut Self::Transaction,
        item_id: &ItemId,
    ) -> error_stack::Result<Vec<Comment>, KernelError>;
}

pub trait DependOnCommentQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type CommentQuery: CommentQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn comment_query(&self) -> &Self::CommentQuery;
}
