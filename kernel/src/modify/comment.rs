use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Comment, CommentDraft};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CommentModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        comment: &CommentDraft,
    ) -> error_stack::Result<Comment, KernelError>;
}

pub trait DependOnCommentModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CommentModifier: CommentModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn comment_modifier(&self) -> &Self::CommentModifier;
}
