use sqlx::PgConnection;
use time::PrimitiveDateTime;

use kernel::interface::query::CommentQuery;
use kernel::interface::update::CommentModifier;
use kernel::prelude::entity::{
    Comment, CommentDraft, CommentId, CommentText, CreatedAt, ItemId, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresCommentRepository;

#[async_trait::async_trait]
impl CommentQuery for PostgresCommentRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_item(
        &self,
        con: &mut PostgresTransaction,
        item_id: &ItemId,
    ) -> error_stack::Result<Vec<Comment>, KernelError> {
        PgCommentInternal::find_by_item(con, item_id).await
    }
}

#[async_trait::async_trait]
impl CommentModifier for PostgresCommentRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        comment: &CommentDraft,
    ) -> error_stack::Result<Comment, KernelError> {
        PgCommentInternal::create(con, comment).await
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    text: String,
    item_id: i64,
    author_id: i64,
    created: PrimitiveDateTime,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment::new(
            CommentId::new(row.id),
            CommentText::new(row.text),
            ItemId::new(row.item_id),
            UserId::new(row.author_id),
            CreatedAt::new(row.created),
        )
    }
}

pub(in crate::database) struct PgCommentInternal;

impl PgCommentInternal {
    async fn find_by_item(
        con: &mut PgConnection,
        item_id: &ItemId,
    ) -> error_stack::Result<Vec<Comment>, KernelError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            // language=postgresql
            r#"
            SELECT id, text, item_id, author_id, created
            FROM comments
            WHERE item_id = $1
            ORDER BY created
            "#,
        )
        .bind(item_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        comment: &CommentDraft,
    ) -> error_stack::Result<Comment, KernelError> {
        let row = sqlx::query_as::<_, CommentRow>(
            // language=postgresql
            r#"
            INSERT INTO comments (text, item_id, author_id, created)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text, item_id, author_id, created
            "#,
        )
        .bind(comment.text().as_ref())
        .bind(comment.item_id().as_ref())
        .bind(comment.author_id().as_ref())
        .bind(comment.created().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Comment::from(row))
    }
}
