use sqlx::PgConnection;
use time::PrimitiveDateTime;

use kernel::interface::query::ItemRequestQuery;
use kernel::interface::update::ItemRequestModifier;
use kernel::prelude::entity::{
    CreatedAt, ItemRequest, ItemRequestDescription, ItemRequestDraft, ItemRequestId, SelectLimit,
    SelectOffset, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresItemRequestRepository;

#[async_trait::async_trait]
impl ItemRequestQuery for PostgresItemRequestRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &ItemRequestId,
    ) -> error_stack::Result<Option<ItemRequest>, KernelError> {
        PgItemRequestInternal::find_by_id(con, id).await
    }

    async fn find_by_requestor(
        &self,
        con: &mut PostgresTransaction,
        requestor_id: &UserId,
    ) -> error_stack::Result<Vec<ItemRequest>, KernelError> {
        PgItemRequestInternal::find_by_requestor(con, requestor_id).await
    }

    async fn find_by_other_requestors(
        &self,
        con: &mut PostgresTransaction,
        requestor_id: &UserId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<ItemRequest>, KernelError> {
        PgItemRequestInternal::find_by_other_requestors(con, requestor_id, limit, offset).await
    }
}

#[async_trait::async_trait]
impl ItemRequestModifier for PostgresItemRequestRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        request: &ItemRequestDraft,
    ) -> error_stack::Result<ItemRequest, KernelError> {
        PgItemRequestInternal::create(con, request).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        request_id: &ItemRequestId,
    ) -> error_stack::Result<(), KernelError> {
        PgItemRequestInternal::delete(con, request_id).await
    }
}

#[derive(sqlx::FromRow)]
struct ItemRequestRow {
    id: i64,
    description: String,
    requestor_id: i64,
    created: PrimitiveDateTime,
}

impl From<ItemRequestRow> for ItemRequest {
    fn from(row: ItemRequestRow) -> Self {
        ItemRequest::new(
            ItemRequestId::new(row.id),
            ItemRequestDescription::new(row.description),
            UserId::new(row.requestor_id),
            CreatedAt::new(row.created),
        )
    }
}

pub(in crate::database) struct PgItemRequestInternal;

impl PgItemRequestInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &ItemRequestId,
    ) -> error_stack::Result<Option<ItemRequest>, KernelError> {
        let row = sqlx::query_as::<_, ItemRequestRow>(
            // language=postgresql
            r#"
            SELECT id, description, requestor_id, created
            FROM requests
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(ItemRequest::from))
    }

    async fn find_by_requestor(
        con: &mut PgConnection,
        requestor_id: &UserId,
    ) -> error_stack::Result<Vec<ItemRequest>, KernelError> {
        let rows = sqlx::query_as::<_, ItemRequestRow>(
            // language=postgresql
            r#"
            SELECT id, description, requestor_id, created
            FROM requests
            WHERE requestor_id = $1
            ORDER BY created
            "#,
        )
        .bind(requestor_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(ItemRequest::from).collect())
    }

    async fn find_by_other_requestors(
        con: &mut PgConnection,
        requestor_id: &UserId,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<ItemRequest>, KernelError> {
        let rows = sqlx::query_as::<_, ItemRequestRow>(
            // language=postgresql
            r#"
            SELECT id, description, requestor_id, created
            FROM requests
            WHERE requestor_id <> $1
            ORDER BY created DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(requestor_id.as_ref())
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(ItemRequest::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        request: &ItemRequestDraft,
    ) -> error_stack::Result<ItemRequest, KernelError> {
        let row = sqlx::query_as::<_, ItemRequestRow>(
            // language=postgresql
            r#"
            INSERT INTO requests (description, requestor_id, created)
            VALUES ($1, $2, $3)
            RETURNING id, description, requestor_id, created
            "#,
        )
        .bind(request.description().as_ref())
        .bind(request.requestor_id().as_ref())
        .bind(request.created().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(ItemRequest::from(row))
    }

    async fn delete(
        con: &mut PgConnection,
        request_id: &ItemRequestId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM requests
            WHERE id = $1
            "#,
        )
        .bind(request_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
