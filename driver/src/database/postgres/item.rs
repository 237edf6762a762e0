use sqlx::PgConnection;

use kernel::interface::query::ItemQuery;
use kernel::interface::update::ItemModifier;
use kernel::prelude::entity::{
    Item, ItemAvailable, ItemDescription, ItemDraft, ItemId, ItemName, ItemRequestId, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresItemRepository;

#[async_trait::async_trait]
impl ItemQuery for PostgresItemRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &ItemId,
    ) -> error_stack::Result<Option<Item>, KernelError> {
        PgItemInternal::find_by_id(con, id).await
    }

    async fn find_by_owner(
        &self,
        con: &mut PostgresTransaction,
        owner_id: &UserId,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        PgItemInternal::find_by_owner(con, owner_id).await
    }

    async fn search(
        &self,
        con: &mut PostgresTransaction,
        text: &str,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        PgItemInternal::search(con, text).await
    }

    async fn find_by_request(
        &self,
        con: &mut PostgresTransaction,
        request_id: &ItemRequestId,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        PgItemInternal::find_by_request(con, request_id).await
    }
}

#[async_trait::async_trait]
impl ItemModifier for PostgresItemRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        item: &ItemDraft,
    ) -> error_stack::Result<Item, KernelError> {
        PgItemInternal::create(con, item).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        item: &Item,
    ) -> error_stack::Result<(), KernelError> {
        PgItemInternal::update(con, item).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        item_id: &ItemId,
    ) -> error_stack::Result<(), KernelError> {
        PgItemInternal::delete(con, item_id).await
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: String,
    available: bool,
    owner_id: i64,
    request_id: Option<i64>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item::new(
            ItemId::new(row.id),
            ItemName::new(row.name),
            ItemDescription::new(row.description),
            ItemAvailable::new(row.available),
            UserId::new(row.owner_id),
            row.request_id.map(ItemRequestId::new),
        )
    }
}

pub(in crate::database) struct PgItemInternal;

impl PgItemInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &ItemId,
    ) -> error_stack::Result<Option<Item>, KernelError> {
        let row = sqlx::query_as::<_, ItemRow>(
            // language=postgresql
            r#"
            SELECT id, name, description, available, owner_id, request_id
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Item::from))
    }

    async fn find_by_owner(
        con: &mut PgConnection,
        owner_id: &UserId,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            // language=postgresql
            r#"
            SELECT id, name, description, available, owner_id, request_id
            FROM items
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn search(con: &mut PgConnection, text: &str) -> error_stack::Result<Vec<Item>, KernelError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            // language=postgresql
            r#"
            SELECT id, name, description, available, owner_id, request_id
            FROM items
            WHERE available
              AND (strpos(lower(name), lower($1)) > 0 OR strpos(lower(description), lower($1)) > 0)
            ORDER BY id
            "#,
        )
        .bind(text)
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_by_request(
        con: &mut PgConnection,
        request_id: &ItemRequestId,
    ) -> error_stack::Result<Vec<Item>, KernelError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            // language=postgresql
            r#"
            SELECT id, name, description, available, owner_id, request_id
            FROM items
            WHERE request_id = $1
            ORDER BY id
            "#,
        )
        .bind(request_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn create(con: &mut PgConnection, item: &ItemDraft) -> error_stack::Result<Item, KernelError> {
        let row = sqlx::query_as::<_, ItemRow>(
            // language=postgresql
            r#"
            INSERT INTO items (name, description, available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, available, owner_id, request_id
            "#,
        )
        .bind(item.name().as_ref())
        .bind(item.description().as_ref())
        .bind(item.available().as_ref())
        .bind(item.owner_id().as_ref())
        .bind(item.request_id().map(|id| *id.as_ref()))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Item::from(row))
    }

    async fn update(con: &mut PgConnection, item: &Item) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE items
            SET name = $2, description = $3, available = $4
            WHERE id = $1
            "#,
        )
        .bind(item.id().as_ref())
        .bind(item.name().as_ref())
        .bind(item.description().as_ref())
        .bind(item.available().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, item_id: &ItemId) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM items
            WHERE id = $1
            "#,
        )
        .bind(item_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
