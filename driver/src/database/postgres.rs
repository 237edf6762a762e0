use std::ops::{Deref, DerefMut};

use error_stack::Report;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::{ConvertError, DriverError};

pub use self::{booking::*, comment::*, item::*, request::*, user::*};

mod booking;
mod comment;
mod item;
mod request;
mod user;

static DATABASE_URL: &str = "DATABASE_URL";

const SERIALIZATION_FAILURE: &str = "40001";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    /// Connects to `DATABASE_URL` and brings the schema up to date.
    pub async fn new() -> error_stack::Result<Self, DriverError> {
        let url = env(DATABASE_URL)?;
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(&url)
            .await
            .map_err(DriverError::from)?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(DriverError::from)?;
        tracing::info!("database schema is up to date");
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<PostgresTransaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

/// An open database transaction. Dropping it without committing rolls it back.
pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl<T: 'static> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(database)
                    if database.code().as_deref() == Some(SERIALIZATION_FAILURE) =>
                {
                    KernelError::Concurrency
                }
                Error::Database(database) if database.is_unique_violation() => {
                    KernelError::Conflict
                }
                Error::Database(database) if database.is_foreign_key_violation() => {
                    KernelError::NotFound
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}
