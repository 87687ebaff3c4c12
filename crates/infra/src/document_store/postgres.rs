//! Postgres-backed document store.
//!
//! All collections share one JSONB table:
//!
//! ```sql
//! CREATE TABLE documents (
//!     collection TEXT NOT NULL,
//!     id         TEXT NOT NULL,
//!     body       JSONB NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     PRIMARY KEY (collection, id)
//! );
//! ```
//!
//! `upsert` is a single `INSERT .. ON CONFLICT DO UPDATE`, so concurrent
//! writers to the same key resolve as last-write-wins inside Postgres.

use std::fmt::Display;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::instrument;

use super::r#trait::{DocumentStore, DocumentStoreError};

pub const EMPLOYEES: &str = "employees";
pub const COMPENSATIONS: &str = "compensations";

/// Open a connection pool.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, DocumentStoreError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))
}

/// Create the `documents` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DocumentStoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id         TEXT NOT NULL,
            body       JSONB NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            PRIMARY KEY (collection, id)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    Ok(())
}

/// One collection of JSON documents of type `V`, keyed by the key's
/// `Display` form.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore<V> {
    pool: PgPool,
    collection: &'static str,
    _value: PhantomData<fn() -> V>,
}

impl<V> PostgresDocumentStore<V> {
    pub fn new(pool: PgPool, collection: &'static str) -> Self {
        Self {
            pool,
            collection,
            _value: PhantomData,
        }
    }
}

fn decode<V: DeserializeOwned>(row: &sqlx::postgres::PgRow) -> Result<V, DocumentStoreError> {
    let body: serde_json::Value = row
        .try_get("body")
        .map_err(|e| DocumentStoreError::Backend(format!("failed to read body column: {e}")))?;
    serde_json::from_value(body).map_err(|e| DocumentStoreError::Serialization(e.to_string()))
}

#[async_trait::async_trait]
impl<K, V> DocumentStore<K, V> for PostgresDocumentStore<V>
where
    K: Display + Send + Sync + 'static,
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    #[instrument(skip(self, key), fields(collection = self.collection, id = %key), err)]
    async fn get(&self, key: &K) -> Result<Option<V>, DocumentStoreError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND id = $2")
            .bind(self.collection)
            .bind(key.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref().map(decode::<V>).transpose()
    }

    #[instrument(skip(self, key, value), fields(collection = self.collection, id = %key), err)]
    async fn upsert(&self, key: K, value: V) -> Result<(), DocumentStoreError> {
        let body = serde_json::to_value(&value)
            .map_err(|e| DocumentStoreError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, id)
            DO UPDATE SET body = EXCLUDED.body, updated_at = now()
            "#,
        )
        .bind(self.collection)
        .bind(key.to_string())
        .bind(body)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("upsert", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(collection = self.collection), err)]
    async fn list(&self) -> Result<Vec<V>, DocumentStoreError> {
        let rows = sqlx::query("SELECT body FROM documents WHERE collection = $1 ORDER BY id")
            .bind(self.collection)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(decode::<V>).collect()
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> DocumentStoreError {
    match err {
        sqlx::Error::Database(db_err) => DocumentStoreError::Backend(format!(
            "database error in {}: {} (code {})",
            operation,
            db_err.message(),
            db_err.code().as_deref().unwrap_or("none")
        )),
        sqlx::Error::PoolClosed => {
            DocumentStoreError::Backend(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            DocumentStoreError::Serialization(format!("decode error in {}: {}", operation, err))
        }
        _ => DocumentStoreError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}
