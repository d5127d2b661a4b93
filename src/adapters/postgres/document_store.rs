//! PostgreSQL implementation of DocumentStore.
//!
//! All collections share one `documents` table keyed by collection name,
//! with each document held in a JSONB `body`. Filters become containment
//! (`@>`) queries; unique keys are enforced by expression indexes created
//! in the embedded migrations. `commit` runs its batch in one transaction.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::Row;
use std::time::Duration;

use crate::ports::{
    Collection, Document, DocumentStore, Filter, FindOptions, StoreError, Write,
};

const INSERT_DOCUMENT: &str = "INSERT INTO documents (collection, body) VALUES ($1, $2)";

const UPDATE_DOCUMENT: &str = r#"
    UPDATE documents SET body = $3
    WHERE seq = (
        SELECT seq FROM documents
        WHERE collection = $1 AND body @> $2
        ORDER BY seq
        LIMIT 1
    )
"#;

/// PostgreSQL implementation of DocumentStore.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `url` and applies pending migrations.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .map_err(|e| StoreError::unavailable(format!("Failed to connect: {}", e)))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::unavailable(format!("Failed to run migrations: {}", e)))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        let key = document_key(&document);
        sqlx::query(INSERT_DOCUMENT)
            .bind(collection.name())
            .bind(Json(Value::Object(document)))
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, key, e))?;

        Ok(())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT body FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(collection.name())
        .bind(Json(filter.as_json()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable(format!("Failed to fetch document: {}", e)))?;

        row.map(row_to_document).transpose()
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let sql = find_query(options);
        let limit = options.limit.map(|l| l as i64);

        let mut query = sqlx::query(&sql)
            .bind(collection.name())
            .bind(Json(filter.as_json()))
            .bind(limit);
        if let Some(field) = &options.newest_first_by {
            query = query.bind(field.as_str());
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable(format!("Failed to query documents: {}", e)))?;

        rows.into_iter().map(row_to_document).collect()
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        document: Document,
    ) -> Result<bool, StoreError> {
        let key = document_key(&document);
        let result = sqlx::query(UPDATE_DOCUMENT)
            .bind(collection.name())
            .bind(Json(filter.as_json()))
            .bind(Json(Value::Object(document)))
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, key, e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::unavailable(format!("Failed to start transaction: {}", e)))?;

        // An early return drops `tx`, which rolls the batch back
        for write in writes {
            match write {
                Write::Insert {
                    collection,
                    document,
                } => {
                    let key = document_key(&document);
                    sqlx::query(INSERT_DOCUMENT)
                        .bind(collection.name())
                        .bind(Json(Value::Object(document)))
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| map_write_error(collection, key, e))?;
                }
                Write::UpdateOne {
                    collection,
                    filter,
                    document,
                } => {
                    let key = document_key(&document);
                    let result = sqlx::query(UPDATE_DOCUMENT)
                        .bind(collection.name())
                        .bind(Json(filter.as_json()))
                        .bind(Json(Value::Object(document)))
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| map_write_error(collection, key, e))?;

                    if result.rows_affected() == 0 {
                        return Err(StoreError::not_matched(collection, &filter));
                    }
                }
            }
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::unavailable(format!("Failed to commit transaction: {}", e)))?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable(format!("Ping failed: {}", e)))?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Builds the range query. `$3` is the limit (NULL means no limit) and `$4`
/// the sort field when one is requested.
fn find_query(options: &FindOptions) -> String {
    let order = if options.newest_first_by.is_some() {
        "ORDER BY (body->>$4)::timestamptz DESC NULLS LAST, seq DESC"
    } else {
        "ORDER BY seq"
    };
    format!(
        "SELECT body FROM documents WHERE collection = $1 AND body @> $2 {} LIMIT $3",
        order
    )
}

fn document_key(document: &Document) -> String {
    match document.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => "<no id>".to_string(),
    }
}

fn map_write_error(collection: Collection, key: String, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::duplicate(collection, key)
        }
        e => StoreError::unavailable(format!("Failed to write document: {}", e)),
    }
}

fn row_to_document(row: sqlx::postgres::PgRow) -> Result<Document, StoreError> {
    let Json(body): Json<Value> = row
        .try_get("body")
        .map_err(|e| StoreError::serialization(format!("Invalid body column: {}", e)))?;

    match body {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::serialization(format!(
            "Expected a JSON object, found {}",
            other
        ))),
    }
}
