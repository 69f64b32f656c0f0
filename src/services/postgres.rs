use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::config::DatabaseSettings;
use crate::services::store::{filter_fields, RecordStore, StoreError, StoredRecord};

/// PostgreSQL record store
///
/// Every collection lives in the single `documents` table as JSONB bodies.
/// Filters use JSONB containment, which is top-level equality for the
/// scalar-valued filters the repository issues.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL record store");

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(10),
            settings.min_connections.unwrap_or(1),
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(settings.idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<StoredRecord>, StoreError> {
        filter_fields(filter)?;

        let query = r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY created_at, id
        "#;

        let rows = sqlx::query(query)
            .bind(collection)
            .bind(Json(filter))
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| {
                let Json(body): Json<Value> = row.try_get("body")?;
                Ok(StoredRecord {
                    id: row.try_get("id")?,
                    body,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        tracing::debug!("Found {} records in {}", records.len(), collection);
        Ok(records)
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        if !document.is_object() {
            return Err(StoreError::InvalidInput("document must be a JSON object".to_string()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let query = r#"
            INSERT INTO documents (id, collection, body, created_at)
            VALUES ($1, $2, $3, NOW())
        "#;

        sqlx::query(query)
            .bind(&id)
            .bind(collection)
            .bind(Json(&document))
            .execute(&self.pool)
            .await?;

        tracing::debug!("Inserted record {} into {}", id, collection);
        Ok(id)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
