use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur when reading or writing records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A document as held by the store, with its store-assigned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub body: Value,
}

/// Document store holding seekers, candidates and saved recommendations
///
/// Filters are JSON objects; a record matches when every top-level field of
/// the filter equals the same field of the record. `{}` matches everything.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<StoredRecord>, StoreError>;

    /// Insert a document and return its new id
    async fn insert(&self, collection: &str, document: Value) -> Result<String, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Short backend name for health output
    fn backend(&self) -> &'static str;
}

/// Check that a filter is a JSON object and return its fields
pub fn filter_fields(filter: &Value) -> Result<&Map<String, Value>, StoreError> {
    filter
        .as_object()
        .ok_or_else(|| StoreError::InvalidInput(format!("filter must be a JSON object, got {}", filter)))
}

/// Top-level field equality
pub fn matches_filter(body: &Value, filter: &Map<String, Value>) -> bool {
    filter.iter().all(|(field, expected)| body.get(field) == Some(expected))
}

/// In-process store, used for development and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<StoredRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<StoredRecord>, StoreError> {
        let fields = filter_fields(filter)?;
        let collections = self.collections.read().await;

        let records = collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| matches_filter(&record.body, fields))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(records)
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        if !document.is_object() {
            return Err(StoreError::InvalidInput("document must be a JSON object".to_string()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(StoredRecord {
                id: id.clone(),
                body: document,
            });

        tracing::debug!("Inserted record {} into {}", id, collection);
        Ok(id)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
