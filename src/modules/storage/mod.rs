//! Storage backend abstraction for report documents
//!
//! One trait, two interchangeable implementations: `LocalStore` keeps the
//! whole collection serialized in a single JSON file, `DocumentStore` keeps
//! one PostgreSQL row per report. The repository is the only consumer and
//! owns the caller-visible ordering and error contracts.

mod document_store;
mod local_store;

pub use document_store::DocumentStore;
pub use local_store::LocalStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::features::reports::models::{Report, ReportFilter, ReportPatch};

#[derive(Debug, Error)]
pub enum StorageError {
    /// Write rejected because the store is at capacity
    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("no record with id {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key/document store contract consumed by the report repository.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Upsert by tracking ID. Idempotent: storing the same record twice
    /// leaves the same stored state as storing it once.
    async fn put(&self, report: &Report) -> Result<(), StorageError>;

    /// Exact-match lookup; an unknown ID is `None`, not an error.
    async fn get(&self, id: &str) -> Result<Option<Report>, StorageError>;

    /// All records matching the filter conjunction. Ordering is
    /// backend-specific; callers must not rely on it.
    async fn query_all(&self, filter: &ReportFilter) -> Result<Vec<Report>, StorageError>;

    /// Merge the set fields of `patch` into the stored record and return the
    /// result. Fails with `NotFound` if the ID is absent.
    async fn update(&self, id: &str, patch: &ReportPatch) -> Result<Report, StorageError>;
}
