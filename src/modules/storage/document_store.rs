use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use super::{StorageBackend, StorageError};
use crate::features::reports::models::{Report, ReportFilter, ReportPatch};

/// PostgreSQL-backed document store: one row per report keyed by tracking
/// ID, the full record as a JSONB document. The `status`, `category` and
/// `created_at` columns mirror fields inside the document so filtering and
/// ordering happen server-side.
///
/// Runtime-bound queries rather than the compile-time checked macros: the
/// document column is dynamic JSONB, not a static row shape.
pub struct DocumentStore {
    pool: PgPool,
}

impl DocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode(row: &sqlx::postgres::PgRow) -> Result<Report, StorageError> {
        let doc: serde_json::Value = row.try_get("doc")?;
        Ok(serde_json::from_value(doc)?)
    }
}

#[async_trait]
impl StorageBackend for DocumentStore {
    async fn put(&self, report: &Report) -> Result<(), StorageError> {
        let doc = serde_json::to_value(report)?;

        sqlx::query(
            r#"
            INSERT INTO reports (id, status, category, created_at, doc)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET status = EXCLUDED.status,
                category = EXCLUDED.category,
                doc = EXCLUDED.doc
            "#,
        )
        .bind(&report.id)
        .bind(report.status.to_string())
        .bind(report.category.to_string())
        .bind(report.created_at)
        .bind(&doc)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to put report {}: {:?}", report.id, e);
            StorageError::Database(e)
        })?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Report>, StorageError> {
        let row = sqlx::query("SELECT doc FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get report {}: {:?}", id, e);
                StorageError::Database(e)
            })?;

        match row {
            Some(row) => Ok(Some(Self::decode(&row)?)),
            None => Ok(None),
        }
    }

    async fn query_all(&self, filter: &ReportFilter) -> Result<Vec<Report>, StorageError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT doc FROM reports");

        let mut has_where = false;
        if let Some(status) = filter.status {
            query.push(" WHERE status = ");
            query.push_bind(status.to_string());
            has_where = true;
        }
        if let Some(category) = filter.category {
            query.push(if has_where {
                " AND category = "
            } else {
                " WHERE category = "
            });
            query.push_bind(category.to_string());
        }
        query.push(" ORDER BY created_at DESC");

        let rows = query.build().fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to query reports: {:?}", e);
            StorageError::Database(e)
        })?;

        let mut reports = Vec::with_capacity(rows.len());
        for row in &rows {
            reports.push(Self::decode(row)?);
        }
        Ok(reports)
    }

    async fn update(&self, id: &str, patch: &ReportPatch) -> Result<Report, StorageError> {
        // Read-merge-write without a transaction: concurrent updates to the
        // same document can lose fields, an accepted limitation of the
        // low-concurrency workload.
        let mut report = self
            .get(id)
            .await?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        patch.apply(&mut report);

        let doc = serde_json::to_value(&report)?;
        let result = sqlx::query("UPDATE reports SET status = $2, doc = $3 WHERE id = $1")
            .bind(id)
            .bind(report.status.to_string())
            .bind(&doc)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update report {}: {:?}", id, e);
                StorageError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }

        Ok(report)
    }
}
