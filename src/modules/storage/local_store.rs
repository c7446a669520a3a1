use std::path::PathBuf;

use async_trait::async_trait;

use super::{StorageBackend, StorageError};
use crate::features::reports::models::{Report, ReportFilter, ReportPatch};

/// File-backed store holding the whole report collection as one serialized
/// JSON array. Every operation reads the collection, mutates it in memory
/// and rewrites the file; there is no cross-operation isolation, so
/// concurrent writers can lose updates. Acceptable for the low-volume
/// single-host deployment this backend targets.
pub struct LocalStore {
    path: PathBuf,
    quota_bytes: usize,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>, quota_bytes: usize) -> Self {
        Self {
            path: path.into(),
            quota_bytes,
        }
    }

    async fn load(&self) -> Result<Vec<Report>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, reports: &[Report]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(reports)?;
        if bytes.len() > self.quota_bytes {
            tracing::warn!(
                "local store quota exceeded: {} bytes > {} byte quota",
                bytes.len(),
                self.quota_bytes
            );
            return Err(StorageError::QuotaExceeded);
        }

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for LocalStore {
    async fn put(&self, report: &Report) -> Result<(), StorageError> {
        let mut reports = self.load().await?;
        match reports.iter_mut().find(|r| r.id == report.id) {
            Some(slot) => *slot = report.clone(),
            None => reports.push(report.clone()),
        }
        self.persist(&reports).await
    }

    async fn get(&self, id: &str) -> Result<Option<Report>, StorageError> {
        let reports = self.load().await?;
        Ok(reports.into_iter().find(|r| r.id == id))
    }

    async fn query_all(&self, filter: &ReportFilter) -> Result<Vec<Report>, StorageError> {
        let mut reports = self.load().await?;
        reports.retain(|r| filter.matches(r));
        Ok(reports)
    }

    async fn update(&self, id: &str, patch: &ReportPatch) -> Result<Report, StorageError> {
        let mut reports = self.load().await?;
        let slot = reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        patch.apply(slot);
        let updated = slot.clone();
        self.persist(&reports).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportStatus;
    use crate::shared::test_helpers::sample_report;

    fn store(dir: &tempfile::TempDir, quota: usize) -> LocalStore {
        LocalStore::new(dir.path().join("reports.json"), quota)
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 1024 * 1024);
        let report = sample_report("ST-2026-1234");

        store.put(&report).await.unwrap();
        let loaded = store.get("ST-2026-1234").await.unwrap().unwrap();

        assert_eq!(loaded, report);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 1024 * 1024);

        assert!(store.get("ST-2026-0000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 1024 * 1024);
        let report = sample_report("ST-2026-1234");

        store.put(&report).await.unwrap();
        store.put(&report).await.unwrap();

        let all = store.query_all(&ReportFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], report);
    }

    #[tokio::test]
    async fn update_unknown_id_fails_and_leaves_store_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 1024 * 1024);
        let report = sample_report("ST-2026-1234");
        store.put(&report).await.unwrap();

        let patch = ReportPatch {
            status: Some(ReportStatus::Completed),
            ..Default::default()
        };
        let err = store.update("ST-2026-9999", &patch).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));

        let untouched = store.get("ST-2026-1234").await.unwrap().unwrap();
        assert_eq!(untouched, report);
    }

    #[tokio::test]
    async fn update_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 1024 * 1024);
        store.put(&sample_report("ST-2026-1234")).await.unwrap();

        let patch = ReportPatch {
            status: Some(ReportStatus::Completed),
            after_images: Some(vec!["img1".to_string()]),
            ..Default::default()
        };
        let once = store.update("ST-2026-1234", &patch).await.unwrap();
        let twice = store.update("ST-2026-1234", &patch).await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(store.get("ST-2026-1234").await.unwrap().unwrap(), twice);
    }

    #[tokio::test]
    async fn persisted_documents_use_camel_case_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.json");
        let store = LocalStore::new(&path, 1024 * 1024);
        store.put(&sample_report("ST-2026-1234")).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"createdAt\""));
        assert!(raw.contains("\"timeline\""));
        assert!(!raw.contains("\"created_at\""));
    }

    #[tokio::test]
    async fn write_over_quota_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 64);
        let mut report = sample_report("ST-2026-1234");
        report.images = vec!["x".repeat(256)];

        let err = store.put(&report).await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded));
        assert!(store.get("ST-2026-1234").await.unwrap().is_none());
    }
}
