use std::sync::Arc;

use chrono::{Datelike, Utc};
use rand::Rng;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    CreateReport, Rating, Report, ReportFilter, ReportPatch, ReportStatus, TimelineEntry,
};
use crate::modules::storage::{StorageBackend, StorageError};
use crate::shared::constants::REPORT_RECEIVED_MESSAGE;

/// Attempts to draw an unused tracking ID before giving up. The 4-digit
/// random component gives 9000 IDs per year; a handful of redraws covers a
/// low-volume municipal deployment comfortably.
const TRACKING_ID_ATTEMPTS: usize = 8;

/// Sole owner of report-shape invariants: ID assignment, timeline append
/// semantics and the rating rules. Translates every operation into calls on
/// the injected storage backend.
pub struct ReportRepository {
    backend: Arc<dyn StorageBackend>,
}

impl ReportRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Tracking ID in format: ST-YYYY-NNNN
    fn generate_tracking_id() -> String {
        let year = Utc::now().year();
        let number = rand::thread_rng().gen_range(1000..10000);
        format!("ST-{}-{}", year, number)
    }

    async fn allocate_tracking_id(&self) -> Result<String> {
        for _ in 0..TRACKING_ID_ATTEMPTS {
            let id = Self::generate_tracking_id();
            if self.backend.get(&id).await?.is_none() {
                return Ok(id);
            }
            tracing::debug!("Tracking id {} already taken, redrawing", id);
        }
        Err(AppError::Internal(
            "Could not allocate an unused tracking id".to_string(),
        ))
    }

    /// Create a new report with a fresh tracking ID, `pending` status and a
    /// single-entry timeline, then return the stored record.
    ///
    /// A quota-exceeded write is retried exactly once with the image
    /// payloads stripped; a second failure is terminal for the submission.
    pub async fn create(&self, input: CreateReport) -> Result<Report> {
        let id = self.allocate_tracking_id().await?;
        let now = Utc::now();

        let mut report = Report {
            id,
            category: input.category,
            description: input.description,
            location: input.location,
            district: input.district,
            subdistrict: input.subdistrict,
            name: input.name,
            phone: input.phone,
            images: input.images,
            status: ReportStatus::Pending,
            timeline: vec![TimelineEntry {
                status: ReportStatus::Pending,
                message: REPORT_RECEIVED_MESSAGE.to_string(),
                timestamp: now,
                after_images: None,
            }],
            rating: None,
            after_images: None,
            created_at: now,
        };

        match self.backend.put(&report).await {
            Ok(()) => {}
            Err(StorageError::QuotaExceeded) => {
                tracing::warn!(
                    "Storage full creating report {}, retrying without images",
                    report.id
                );
                report.images.clear();
                self.backend.put(&report).await?;
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!("Created report: {}", report.id);
        Ok(report)
    }

    /// Exact-match lookup. An unknown ID is `None`, never an error.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Report>> {
        Ok(self.backend.get(id).await?)
    }

    /// Matching reports, newest first. The sort here makes the ordering
    /// guarantee backend-independent. Backend failures propagate.
    pub async fn list(&self, filter: &ReportFilter) -> Result<Vec<Report>> {
        let mut reports = self.backend.query_all(filter).await?;
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    /// Prepend a timeline entry and set the new status. The only mutation
    /// path for `status`/`timeline`; prior entries are retained untouched.
    /// When `after_images` is given it replaces any prior value.
    pub async fn update_status(
        &self,
        id: &str,
        status: ReportStatus,
        message: &str,
        after_images: Option<Vec<String>>,
    ) -> Result<Report> {
        let report = self
            .backend
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        let mut timeline = Vec::with_capacity(report.timeline.len() + 1);
        timeline.push(TimelineEntry {
            status,
            message: message.to_string(),
            timestamp: Utc::now(),
            after_images: after_images.clone(),
        });
        timeline.extend(report.timeline);

        let patch = ReportPatch {
            status: Some(status),
            timeline: Some(timeline),
            after_images,
            rating: None,
        };
        let updated = self.backend.update(id, &patch).await?;

        tracing::info!("Report {} status set to {}", id, status);
        Ok(updated)
    }

    /// Record the citizen rating. Requires a completed report and is
    /// at-most-once; violations are conflicts, not overwrites.
    pub async fn submit_rating(&self, id: &str, score: u8, comment: &str) -> Result<Report> {
        let report = self
            .backend
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        if report.status != ReportStatus::Completed {
            return Err(AppError::Conflict(
                "Report must be completed before it can be rated".to_string(),
            ));
        }
        if report.rating.is_some() {
            return Err(AppError::Conflict(format!(
                "Report {} has already been rated",
                id
            )));
        }

        let patch = ReportPatch {
            rating: Some(Rating {
                score,
                comment: comment.to_string(),
                timestamp: Utc::now(),
            }),
            ..Default::default()
        };
        let updated = self.backend.update(id, &patch).await?;

        tracing::info!("Report {} rated {}/5", id, score);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportCategory;
    use crate::shared::test_helpers::{sample_input, temp_repository};
    use crate::shared::validation::TRACKING_ID_REGEX;
    use std::collections::HashSet;

    #[tokio::test]
    async fn create_returns_pending_report_with_single_timeline_entry() {
        let (repo, _dir) = temp_repository();

        let report = repo.create(sample_input()).await.unwrap();

        assert!(TRACKING_ID_REGEX.is_match(&report.id));
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.timeline.len(), 1);
        assert_eq!(report.timeline[0].status, ReportStatus::Pending);
        assert_eq!(report.timeline[0].message, REPORT_RECEIVED_MESSAGE);
        assert!(report.rating.is_none());
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let (repo, _dir) = temp_repository();

        let mut seen = HashSet::new();
        for _ in 0..20 {
            let report = repo.create(sample_input()).await.unwrap();
            assert!(seen.insert(report.id));
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (repo, _dir) = temp_repository();

        let created = repo.create(sample_input()).await.unwrap();
        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none_not_an_error() {
        let (repo, _dir) = temp_repository();

        assert!(repo.get_by_id("ST-2026-0000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_status_prepends_entry_and_retains_history() {
        let (repo, _dir) = temp_repository();
        let created = repo.create(sample_input()).await.unwrap();
        let original_entry = created.timeline[0].clone();

        let updated = repo
            .update_status(&created.id, ReportStatus::Completed, "done", None)
            .await
            .unwrap();

        assert_eq!(updated.status, ReportStatus::Completed);
        assert_eq!(updated.timeline.len(), 2);
        assert_eq!(updated.timeline[0].status, ReportStatus::Completed);
        assert_eq!(updated.timeline[0].message, "done");
        assert_eq!(updated.timeline[1], original_entry);
    }

    #[tokio::test]
    async fn update_status_unknown_id_fails_and_leaves_backend_unmodified() {
        let (repo, _dir) = temp_repository();
        let created = repo.create(sample_input()).await.unwrap();

        let err = repo
            .update_status("ST-2026-0000", ReportStatus::Completed, "done", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let untouched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(untouched, created);
    }

    #[tokio::test]
    async fn list_filters_by_status_and_category() {
        let (repo, _dir) = temp_repository();

        let road = repo.create(sample_input()).await.unwrap();
        let mut flood_input = sample_input();
        flood_input.category = ReportCategory::Flood;
        let flood = repo.create(flood_input).await.unwrap();
        repo.update_status(&flood.id, ReportStatus::Completed, "done", None)
            .await
            .unwrap();

        let pending = repo
            .list(&ReportFilter {
                status: Some(ReportStatus::Pending),
                category: None,
            })
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, road.id);

        let pending_floods = repo
            .list(&ReportFilter {
                status: Some(ReportStatus::Pending),
                category: Some(ReportCategory::Flood),
            })
            .await
            .unwrap();
        assert!(pending_floods.is_empty());

        let completed_floods = repo
            .list(&ReportFilter {
                status: Some(ReportStatus::Completed),
                category: Some(ReportCategory::Flood),
            })
            .await
            .unwrap();
        assert_eq!(completed_floods.len(), 1);
        assert_eq!(completed_floods[0].id, flood.id);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let (repo, _dir) = temp_repository();

        let mut ids = Vec::new();
        for _ in 0..3 {
            // Distinct createdAt values for a deterministic order
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            ids.push(repo.create(sample_input()).await.unwrap().id);
        }

        let all = repo.list(&ReportFilter::default()).await.unwrap();
        let listed: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = ids.iter().rev().map(String::as_str).collect();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn quota_overrun_strips_images_and_retries_once() {
        let dir = tempfile::tempdir().unwrap();
        // Room for the bare record but not for the image payload
        let store = crate::modules::storage::LocalStore::new(dir.path().join("reports.json"), 2048);
        let repo = ReportRepository::new(Arc::new(store));

        let mut input = sample_input();
        input.images = vec!["x".repeat(4096)];

        let report = repo.create(input).await.unwrap();
        assert!(report.images.is_empty());

        let stored = repo.get_by_id(&report.id).await.unwrap().unwrap();
        assert!(stored.images.is_empty());
        assert_eq!(stored.status, ReportStatus::Pending);
    }

    #[tokio::test]
    async fn quota_overrun_without_headroom_is_terminal() {
        let dir = tempfile::tempdir().unwrap();
        // Too small even for a record without images
        let store = crate::modules::storage::LocalStore::new(dir.path().join("reports.json"), 64);
        let repo = ReportRepository::new(Arc::new(store));

        let err = repo.create(sample_input()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Storage(StorageError::QuotaExceeded)
        ));
    }

    #[tokio::test]
    async fn rating_requires_completed_status() {
        let (repo, _dir) = temp_repository();
        let created = repo.create(sample_input()).await.unwrap();

        let err = repo
            .submit_rating(&created.id, 5, "ดีมาก")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn rating_is_at_most_once() {
        let (repo, _dir) = temp_repository();
        let created = repo.create(sample_input()).await.unwrap();
        repo.update_status(&created.id, ReportStatus::Completed, "done", None)
            .await
            .unwrap();

        let rated = repo.submit_rating(&created.id, 4, "โอเค").await.unwrap();
        let rating = rated.rating.expect("rating should be set");
        assert_eq!(rating.score, 4);
        assert_eq!(rating.comment, "โอเค");

        let err = repo
            .submit_rating(&created.id, 5, "แก้ใจ")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn rating_unknown_id_is_not_found() {
        let (repo, _dir) = temp_repository();

        let err = repo.submit_rating("ST-2026-0000", 5, "").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn flood_report_lifecycle_with_resolution_evidence() {
        let (repo, _dir) = temp_repository();

        let mut input = sample_input();
        input.category = ReportCategory::Flood;
        input.description = "ท่อระบายน้ำอุดตัน".to_string();
        input.phone = "0899999999".to_string();

        let created = repo.create(input).await.unwrap();
        assert!(TRACKING_ID_REGEX.is_match(&created.id));
        assert_eq!(created.status, ReportStatus::Pending);

        let updated = repo
            .update_status(
                &created.id,
                ReportStatus::Completed,
                "ซ่อมเสร็จแล้ว",
                Some(vec!["img1".to_string()]),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ReportStatus::Completed);
        assert_eq!(updated.after_images, Some(vec!["img1".to_string()]));
        assert_eq!(updated.timeline.len(), 2);
        assert_eq!(updated.timeline[0].message, "ซ่อมเสร็จแล้ว");
    }
}
