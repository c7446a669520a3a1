#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use chrono::Utc;

#[cfg(test)]
use crate::features::reports::models::{
    CreateReport, Report, ReportCategory, ReportStatus, TimelineEntry,
};
#[cfg(test)]
use crate::features::reports::services::ReportRepository;
#[cfg(test)]
use crate::modules::storage::LocalStore;
#[cfg(test)]
use crate::shared::constants::REPORT_RECEIVED_MESSAGE;

/// Repository over a temp-dir LocalStore. Keep the TempDir alive for the
/// duration of the test, dropping it deletes the backing file.
#[cfg(test)]
pub fn temp_repository() -> (ReportRepository, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path().join("reports.json"), 5 * 1024 * 1024);
    (ReportRepository::new(Arc::new(store)), dir)
}

#[cfg(test)]
pub fn sample_input() -> CreateReport {
    CreateReport {
        category: ReportCategory::Road,
        description: "ถนนเป็นหลุมบ่อหน้าปากซอย สัญจรลำบาก".to_string(),
        location: "ปากซอยศรีบุญเรือง 3".to_string(),
        district: "เมืองสมุทรปราการ".to_string(),
        subdistrict: "ปากน้ำ".to_string(),
        name: "สมชาย ใจดี".to_string(),
        phone: "0812345678".to_string(),
        images: Vec::new(),
    }
}

#[cfg(test)]
pub fn sample_report(id: &str) -> Report {
    let now = Utc::now();
    let input = sample_input();
    Report {
        id: id.to_string(),
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
    }
}
