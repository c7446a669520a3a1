use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Report lifecycle status.
///
/// `accepted` marks a complaint an administrator has reviewed and taken up;
/// every transition is made explicitly through the status update operation,
/// there is no automatic progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
}

impl ReportStatus {
    /// Thai display label shown by the tracker
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "รอตรวจสอบ",
            ReportStatus::Accepted => "รับเรื่องแล้ว",
            ReportStatus::InProgress => "กำลังดำเนินการ",
            ReportStatus::Completed => "เสร็จสิ้น",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::Accepted => write!(f, "accepted"),
            ReportStatus::InProgress => write!(f, "in_progress"),
            ReportStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Complaint category. A fixed set, each with a fixed display label/icon pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    Road,
    Flood,
    Electric,
    Trash,
    Safety,
    Other,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 6] = [
        ReportCategory::Road,
        ReportCategory::Flood,
        ReportCategory::Electric,
        ReportCategory::Trash,
        ReportCategory::Safety,
        ReportCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportCategory::Road => "ถนน/ทางเท้า",
            ReportCategory::Flood => "น้ำท่วม/ระบายน้ำ",
            ReportCategory::Electric => "ไฟฟ้า/แสงสว่าง",
            ReportCategory::Trash => "ขยะ/สิ่งแวดล้อม",
            ReportCategory::Safety => "ความปลอดภัย",
            ReportCategory::Other => "อื่นๆ",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ReportCategory::Road => "🛣️",
            ReportCategory::Flood => "💧",
            ReportCategory::Electric => "💡",
            ReportCategory::Trash => "🗑️",
            ReportCategory::Safety => "🛡️",
            ReportCategory::Other => "📋",
        }
    }
}

impl std::fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportCategory::Road => write!(f, "road"),
            ReportCategory::Flood => write!(f, "flood"),
            ReportCategory::Electric => write!(f, "electric"),
            ReportCategory::Trash => write!(f, "trash"),
            ReportCategory::Safety => write!(f, "safety"),
            ReportCategory::Other => write!(f, "other"),
        }
    }
}

/// One status-change event. The timeline is newest-first and append-only;
/// entries are never mutated or removed once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub status: ReportStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_images: Option<Vec<String>>,
}

/// Citizen satisfaction rating, recorded once after completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub score: u8,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

/// A citizen complaint record, serialized as one camelCase JSON document per
/// report — the persisted layout both storage backends share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Tracking ID, assigned exactly once at creation
    pub id: String,
    pub category: ReportCategory,
    pub description: String,
    pub location: String,
    pub district: String,
    pub subdistrict: String,
    pub name: String,
    /// Doubles as the tracking credential: lookups must present it verbatim
    pub phone: String,
    pub images: Vec<String>,
    /// Always equals the status of the head timeline entry
    pub status: ReportStatus,
    /// Newest-first; holds at least the creation event
    pub timeline: Vec<TimelineEntry>,
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_images: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new report. An unvalidated field bag; validation
/// happens at the DTO boundary.
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub category: ReportCategory,
    pub description: String,
    pub location: String,
    pub district: String,
    pub subdistrict: String,
    pub name: String,
    pub phone: String,
    pub images: Vec<String>,
}

/// Conjunction of equality predicates for listing reports. An absent field
/// imposes no restriction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        self.status.is_none_or(|s| report.status == s)
            && self.category.is_none_or(|c| report.category == c)
    }
}

/// Partial record merged into a stored report by `StorageBackend::update`.
/// `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ReportPatch {
    pub status: Option<ReportStatus>,
    pub timeline: Option<Vec<TimelineEntry>>,
    pub after_images: Option<Vec<String>>,
    pub rating: Option<Rating>,
}

impl ReportPatch {
    pub fn apply(&self, report: &mut Report) {
        if let Some(status) = self.status {
            report.status = status;
        }
        if let Some(timeline) = &self.timeline {
            report.timeline = timeline.clone();
        }
        if let Some(after_images) = &self.after_images {
            report.after_images = Some(after_images.clone());
        }
        if let Some(rating) = &self.rating {
            report.rating = Some(rating.clone());
        }
    }
}
