use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::{Report, ReportCategory, ReportStatus};
use crate::shared::validation::PHONE_REGEX;

/// Query params for the tracking lookup
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct TrackQuery {
    /// Phone number the report was submitted with
    pub phone: String,
}

/// Citizen rating payload. Carries the phone credential like the lookup.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingDto {
    #[validate(regex(path = *PHONE_REGEX, message = "Invalid Thai phone number"))]
    pub phone: String,

    #[validate(range(min = 1, max = 5, message = "Score must be 1-5"))]
    pub score: u8,

    #[validate(length(max = 1000, message = "Comment must not exceed 1000 characters"))]
    #[serde(default)]
    pub comment: String,
}

/// Redacted summary for the public recent-reports strip. No contact info,
/// free text or images leaves this endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentReportDto {
    pub id: String,
    pub category: ReportCategory,
    pub status: ReportStatus,
    pub status_label: String,
    pub district: String,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for RecentReportDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            category: r.category,
            status: r.status,
            status_label: r.status.label().to_string(),
            district: r.district,
            created_at: r.created_at,
        }
    }
}
