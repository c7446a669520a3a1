use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::{
    CreateReport, Rating, Report, ReportCategory, ReportFilter, ReportStatus, TimelineEntry,
};
use crate::shared::validation::PHONE_REGEX;

/// Citizen submission payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    pub category: ReportCategory,

    #[validate(length(min = 10, max = 2000, message = "Description must be 10-2000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 500, message = "Location must be 1-500 characters"))]
    pub location: String,

    #[validate(length(min = 1, max = 100, message = "District must be 1-100 characters"))]
    pub district: String,

    #[validate(length(min = 1, max = 100, message = "Subdistrict must be 1-100 characters"))]
    pub subdistrict: String,

    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid Thai phone number"))]
    pub phone: String,

    /// Embedded image payloads, at most 5
    #[serde(default)]
    pub images: Vec<String>,

    /// Reporter consented to being contacted for follow-up
    pub consent: bool,
}

impl From<CreateReportDto> for CreateReport {
    fn from(dto: CreateReportDto) -> Self {
        Self {
            category: dto.category,
            description: dto.description,
            location: dto.location,
            district: dto.district,
            subdistrict: dto.subdistrict,
            name: dto.name,
            phone: dto.phone,
            images: dto.images,
        }
    }
}

/// Admin status update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportStatusDto {
    pub status: ReportStatus,

    #[validate(length(min = 1, max = 500, message = "Message must be 1-500 characters"))]
    pub message: String,

    /// Resolution evidence, replaces any prior value when present
    #[serde(default)]
    pub after_images: Option<Vec<String>>,
}

/// Query params for the admin report list
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct ListReportsQuery {
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
}

impl From<ListReportsQuery> for ReportFilter {
    fn from(q: ListReportsQuery) -> Self {
        Self {
            status: q.status,
            category: q.category,
        }
    }
}

/// Response DTO for a full report record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: String,
    pub category: ReportCategory,
    pub description: String,
    pub location: String,
    pub district: String,
    pub subdistrict: String,
    pub name: String,
    pub phone: String,
    pub images: Vec<String>,
    pub status: ReportStatus,
    pub timeline: Vec<TimelineEntry>,
    pub rating: Option<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_images: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            category: r.category,
            description: r.description,
            location: r.location,
            district: r.district,
            subdistrict: r.subdistrict,
            name: r.name,
            phone: r.phone,
            images: r.images,
            status: r.status,
            timeline: r.timeline,
            rating: r.rating,
            after_images: r.after_images,
            created_at: r.created_at,
        }
    }
}
