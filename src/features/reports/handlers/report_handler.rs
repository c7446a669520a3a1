use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{
    CreateReportDto, ListReportsQuery, ReportResponseDto, UpdateReportStatusDto,
};
use crate::features::reports::services::ReportRepository;
use crate::shared::constants::MAX_REPORT_IMAGES;
use crate::shared::types::{ApiResponse, Meta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub repository: Arc<ReportRepository>,
}

/// Submit a new citizen report (public)
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid submission"),
        (status = 507, description = "Storage full")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(state): State<ReportState>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !dto.consent {
        return Err(AppError::Validation(
            "Consent is required to submit a report".to_string(),
        ));
    }
    if dto.images.len() > MAX_REPORT_IMAGES {
        return Err(AppError::Validation(format!(
            "At most {} images per report",
            MAX_REPORT_IMAGES
        )));
    }

    let report = state.repository.create(dto.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report.into()), None, None)),
    ))
}

/// List reports with optional status/category filters (admin)
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Matching reports, newest first", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("basic_auth" = [])),
    tag = "admin"
)]
pub async fn list_reports(
    State(state): State<ReportState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = state.repository.list(&query.into()).await?;
    let total = reports.len() as i64;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get report by tracking ID (admin; no phone gate)
#[utoipa::path(
    get,
    path = "/api/admin/reports/{id}",
    params(
        ("id" = String, Path, description = "Tracking ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("basic_auth" = [])),
    tag = "admin"
)]
pub async fn get_report(
    State(state): State<ReportState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state
        .repository
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Update report status (admin)
#[utoipa::path(
    patch,
    path = "/api/admin/reports/{id}/status",
    params(
        ("id" = String, Path, description = "Tracking ID")
    ),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("basic_auth" = [])),
    tag = "admin"
)]
pub async fn update_report_status(
    State(state): State<ReportState>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state
        .repository
        .update_status(&id, dto.status, &dto.message, dto.after_images)
        .await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}
