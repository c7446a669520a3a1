use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::{Report, ReportFilter};
use crate::features::reports::services::ReportRepository;
use crate::features::tracking::dtos::{RecentReportDto, SubmitRatingDto, TrackQuery};
use crate::shared::constants::RECENT_REPORTS_LIMIT;
use crate::shared::types::ApiResponse;

/// State for tracking handlers
#[derive(Clone)]
pub struct TrackingState {
    pub repository: Arc<ReportRepository>,
}

/// Phone gate for citizen-facing access to a single report. A mismatching
/// phone produces the same outward not-found as an unknown tracking ID, so
/// probing an ID without the credential reveals nothing.
fn authorize(report: Option<Report>, phone: &str, id: &str) -> Result<Report> {
    match report {
        Some(r) if r.phone == phone => Ok(r),
        Some(_) => {
            tracing::debug!("Phone mismatch on tracking lookup for {}", id);
            Err(AppError::NotFound(format!("Report {} not found", id)))
        }
        None => Err(AppError::NotFound(format!("Report {} not found", id))),
    }
}

/// Track a report by ID and phone (public)
#[utoipa::path(
    get,
    path = "/api/track/{id}",
    params(
        ("id" = String, Path, description = "Tracking ID"),
        TrackQuery
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Unknown tracking ID or phone mismatch")
    ),
    tag = "tracking"
)]
pub async fn track_report(
    State(state): State<TrackingState>,
    Path(id): Path<String>,
    Query(query): Query<TrackQuery>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.repository.get_by_id(&id).await?;
    let report = authorize(report, &query.phone, &id)?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Rate a completed report (public, phone-gated)
#[utoipa::path(
    post,
    path = "/api/track/{id}/rating",
    params(
        ("id" = String, Path, description = "Tracking ID")
    ),
    request_body = SubmitRatingDto,
    responses(
        (status = 200, description = "Rating recorded", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Unknown tracking ID or phone mismatch"),
        (status = 409, description = "Report not completed or already rated")
    ),
    tag = "tracking"
)]
pub async fn submit_rating(
    State(state): State<TrackingState>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<SubmitRatingDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state.repository.get_by_id(&id).await?;
    authorize(report, &dto.phone, &id)?;

    let rated = state
        .repository
        .submit_rating(&id, dto.score, &dto.comment)
        .await?;
    Ok(Json(ApiResponse::success(Some(rated.into()), None, None)))
}

/// Latest reports as redacted summaries (public)
#[utoipa::path(
    get,
    path = "/api/track/recent",
    responses(
        (status = 200, description = "Recent reports", body = ApiResponse<Vec<RecentReportDto>>)
    ),
    tag = "tracking"
)]
pub async fn recent_reports(
    State(state): State<TrackingState>,
) -> Result<Json<ApiResponse<Vec<RecentReportDto>>>> {
    let mut reports = state.repository.list(&ReportFilter::default()).await?;
    reports.truncate(RECENT_REPORTS_LIMIT);
    let dtos: Vec<RecentReportDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportStatus;
    use crate::features::tracking::routes;
    use crate::shared::test_helpers::{sample_input, temp_repository};
    use axum_test::TestServer;
    use serde_json::json;

    fn test_server() -> (TestServer, Arc<ReportRepository>, tempfile::TempDir) {
        let (repo, dir) = temp_repository();
        let repository = Arc::new(repo);
        let app = routes::routes(Arc::clone(&repository));
        (TestServer::new(app).unwrap(), repository, dir)
    }

    #[tokio::test]
    async fn lookup_with_matching_phone_returns_report() {
        let (server, repo, _dir) = test_server();
        let report = repo.create(sample_input()).await.unwrap();

        let response = server
            .get(&format!("/api/track/{}", report.id))
            .add_query_param("phone", "0812345678")
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["id"], json!(report.id));
        assert_eq!(body["data"]["phone"], json!("0812345678"));
    }

    #[tokio::test]
    async fn phone_mismatch_is_indistinguishable_from_unknown_id() {
        let (server, repo, _dir) = test_server();
        let report = repo.create(sample_input()).await.unwrap();

        let mismatch = server
            .get(&format!("/api/track/{}", report.id))
            .add_query_param("phone", "0800000000")
            .await;
        let unknown = server
            .get("/api/track/ST-2026-0000")
            .add_query_param("phone", "0812345678")
            .await;

        mismatch.assert_status_not_found();
        unknown.assert_status_not_found();

        let mismatch_body: serde_json::Value = mismatch.json();
        let unknown_body: serde_json::Value = unknown.json();
        assert_eq!(mismatch_body["success"], json!(false));
        // Neither response carries any report field
        assert_eq!(mismatch_body["data"], serde_json::Value::Null);
        assert_eq!(unknown_body["data"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn rating_round_trip_through_http() {
        let (server, repo, _dir) = test_server();
        let report = repo.create(sample_input()).await.unwrap();
        repo.update_status(&report.id, ReportStatus::Completed, "ซ่อมเสร็จแล้ว", None)
            .await
            .unwrap();

        let response = server
            .post(&format!("/api/track/{}/rating", report.id))
            .json(&json!({"phone": "0812345678", "score": 5, "comment": "รวดเร็วมาก"}))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["rating"]["score"], json!(5));
    }

    #[tokio::test]
    async fn rating_with_wrong_phone_is_not_found() {
        let (server, repo, _dir) = test_server();
        let report = repo.create(sample_input()).await.unwrap();
        repo.update_status(&report.id, ReportStatus::Completed, "done", None)
            .await
            .unwrap();

        let response = server
            .post(&format!("/api/track/{}/rating", report.id))
            .json(&json!({"phone": "0800000000", "score": 5, "comment": ""}))
            .await;

        response.assert_status_not_found();
        let stored = repo.get_by_id(&report.id).await.unwrap().unwrap();
        assert!(stored.rating.is_none());
    }

    #[tokio::test]
    async fn recent_strip_is_redacted_and_bounded() {
        let (server, repo, _dir) = test_server();
        for _ in 0..7 {
            repo.create(sample_input()).await.unwrap();
        }

        let response = server.get("/api/track/recent").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), RECENT_REPORTS_LIMIT);
        assert_eq!(data[0]["statusLabel"], json!("รอตรวจสอบ"));
        assert!(data[0].get("phone").is_none());
        assert!(data[0].get("name").is_none());
        assert!(data[0].get("description").is_none());
    }
}
