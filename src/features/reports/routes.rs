use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::ReportRepository;

/// Public routes for the reports feature (citizen submission)
pub fn routes(repository: Arc<ReportRepository>) -> Router {
    let state = ReportState { repository };

    Router::new()
        .route("/api/reports", post(handlers::create_report))
        .with_state(state)
}

/// Administrative routes, nested under /api/admin by the caller, which also
/// applies the Basic-auth layer
pub fn admin_routes(repository: Arc<ReportRepository>) -> Router {
    let state = ReportState { repository };

    Router::new()
        .route("/reports", get(handlers::list_reports))
        .route("/reports/{id}", get(handlers::get_report))
        .route("/reports/{id}/status", patch(handlers::update_report_status))
        .with_state(state)
}
