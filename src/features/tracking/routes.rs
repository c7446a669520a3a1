use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::services::ReportRepository;
use crate::features::tracking::handlers::{self, TrackingState};

/// Create routes for the tracking feature
///
/// Note: This feature is public; the per-report routes are gated by the
/// phone credential inside the handlers
pub fn routes(repository: Arc<ReportRepository>) -> Router {
    let state = TrackingState { repository };

    Router::new()
        .route("/api/track/recent", get(handlers::recent_reports))
        .route("/api/track/{id}", get(handlers::track_report))
        .route("/api/track/{id}/rating", post(handlers::submit_rating))
        .with_state(state)
}
