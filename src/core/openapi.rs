use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::tracking::{dtos as tracking_dtos, handlers as tracking_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports (public)
        reports_handlers::report_handler::create_report,
        // Tracking (public)
        tracking_handlers::tracking_handler::track_report,
        tracking_handlers::tracking_handler::submit_rating,
        tracking_handlers::tracking_handler::recent_reports,
        // Categories (public)
        categories_handlers::category_handler::list_categories,
        // Admin
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::get_report,
        reports_handlers::report_handler::update_report_status,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Models
            reports_models::ReportStatus,
            reports_models::ReportCategory,
            reports_models::TimelineEntry,
            reports_models::Rating,
            // Reports
            reports_dtos::CreateReportDto,
            reports_dtos::UpdateReportStatusDto,
            reports_dtos::ReportResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Tracking
            tracking_dtos::SubmitRatingDto,
            tracking_dtos::RecentReportDto,
            ApiResponse<Vec<tracking_dtos::RecentReportDto>>,
            // Categories
            categories_dtos::CategoryResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
        )
    ),
    tags(
        (name = "reports", description = "Citizen report submission (public)"),
        (name = "tracking", description = "Phone-gated report tracking and rating (public)"),
        (name = "categories", description = "Report categories (public)"),
        (name = "admin", description = "Report administration (Basic auth)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Samut Prakan Citizen Report API",
        version = "0.1.0",
        description = "Citizen complaint intake and tracking for Samut Prakan district",
    )
)]
pub struct ApiDoc;

/// Adds the Basic auth security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
