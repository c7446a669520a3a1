use axum::Json;

use crate::core::error::Result;
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::reports::models::ReportCategory;
use crate::shared::types::ApiResponse;

/// List all report categories with their display labels and icons
///
/// The set is fixed; no state is involved.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories() -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories: Vec<CategoryResponseDto> = ReportCategory::ALL
        .into_iter()
        .map(CategoryResponseDto::from)
        .collect();
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_category_carries_a_label_and_icon() {
        let Json(body) = list_categories().await.unwrap();
        let categories = body.data.unwrap();

        assert_eq!(categories.len(), ReportCategory::ALL.len());
        for category in &categories {
            assert!(!category.label.is_empty());
            assert!(!category.icon.is_empty());
        }
    }
}
