use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::ReportCategory;

/// Response DTO for a report category with its fixed display pair
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub value: ReportCategory,
    pub label: String,
    pub icon: String,
}

impl From<ReportCategory> for CategoryResponseDto {
    fn from(c: ReportCategory) -> Self {
        Self {
            value: c,
            label: c.label().to_string(),
            icon: c.icon().to_string(),
        }
    }
}
