use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewCategoryRequest {
    #[validate(length(min = 1, max = 60, message = "Category name cannot be empty"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RenameCategoryRequest {
    #[validate(length(min = 1, max = 60, message = "Category name cannot be empty"))]
    pub name: String,
}
