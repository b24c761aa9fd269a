use async_trait::async_trait;
use std::borrow::Cow;
use uuid::Uuid;
use sqlx::PgPool;

use crate::{
    entities::category::Category,
    errors::AppError,
    repositories::sqlx_repo::SqlxCategoryRepo,
};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;
    async fn create_category(&self, name: &str) -> Result<Category, AppError>;
    async fn rename_category(&self, id: &Uuid, name: &str) -> Result<Category, AppError>;
    async fn delete_category(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxCategoryRepo { pool }
    }
}

fn map_name_conflict(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
            AppError::Conflict("A category with this name already exists".into())
        }
        _ => AppError::from(e),
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepo {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name FROM categories ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name"
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_name_conflict)?;

        Ok(category)
    }

    async fn rename_category(&self, id: &Uuid, name: &str) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $1 WHERE id = $2 RETURNING id, name"
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_name_conflict)?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

        Ok(category)
    }

    async fn delete_category(&self, id: &Uuid) -> Result<(), AppError> {
        // project_categories rows referencing this category cascade away
        // with it (pinned by the schema).
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category not found".into()));
        }

        Ok(())
    }
}
