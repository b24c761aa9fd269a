use async_trait::async_trait;
use uuid::Uuid;
use std::borrow::Cow;

use crate::{
    entities::profile::{Profile, ProfileAdminView, ProfileInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxProfileRepo,
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn create_profile(&self, profile: &ProfileInsert) -> Result<Uuid, AppError>;
    async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>, AppError>;
    async fn get_profile_by_id(&self, id: &Uuid) -> Result<Option<Profile>, AppError>;
    async fn list_profiles(&self) -> Result<Vec<ProfileAdminView>, AppError>;
    async fn toggle_role(&self, id: &Uuid) -> Result<String, AppError>;
    async fn toggle_disabled(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxProfileRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProfileRepo { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn create_profile(&self, profile: &ProfileInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO profiles (email, username, password_hash, role, is_disabled, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#
        )
        .bind(&profile.email)
        .bind(&profile.username)
        .bind(&profile.password_hash)
        .bind(&profile.role)
        .bind(profile.is_disabled)
        .bind(profile.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            match e {
                sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                    AppError::Conflict("An account with this email already exists".to_string())
                }
                _ => AppError::from(e),
            }
        })?;

        Ok(id)
    }

    async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, email, username, password_hash, role, is_disabled, created_at FROM profiles WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn get_profile_by_id(&self, id: &Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, email, username, password_hash, role, is_disabled, created_at FROM profiles WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn list_profiles(&self) -> Result<Vec<ProfileAdminView>, AppError> {
        let profiles = sqlx::query_as::<_, ProfileAdminView>(
            "SELECT id, username, role, is_disabled, created_at FROM profiles ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    async fn toggle_role(&self, id: &Uuid) -> Result<String, AppError> {
        let role: String = sqlx::query_scalar(
            r#"
            UPDATE profiles
            SET role = CASE WHEN role = 'admin' THEN 'user' ELSE 'admin' END
            WHERE id = $1
            RETURNING role
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        Ok(role)
    }

    async fn toggle_disabled(&self, id: &Uuid) -> Result<bool, AppError> {
        let is_disabled: bool = sqlx::query_scalar(
            "UPDATE profiles SET is_disabled = NOT is_disabled WHERE id = $1 RETURNING is_disabled"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        Ok(is_disabled)
    }
}
