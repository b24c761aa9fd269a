use async_trait::async_trait;
use std::borrow::Cow;
use sqlx::PgPool;

use crate::{
    entities::newsletter::SubscribeOutcome,
    errors::AppError,
    repositories::sqlx_repo::SqlxNewsletterRepo,
};

#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, AppError>;
}

impl SqlxNewsletterRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxNewsletterRepo { pool }
    }
}

#[async_trait]
impl NewsletterRepository for SqlxNewsletterRepo {
    async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, AppError> {
        let result = sqlx::query(
            "INSERT INTO newsletter_subscribers (email) VALUES ($1)"
        )
        .bind(email)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(SubscribeOutcome::Subscribed),
            // Unique violation is the benign "already subscribed" path.
            Err(sqlx::Error::Database(db_err)) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                Ok(SubscribeOutcome::AlreadySubscribed)
            }
            Err(e) => Err(AppError::from(e)),
        }
    }
}
