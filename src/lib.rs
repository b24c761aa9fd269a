use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, storage, mail};

use auth::jwt::JwtService;
use mail::resend::{Mailer, ResendMailer};
use repositories::sqlx_repo::{
    SqlxCategoryRepo, SqlxNewsletterRepo, SqlxProfileRepo, SqlxProjectRepo,
};
use storage::images::{FsImageStore, ImageStore};
use use_cases::{
    auth::AuthHandler, moderation::ModerationHandler, newsletter::NewsletterHandler,
    projects::ProjectHandler,
};

pub type AppAuthHandler = AuthHandler<SqlxProfileRepo, JwtService>;
pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo, SqlxProfileRepo>;
pub type AppModerationHandler = ModerationHandler<SqlxProjectRepo, SqlxCategoryRepo, SqlxProfileRepo>;
pub type AppNewsletterHandler = NewsletterHandler<SqlxNewsletterRepo>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub project_handler: AppProjectHandler,
    pub moderation_handler: AppModerationHandler,
    pub newsletter_handler: AppNewsletterHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let jwt_service = JwtService::new(config);
        let profile_repo = SqlxProfileRepo::new(pool.clone());
        let project_repo = SqlxProjectRepo::new(pool.clone());
        let category_repo = SqlxCategoryRepo::new(pool.clone());
        let newsletter_repo = SqlxNewsletterRepo::new(pool);

        let image_store: Arc<dyn ImageStore> = Arc::new(FsImageStore::new(config));
        let mailer: Option<Arc<dyn Mailer>> = match ResendMailer::from_config(config) {
            Some(m) => Some(Arc::new(m)),
            None => {
                tracing::warn!("No mail credential configured, confirmation emails disabled");
                None
            }
        };

        let auth_handler = AuthHandler::new(profile_repo.clone(), jwt_service);
        let project_handler = ProjectHandler::new(
            project_repo.clone(),
            profile_repo.clone(),
            Arc::clone(&image_store),
            mailer,
        );
        let moderation_handler = ModerationHandler::new(
            project_repo,
            category_repo,
            profile_repo,
            image_store,
        );
        let newsletter_handler = NewsletterHandler::new(newsletter_repo);

        AppState {
            auth_handler,
            project_handler,
            moderation_handler,
            newsletter_handler,
        }
    }
}
