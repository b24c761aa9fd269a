use actix_web::{get, web, HttpResponse, Responder};

use crate::errors::AppError;
use crate::AppState;

/// Public category list, ordered by name. Used by the directory filter
/// bar and the submission form.
#[get("")]
pub async fn list_categories(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let categories = state.moderation_handler.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}
