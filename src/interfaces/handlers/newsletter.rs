use actix_web::{post, web, HttpResponse, Responder};

use crate::entities::newsletter::SubscribeRequest;
use crate::errors::AppError;
use crate::AppState;

/// Insert-only subscription. A duplicate email still answers 200 with
/// the informational message.
#[post("")]
pub async fn subscribe(
    state: web::Data<AppState>,
    request: web::Json<SubscribeRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.newsletter_handler.subscribe(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
