use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::entities::category::{NewCategoryRequest, RenameCategoryRequest};
use crate::errors::AppError;
use crate::handlers::forms::ProjectUpload;
use crate::use_cases::extractors::AdminClaims;
use crate::AppState;

/// Full project list for moderation, validated or not.
#[get("/projects")]
#[instrument(skip(_admin, state))]
pub async fn list_all_projects(
    _admin: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.moderation_handler.list_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[post("/projects/{id}/validate")]
#[instrument(skip(_admin, state))]
pub async fn toggle_validation(
    _admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let toggle = state.moderation_handler.toggle_validation(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(toggle))
}

#[post("/projects/{id}/feature")]
#[instrument(skip(_admin, state))]
pub async fn toggle_featured(
    _admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let toggle = state.moderation_handler.toggle_featured(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(toggle))
}

/// Multipart edit. Text fields replace the stored values; the image is
/// only replaced when a new file part is sent; a present `category_ids`
/// field replaces the association set wholesale.
#[put("/projects/{id}")]
#[instrument(skip(_admin, state, form))]
pub async fn edit_project(
    _admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: MultipartForm<ProjectUpload>,
) -> Result<impl Responder, AppError> {
    let (update, image) = form.into_inner().into_update_project().await?;

    let project = state
        .moderation_handler
        .edit_project(&path.into_inner(), update, image)
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

#[delete("/projects/{id}")]
#[instrument(skip(_admin, state))]
pub async fn delete_project(
    _admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state.moderation_handler.delete_project(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/users")]
#[instrument(skip(_admin, state))]
pub async fn list_users(
    _admin: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let users = state.moderation_handler.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[post("/users/{id}/role")]
#[instrument(skip(_admin, state))]
pub async fn toggle_user_role(
    _admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let role = state.moderation_handler.toggle_user_role(&id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "id": id, "role": role })))
}

#[post("/users/{id}/disable")]
#[instrument(skip(_admin, state))]
pub async fn toggle_user_disable(
    _admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    let is_disabled = state.moderation_handler.toggle_user_disable(&id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "id": id, "is_disabled": is_disabled })))
}

#[post("/categories")]
#[instrument(skip(_admin, state, request))]
pub async fn create_category(
    _admin: AdminClaims,
    state: web::Data<AppState>,
    request: web::Json<NewCategoryRequest>,
) -> Result<impl Responder, AppError> {
    let category = state.moderation_handler.create_category(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/categories/{id}")]
#[instrument(skip(_admin, state, request))]
pub async fn rename_category(
    _admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<RenameCategoryRequest>,
) -> Result<impl Responder, AppError> {
    let category = state
        .moderation_handler
        .rename_category(&path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

/// Deleting a category also drops its association rows; projects
/// themselves are never deleted by this route.
#[delete("/categories/{id}")]
#[instrument(skip(_admin, state))]
pub async fn delete_category(
    _admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state.moderation_handler.delete_category(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
