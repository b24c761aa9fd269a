use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::entities::project::ProjectListQuery;
use crate::errors::AppError;
use crate::handlers::forms::ProjectUpload;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

/// Public listing: validated, published projects, newest first.
#[get("")]
#[instrument(skip(state))]
pub async fn list_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();
    let projects = state
        .project_handler
        .list_public(query.search.as_deref(), query.category.as_ref())
        .await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// At most one visible project carries the featured flag on the landing
/// page; the body is `null` when none qualifies.
#[get("/featured")]
#[instrument(skip(state))]
pub async fn featured_project(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let project = state.project_handler.featured().await?;
    Ok(HttpResponse::Ok().json(project))
}

#[get("/mine")]
#[instrument(skip(state, claims))]
pub async fn my_projects(
    state: web::Data<AppState>,
    claims: AuthClaims,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.my_projects(&claims.0.sub).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[get("/{id}")]
#[instrument(skip(state))]
pub async fn project_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.detail(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[get("/{id}/related")]
#[instrument(skip(state))]
pub async fn related_projects(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.related(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// Unauthenticated view counter, incremented atomically in the database.
#[post("/{id}/views")]
#[instrument(skip(state))]
pub async fn record_view(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let views = state.project_handler.record_view(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views))
}

/// Multipart submission: text fields plus an optional `image` part.
/// Every submission starts unvalidated and unfeatured.
#[post("")]
#[instrument(skip(state, claims, form))]
pub async fn submit_project(
    state: web::Data<AppState>,
    claims: AuthClaims,
    form: MultipartForm<ProjectUpload>,
) -> Result<impl Responder, AppError> {
    let (request, image) = form.into_inner().into_new_project().await?;

    let response = state
        .project_handler
        .submit(&claims.0.sub, request, image)
        .await?;
    Ok(HttpResponse::Created().json(response))
}
