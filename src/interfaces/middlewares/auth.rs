use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::token::Claims, errors::AuthError, AppState};

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let path = req.path();
            let method = req.method().as_str();

            if is_public_route(path, method) {
                return service.call(req).await.map(ServiceResponse::map_into_boxed_body);
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(AuthError::MissingCredentials) => {
                    tracing::warn!("Missing or invalid credentials");
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Missing or invalid credentials"
                    }))));
                }
                Err(AuthError::TokenExpired) => {
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Token has expired"
                    }))));
                }
                Err(AuthError::InvalidToken) => {
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Invalid token"
                    }))));
                }
                Err(_) => {
                    tracing::error!("Failed to decode JWT");
                    return Ok(custom_error_response(req, HttpResponse::InternalServerError().json(serde_json::json!({
                        "error": "Internal server error"
                    }))));
                }
            };

            if claims.disabled {
                return Ok(custom_error_response(req, HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "Account is disabled"
                }))));
            }

            if let Err(forbidden_response) = enforce_admin_access(path, &claims) {
                return Ok(custom_error_response(req, forbidden_response));
            }

            req.extensions_mut().insert(claims);
            service.call(req).await.map(ServiceResponse::map_into_boxed_body)
        })
    }
}

/// Visitor-facing surface needs no token: the banner, the health check,
/// the directory reads, the category list, the view counter, the
/// newsletter signup, and the auth endpoints themselves.
fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    if matches!(
        (path, method),
        ("/", "GET")
            | ("/health", "GET")
            | ("/api/v1/categories", "GET")
            | ("/api/v1/newsletter", "POST")
            | ("/api/v1/auth/login", "POST")
            | ("/api/v1/auth/register", "POST")
            | ("/api/v1/auth/refresh-token", "POST")
    ) {
        return true;
    }

    // Served images.
    if path.starts_with("/images/") && method == "GET" {
        return true;
    }

    // Project reads are public except the caller's own listing; the view
    // counter is the one public POST under /projects.
    if let Some(rest) = path.strip_prefix("/api/v1/projects") {
        if method == "GET" && rest != "/mine" {
            return true;
        }
        if method == "POST" && rest.ends_with("/views") {
            return true;
        }
    }

    false
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req.app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    let decoded = state.auth_handler.token_service.decode_jwt(&token)?;
    Ok(decoded.claims)
}

fn enforce_admin_access(path: &str, claims: &Claims) -> Result<(), HttpResponse> {
    if path.starts_with("/api/v1/admin") && !claims.admin {
        tracing::warn!("Admin access required for path: {}", path);
        return Err(
            HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Admin access required"
            }))
        );
    }
    Ok(())
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}
