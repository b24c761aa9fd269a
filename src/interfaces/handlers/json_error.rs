use actix_web::{HttpResponse, ResponseError};

use crate::errors::AuthError;

pub fn handle_auth_handler_error(e: AuthError) -> HttpResponse {
    e.error_response()
}
