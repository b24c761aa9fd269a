use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod admin;
mod auth;
mod categories;
mod json_error;
mod newsletter;
mod projects;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::config_routes)
            .configure(projects::config_routes)
            .configure(categories::config_routes)
            .configure(newsletter::config_routes)
            .configure(admin::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
