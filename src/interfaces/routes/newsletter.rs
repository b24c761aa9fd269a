use actix_web::web;

use crate::handlers::newsletter;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/newsletter")
            .service(newsletter::subscribe)
    );
}
