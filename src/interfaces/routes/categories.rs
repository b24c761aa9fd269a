use actix_web::web;

use crate::handlers::categories;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .service(categories::list_categories)
    );
}
