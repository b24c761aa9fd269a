use actix_web::web;

use crate::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // Literal segments must register before the `{id}` matcher.
    cfg.service(
        web::scope("/projects")
            .service(projects::featured_project)
            .service(projects::my_projects)
            .service(projects::list_projects)
            .service(projects::submit_project)
            .service(projects::related_projects)
            .service(projects::record_view)
            .service(projects::project_detail)
    );
}
