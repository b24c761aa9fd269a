use actix_web::web;

use crate::handlers::admin;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(admin::list_all_projects)
            .service(admin::toggle_validation)
            .service(admin::toggle_featured)
            .service(admin::edit_project)
            .service(admin::delete_project)
            .service(admin::list_users)
            .service(admin::toggle_user_role)
            .service(admin::toggle_user_disable)
            .service(admin::create_category)
            .service(admin::rename_category)
            .service(admin::delete_category)
    );
}
