use actix_web::web;

pub mod flights;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/flights")
            .route("/routes", web::get().to(flights::list_routes))
            .route("/routes", web::post().to(flights::create_route))
            .route("/routes/{id}", web::put().to(flights::update_route))
            .route("/routes/{id}", web::delete().to(flights::delete_route))
            .route("/routes/{id}/deactivate", web::put().to(flights::deactivate_route))
            .route("/schedules/{id}", web::put().to(flights::update_schedule))
            .route("/generate-schedules", web::post().to(flights::generate_schedules)),
    );
}
