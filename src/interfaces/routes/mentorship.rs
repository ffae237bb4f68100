use actix_web::web;

use crate::handlers::mentorship;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/mentorship")
            .service(
                web::resource("/requests")
                    .route(web::get().to(mentorship::list_requests))
                    .route(web::post().to(mentorship::send_request))
            )
            .service(
                web::resource("/requests/{request_id}")
                    .route(web::get().to(mentorship::get_request))
                    .route(web::patch().to(mentorship::update_request))
            )
            .service(
                web::resource("/stats")
                    .route(web::get().to(mentorship::stats))
            )
    );
}
