use actix_web::web;

use crate::handlers::events;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .service(
                web::resource("/upcoming")
                    .route(web::get().to(events::upcoming_events))
            )
            .service(
                web::resource("/past")
                    .route(web::get().to(events::past_events))
            )
            .service(
                web::resource("/{event_id}")
                    .route(web::get().to(events::get_event))
            )
            .service(
                web::resource("/{event_id}/register")
                    .route(web::post().to(events::register_for_event))
                    .route(web::delete().to(events::cancel_registration))
            )
    );
}
