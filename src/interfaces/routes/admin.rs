use actix_web::web;

use crate::handlers::{dashboard, events};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(dashboard::admin_dashboard)
            .service(
                web::resource("/events")
                    .route(web::post().to(events::create_event))
            )
    );
}
