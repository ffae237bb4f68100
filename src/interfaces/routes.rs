use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod admin;
mod auth;
mod careers;
mod events;
mod json_error;
mod mentorship;
mod profiles;
mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(json_error::config_routes);

    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .service(health_check)
            .configure(auth::config_routes)
            .configure(admin::config_routes)
            .configure(users::config_routes)
            .configure(careers::config_routes)
            .configure(profiles::config_routes)
            .configure(events::config_routes)
            .configure(mentorship::config_routes)
    );
}
