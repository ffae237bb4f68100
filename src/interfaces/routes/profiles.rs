use actix_web::web;

use crate::handlers::profiles;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .service(
                web::resource("")
                    .route(web::get().to(profiles::get_my_profile))
                    .route(web::patch().to(profiles::update_my_profile))
            )
            .service(
                web::resource("/skills")
                    .route(web::post().to(profiles::add_skill))
            )
            .service(
                web::resource("/skills/{name}")
                    .route(web::delete().to(profiles::remove_skill))
            )
    )
    .service(
        web::resource("/profiles/{user_id}")
            .route(web::get().to(profiles::get_profile))
    )
    .service(
        web::resource("/skills/suggestions")
            .route(web::get().to(profiles::skill_suggestions))
    )
    .service(
        web::resource("/directory")
            .route(web::get().to(profiles::directory))
    )
    .service(
        web::resource("/mentors")
            .route(web::get().to(profiles::mentors))
    );
}
