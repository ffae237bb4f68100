use actix_web::web;

use crate::handlers::careers;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/careers")
            .service(
                web::resource("")
                    .route(web::post().to(careers::add_career))
                    .route(web::get().to(careers::list_my_careers))
            )
            .service(
                web::resource("/validate")
                    .route(web::post().to(careers::validate_career))
            )
            .service(
                web::resource("/{entry_id}")
                    .route(web::patch().to(careers::edit_career))
                    .route(web::delete().to(careers::delete_career))
            )
    );
}
