use actix_web::{get, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[get("/dashboard")]
#[instrument(skip(_admin, state))]
pub async fn admin_dashboard(
    _admin: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let overview = state.dashboard_handler.overview().await?;

    Ok(HttpResponse::Ok().json(overview))
}
