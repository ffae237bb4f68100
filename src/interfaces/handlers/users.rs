use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::user::PublicUser,
    errors::AppError,
    use_cases::extractors::AuthClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(claims, state))]
pub async fn me(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user = state.auth_handler.current_user(&claims.user_id()?).await?;

    Ok(HttpResponse::Ok().json(PublicUser::from(user)))
}

#[instrument(skip(_claims, state))]
pub async fn get_user(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let user_id = valid_uuid(&user_id)?;

    let user = state.auth_handler.get_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[instrument(skip(claims, state))]
pub async fn delete_user(
    claims: AuthClaims,
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let target_id = valid_uuid(&user_id)?;
    let actor = state.auth_handler.current_user(&claims.user_id()?).await?;

    state.auth_handler.delete_user(target_id, &actor).await?;

    Ok(HttpResponse::NoContent().finish())
}
