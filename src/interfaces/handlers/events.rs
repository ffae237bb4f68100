use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::event::NewEventRequest,
    errors::AppError,
    use_cases::extractors::{AdminClaims, AuthClaims},
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(claims, state, data))]
pub async fn create_event(
    claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewEventRequest>,
) -> Result<impl Responder, AppError> {
    let event = state
        .event_handler
        .create_event(claims.user_id()?, data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(event))
}

#[instrument(skip(_claims, state))]
pub async fn upcoming_events(
    _claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let events = state.event_handler.upcoming_events().await?;

    Ok(HttpResponse::Ok().json(events))
}

#[instrument(skip(_claims, state))]
pub async fn past_events(
    _claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let events = state.event_handler.past_events().await?;

    Ok(HttpResponse::Ok().json(events))
}

#[instrument(skip(_claims, state))]
pub async fn get_event(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    event_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let event = state.event_handler.get_event(valid_uuid(&event_id)?).await?;

    Ok(HttpResponse::Ok().json(event))
}

#[instrument(skip(claims, state))]
pub async fn register_for_event(
    claims: AuthClaims,
    state: web::Data<AppState>,
    event_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let response = state
        .event_handler
        .register(valid_uuid(&event_id)?, claims.user_id()?)
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(claims, state))]
pub async fn cancel_registration(
    claims: AuthClaims,
    state: web::Data<AppState>,
    event_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state
        .event_handler
        .cancel_registration(valid_uuid(&event_id)?, claims.user_id()?)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
