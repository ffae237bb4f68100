use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::mentorship::{MentorshipListQuery, NewMentorshipRequest, UpdateMentorshipStatus},
    errors::AppError,
    use_cases::extractors::AuthClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(claims, state, data))]
pub async fn send_request(
    claims: AuthClaims,
    state: web::Data<AppState>,
    data: web::Json<NewMentorshipRequest>,
) -> Result<impl Responder, AppError> {
    let request = state
        .mentorship_handler
        .send_request(claims.user_id()?, data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(request))
}

#[instrument(skip(claims, state))]
pub async fn list_requests(
    claims: AuthClaims,
    state: web::Data<AppState>,
    query: web::Query<MentorshipListQuery>,
) -> Result<impl Responder, AppError> {
    let requests = state
        .mentorship_handler
        .list_requests(claims.user_id()?, query.role)
        .await?;

    Ok(HttpResponse::Ok().json(requests))
}

#[instrument(skip(claims, state))]
pub async fn get_request(
    claims: AuthClaims,
    state: web::Data<AppState>,
    request_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let request = state
        .mentorship_handler
        .get_request(valid_uuid(&request_id)?, claims.user_id()?)
        .await?;

    Ok(HttpResponse::Ok().json(request))
}

#[instrument(skip(claims, state, data))]
pub async fn update_request(
    claims: AuthClaims,
    state: web::Data<AppState>,
    request_id: web::Path<String>,
    data: web::Json<UpdateMentorshipStatus>,
) -> Result<impl Responder, AppError> {
    let request = state
        .mentorship_handler
        .update_status(valid_uuid(&request_id)?, claims.user_id()?, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(request))
}

#[instrument(skip(claims, state))]
pub async fn stats(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let stats = state.mentorship_handler.stats(claims.user_id()?).await?;

    Ok(HttpResponse::Ok().json(stats))
}
