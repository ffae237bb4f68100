use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::profile::{AddSkillRequest, DirectoryQuery, SkillSuggestionQuery, UpdateProfileRequest},
    errors::AppError,
    use_cases::extractors::AuthClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(claims, state))]
pub async fn get_my_profile(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler.get_profile(claims.user_id()?).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(claims, state, data))]
pub async fn update_my_profile(
    claims: AuthClaims,
    state: web::Data<AppState>,
    data: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, AppError> {
    let profile = state
        .profile_handler
        .update_profile(claims.user_id()?, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(_claims, state))]
pub async fn get_profile(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let user_id = valid_uuid(&user_id)?;

    let profile = state.profile_handler.get_profile(user_id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(claims, state, data))]
pub async fn add_skill(
    claims: AuthClaims,
    state: web::Data<AppState>,
    data: web::Json<AddSkillRequest>,
) -> Result<impl Responder, AppError> {
    let skills = state
        .profile_handler
        .add_skill(claims.user_id()?, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(claims, state))]
pub async fn remove_skill(
    claims: AuthClaims,
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let skills = state
        .profile_handler
        .remove_skill(claims.user_id()?, &name)
        .await?;

    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(claims, state))]
pub async fn skill_suggestions(
    claims: AuthClaims,
    state: web::Data<AppState>,
    query: web::Query<SkillSuggestionQuery>,
) -> Result<impl Responder, AppError> {
    let suggestions = state
        .profile_handler
        .skill_suggestions(claims.user_id()?, &query.q)
        .await?;

    Ok(HttpResponse::Ok().json(suggestions))
}

#[instrument(skip(_claims, state))]
pub async fn directory(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    query: web::Query<DirectoryQuery>,
) -> Result<impl Responder, AppError> {
    let alumni = state.profile_handler.directory(query.q.as_deref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total": alumni.len(),
        "alumni": alumni,
    })))
}

#[instrument(skip(_claims, state))]
pub async fn mentors(
    _claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let mentors = state.profile_handler.mentors().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total": mentors.len(),
        "mentors": mentors,
    })))
}
