use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    career::{CareerDraft, FieldEdit},
    errors::AppError,
    use_cases::extractors::AuthClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

/// Dry-run of the submit step: returns the normalized entry or the fields to fix.
#[instrument(skip(_claims, state, draft))]
pub async fn validate_career(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    draft: web::Json<CareerDraft>,
) -> Result<impl Responder, AppError> {
    let entry = state.career_handler.preview(&draft)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "entry": entry })))
}

#[instrument(skip(claims, state, draft))]
pub async fn add_career(
    claims: AuthClaims,
    state: web::Data<AppState>,
    draft: web::Json<CareerDraft>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;

    let stored = state.career_handler.add_entry(user_id, draft.into_inner()).await?;

    Ok(HttpResponse::Created().json(stored))
}

#[instrument(skip(claims, state))]
pub async fn list_my_careers(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;

    let entries = state.career_handler.list_entries(user_id).await?;

    Ok(HttpResponse::Ok().json(entries))
}

#[instrument(skip(_claims, state))]
pub async fn list_user_careers(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let user_id = valid_uuid(&user_id)?;

    let entries = state.career_handler.list_entries(user_id).await?;

    Ok(HttpResponse::Ok().json(entries))
}

#[instrument(skip(claims, state, edits))]
pub async fn edit_career(
    claims: AuthClaims,
    state: web::Data<AppState>,
    entry_id: web::Path<String>,
    edits: web::Json<Vec<FieldEdit>>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let entry_id = valid_uuid(&entry_id)?;

    let updated = state
        .career_handler
        .edit_entry(user_id, entry_id, edits.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(claims, state))]
pub async fn delete_career(
    claims: AuthClaims,
    state: web::Data<AppState>,
    entry_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let entry_id = valid_uuid(&entry_id)?;

    state.career_handler.delete_entry(user_id, entry_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
