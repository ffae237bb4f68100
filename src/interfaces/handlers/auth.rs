use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::token::RefreshTokenRequest;
use crate::entities::user::{LoginUser, LogoutRequest, NewUser};
use crate::errors::{AppError, AuthError};
use crate::middlewares::{auth::bearer_token, rate_limit::check_auth_attempt};
use crate::AppState;

#[post("/register")]
#[instrument(skip(req, state, user))]
pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    user: web::Json<NewUser>
) -> Result<impl Responder, AppError> {
    check_auth_attempt(&req, &state, "register")?;

    let response = state.auth_handler.register(user.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
#[instrument(skip(req, state, user))]
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    user: web::Json<LoginUser>
) -> Result<HttpResponse, actix_web::Error> {
    check_auth_attempt(&req, &state, "login")?;

    let auth_response = state.auth_handler.login(user.into_inner()).await?;

    Ok(HttpResponse::Ok().json(auth_response))
}

#[post("/refresh-token")]
#[instrument(skip(state, request))]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<impl Responder, AuthError> {
    let auth_response = state.auth_handler.refresh_token(&request.refresh_token).await?;

    Ok(HttpResponse::Ok().json(auth_response))
}

#[post("/logout")]
#[instrument(skip(req, state, body))]
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LogoutRequest>
) -> Result<impl Responder, AuthError> {
    let access_token = bearer_token(req.headers()).ok_or(AuthError::MissingCredentials)?;

    state.auth_handler.logout(&body.refresh_token, &access_token).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Logged out successfully"})))
}
