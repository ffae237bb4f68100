use actix_web::HttpRequest;

use crate::{
    errors::AppError,
    limiter::rate_limiter::RateDecision,
    utils::get_client_ip::get_client_ip,
    AppState,
};

/// Counts one `action` attempt for the caller's IP; 429 once over the limit.
pub fn check_auth_attempt(req: &HttpRequest, state: &AppState, action: &str) -> Result<(), AppError> {
    let ip = get_client_ip(req, state.trust_x_forwarded_for);
    let key = format!("{}:{}", action, ip);

    match state.auth_limiter.check(&key) {
        RateDecision::Allowed => Ok(()),
        RateDecision::Limited { retry_after } => Err(AppError::TooManyRequests(retry_after)),
    }
}
