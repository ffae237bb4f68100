use actix_web::{error::JsonPayloadError, web};

use crate::errors::AppError;

/// Body, query and path extraction failures answer with the JSON error shape.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(64 * 1024).error_handler(|err, _req| {
        json_payload_error(err).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::InvalidInput(format!("query string: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::InvalidInput(format!("path: {}", err)).into()
    }));
}

fn json_payload_error(err: JsonPayloadError) -> AppError {
    match err {
        JsonPayloadError::ContentType => {
            AppError::InvalidInput("expected Content-Type: application/json".to_string())
        }
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            AppError::InvalidInput(format!("JSON payload exceeds {} bytes", limit))
        }
        JsonPayloadError::Deserialize(e) => AppError::InvalidInput(format!("JSON error: {}", e)),
        other => AppError::InvalidInput(format!("JSON payload error: {}", other)),
    }
}
