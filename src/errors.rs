use std::borrow::Cow;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::{self, ContentType}, StatusCode},
    HttpResponse
};
use jsonwebtoken::errors::{ErrorKind, Error as JwtError};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::{career::CareerValidationError, skills::SkillError};

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    InvalidInput(String),
    NotFound(String),
    Conflict(String),
    UnauthorizedAccess,
    ForbiddenAccess,
    TooManyRequests(u64),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::UnauthorizedAccess => write!(f, "Unauthorized access"),
            AppError::ForbiddenAccess => write!(f, "Forbidden access"),
            AppError::TooManyRequests(secs) => write!(f, "Too many requests, retry in {}s", secs),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                serde_json::json!({"error": "Internal server error"})
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };

        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header(ContentType::json());
        if let AppError::TooManyRequests(secs) = self {
            builder.insert_header((header::RETRY_AFTER, secs.to_string()));
        }
        builder.json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UnauthorizedAccess => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenAccess => StatusCode::FORBIDDEN,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        // field_errors() is backed by a HashMap
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

impl From<CareerValidationError> for AppError {
    fn from(err: CareerValidationError) -> Self {
        let field_errors = err
            .fields()
            .into_iter()
            .map(|field| FieldError {
                field: field.to_string(),
                message: err.field_message(field),
            })
            .collect();

        AppError::ValidationError(field_errors)
    }
}

impl From<SkillError> for AppError {
    fn from(err: SkillError) -> Self {
        AppError::ValidationError(vec![FieldError {
            field: "skill".to_string(),
            message: err.to_string(),
        }])
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Database conflict occurred".into())
            }
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23503")) => {
                AppError::Conflict("Foreign key violation".into())
            }
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden(_) => AppError::ForbiddenAccess,
            AuthError::InvalidUserId => AppError::InvalidInput("Invalid user ID".into()),
            AuthError::TokenCreation
            | AuthError::MissingAppState
            | AuthError::RedisOperation(_) => AppError::InternalError(err.to_string()),
            _ => AppError::UnauthorizedAccess,
        }
    }
}

#[derive(Debug, Display)]
pub enum AuthError {
    #[display("Invalid token")]
    InvalidToken,

    #[display("Wrong credentials")]
    WrongCredentials,

    #[display("Token creation error")]
    TokenCreation,

    #[display("Token expired")]
    TokenExpired,

    #[display("Missing credentials")]
    MissingCredentials,

    #[display("Application state unavailable")]
    MissingAppState,

    #[display("Invalid user ID")]
    InvalidUserId,

    #[display("Forbidden: {_0}")]
    Forbidden(String),

    #[display("Token revoked")]
    TokenRevoked,

    #[display("Redis operation failed: {_0}")]
    RedisOperation(String),
}

impl std::error::Error for AuthError {}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        let error_message = match self {
            AuthError::TokenExpired => "Token has expired".to_string(),
            AuthError::RedisOperation(_) | AuthError::MissingAppState => {
                tracing::error!("Auth infrastructure error: {}", self);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"error": error_message}))
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::WrongCredentials => StatusCode::UNAUTHORIZED,
            AuthError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MissingAppState => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::InvalidUserId => StatusCode::BAD_REQUEST,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::TokenRevoked => StatusCode::UNAUTHORIZED,
            AuthError::RedisOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        tracing::warn!("Password verification error: {}", err);
        AuthError::WrongCredentials
    }
}

impl From<deadpool_redis::PoolError> for AuthError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        AuthError::RedisOperation(err.to_string())
    }
}

impl From<redis::RedisError> for AuthError {
    fn from(err: redis::RedisError) -> Self {
        AuthError::RedisOperation(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum PasswordError {
    #[display("Invalid password parameters: {_0}")]
    InvalidParameters(String),

    #[display("Password hashing failed: {_0}")]
    HashingError(String),

    #[display("Invalid password hash format: {_0}")]
    InvalidHashFormat(String),

    #[display("Password verification failed: {_0}")]
    VerificationError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::career::CareerField;

    #[test]
    fn career_errors_name_every_missing_field() {
        let err: AppError = CareerValidationError::MissingRequiredField(vec![
            CareerField::Position,
            CareerField::StartDate,
        ])
        .into();

        match &err {
            AppError::ValidationError(details) => {
                assert_eq!(details.len(), 2);
                assert_eq!(details[0].field, "position");
                assert_eq!(details[0].message, "Position is required");
                assert_eq!(details[1].field, "start_date");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_end_date_points_at_end_date() {
        let err: AppError = CareerValidationError::MissingEndDate.into();
        match err {
            AppError::ValidationError(details) => assert_eq!(details[0].field, "end_date"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn too_many_requests_sets_retry_after() {
        let response = AppError::TooManyRequests(12).error_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "12");
    }

    #[test]
    fn auth_errors_map_to_app_errors() {
        assert!(matches!(AppError::from(AuthError::Forbidden("x".into())), AppError::ForbiddenAccess));
        assert!(matches!(AppError::from(AuthError::TokenExpired), AppError::UnauthorizedAccess));
    }
}
