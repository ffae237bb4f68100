use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

use crate::domain::password::validate_password_strength;

const MAX_DISPLAY_NAME_LENGTH: u64 = 120;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>
}

/// A new account plus the display name its empty profile starts with.
#[derive(Debug)]
pub struct UserInsert {
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(
        function = "validate_password_strength",
        message = "Must include uppercase, number, and symbol"
    ))]
    pub password: String,

    #[validate(length(min = 1, max = MAX_DISPLAY_NAME_LENGTH, message = "Display name is required"))]
    pub display_name: String,
}

impl NewUser {
    /// Accounts created through registration are never admin or verified.
    pub fn prepare_for_insert(&self, password_hash: String) -> UserInsert {
        let now = Utc::now();
        UserInsert {
            email: self.email.trim().to_lowercase(),
            display_name: self.display_name.trim().to_string(),
            password_hash,
            is_admin: false,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct NewUserResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            email: user.email,
            is_admin: user.is_admin,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}
