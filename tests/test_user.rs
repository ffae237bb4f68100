use chrono::{DateTime, Utc};
use alumninet_backend::entities::user::User;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl TestUser {
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: "$argon2id$v=19$m=15000,t=2,p=1$c29tZXNhbHQ$placeholder".into(),
            is_admin: false,
            is_verified: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            deleted_by: None,
        }
    }

    #[allow(dead_code)]
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    #[allow(dead_code)]
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = hash.into();
        self
    }

    #[allow(dead_code)]
    pub fn deleted(mut self, deleted_by: Uuid) -> Self {
        self.deleted_at = Some(Utc::now());
        self.deleted_by = Some(deleted_by);
        self
    }

    pub fn into_db_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            is_admin: self.is_admin,
            is_verified: self.is_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
            deleted_by: self.deleted_by,
        }
    }
}
