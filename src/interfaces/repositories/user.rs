use async_trait::async_trait;
use uuid::Uuid;
use std::borrow::Cow;

use crate::{
    entities::user::{User, UserInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxUserRepo,
};

/// Soft-deleted accounts are kept this long before the purge task removes them.
pub const PURGE_AFTER_DAYS: i32 = 7;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn user_exists(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    /// Inserts the account and its empty alumni profile in one transaction.
    async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError>;
    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
    async fn delete_user(&self, id: &Uuid, deleted_by: &Uuid) -> Result<(), AppError>;
    async fn purge_soft_deleted_users(&self) -> Result<u64, AppError>;
}

impl SqlxUserRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxUserRepo { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn user_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO users (
                email,
                password_hash,
                is_admin,
                is_verified,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6) RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.is_verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            match e {
                sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                    AppError::Conflict("User with this email already exists".to_string())
                }
                _ => AppError::from(e),
            }
        })?;

        sqlx::query(
            r#"INSERT INTO alumni_profiles (user_id, display_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(&user.display_name)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn delete_user(&self, id: &Uuid, deleted_by: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                deleted_at = NOW(),
                deleted_by = $2,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(deleted_by)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return if self.user_exists(id).await? {
                Err(AppError::Conflict("User is already deleted".to_string()))
            } else {
                Err(AppError::NotFound("User not found".to_string()))
            };
        }

        Ok(())
    }

    async fn purge_soft_deleted_users(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM users WHERE deleted_at < NOW() - make_interval(days => $1)",
        )
        .bind(PURGE_AFTER_DAYS)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
