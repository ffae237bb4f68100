use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::career::{CareerEntry, CareerEntryRow, StoredCareerEntry},
    errors::AppError,
    repositories::sqlx_repo::SqlxCareerRepo,
};

#[async_trait]
pub trait CareerRepository: Send + Sync {
    /// Persists a validated entry for `user_id`.
    async fn create_entry(&self, user_id: Uuid, entry: &CareerEntry) -> Result<StoredCareerEntry, AppError>;

    /// Entries of an active alumnus, most recent start first.
    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<StoredCareerEntry>, AppError>;

    /// Entry `id` if it belongs to `user_id`.
    async fn get_entry(&self, id: Uuid, user_id: Uuid) -> Result<Option<StoredCareerEntry>, AppError>;

    /// Replaces every field of an owned entry.
    async fn update_entry(&self, id: Uuid, user_id: Uuid, entry: &CareerEntry) -> Result<StoredCareerEntry, AppError>;

    async fn delete_entry(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError>;
}

impl SqlxCareerRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxCareerRepo { pool }
    }
}

#[async_trait]
impl CareerRepository for SqlxCareerRepo {
    async fn create_entry(&self, user_id: Uuid, entry: &CareerEntry) -> Result<StoredCareerEntry, AppError> {
        let row = sqlx::query_as::<_, CareerEntryRow>(
            r#"
            INSERT INTO career_entries (
                user_id, position, company, location,
                start_date, end_date, is_current, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&entry.position)
        .bind(&entry.company)
        .bind(&entry.location)
        .bind(entry.start_date.first_day())
        .bind(entry.end_date.map(|d| d.first_day()))
        .bind(entry.is_current)
        .bind(&entry.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<StoredCareerEntry>, AppError> {
        let rows = sqlx::query_as::<_, CareerEntryRow>(
            r#"
            SELECT c.*
            FROM career_entries c
            JOIN users u ON u.id = c.user_id
            WHERE c.user_id = $1 AND u.deleted_at IS NULL
            ORDER BY c.is_current DESC, c.start_date DESC, c.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoredCareerEntry::from).collect())
    }

    async fn get_entry(&self, id: Uuid, user_id: Uuid) -> Result<Option<StoredCareerEntry>, AppError> {
        let row = sqlx::query_as::<_, CareerEntryRow>(
            "SELECT * FROM career_entries WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoredCareerEntry::from))
    }

    async fn update_entry(&self, id: Uuid, user_id: Uuid, entry: &CareerEntry) -> Result<StoredCareerEntry, AppError> {
        let row = sqlx::query_as::<_, CareerEntryRow>(
            r#"
            UPDATE career_entries
            SET
                position = $3,
                company = $4,
                location = $5,
                start_date = $6,
                end_date = $7,
                is_current = $8,
                description = $9,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&entry.position)
        .bind(&entry.company)
        .bind(&entry.location)
        .bind(entry.start_date.first_day())
        .bind(entry.end_date.map(|d| d.first_day()))
        .bind(entry.is_current)
        .bind(&entry.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Career entry not found".into()))?;

        Ok(row.into())
    }

    async fn delete_entry(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM career_entries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Career entry not found".into()));
        }

        Ok(())
    }
}
