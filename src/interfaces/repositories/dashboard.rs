use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    entities::dashboard::DashboardStats,
    errors::AppError,
    repositories::sqlx_repo::SqlxDashboardRepo,
};

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Counts behind the admin stats cards. Events count from `upcoming_from`.
    async fn stats(&self, upcoming_from: NaiveDate) -> Result<DashboardStats, AppError>;
}

impl SqlxDashboardRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxDashboardRepo { pool }
    }
}

#[async_trait]
impl DashboardRepository for SqlxDashboardRepo {
    async fn stats(&self, upcoming_from: NaiveDate) -> Result<DashboardStats, AppError> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE deleted_at IS NULL) AS total_alumni,
                (SELECT COUNT(*)
                    FROM alumni_profiles p
                    JOIN users u ON u.id = p.user_id
                    WHERE p.is_mentor = TRUE AND u.deleted_at IS NULL) AS mentors,
                (SELECT COUNT(*) FROM events WHERE event_date >= $1) AS upcoming_events,
                (SELECT COUNT(*) FROM career_entries) AS career_entries
            "#,
        )
        .bind(upcoming_from)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
