use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::mentorship::{
        MentorshipInsert, MentorshipRequest, MentorshipRole, MentorshipStats, MentorshipStatus,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxMentorshipRepo,
};

pub const REQUEST_LIST_LIMIT: i64 = 100;

const OPEN_PAIR_CONSTRAINT: &str = "mentorship_requests_open_pair_key";

const REQUEST_SELECT: &str = r#"
    SELECT
        m.id, m.mentee_id, COALESCE(mentee.display_name, '') AS mentee_name,
        m.mentor_id, COALESCE(mentor.display_name, '') AS mentor_name,
        m.topic, m.message, m.status, m.created_at, m.updated_at
    FROM mentorship_requests m
    LEFT JOIN alumni_profiles mentee ON mentee.user_id = m.mentee_id
    LEFT JOIN alumni_profiles mentor ON mentor.user_id = m.mentor_id
"#;

/// Outcome of sending a request, decided inside the repository transaction.
#[derive(Debug, Clone)]
pub enum RequestOutcome {
    Created(MentorshipRequest),
    MentorNotFound,
    AlreadyOpen,
}

#[async_trait]
pub trait MentorshipRepository: Send + Sync {
    /// Stores a pending request if the mentor is an active mentor and no open
    /// request already exists for the pair.
    async fn create_request(&self, request: &MentorshipInsert) -> Result<RequestOutcome, AppError>;

    async fn get_request(&self, id: Uuid) -> Result<Option<MentorshipRequest>, AppError>;

    /// Requests sent (`Mentee`) or received (`Mentor`) by `user_id`, newest first.
    async fn list_requests(&self, user_id: Uuid, role: MentorshipRole, limit: i64) -> Result<Vec<MentorshipRequest>, AppError>;

    /// Moves the request to `to` only if it is still in `from`, and keeps the
    /// mentor's `mentees_count` equal to their accepted requests.
    /// `None` when the status changed in the meantime.
    async fn update_status(
        &self,
        id: Uuid,
        from: MentorshipStatus,
        to: MentorshipStatus,
    ) -> Result<Option<MentorshipRequest>, AppError>;

    async fn stats(&self, user_id: Uuid) -> Result<MentorshipStats, AppError>;
}

impl SqlxMentorshipRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxMentorshipRepo { pool }
    }
}

#[async_trait]
impl MentorshipRepository for SqlxMentorshipRepo {
    async fn create_request(&self, request: &MentorshipInsert) -> Result<RequestOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        let is_mentor: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT p.is_mentor
            FROM alumni_profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = $1 AND u.deleted_at IS NULL
            FOR SHARE OF p
            "#,
        )
        .bind(request.mentor_id)
        .fetch_optional(&mut *tx)
        .await?;

        if is_mentor != Some(true) {
            return Ok(RequestOutcome::MentorNotFound);
        }

        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO mentorship_requests (mentee_id, mentor_id, topic, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(request.mentee_id)
        .bind(request.mentor_id)
        .bind(&request.topic)
        .bind(&request.message)
        .fetch_one(&mut *tx)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some(OPEN_PAIR_CONSTRAINT) => {
                return Ok(RequestOutcome::AlreadyOpen);
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;

        self.get_request(id)
            .await?
            .map(RequestOutcome::Created)
            .ok_or_else(|| AppError::InternalError("Created request could not be read back".into()))
    }

    async fn get_request(&self, id: Uuid) -> Result<Option<MentorshipRequest>, AppError> {
        let query = format!("{REQUEST_SELECT} WHERE m.id = $1");

        let request = sqlx::query_as::<_, MentorshipRequest>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    async fn list_requests(&self, user_id: Uuid, role: MentorshipRole, limit: i64) -> Result<Vec<MentorshipRequest>, AppError> {
        let column = match role {
            MentorshipRole::Mentee => "m.mentee_id",
            MentorshipRole::Mentor => "m.mentor_id",
        };
        let query = format!("{REQUEST_SELECT} WHERE {column} = $1 ORDER BY m.created_at DESC LIMIT $2");

        let requests = sqlx::query_as::<_, MentorshipRequest>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(requests)
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: MentorshipStatus,
        to: MentorshipStatus,
    ) -> Result<Option<MentorshipRequest>, AppError> {
        let mut tx = self.pool.begin().await?;

        let mentor_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE mentorship_requests
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING mentor_id
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mentor_id) = mentor_id else {
            return Ok(None);
        };

        if from == MentorshipStatus::Accepted || to == MentorshipStatus::Accepted {
            sqlx::query(
                r#"
                UPDATE alumni_profiles
                SET mentees_count = (
                    SELECT COUNT(*) FROM mentorship_requests
                    WHERE mentor_id = $1 AND status = 'accepted'
                )
                WHERE user_id = $1
                "#,
            )
            .bind(mentor_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_request(id).await
    }

    async fn stats(&self, user_id: Uuid) -> Result<MentorshipStats, AppError> {
        let stats = sqlx::query_as::<_, MentorshipStats>(
            r#"
            SELECT
                (SELECT COUNT(*)
                    FROM alumni_profiles p
                    JOIN users u ON u.id = p.user_id
                    WHERE p.is_mentor = TRUE AND u.deleted_at IS NULL) AS available_mentors,
                (SELECT COUNT(*) FROM mentorship_requests WHERE status = 'accepted') AS active_mentorships,
                (SELECT COUNT(*) FROM mentorship_requests WHERE mentee_id = $1) AS user_requests
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
