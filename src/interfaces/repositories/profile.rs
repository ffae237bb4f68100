use async_trait::async_trait;
use sqlx::{query_builder::Separated, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    domain::skills::{SkillEdit, SkillEditOutcome},
    entities::{
        option_fields::OptionField,
        profile::{AlumniProfile, DirectoryEntry, ProfilePatch},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProfileRepo,
};

pub const DIRECTORY_LIMIT: i64 = 500;
pub const MENTORS_LIMIT: i64 = 50;

const DIRECTORY_COLUMNS: &str = "p.user_id, p.display_name, p.batch, p.department, p.company, \
    p.title, p.location, p.linkedin_url, p.skills";

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Profile of an active (not soft-deleted) alumnus.
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<AlumniProfile>, AppError>;

    /// Applies every non-`Unchanged` field of the patch.
    async fn update_profile(&self, user_id: Uuid, patch: &ProfilePatch) -> Result<AlumniProfile, AppError>;

    /// Applies `edit` to the row-locked skill list. `None` when the profile does not exist.
    async fn edit_skills(&self, user_id: Uuid, edit: &SkillEdit) -> Result<Option<SkillEditOutcome>, AppError>;

    /// Alumni ordered by name. A non-blank `query` filters on name, company or department.
    async fn directory(&self, query: &str, limit: i64) -> Result<Vec<DirectoryEntry>, AppError>;

    /// Mentors, best rated first.
    async fn mentors(&self, limit: i64) -> Result<Vec<AlumniProfile>, AppError>;

    /// Most recently joined alumni.
    async fn recent_alumni(&self, limit: i64) -> Result<Vec<DirectoryEntry>, AppError>;
}

impl SqlxProfileRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProfileRepo { pool }
    }
}

fn push_field<'args, T>(
    set: &mut Separated<'_, 'args, Postgres, &'static str>,
    column: &'static str,
    field: &OptionField<T>,
) where
    T: Clone + Send + 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres>,
{
    if let Some(value) = field.as_ref_option() {
        set.push(format!("{column} = "));
        set.push_bind_unseparated(value.cloned());
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<AlumniProfile>, AppError> {
        let profile = sqlx::query_as::<_, AlumniProfile>(
            r#"
            SELECT p.*
            FROM alumni_profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = $1 AND u.deleted_at IS NULL
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn update_profile(&self, user_id: Uuid, patch: &ProfilePatch) -> Result<AlumniProfile, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE alumni_profiles SET ");

        let mut set = builder.separated(", ");
        push_field(&mut set, "display_name", &patch.display_name);
        push_field(&mut set, "batch", &patch.batch);
        push_field(&mut set, "department", &patch.department);
        push_field(&mut set, "title", &patch.title);
        push_field(&mut set, "company", &patch.company);
        push_field(&mut set, "location", &patch.location);
        push_field(&mut set, "bio", &patch.bio);
        push_field(&mut set, "linkedin_url", &patch.linkedin_url);
        push_field(&mut set, "is_mentor", &patch.is_mentor);
        push_field(&mut set, "availability", &patch.availability);
        push_field(&mut set, "response_time", &patch.response_time);
        push_field(&mut set, "expertise", &patch.expertise);
        push_field(&mut set, "languages", &patch.languages);
        set.push("updated_at = NOW()");

        builder.push(" WHERE user_id = ").push_bind(user_id);
        builder.push(" AND user_id IN (SELECT id FROM users WHERE deleted_at IS NULL)");
        builder.push(" RETURNING *");

        builder
            .build_query_as::<AlumniProfile>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".into()))
    }

    async fn edit_skills(&self, user_id: Uuid, edit: &SkillEdit) -> Result<Option<SkillEditOutcome>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent edits of the same skill list.
        let current: Option<Vec<String>> = sqlx::query_scalar(
            r#"
            SELECT p.skills
            FROM alumni_profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = $1 AND u.deleted_at IS NULL
            FOR UPDATE OF p
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut skills) = current else {
            return Ok(None);
        };

        let changed = edit.apply(&mut skills)?;

        if changed {
            sqlx::query("UPDATE alumni_profiles SET skills = $2, updated_at = NOW() WHERE user_id = $1")
                .bind(user_id)
                .bind(&skills)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(Some(SkillEditOutcome { skills, changed }))
    }

    async fn directory(&self, query: &str, limit: i64) -> Result<Vec<DirectoryEntry>, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(DIRECTORY_COLUMNS);
        builder.push(
            " FROM alumni_profiles p JOIN users u ON u.id = p.user_id WHERE u.deleted_at IS NULL",
        );

        let needle = query.trim().to_lowercase();
        if !needle.is_empty() {
            builder.push(" AND (strpos(lower(p.display_name), ").push_bind(needle.clone());
            builder.push(") > 0 OR strpos(lower(coalesce(p.company, '')), ").push_bind(needle.clone());
            builder.push(") > 0 OR strpos(lower(coalesce(p.department, '')), ").push_bind(needle);
            builder.push(") > 0)");
        }

        builder.push(" ORDER BY p.display_name ASC LIMIT ").push_bind(limit);

        let entries = builder
            .build_query_as::<DirectoryEntry>()
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    async fn mentors(&self, limit: i64) -> Result<Vec<AlumniProfile>, AppError> {
        let mentors = sqlx::query_as::<_, AlumniProfile>(
            r#"
            SELECT p.*
            FROM alumni_profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.is_mentor = TRUE AND u.deleted_at IS NULL
            ORDER BY p.rating DESC, p.display_name ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(mentors)
    }

    async fn recent_alumni(&self, limit: i64) -> Result<Vec<DirectoryEntry>, AppError> {
        let query = format!(
            "SELECT {DIRECTORY_COLUMNS} FROM alumni_profiles p JOIN users u ON u.id = p.user_id \
             WHERE u.deleted_at IS NULL ORDER BY u.created_at DESC LIMIT $1"
        );

        let entries = sqlx::query_as::<_, DirectoryEntry>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }
}
