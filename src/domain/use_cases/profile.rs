use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::skills::{normalize_skill, suggest_skills, SkillEdit, SkillEditOutcome},
    entities::profile::{
        AddSkillRequest, AlumniProfile, DirectoryEntry, ProfilePatch, ProfileResponse,
        SkillSuggestionsResponse, SkillsResponse, UpdateProfileRequest,
    },
    errors::AppError,
    repositories::profile::{ProfileRepository, DIRECTORY_LIMIT, MENTORS_LIMIT},
};

pub struct ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub profile_repo: R,
}

impl<R> ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub fn new(profile_repo: R) -> Self {
        ProfileHandler { profile_repo }
    }

    async fn load(&self, user_id: Uuid) -> Result<AlumniProfile, AppError> {
        self.profile_repo
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<ProfileResponse, AppError> {
        self.load(user_id).await.map(ProfileResponse::from)
    }

    /// Applies a tri-state PATCH body. An empty body returns the profile as is.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<ProfileResponse, AppError> {
        let patch = ProfilePatch::try_from(request)?;

        if patch.is_empty() {
            return self.get_profile(user_id).await;
        }

        let updated = self.profile_repo.update_profile(user_id, &patch).await?;
        tracing::info!(%user_id, "Profile updated");
        Ok(updated.into())
    }

    async fn edit_skills(&self, user_id: Uuid, edit: SkillEdit) -> Result<SkillEditOutcome, AppError> {
        self.profile_repo
            .edit_skills(user_id, &edit)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    /// Adds one skill. Listing it again (any casing) is not an error.
    pub async fn add_skill(&self, user_id: Uuid, request: AddSkillRequest) -> Result<SkillsResponse, AppError> {
        request.validate()?;
        let skill = normalize_skill(&request.skill)?.to_string();

        let outcome = self.edit_skills(user_id, SkillEdit::Add(skill)).await?;
        if outcome.changed {
            tracing::info!(%user_id, "Skill added");
        }

        Ok(SkillsResponse { skills: outcome.skills })
    }

    pub async fn remove_skill(&self, user_id: Uuid, name: &str) -> Result<SkillsResponse, AppError> {
        let outcome = self.edit_skills(user_id, SkillEdit::Remove(name.to_string())).await?;

        if !outcome.changed {
            return Err(AppError::NotFound(format!("Skill '{}' is not on your profile", name.trim())));
        }

        Ok(SkillsResponse { skills: outcome.skills })
    }

    pub async fn skill_suggestions(&self, user_id: Uuid, query: &str) -> Result<SkillSuggestionsResponse, AppError> {
        let profile = self.load(user_id).await?;

        Ok(SkillSuggestionsResponse {
            query: query.trim().to_string(),
            suggestions: suggest_skills(query, &profile.skills),
        })
    }

    pub async fn directory(&self, query: Option<&str>) -> Result<Vec<DirectoryEntry>, AppError> {
        self.profile_repo
            .directory(query.unwrap_or_default(), DIRECTORY_LIMIT)
            .await
    }

    pub async fn mentors(&self) -> Result<Vec<ProfileResponse>, AppError> {
        let mentors = self.profile_repo.mentors(MENTORS_LIMIT).await?;
        Ok(mentors.into_iter().map(ProfileResponse::from).collect())
    }
}
