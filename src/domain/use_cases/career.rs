use uuid::Uuid;

use crate::{
    domain::career::{CareerDraft, FieldEdit},
    entities::career::{CareerEntry, CareerListResponse, StoredCareerEntry},
    errors::AppError,
    repositories::career::CareerRepository,
};

/// Career entries of an alumnus. The repository is injected so the
/// validation flow can run against any backend.
pub struct CareerHandler<R>
where
    R: CareerRepository,
{
    pub career_repo: R,
}

impl<R> CareerHandler<R>
where
    R: CareerRepository,
{
    pub fn new(career_repo: R) -> Self {
        CareerHandler { career_repo }
    }

    /// Validates a draft without persisting it.
    pub fn preview(&self, draft: &CareerDraft) -> Result<CareerEntry, AppError> {
        Ok(draft.validate_and_normalize()?)
    }

    /// Validates a submitted draft and stores the normalized entry.
    pub async fn add_entry(&self, user_id: Uuid, draft: CareerDraft) -> Result<StoredCareerEntry, AppError> {
        let entry = draft.validate_and_normalize().inspect_err(|e| {
            tracing::debug!(%user_id, "Career entry rejected: {}", e);
        })?;

        let stored = self.career_repo.create_entry(user_id, &entry).await?;
        tracing::info!(%user_id, entry_id = %stored.id, "Career entry added");
        Ok(stored)
    }

    pub async fn list_entries(&self, user_id: Uuid) -> Result<CareerListResponse, AppError> {
        let entries = self.career_repo.list_entries(user_id).await?;
        Ok(entries.into())
    }

    /// Replays field-change events on a draft seeded from the stored entry,
    /// then validates the result like a fresh submission.
    pub async fn edit_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
        edits: Vec<FieldEdit>,
    ) -> Result<StoredCareerEntry, AppError> {
        if edits.is_empty() {
            return Err(AppError::InvalidInput("No changes provided".to_string()));
        }

        let current = self
            .career_repo
            .get_entry(entry_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Career entry not found".to_string()))?;

        let mut draft = CareerDraft::from_entry(&current.entry);
        draft.apply_all(edits);
        let entry = draft.validate_and_normalize()?;

        self.career_repo.update_entry(entry_id, user_id, &entry).await
    }

    pub async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), AppError> {
        self.career_repo.delete_entry(entry_id, user_id).await?;
        tracing::info!(%user_id, %entry_id, "Career entry deleted");
        Ok(())
    }
}
