use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::mentorship::{
        MentorshipListResponse, MentorshipRequest, MentorshipRole, MentorshipStats,
        NewMentorshipRequest, UpdateMentorshipStatus,
    },
    errors::AppError,
    repositories::mentorship::{MentorshipRepository, RequestOutcome, REQUEST_LIST_LIMIT},
};

pub struct MentorshipHandler<R>
where
    R: MentorshipRepository,
{
    pub mentorship_repo: R,
}

impl<R> MentorshipHandler<R>
where
    R: MentorshipRepository,
{
    pub fn new(mentorship_repo: R) -> Self {
        MentorshipHandler { mentorship_repo }
    }

    pub async fn send_request(
        &self,
        mentee_id: Uuid,
        request: NewMentorshipRequest,
    ) -> Result<MentorshipRequest, AppError> {
        request.validate()?;

        if request.mentor_id == mentee_id {
            return Err(AppError::InvalidInput("You cannot request mentorship from yourself".to_string()));
        }

        let insert = request.prepare_for_insert(mentee_id);

        match self.mentorship_repo.create_request(&insert).await? {
            RequestOutcome::Created(created) => {
                tracing::info!(request_id = %created.id, %mentee_id, mentor_id = %created.mentor_id, "Mentorship requested");
                Ok(created)
            }
            RequestOutcome::MentorNotFound => Err(AppError::NotFound("Mentor not found".to_string())),
            RequestOutcome::AlreadyOpen => Err(AppError::Conflict(
                "You already have an open request with this mentor".to_string(),
            )),
        }
    }

    pub async fn list_requests(&self, user_id: Uuid, role: MentorshipRole) -> Result<MentorshipListResponse, AppError> {
        let requests = self
            .mentorship_repo
            .list_requests(user_id, role, REQUEST_LIST_LIMIT)
            .await?;

        Ok(requests.into())
    }

    /// Visible to the mentee and the mentor only; 404 for anyone else.
    pub async fn get_request(&self, id: Uuid, user_id: Uuid) -> Result<MentorshipRequest, AppError> {
        self.mentorship_repo
            .get_request(id)
            .await?
            .filter(|request| request.participant(user_id).is_some())
            .ok_or_else(|| AppError::NotFound("Mentorship request not found".to_string()))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: UpdateMentorshipStatus,
    ) -> Result<MentorshipRequest, AppError> {
        let current = self.get_request(id, user_id).await?;
        let participant = current
            .participant(user_id)
            .ok_or_else(|| AppError::NotFound("Mentorship request not found".to_string()))?;

        current.status.transition(update.status, participant)?;

        let updated = self
            .mentorship_repo
            .update_status(id, current.status, update.status)
            .await?
            .ok_or_else(|| AppError::Conflict("The request was updated by someone else, reload it".to_string()))?;

        tracing::info!(request_id = %id, from = %current.status, to = %updated.status, "Mentorship request updated");
        Ok(updated)
    }

    pub async fn stats(&self, user_id: Uuid) -> Result<MentorshipStats, AppError> {
        self.mentorship_repo.stats(user_id).await
    }
}
