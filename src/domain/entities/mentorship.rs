use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{errors::AppError, utils::not_blank::not_blank};

const MAX_TOPIC_LENGTH: u64 = 200;
const MAX_MESSAGE_LENGTH: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "mentorship_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MentorshipStatus {
    #[display("pending")]
    Pending,
    #[display("accepted")]
    Accepted,
    #[display("declined")]
    Declined,
    #[display("completed")]
    Completed,
}

/// Which side of a request the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Mentee,
    Mentor,
}

impl MentorshipStatus {
    /// Checks that `participant` may move a request from `self` to `next`.
    ///
    /// Only the mentor accepts. Either side may decline a pending request
    /// (for the mentee that is a withdrawal) or complete an accepted one.
    pub fn transition(self, next: MentorshipStatus, participant: Participant) -> Result<(), AppError> {
        use MentorshipStatus::*;

        match (self, next, participant) {
            (Pending, Accepted, Participant::Mentor) => Ok(()),
            (Pending, Accepted, Participant::Mentee) => {
                Err(AppError::ForbiddenAccess)
            }
            (Pending, Declined, _) | (Accepted, Completed, _) => Ok(()),
            (from, to, _) => Err(AppError::Conflict(format!(
                "Cannot move a {from} request to {to}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MentorshipRequest {
    pub id: Uuid,
    pub mentee_id: Uuid,
    pub mentee_name: String,
    pub mentor_id: Uuid,
    pub mentor_name: String,
    pub topic: String,
    pub message: String,
    pub status: MentorshipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MentorshipRequest {
    /// The caller's side of the request, `None` for outsiders.
    pub fn participant(&self, user_id: Uuid) -> Option<Participant> {
        if user_id == self.mentor_id {
            Some(Participant::Mentor)
        } else if user_id == self.mentee_id {
            Some(Participant::Mentee)
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewMentorshipRequest {
    pub mentor_id: Uuid,

    #[validate(
        custom(function = "not_blank", message = "Topic is required"),
        length(max = MAX_TOPIC_LENGTH, message = "Topic is too long")
    )]
    pub topic: String,

    #[validate(
        custom(function = "not_blank", message = "Message is required"),
        length(max = MAX_MESSAGE_LENGTH, message = "Message is too long")
    )]
    pub message: String,
}

#[derive(Debug)]
pub struct MentorshipInsert {
    pub mentee_id: Uuid,
    pub mentor_id: Uuid,
    pub topic: String,
    pub message: String,
}

impl NewMentorshipRequest {
    pub fn prepare_for_insert(&self, mentee_id: Uuid) -> MentorshipInsert {
        MentorshipInsert {
            mentee_id,
            mentor_id: self.mentor_id,
            topic: self.topic.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMentorshipStatus {
    pub status: MentorshipStatus,
}

/// Which list of requests to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorshipRole {
    /// Requests the caller sent.
    #[default]
    Mentee,
    /// Requests the caller received as a mentor.
    Mentor,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MentorshipListQuery {
    pub role: MentorshipRole,
}

#[derive(Debug, Serialize)]
pub struct MentorshipListResponse {
    pub total: usize,
    pub requests: Vec<MentorshipRequest>,
}

impl From<Vec<MentorshipRequest>> for MentorshipListResponse {
    fn from(requests: Vec<MentorshipRequest>) -> Self {
        MentorshipListResponse {
            total: requests.len(),
            requests,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct MentorshipStats {
    pub available_mentors: i64,
    pub active_mentorships: i64,
    pub user_requests: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use MentorshipStatus::*;

    #[test]
    fn only_the_mentor_accepts() {
        assert!(Pending.transition(Accepted, Participant::Mentor).is_ok());
        assert!(matches!(
            Pending.transition(Accepted, Participant::Mentee),
            Err(AppError::ForbiddenAccess)
        ));
    }

    #[test]
    fn either_side_declines_pending_or_completes_accepted() {
        for who in [Participant::Mentor, Participant::Mentee] {
            assert!(Pending.transition(Declined, who).is_ok());
            assert!(Accepted.transition(Completed, who).is_ok());
        }
    }

    #[test]
    fn closed_requests_do_not_move() {
        for from in [Declined, Completed] {
            for to in [Pending, Accepted, Declined, Completed] {
                assert!(matches!(
                    from.transition(to, Participant::Mentor),
                    Err(AppError::Conflict(_))
                ));
            }
        }
        assert!(matches!(Pending.transition(Completed, Participant::Mentor), Err(AppError::Conflict(_))));
        assert!(matches!(Accepted.transition(Pending, Participant::Mentee), Err(AppError::Conflict(_))));
    }

    #[test]
    fn blank_topic_and_message_are_rejected() {
        let request = NewMentorshipRequest {
            mentor_id: Uuid::new_v4(),
            topic: "  ".into(),
            message: "\n".into(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("topic"));
        assert!(errors.field_errors().contains_key("message"));
    }

    #[test]
    fn role_defaults_to_mentee() {
        let query: MentorshipListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.role, MentorshipRole::Mentee);

        let query: MentorshipListQuery = serde_json::from_str(r#"{"role":"mentor"}"#).unwrap();
        assert_eq!(query.role, MentorshipRole::Mentor);
    }
}
