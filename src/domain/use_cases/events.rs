use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::event::{
        upcoming_cutoff, EventListResponse, EventResponse, NewEventRequest, RegistrationOutcome,
        RegistrationResponse,
    },
    errors::AppError,
    repositories::event::EventRepository,
};

pub const EVENT_LIST_LIMIT: i64 = 100;

pub struct EventHandler<R>
where
    R: EventRepository,
{
    pub event_repo: R,
}

impl<R> EventHandler<R>
where
    R: EventRepository,
{
    pub fn new(event_repo: R) -> Self {
        EventHandler { event_repo }
    }

    pub async fn create_event(&self, organizer_id: Uuid, request: NewEventRequest) -> Result<EventResponse, AppError> {
        request.validate()?;

        let insert = request.prepare_for_insert(organizer_id);
        let event = self.event_repo.create_event(&insert).await?;

        tracing::info!(event_id = %event.id, slug = %event.slug, "Event created");
        Ok(event.into())
    }

    pub async fn get_event(&self, id: Uuid) -> Result<EventResponse, AppError> {
        self.event_repo
            .get_event(id)
            .await?
            .map(EventResponse::from)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    pub async fn upcoming_events(&self) -> Result<EventListResponse, AppError> {
        let cutoff = upcoming_cutoff(Utc::now().date_naive());
        let events = self.event_repo.upcoming_events(cutoff, EVENT_LIST_LIMIT).await?;
        Ok(events.into())
    }

    pub async fn past_events(&self) -> Result<EventListResponse, AppError> {
        let cutoff = upcoming_cutoff(Utc::now().date_naive());
        let events = self.event_repo.past_events(cutoff, EVENT_LIST_LIMIT).await?;
        Ok(events.into())
    }

    pub async fn register(&self, event_id: Uuid, user_id: Uuid) -> Result<RegistrationResponse, AppError> {
        match self.event_repo.register_attendee(event_id, user_id).await? {
            RegistrationOutcome::Registered(attendee_count) => {
                tracing::info!(%event_id, %user_id, attendee_count, "Registered for event");
                Ok(RegistrationResponse {
                    event_id,
                    attendee_count,
                    message: "Registration confirmed".to_string(),
                })
            }
            RegistrationOutcome::AlreadyRegistered => {
                Err(AppError::Conflict("You are already registered for this event".to_string()))
            }
            RegistrationOutcome::Full => {
                Err(AppError::Conflict("This event is full".to_string()))
            }
            RegistrationOutcome::EventNotFound => {
                Err(AppError::NotFound("Event not found".to_string()))
            }
        }
    }

    pub async fn cancel_registration(&self, event_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if !self.event_repo.cancel_registration(event_id, user_id).await? {
            return Err(AppError::NotFound("No registration found for this event".to_string()));
        }

        tracing::info!(%event_id, %user_id, "Event registration cancelled");
        Ok(())
    }
}
