use std::borrow::Cow;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use slug::slugify;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::{markdown::safe_markdown_to_html, not_blank::not_blank};

const MAX_TITLE_LENGTH: u64 = 200;
const MAX_LOCATION_LENGTH: u64 = 200;
const MAX_DESCRIPTION_LENGTH: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Networking,
    Educational,
    Career,
    Sports,
    Social,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub location: String,
    pub is_virtual: bool,
    pub max_attendees: Option<i32>,
    pub category: EventCategory,
    pub is_featured: bool,
    pub organizer_id: Uuid,
    pub attendee_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn has_capacity(&self) -> bool {
        has_capacity(self.max_attendees, self.attendee_count)
    }
}

/// An event without a cap always has room.
pub fn has_capacity(max_attendees: Option<i32>, attendee_count: i64) -> bool {
    max_attendees.is_none_or(|max| attendee_count < i64::from(max))
}

/// Events from yesterday onwards still count as upcoming.
pub fn upcoming_cutoff(today: NaiveDate) -> NaiveDate {
    today - Duration::days(1)
}

#[derive(Debug)]
pub struct EventInsert {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub location: String,
    pub is_virtual: bool,
    pub max_attendees: Option<i32>,
    pub category: EventCategory,
    pub is_featured: bool,
    pub organizer_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewEventRequest {
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = MAX_TITLE_LENGTH, message = "Title is too long")
    )]
    pub title: String,

    #[validate(
        custom(function = "not_blank", message = "Description is required"),
        length(max = MAX_DESCRIPTION_LENGTH, message = "Description is too long")
    )]
    pub description: String,

    #[validate(custom(function = "validate_event_date"))]
    pub event_date: NaiveDate,

    #[serde(default)]
    pub event_time: Option<NaiveTime>,

    #[validate(
        custom(function = "not_blank", message = "Location is required"),
        length(max = MAX_LOCATION_LENGTH, message = "Location is too long")
    )]
    pub location: String,

    #[serde(default)]
    pub is_virtual: bool,

    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    #[serde(default)]
    pub max_attendees: Option<i32>,

    pub category: EventCategory,

    #[serde(default)]
    pub is_featured: bool,
}

impl NewEventRequest {
    pub fn prepare_for_insert(&self, organizer_id: Uuid) -> EventInsert {
        let title = self.title.trim().to_string();
        EventInsert {
            slug: event_slug(&title, self.event_date),
            title,
            description: self.description.trim().to_string(),
            event_date: self.event_date,
            event_time: self.event_time,
            location: self.location.trim().to_string(),
            is_virtual: self.is_virtual,
            max_attendees: self.max_attendees,
            category: self.category,
            is_featured: self.is_featured,
            organizer_id,
        }
    }
}

fn validate_event_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date < Utc::now().date_naive() {
        let mut err = ValidationError::new("event_date_in_past");
        err.message = Some(Cow::Borrowed("Event date cannot be in the past"));
        return Err(err);
    }
    Ok(())
}

pub fn event_slug(title: &str, date: NaiveDate) -> String {
    format!("{}-{}", slugify(title), date.format("%Y-%m-%d"))
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: Event,
    pub description_html: String,
    pub is_full: bool,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        EventResponse {
            description_html: safe_markdown_to_html(&event.description),
            is_full: !event.has_capacity(),
            event,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventResponse>,
    pub total: usize,
}

impl From<Vec<Event>> for EventListResponse {
    fn from(events: Vec<Event>) -> Self {
        let events: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
        EventListResponse {
            total: events.len(),
            events,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub event_id: Uuid,
    pub attendee_count: i64,
    pub message: String,
}

/// Outcome of an attempted registration, decided inside the repository transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered(i64),
    AlreadyRegistered,
    Full,
    EventNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(date: NaiveDate) -> NewEventRequest {
        NewEventRequest {
            title: "  Alumni Mixer  ".into(),
            description: "Meet **everyone**".into(),
            event_date: date,
            event_time: NaiveTime::from_hms_opt(18, 30, 0),
            location: "Main Hall".into(),
            is_virtual: false,
            max_attendees: Some(50),
            category: EventCategory::Networking,
            is_featured: true,
        }
    }

    #[test]
    fn capacity_respects_optional_cap() {
        assert!(has_capacity(None, 10_000));
        assert!(has_capacity(Some(2), 1));
        assert!(!has_capacity(Some(2), 2));
    }

    #[test]
    fn past_dates_are_rejected() {
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let errors = request(yesterday).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("event_date"));

        let next_week = Utc::now().date_naive() + Duration::days(7);
        assert!(request(next_week).validate().is_ok());
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        let mut r = request(Utc::now().date_naive() + Duration::days(1));
        r.title = "   ".into();
        r.description = "\n\t ".into();
        r.location = "  ".into();

        let errors = r.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("location"));
        assert_eq!(
            fields["title"][0].message.as_deref(),
            Some("Title is required")
        );
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut r = request(Utc::now().date_naive() + Duration::days(1));
        r.max_attendees = Some(0);
        assert!(r.validate().unwrap_err().field_errors().contains_key("max_attendees"));
    }

    #[test]
    fn insert_gets_dated_slug_and_trimmed_title() {
        let date = NaiveDate::from_ymd_opt(2030, 5, 17).unwrap();
        let organizer = Uuid::new_v4();
        let insert = request(date).prepare_for_insert(organizer);

        assert_eq!(insert.title, "Alumni Mixer");
        assert_eq!(insert.slug, "alumni-mixer-2030-05-17");
        assert_eq!(insert.organizer_id, organizer);
    }

    #[test]
    fn upcoming_includes_yesterday() {
        let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(upcoming_cutoff(today), NaiveDate::from_ymd_opt(2029, 12, 31).unwrap());
    }

    #[test]
    fn category_parses_lowercase() {
        let c: EventCategory = serde_json::from_str("\"sports\"").unwrap();
        assert_eq!(c, EventCategory::Sports);
    }
}
