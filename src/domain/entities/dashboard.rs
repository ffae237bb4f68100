use serde::Serialize;

use crate::entities::{event::EventResponse, profile::DirectoryEntry};

pub const RECENT_ALUMNI_LIMIT: i64 = 3;
pub const DASHBOARD_EVENTS_LIMIT: i64 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DashboardStats {
    pub total_alumni: i64,
    pub mentors: i64,
    pub upcoming_events: i64,
    pub career_entries: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_alumni: Vec<DirectoryEntry>,
    pub upcoming_events: Vec<EventResponse>,
}
