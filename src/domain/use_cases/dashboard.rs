use chrono::Utc;

use crate::{
    entities::{
        dashboard::{DashboardResponse, DASHBOARD_EVENTS_LIMIT, RECENT_ALUMNI_LIMIT},
        event::{upcoming_cutoff, EventResponse},
    },
    errors::AppError,
    repositories::{dashboard::DashboardRepository, event::EventRepository, profile::ProfileRepository},
};

/// Admin overview built only from stored data.
pub struct DashboardHandler<D, P, E>
where
    D: DashboardRepository,
    P: ProfileRepository,
    E: EventRepository,
{
    pub dashboard_repo: D,
    pub profile_repo: P,
    pub event_repo: E,
}

impl<D, P, E> DashboardHandler<D, P, E>
where
    D: DashboardRepository,
    P: ProfileRepository,
    E: EventRepository,
{
    pub fn new(dashboard_repo: D, profile_repo: P, event_repo: E) -> Self {
        DashboardHandler {
            dashboard_repo,
            profile_repo,
            event_repo,
        }
    }

    pub async fn overview(&self) -> Result<DashboardResponse, AppError> {
        let cutoff = upcoming_cutoff(Utc::now().date_naive());

        let (stats, recent_alumni, events) = futures::try_join!(
            self.dashboard_repo.stats(cutoff),
            self.profile_repo.recent_alumni(RECENT_ALUMNI_LIMIT),
            self.event_repo.upcoming_events(cutoff, DASHBOARD_EVENTS_LIMIT),
        )?;

        Ok(DashboardResponse {
            stats,
            recent_alumni,
            upcoming_events: events.into_iter().map(EventResponse::from).collect(),
        })
    }
}
