
use alumninet_backend::{
    entities::dashboard::{DashboardStats, DASHBOARD_EVENTS_LIMIT, RECENT_ALUMNI_LIMIT},
    errors::AppError,
    use_cases::dashboard::DashboardHandler,
};
use chrono::{Duration, Utc};
use mockall::predicate::eq;
use mocks::{event, MockDashboardRepo, MockEventRepo, MockProfileRepo};

#[actix_rt::test]
async fn overview_combines_stats_alumni_and_events() {
    let cutoff = Utc::now().date_naive() - Duration::days(1);

    let mut stats_repo = MockDashboardRepo::new();
    stats_repo.expect_stats()
        .with(eq(cutoff))
        .returning(|_| Ok(DashboardStats {
            total_alumni: 120,
            mentors: 14,
            upcoming_events: 3,
            career_entries: 310,
        }));

    let mut profile_repo = MockProfileRepo::new();
    profile_repo.expect_recent_alumni()
        .with(eq(RECENT_ALUMNI_LIMIT))
        .returning(|_| Ok(vec![]));

    let mut event_repo = MockEventRepo::new();
    event_repo.expect_upcoming_events()
        .with(eq(cutoff), eq(DASHBOARD_EVENTS_LIMIT))
        .returning(|_, _| Ok(vec![event(Some(10), 2)]));

    let handler = DashboardHandler::new(stats_repo, profile_repo, event_repo);
    let overview = handler.overview().await.unwrap();

    assert_eq!(overview.stats.total_alumni, 120);
    assert_eq!(overview.stats.mentors, 14);
    assert_eq!(overview.upcoming_events.len(), 1);
    assert!(overview.recent_alumni.is_empty());
}

#[actix_rt::test]
async fn any_failing_source_fails_the_overview() {
    let mut stats_repo = MockDashboardRepo::new();
    stats_repo.expect_stats().returning(|_| Ok(DashboardStats::default()));

    let mut profile_repo = MockProfileRepo::new();
    profile_repo.expect_recent_alumni()
        .returning(|_| Err(AppError::InternalError("connection reset".into())));

    let mut event_repo = MockEventRepo::new();
    event_repo.expect_upcoming_events().returning(|_, _| Ok(vec![]));

    let handler = DashboardHandler::new(stats_repo, profile_repo, event_repo);

    assert!(matches!(handler.overview().await, Err(AppError::InternalError(_))));
}
