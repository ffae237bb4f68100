use crate::repositories::sqlx_repo::{
    SqlxCareerRepo, SqlxDashboardRepo, SqlxEventRepo, SqlxMentorshipRepo, SqlxProfileRepo,
    SqlxUserRepo,
};

/// One repository per aggregate, all sharing the same pool.
#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: SqlxUserRepo,
    pub career_repo: SqlxCareerRepo,
    pub profile_repo: SqlxProfileRepo,
    pub event_repo: SqlxEventRepo,
    pub mentorship_repo: SqlxMentorshipRepo,
    pub dashboard_repo: SqlxDashboardRepo,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            user_repo: SqlxUserRepo::new(pool.clone()),
            career_repo: SqlxCareerRepo::new(pool.clone()),
            profile_repo: SqlxProfileRepo::new(pool.clone()),
            event_repo: SqlxEventRepo::new(pool.clone()),
            mentorship_repo: SqlxMentorshipRepo::new(pool.clone()),
            dashboard_repo: SqlxDashboardRepo::new(pool),
        }
    }
}
