mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod shared_repos;
pub mod telemetry;

pub use domain::{career, entities, password, skills, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, cache, db, limiter, utils};

use auth::jwt::JwtService;
use cache::token_store::TokenDenyList;
use limiter::rate_limiter::AttemptLimiter;
use repositories::sqlx_repo::{
    SqlxCareerRepo, SqlxDashboardRepo, SqlxEventRepo, SqlxMentorshipRepo, SqlxProfileRepo,
    SqlxUserRepo,
};
use shared_repos::SharedRepositories;
use use_cases::{
    auth::AuthHandler, career::CareerHandler, dashboard::DashboardHandler,
    events::EventHandler, mentorship::MentorshipHandler, profile::ProfileHandler,
};

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, JwtService>;
pub type AppCareerHandler = CareerHandler<SqlxCareerRepo>;
pub type AppProfileHandler = ProfileHandler<SqlxProfileRepo>;
pub type AppEventHandler = EventHandler<SqlxEventRepo>;
pub type AppMentorshipHandler = MentorshipHandler<SqlxMentorshipRepo>;
pub type AppDashboardHandler = DashboardHandler<SqlxDashboardRepo, SqlxProfileRepo, SqlxEventRepo>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub career_handler: AppCareerHandler,
    pub profile_handler: AppProfileHandler,
    pub event_handler: AppEventHandler,
    pub mentorship_handler: AppMentorshipHandler,
    pub dashboard_handler: AppDashboardHandler,
    pub auth_limiter: AttemptLimiter,
    pub trust_x_forwarded_for: bool,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let repos = SharedRepositories::new(pool);

        let deny_list = config.redis_url.as_deref().and_then(|url| {
            TokenDenyList::from_url(url)
                .map_err(|e| tracing::error!("Redis pool creation error: {}", e))
                .ok()
        });

        AppState {
            auth_handler: AuthHandler::new(repos.user_repo.clone(), JwtService::new(config), deny_list),
            career_handler: CareerHandler::new(repos.career_repo.clone()),
            profile_handler: ProfileHandler::new(repos.profile_repo.clone()),
            event_handler: EventHandler::new(repos.event_repo.clone()),
            mentorship_handler: MentorshipHandler::new(repos.mentorship_repo),
            dashboard_handler: DashboardHandler::new(
                repos.dashboard_repo,
                repos.profile_repo,
                repos.event_repo,
            ),
            auth_limiter: AttemptLimiter::per_minute(config.auth_rate_burst, config.auth_rate_per_minute),
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        }
    }
}
