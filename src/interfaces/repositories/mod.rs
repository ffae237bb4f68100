pub mod career;
pub mod dashboard;
pub mod event;
pub mod mentorship;
pub mod profile;
pub mod sqlx_repo;
pub mod token;
pub mod user;
