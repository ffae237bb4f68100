pub mod auth;
pub mod career;
pub mod dashboard;
pub mod events;
pub mod mentorship;
pub mod extractors;
pub mod profile;
