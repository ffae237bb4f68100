pub mod auth;
pub mod careers;
pub mod dashboard;
pub mod events;
pub mod home;
pub mod mentorship;
pub mod profiles;
pub mod system;
pub mod users;
