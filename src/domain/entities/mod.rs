pub mod career;
pub mod dashboard;
pub mod event;
pub mod mentorship;
pub mod option_fields;
pub mod profile;
pub mod token;
pub mod user;
