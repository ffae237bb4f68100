pub mod entities;
pub mod use_cases;
pub mod career;
pub mod skills;
pub mod password;
