pub mod get_client_ip;
pub mod markdown;
pub mod not_blank;
pub mod valid_uuid;
