use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);
/// Seconds workers get to finish in-flight requests after a shutdown signal.
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
