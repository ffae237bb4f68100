use tokio::time::{interval, Duration};

use crate::repositories::user::UserRepository;

const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60 * 24);

/// Removes soft-deleted accounts past their grace period, once a day.
pub async fn start_purge_task<R: UserRepository>(repo: R) {
    let mut interval = interval(PURGE_INTERVAL);

    loop {
        interval.tick().await;

        match repo.purge_soft_deleted_users().await {
            Ok(0) => tracing::debug!("No soft-deleted users to purge"),
            Ok(count) => tracing::info!("Purged {} soft-deleted users", count),
            Err(e) => tracing::error!("Purge failed: {}", e)
        }
    }
}
