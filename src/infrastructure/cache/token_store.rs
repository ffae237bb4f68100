use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;

use crate::errors::AuthError;

pub const ACCESS_DENY_PREFIX: &str = "access_deny";
pub const REFRESH_DENY_PREFIX: &str = "refresh_deny";

/// Redis-backed deny-list for tokens revoked before they expire.
#[derive(Clone)]
pub struct TokenDenyList {
    pool: Pool,
}

impl TokenDenyList {
    pub fn new(pool: Pool) -> Self {
        TokenDenyList { pool }
    }

    /// Builds the pool lazily; no connection is made until first use.
    pub fn from_url(url: &str) -> Result<Self, AuthError> {
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| AuthError::RedisOperation(e.to_string()))?;

        Ok(TokenDenyList::new(pool))
    }

    fn key(prefix: &str, token: &str) -> String {
        format!("{}:{}", prefix, token)
    }

    /// Deny-lists `token` for `ttl_seconds`, after which it has expired anyway.
    pub async fn revoke(&self, prefix: &str, token: &str, ttl_seconds: u64) -> Result<(), AuthError> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        let mut conn = self.pool.get().await?;
        let _: () = conn.set_ex(Self::key(prefix, token), 1u8, ttl_seconds).await?;

        tracing::debug!(prefix, ttl_seconds, "Token deny-listed");
        Ok(())
    }

    pub async fn is_revoked(&self, prefix: &str, token: &str) -> Result<bool, AuthError> {
        let mut conn = self.pool.get().await?;
        let exists: bool = conn.exists(Self::key(prefix, token)).await?;
        Ok(exists)
    }

    pub async fn ping(&self) -> Result<(), AuthError> {
        let mut conn = self.pool.get().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;

        if pong == "PONG" {
            Ok(())
        } else {
            Err(AuthError::RedisOperation(format!("unexpected PING reply: {}", pong)))
        }
    }
}
