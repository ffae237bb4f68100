use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::{task::JoinHandle, time::sleep};

const EVICTION_INTERVAL: Duration = Duration::from_secs(30);

/// A token bucket which allows fractional tokens for precise refill
#[derive(Debug)]
struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, refill_per_sec: f64) -> Self {
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            last_refill: Instant::now(),
        }
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.last_refill = now;
        }
    }

    // Small epsilon to avoid fp surprises
    fn try_consume(&mut self, now: Instant) -> bool {
        self.refill(now);
        if self.tokens + 1e-12 >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn seconds_until_token(&self) -> u64 {
        let missing = (1.0 - self.tokens).max(0.0);
        if self.refill_per_sec <= 0.0 {
            return u64::MAX;
        }
        ((missing / self.refill_per_sec).ceil() as u64).max(1)
    }
}

/// Weighted two-window counter
#[derive(Debug)]
struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    current_window_start: Instant,
    current_count: u64,
    prev_count: u64,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64) -> Self {
        Self {
            window_size,
            limit,
            current_window_start: Instant::now(),
            current_count: 0,
            prev_count: 0,
        }
    }

    fn rotate(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.current_window_start);
        if elapsed >= self.window_size * 2 {
            self.prev_count = 0;
            self.current_count = 0;
            self.current_window_start = now;
        } else if elapsed >= self.window_size {
            self.prev_count = self.current_count;
            self.current_count = 0;
            self.current_window_start += self.window_size;
        }
    }

    fn allow(&mut self, now: Instant) -> bool {
        self.rotate(now);

        let elapsed = now.duration_since(self.current_window_start).as_secs_f64();
        let weight = (elapsed / self.window_size.as_secs_f64()).min(1.0);
        let effective = (self.prev_count as f64) * (1.0 - weight) + (self.current_count as f64);

        if effective < self.limit as f64 {
            self.current_count += 1;
            true
        } else {
            false
        }
    }

    fn seconds_until_window_moves(&self, now: Instant) -> u64 {
        let end = self.current_window_start + self.window_size;
        end.saturating_duration_since(now).as_secs().max(1)
    }
}

/// Token bucket for bursts, sliding window as fallback once the bucket is dry.
#[derive(Debug)]
struct HybridLimiter {
    bucket: TokenBucket,
    window: SlidingWindow,
    last_seen: Instant,
}

impl HybridLimiter {
    fn new(settings: &LimiterSettings) -> Self {
        Self {
            bucket: TokenBucket::new(settings.burst, settings.refill_per_sec),
            window: SlidingWindow::new(settings.window, settings.window_limit),
            last_seen: Instant::now(),
        }
    }

    fn check(&mut self, now: Instant) -> RateDecision {
        self.last_seen = now;

        if self.bucket.try_consume(now) || self.window.allow(now) {
            return RateDecision::Allowed;
        }

        let retry_after = self
            .bucket
            .seconds_until_token()
            .min(self.window.seconds_until_window_moves(now));
        RateDecision::Limited { retry_after }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after: u64 },
}

#[derive(Debug, Clone)]
pub struct LimiterSettings {
    pub burst: f64,
    pub refill_per_sec: f64,
    pub window: Duration,
    pub window_limit: u64,
    pub idle_ttl: Duration,
}

/// In-memory per-key limiter for login and registration attempts.
#[derive(Clone)]
pub struct AttemptLimiter {
    map: Arc<DashMap<String, Arc<Mutex<HybridLimiter>>>>,
    settings: Arc<LimiterSettings>,
}

impl AttemptLimiter {
    pub fn new(settings: LimiterSettings) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            settings: Arc::new(settings),
        }
    }

    /// `burst` attempts at once, then `per_minute` spread over each minute.
    pub fn per_minute(burst: u32, per_minute: u32) -> Self {
        Self::new(LimiterSettings {
            burst: f64::from(burst),
            refill_per_sec: f64::from(per_minute) / 60.0,
            window: Duration::from_secs(60),
            window_limit: u64::from(per_minute),
            idle_ttl: Duration::from_secs(600),
        })
    }

    fn limiter_for(&self, key: &str) -> Arc<Mutex<HybridLimiter>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }
        self.map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(HybridLimiter::new(&self.settings))))
            .clone()
    }

    pub fn check(&self, key: &str) -> RateDecision {
        let limiter = self.limiter_for(key);
        let decision = limiter.lock().check(Instant::now());

        if let RateDecision::Limited { retry_after } = decision {
            tracing::warn!(key, retry_after, "Rate limit exceeded");
        }
        decision
    }

    /// Drops limiters idle for longer than the configured TTL.
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let ttl = self.settings.idle_ttl;
        let before = self.map.len();
        self.map
            .retain(|_, limiter| now.duration_since(limiter.lock().last_seen) <= ttl);
        before - self.map.len()
    }

    pub fn spawn_eviction(&self) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            loop {
                sleep(EVICTION_INTERVAL).await;
                let evicted = limiter.evict_idle();
                if evicted > 0 {
                    tracing::debug!(evicted, "Evicted idle rate limiters");
                }
            }
        })
    }

    pub fn tracked_keys(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(burst: u32, window_limit: u64) -> AttemptLimiter {
        AttemptLimiter::new(LimiterSettings {
            burst: f64::from(burst),
            refill_per_sec: 0.0001,
            window: Duration::from_secs(3600),
            window_limit,
            idle_ttl: Duration::from_secs(600),
        })
    }

    #[test]
    fn allows_burst_then_window_then_limits() {
        let limiter = strict(2, 1);

        assert_eq!(limiter.check("ip"), RateDecision::Allowed);
        assert_eq!(limiter.check("ip"), RateDecision::Allowed);
        assert_eq!(limiter.check("ip"), RateDecision::Allowed);

        match limiter.check("ip") {
            RateDecision::Limited { retry_after } => assert!(retry_after >= 1),
            RateDecision::Allowed => panic!("fourth attempt should be limited"),
        }
    }

    #[test]
    fn keys_are_independent() {
        let limiter = strict(1, 0);

        assert_eq!(limiter.check("a"), RateDecision::Allowed);
        assert!(matches!(limiter.check("a"), RateDecision::Limited { .. }));
        assert_eq!(limiter.check("b"), RateDecision::Allowed);
        assert_eq!(limiter.tracked_keys(), 2);
    }

    #[test]
    fn eviction_keeps_recent_limiters() {
        let limiter = strict(1, 0);
        limiter.check("a");
        assert_eq!(limiter.evict_idle(), 0);
        assert_eq!(limiter.tracked_keys(), 1);
    }
}
