//! Rate limiting service for controlling request frequency.

use crate::config::RateLimitConfig;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// Outcome of a single rate limit check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: usize },
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Per-client windows plus the time of the last full sweep
struct Windows {
    clients: HashMap<String, (usize, Instant)>,
    last_sweep: Instant,
}

/// Simple in-memory rate limiter
///
/// Fixed window per client key. Cloning shares the same counters, so one
/// limiter built by the entrypoint covers every worker. Expired windows of
/// other clients are swept at most once per window length.
#[derive(Clone)]
pub struct SimpleRateLimiter {
    config: RateLimitConfig,
    storage: Arc<Mutex<Windows>>,
}

impl SimpleRateLimiter {
    /// Create a new rate limiter with the given configuration
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            storage: Arc::new(Mutex::new(Windows {
                clients: HashMap::new(),
                last_sweep: Instant::now(),
            })),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count a request for `key` and decide whether it may proceed
    pub fn check_rate_limit(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    /// Number of clients with a tracked window
    pub fn tracked_clients(&self) -> usize {
        self.lock().clients.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Windows> {
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let window = self.config.window;
        let budget = self.config.max_requests;
        let mut storage = self.lock();

        if now.saturating_duration_since(storage.last_sweep) >= window {
            storage
                .clients
                .retain(|_, (_, started)| now.saturating_duration_since(*started) < window);
            storage.last_sweep = now;
        }

        if budget == 0 {
            return RateLimitDecision::Limited {
                retry_after: window,
            };
        }

        let (count, started) = storage
            .clients
            .entry(key.to_string())
            .or_insert((0, now));

        // The window of this client has elapsed
        if now.saturating_duration_since(*started) >= window {
            *count = 0;
            *started = now;
        }

        if *count >= budget {
            return RateLimitDecision::Limited {
                retry_after: window.saturating_sub(now.saturating_duration_since(*started)),
            };
        }

        *count += 1;
        RateLimitDecision::Allowed {
            remaining: budget - *count,
        }
    }
}
