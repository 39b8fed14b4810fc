use std::{collections::HashMap, sync::Arc, time::Duration};

use agency_di::Build;
use agency_rate_limit_contracts::{RateLimitDecision, RateLimitService};
use agency_shared_contracts::time::TimeService;
use agency_utils::trace_instrument;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

/// Process-local rate limiter.
///
/// All instances built by the same provider share one map, so the limit holds
/// across every clone handed to request handlers and to the sweeper.
#[derive(Debug, Clone, Build)]
pub struct MemoryRateLimitServiceImpl<Time> {
    time: Time,
    config: MemoryRateLimitConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct MemoryRateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

#[derive(Debug, Default)]
struct State {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RateLimitEntry {
    count: u32,
    reset_time: DateTime<Utc>,
}

impl<Time> RateLimitService for MemoryRateLimitServiceImpl<Time>
where
    Time: TimeService,
{
    #[trace_instrument(skip(self))]
    async fn check(&self, key: &str) -> anyhow::Result<RateLimitDecision> {
        let now = self.time.now();
        let fresh = RateLimitEntry {
            count: 0,
            reset_time: now + self.config.window,
        };

        // check and increment under one lock so concurrent requests from the
        // same key cannot both pass the last free slot
        let mut entries = self.state.entries.lock().await;
        let entry = entries.entry(key.to_owned()).or_insert(fresh);
        if now > entry.reset_time {
            *entry = fresh;
        }

        if entry.count >= self.config.max_requests {
            let retry_after = (entry.reset_time - now).to_std().unwrap_or_default();
            debug!(count = entry.count, ?retry_after, "rate limit exceeded");
            return Ok(RateLimitDecision::Denied { retry_after });
        }

        entry.count += 1;

        Ok(RateLimitDecision::Allowed {
            remaining: self.config.max_requests - entry.count,
        })
    }

    #[trace_instrument(skip(self))]
    async fn sweep(&self) -> anyhow::Result<usize> {
        let now = self.time.now();

        let mut entries = self.state.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.reset_time);

        Ok(before - entries.len())
    }
}
