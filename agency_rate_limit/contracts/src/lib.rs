use std::{future::Future, time::Duration};

/// Counts requests per client key inside a fixed time window.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RateLimitService: Send + Sync + 'static {
    /// Records a request for `key` and decides whether it may proceed.
    ///
    /// A denied request is not counted.
    fn check(&self, key: &str) -> impl Future<Output = anyhow::Result<RateLimitDecision>> + Send;

    /// Removes all entries whose window has ended and returns how many were
    /// removed.
    ///
    /// Expired entries are treated as fresh on their next access whether or not
    /// they have been swept.
    fn sweep(&self) -> impl Future<Output = anyhow::Result<usize>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Denied { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

#[cfg(feature = "mock")]
impl MockRateLimitService {
    pub fn with_check(mut self, key: String, result: RateLimitDecision) -> Self {
        self.expect_check()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
