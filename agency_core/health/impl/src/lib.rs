use std::{sync::Arc, time::Duration};

use agency_core_health_contracts::{HealthFeatureService, HealthStatus};
use agency_di::Build;
use agency_email_contracts::EmailService;
use agency_shared_contracts::time::TimeService;
use agency_utils::trace_instrument;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Build)]
pub struct HealthFeatureServiceImpl<Time, Email> {
    time: Time,
    email: Email,
    config: HealthFeatureConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl<Time, Email> HealthFeatureServiceImpl<Time, Email> {
    fn fresh(&self, cached: &CachedStatus, now: DateTime<Utc>) -> bool {
        now < cached.timestamp + self.config.cache_ttl
    }
}

impl<Time, Email> HealthFeatureService for HealthFeatureServiceImpl<Time, Email>
where
    Time: TimeService,
    Email: EmailService,
{
    #[trace_instrument(skip(self))]
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| self.fresh(c, now)) {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| self.fresh(c, now)) {
            return cached.status;
        }

        let email = self.email.is_configured()
            && self
                .email
                .ping()
                .await
                .inspect_err(|err| error!("Failed to ping smtp server: {err:#}"))
                .is_ok();

        let status = HealthStatus { http: true, email };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use agency_email_contracts::MockEmailService;
    use agency_shared_contracts::time::MockTimeService;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    type Sut = HealthFeatureServiceImpl<MockTimeService, MockEmailService>;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap()
    }

    fn config() -> HealthFeatureConfig {
        HealthFeatureConfig {
            cache_ttl: Duration::from_secs(2),
        }
    }

    fn ping_ok(email: MockEmailService) -> MockEmailService {
        let mut email = email.with_is_configured(true);
        email
            .expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::ready(Ok(()))));
        email
    }

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let sut = Sut {
            time: MockTimeService::new().with_now(now()),
            email: ping_ok(MockEmailService::new()),
            config: config(),
            state: Default::default(),
        };

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(
            result,
            HealthStatus {
                http: true,
                email: true
            }
        );
        assert!(result.is_healthy());
    }

    #[tokio::test]
    async fn unconfigured_email_is_unhealthy() {
        // Arrange
        let sut = Sut {
            time: MockTimeService::new().with_now(now()),
            email: MockEmailService::new().with_is_configured(false),
            config: config(),
            state: Default::default(),
        };

        // Act
        let result = sut.get_status().await;

        // Assert
        assert!(!result.email);
        assert!(!result.is_healthy());
    }

    #[tokio::test]
    async fn ping_error_is_unhealthy() {
        // Arrange
        let mut email = MockEmailService::new().with_is_configured(true);
        email
            .expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::ready(Err(anyhow::anyhow!("refused")))));
        let sut = Sut {
            time: MockTimeService::new().with_now(now()),
            email,
            config: config(),
            state: Default::default(),
        };

        // Act
        let result = sut.get_status().await;

        // Assert
        assert!(!result.email);
    }

    #[tokio::test]
    async fn status_is_cached() {
        // Arrange
        let mut time = MockTimeService::new();
        time.expect_now().times(2).return_const(now());
        let sut = Sut {
            time,
            email: ping_ok(MockEmailService::new()),
            config: config(),
            state: Default::default(),
        };

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, second);
    }
}
