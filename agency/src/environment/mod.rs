use std::sync::Arc;

use agency_api_rest::RestServerConfig;
use agency_config::Config;
use agency_core_contact_impl::ContactFeatureConfig;
use agency_core_health_impl::HealthFeatureConfig;
use agency_di::provider;
use agency_rate_limit_memory::MemoryRateLimitConfig;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Rate limit
            MemoryRateLimitConfig,

            // Core
            ContactFeatureConfig,
            HealthFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Rate limit
        rate_limit_config: MemoryRateLimitConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
        health_feature_config: HealthFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
            max_body_length: config.contact.max_body_length,
            expose_internal_errors: config.environment.is_development(),
        };

        // Rate limit
        let rate_limit_config = MemoryRateLimitConfig {
            max_requests: config.rate_limit.max_requests,
            window: config.rate_limit.window.into(),
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            recipient: config.contact.recipient.clone().map(Arc::new),
            sender: config.contact.sender.clone().map(Arc::new),
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Self {
            _cache: Default::default(),

            // API
            rest_server_config,

            // Rate limit
            rate_limit_config,

            // Core
            contact_feature_config,
            health_feature_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use agency_di::Provide;
    use agency_email_impl::EmailServiceImpl;
    use types::{RateLimit, RestServer};

    use super::*;

    fn provider() -> Provider {
        let config =
            agency_config::load_paths(&[Path::new(agency_config::DEFAULT_CONFIG_PATH)], false)
                .unwrap();
        Provider::new(ConfigProvider::new(&config), EmailServiceImpl::unconfigured())
    }

    #[test]
    fn provide_rest_server() {
        let mut provider = provider();
        let _: RestServer = provider.provide();
    }

    #[tokio::test]
    async fn rate_limit_state_is_shared() {
        use agency_rate_limit_contracts::RateLimitService;

        let mut provider = provider();
        let _: RestServer = provider.provide();
        let a: RateLimit = provider.provide();
        let b: RateLimit = provider.provide();

        for _ in 0..5 {
            assert!(a.check("1.2.3.4").await.unwrap().is_allowed());
        }

        assert!(!b.check("1.2.3.4").await.unwrap().is_allowed());
    }
}
