use std::time::Duration;

use agency_config::Config;
use agency_di::Provide;
use agency_email_contracts::EmailService;
use agency_rate_limit_contracts::RateLimitService;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::{
    email,
    environment::{
        types::{RateLimit, RestServer},
        ConfigProvider, Provider,
    },
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Configuring smtp transport");
    let email = email::connect(&config.email)?;
    if email.is_configured() {
        if let Err(err) = email.ping().await {
            warn!("smtp server is not reachable: {err:#}");
        }
    }

    let config_provider = ConfigProvider::new(&config);
    let mut provider = Provider::new(config_provider, email);
    let server: RestServer = provider.provide();
    let rate_limit: RateLimit = provider.provide();

    let sweep_interval = *config.rate_limit.sweep_interval;
    if sweep_interval.is_zero() {
        warn!("rate limit sweep disabled");
    } else {
        tokio::spawn(sweep(rate_limit, sweep_interval));
    }

    info!("Starting http server on {}", config.http.address);
    server.serve().await
}

async fn sweep(rate_limit: impl RateLimitService, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        match rate_limit.sweep().await {
            Ok(0) => {}
            Ok(removed) => debug!(removed, "swept expired rate limit entries"),
            Err(err) => error!("Failed to sweep rate limit entries: {err:#}"),
        }
    }
}
