use std::{fmt::Display, net::SocketAddr, path::Path, str::FromStr};

use agency_models::{email_address::EmailAddress, Sensitive};
use anyhow::Context;
use config::{
    builder::{ConfigBuilder, DefaultState},
    Environment as EnvSource, File, FileFormat,
};
use serde::{Deserialize, Deserializer};

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of additional config files, applied in order on top of
/// the default config.
pub const CONFIG_PATHS_ENV: &str = "AGENCY_CONFIG";

const ENV_PREFIX: &str = "AGENCY";

/// Load the default config, the files listed in `AGENCY_CONFIG` and finally the
/// `AGENCY_<SECTION>__<KEY>` environment variables.
pub fn load() -> anyhow::Result<Config> {
    let extra = std::env::var(CONFIG_PATHS_ENV).unwrap_or_default();
    let paths = std::iter::once(DEFAULT_CONFIG_PATH)
        .chain(extra.split(':').filter(|path| !path.is_empty()))
        .collect::<Vec<_>>();

    load_paths(&paths, true)
}

pub fn load_paths(paths: &[impl AsRef<Path>], with_env: bool) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let builder = if with_env {
        builder.add_source(env_source())
    } else {
        builder
    };

    deserialize(builder)
}

fn env_source() -> EnvSource {
    EnvSource::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn deserialize(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Config> {
    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// Treat a blank value like an absent one.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().parse().map_err(serde::de::Error::custom))
        .transpose()
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub rate_limit: RateLimitConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
}

/// Outgoing SMTP. Delivery is disabled unless host, port, user and password are
/// all set.
#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<Sensitive<String>>,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub recipient: Option<EmailAddress>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sender: Option<EmailAddress>,
    /// In characters.
    pub max_body_length: usize,
}

#[derive(Debug, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
    pub sweep_interval: Duration,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_paths(&[DEFAULT_CONFIG_PATH], false).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(*config.rate_limit.window, std::time::Duration::from_secs(15 * 60));
        assert_eq!(
            *config.rate_limit.sweep_interval,
            std::time::Duration::from_secs(5 * 60)
        );
        assert_eq!(*config.email.timeout, std::time::Duration::from_secs(10));
        assert_eq!(config.contact.max_body_length, 10_000);
        assert!(config.email.host.is_none());
    }

    fn with_overrides(toml: &str, env: &[(&str, &str)]) -> anyhow::Result<Config> {
        let env = env
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        let builder = config::Config::builder()
            .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(env_source().source(Some(env)));

        deserialize(builder)
    }

    #[test]
    fn contact_addresses_from_env() {
        let config = with_overrides(
            "",
            &[
                ("AGENCY_CONTACT__RECIPIENT", "hello@agency.example"),
                ("AGENCY_CONTACT__SENDER", " noreply@agency.example "),
            ],
        )
        .unwrap();

        assert_eq!(
            config.contact.recipient,
            Some("hello@agency.example".parse().unwrap())
        );
        assert_eq!(
            config.contact.sender,
            Some("noreply@agency.example".parse().unwrap())
        );
    }

    #[test]
    fn blank_contact_addresses_are_absent() {
        let config = with_overrides(
            "[contact]\nsender = \"   \"\n",
            &[("AGENCY_CONTACT__RECIPIENT", "")],
        )
        .unwrap();

        assert_eq!(config.contact.recipient, None);
        assert_eq!(config.contact.sender, None);
    }

    #[test]
    fn invalid_contact_address_fails() {
        let result = with_overrides("", &[("AGENCY_CONTACT__RECIPIENT", "not an email")]);

        assert!(result.is_err());
    }

    #[test]
    fn missing_file() {
        let result = load_paths(&["/nonexistent/agency.toml"], false);

        assert!(result.is_err());
    }
}
