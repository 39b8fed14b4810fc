use agency_config::EmailConfig;
use agency_email_impl::{EmailServiceImpl, SmtpSettings};
use agency_models::Sensitive;
use anyhow::Context;
use tracing::warn;

/// Build the SMTP transport.
///
/// Returns an unconfigured email service if any of host, port, user or
/// password is missing or blank.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let (Some(host), Some(port), Some(user), Some(password)) = (
        non_blank(config.host.as_deref()),
        config.port,
        non_blank(config.user.as_deref()),
        non_blank(config.password.as_deref().map(String::as_str)),
    ) else {
        warn!("smtp settings are incomplete, contact forms cannot be delivered");
        return Ok(EmailServiceImpl::unconfigured());
    };

    let settings = SmtpSettings {
        host: host.trim().to_owned(),
        port,
        user: user.to_owned(),
        password: Sensitive(password.to_owned()),
    };

    EmailServiceImpl::new(&settings, config.timeout.into())
        .context("Failed to configure smtp transport")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|x| !x.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use agency_email_contracts::EmailService;

    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            host: Some("smtp.agency.example".into()),
            port: Some(587),
            user: Some("mailer".into()),
            password: Some("secret".to_owned().into()),
            timeout: agency_config::Duration(Duration::from_secs(10)),
        }
    }

    #[tokio::test]
    async fn complete_settings_are_configured() {
        let sut = connect(&config()).unwrap();

        assert!(sut.is_configured());
    }

    #[tokio::test]
    async fn missing_settings_are_unconfigured() {
        let cases = [
            EmailConfig {
                host: None,
                ..config()
            },
            EmailConfig {
                port: None,
                ..config()
            },
            EmailConfig {
                user: None,
                ..config()
            },
            EmailConfig {
                password: None,
                ..config()
            },
        ];

        for config in cases {
            let sut = connect(&config).unwrap();
            assert!(!sut.is_configured(), "{config:?}");
        }
    }

    #[tokio::test]
    async fn blank_settings_are_unconfigured() {
        let cases = [
            EmailConfig {
                host: Some("".into()),
                ..config()
            },
            EmailConfig {
                host: Some("   ".into()),
                ..config()
            },
            EmailConfig {
                user: Some("".into()),
                ..config()
            },
            EmailConfig {
                password: Some(String::new().into()),
                ..config()
            },
            EmailConfig {
                password: Some(" \t".to_owned().into()),
                ..config()
            },
        ];

        for config in cases {
            let sut = connect(&config).unwrap();
            assert!(!sut.is_configured(), "{config:?}");
        }
    }
}
