use std::time::Duration;

use agency_email_contracts::{Email, EmailBody, EmailService};
use agency_models::Sensitive;
use agency_utils::{trace_instrument, Apply};
use anyhow::{anyhow, Context};
use lettre::{
    message::{header::ContentType, MessageBuilder, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Port on which SMTP servers expect TLS from the first byte instead of
/// STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Sensitive<String>,
}

impl EmailServiceImpl {
    pub fn new(settings: &SmtpSettings, timeout: Duration) -> anyhow::Result<Self> {
        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .with_context(|| format!("Invalid smtp host {:?}", settings.host))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.password.0.clone(),
            ))
            .timeout(Some(timeout))
            .build();

        Ok(Self {
            transport: Some(transport),
            timeout,
        })
    }

    /// An email service without transport. Every send fails and
    /// [`EmailService::is_configured`] returns `false`.
    pub fn unconfigured() -> Self {
        Self {
            transport: None,
            timeout: Duration::ZERO,
        }
    }

    fn transport(&self) -> anyhow::Result<&AsyncSmtpTransport<Tokio1Executor>> {
        self.transport
            .as_ref()
            .ok_or_else(|| anyhow!("No smtp transport configured"))
    }
}

impl EmailService for EmailServiceImpl {
    fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    #[trace_instrument(skip(self, email), fields(subject = %email.subject))]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let transport = self.transport()?;
        let message = build_message(email)?;

        tokio::time::timeout(self.timeout, transport.send(message))
            .await
            .map_err(|_| anyhow!("Smtp server did not respond within {:?}", self.timeout))?
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let transport = self.transport()?;

        tokio::time::timeout(self.timeout, transport.test_connection())
            .await
            .map_err(|_| anyhow!("Smtp server did not respond within {:?}", self.timeout))??
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn build_message(email: Email) -> anyhow::Result<Message> {
    let builder = Message::builder()
        .from(email.from.0)
        .to(email.recipient.0)
        .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
        .subject(email.subject);

    let message = match email.body {
        EmailBody::Text(body) => builder.header(ContentType::TEXT_PLAIN).body(body)?,
        EmailBody::Html(body) => builder.header(ContentType::TEXT_HTML).body(body)?,
        EmailBody::Alternative { text, html } => {
            builder.multipart(MultiPart::alternative_plain_html(text, html))?
        }
    };

    Ok(message)
}
