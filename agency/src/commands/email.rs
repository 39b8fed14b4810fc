use agency_config::Config;
use agency_email_contracts::{Email, EmailBody, EmailService};
use agency_models::email_address::EmailAddressWithName;
use anyhow::ensure;
use clap::Subcommand;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;
    ensure!(email_service.is_configured(), "Smtp settings are incomplete");

    let from = config
        .contact
        .sender
        .map(Into::into)
        .unwrap_or_else(|| recipient.clone());

    let ok = email_service
        .send(Email {
            from,
            recipient,
            subject: "Email Deliverability Test".into(),
            body: EmailBody::Text("Email deliverability seems to be working!".into()),
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}
