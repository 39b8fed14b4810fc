use std::sync::Arc;

use agency_core_contact_contracts::{
    ContactFeatureService, ContactRateLimitError, ContactSubmitError,
};
use agency_di::Build;
use agency_email_contracts::{Email, EmailBody, EmailService};
use agency_models::{
    contact::{ContactForm, ContactSubmission},
    email_address::EmailAddress,
    locale::Locale,
};
use agency_rate_limit_contracts::{RateLimitDecision, RateLimitService};
use agency_templates_contracts::{ContactNotificationTemplate, TemplateService};
use agency_utils::trace_instrument;
use anyhow::Context;
use tracing::{error, info, warn};

pub mod sanitize;
pub mod validate;

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<RateLimit, Template, Email> {
    rate_limit: RateLimit,
    template: Template,
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Where contact notifications are delivered.
    pub recipient: Option<Arc<EmailAddress>>,
    /// `From` address of notifications. Falls back to the submitter's address.
    pub sender: Option<Arc<EmailAddress>>,
}

impl<RateLimit, Template, EmailS> ContactFeatureService
    for ContactFeatureServiceImpl<RateLimit, Template, EmailS>
where
    RateLimit: RateLimitService,
    Template: TemplateService,
    EmailS: EmailService,
{
    #[trace_instrument(skip(self))]
    async fn check_rate_limit(&self, client: &str) -> Result<(), ContactRateLimitError> {
        match self
            .rate_limit
            .check(client)
            .await
            .context("Failed to check contact rate limit")?
        {
            RateLimitDecision::Allowed { .. } => Ok(()),
            RateLimitDecision::Denied { retry_after } => {
                Err(ContactRateLimitError::Limited { retry_after })
            }
        }
    }

    #[trace_instrument(skip(self, form))]
    async fn submit(&self, form: ContactForm) -> Result<(), ContactSubmitError> {
        let form = sanitize::sanitize_form(form);
        let submission = validate::validate(form)
            .inspect_err(|err| warn!(fields = ?err.fields, "rejected contact form"))?;

        let Some(recipient) = self.config.recipient.as_deref() else {
            error!("cannot deliver contact form: no recipient configured");
            return Err(ContactSubmitError::NotConfigured);
        };

        if !self.email.is_configured() {
            error!("cannot deliver contact form: no smtp transport configured");
            return Err(ContactSubmitError::NotConfigured);
        }

        let rendered = self
            .template
            .render(&notification_template(&submission))
            .context("Failed to render contact notification")?;

        let from = self
            .config
            .sender
            .as_deref()
            .unwrap_or(&submission.email)
            .clone();

        let email = Email {
            from: from.into(),
            recipient: recipient.clone().into(),
            subject: format!(
                "Nuevo contacto: {} ({})",
                *submission.full_name, *submission.company
            ),
            body: EmailBody::Alternative {
                text: rendered.text,
                html: rendered.html,
            },
            reply_to: Some(
                submission
                    .email
                    .clone()
                    .with_name(submission.full_name.clone().into_inner()),
            ),
        };

        match self.email.send(email).await {
            Ok(true) => {
                info!(services = submission.services.len(), "contact form delivered");
                Ok(())
            }
            Ok(false) => {
                error!("smtp server rejected the contact notification");
                Err(ContactSubmitError::Send)
            }
            Err(err) => {
                error!("failed to send contact notification: {err:#}");
                Err(ContactSubmitError::Send)
            }
        }
    }
}

fn notification_template(submission: &ContactSubmission) -> ContactNotificationTemplate {
    ContactNotificationTemplate {
        full_name: submission.full_name.clone().into_inner(),
        company: submission.company.clone().into_inner(),
        country: submission.country.clone().into_inner(),
        phone: submission.phone.clone().into_inner(),
        email: submission.email.as_str().to_owned(),
        services: submission
            .services
            .iter()
            .map(|service| service.label(Locale::Es).to_owned())
            .collect(),
        custom_message: submission.custom_message.clone().into_inner(),
        date: submission.date.clone().into_inner(),
        time: submission.time.clone().into_inner(),
    }
}
