use std::{future::Future, time::Duration};

use agency_models::contact::{ContactField, ContactForm};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Counts a contact request from the given client against its rate limit.
    ///
    /// Must be called before the request body is looked at.
    fn check_rate_limit(
        &self,
        client: &str,
    ) -> impl Future<Output = Result<(), ContactRateLimitError>> + Send;

    /// Sanitize and validate the form and deliver it to the agency by email.
    fn submit(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactRateLimitError {
    #[error("Too many contact requests.")]
    Limited { retry_after: Duration },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("Email delivery is not configured.")]
    NotConfigured,
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The contact form was rejected. Lists every invalid field once, in form
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid contact form fields: {}", display_fields(.fields))]
pub struct ContactValidationError {
    pub fields: Vec<ContactField>,
}

fn display_fields(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_check_rate_limit(mut self, client: String, limited: bool) -> Self {
        self.expect_check_rate_limit()
            .once()
            .with(mockall::predicate::eq(client))
            .return_once(move |_| {
                Box::pin(std::future::ready(if limited {
                    Err(ContactRateLimitError::Limited {
                        retry_after: Duration::from_secs(60),
                    })
                } else {
                    Ok(())
                }))
            });
        self
    }

    pub fn with_submit(
        mut self,
        form: ContactForm,
        result: Result<(), ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_fields() {
        let error = ContactValidationError {
            fields: vec![ContactField::FullName, ContactField::PrivacyAccepted],
        };

        assert_eq!(
            error.to_string(),
            "Invalid contact form fields: fullName, privacyAccepted"
        );
    }
}
