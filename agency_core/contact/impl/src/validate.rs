use agency_core_contact_contracts::ContactValidationError;
use agency_models::{
    contact::{
        ContactCompany, ContactCountry, ContactCustomMessage, ContactDate, ContactField,
        ContactForm, ContactFullName, ContactPhone, ContactSubmission, ContactTime,
        ServiceOffering, EMAIL_MAX_LENGTH, EMAIL_REGEX, SERVICES_MAX,
    },
    email_address::EmailAddress,
};

/// Checks every field of the form and builds the validated submission.
///
/// All fields are checked even after the first failure, so the error names
/// every invalid field. Missing optional fields become empty strings.
pub fn validate(form: ContactForm) -> Result<ContactSubmission, ContactValidationError> {
    let mut invalid = Vec::new();
    let mut check = |field: ContactField, valid: bool| {
        if !valid {
            invalid.push(field);
        }
    };

    let full_name: Option<ContactFullName> = form.full_name.as_str().try_into().ok();
    check(ContactField::FullName, full_name.is_some());

    let company: Option<ContactCompany> = form.company.as_str().try_into().ok();
    check(ContactField::Company, company.is_some());

    let country: Option<ContactCountry> = form.country.unwrap_or_default().as_str().try_into().ok();
    check(ContactField::Country, country.is_some());

    let phone: Option<ContactPhone> = form.phone.as_str().try_into().ok();
    check(ContactField::Phone, phone.is_some());

    let email = parse_email(&form.email);
    check(ContactField::Email, email.is_some());

    let services = parse_services(&form.services);
    check(ContactField::Services, services.is_some());

    let custom_message: Option<ContactCustomMessage> = form
        .custom_message
        .unwrap_or_default()
        .as_str()
        .try_into()
        .ok();
    check(ContactField::CustomMessage, custom_message.is_some());

    let date: Option<ContactDate> = form.date.unwrap_or_default().as_str().try_into().ok();
    check(ContactField::Date, date.is_some());

    let time: Option<ContactTime> = form.time.unwrap_or_default().as_str().try_into().ok();
    check(ContactField::Time, time.is_some());

    check(ContactField::PrivacyAccepted, form.privacy_accepted);

    match (
        full_name,
        company,
        country,
        phone,
        email,
        services,
        custom_message,
        date,
        time,
    ) {
        (
            Some(full_name),
            Some(company),
            Some(country),
            Some(phone),
            Some(email),
            Some(services),
            Some(custom_message),
            Some(date),
            Some(time),
        ) if invalid.is_empty() => Ok(ContactSubmission {
            full_name,
            company,
            country,
            phone,
            email,
            services,
            custom_message,
            date,
            time,
        }),
        _ => Err(ContactValidationError { fields: invalid }),
    }
}

fn parse_email(email: &str) -> Option<EmailAddress> {
    if email.chars().count() > EMAIL_MAX_LENGTH || !EMAIL_REGEX.is_match(email) {
        return None;
    }
    email.parse().ok()
}

fn parse_services(labels: &[String]) -> Option<Vec<ServiceOffering>> {
    if labels.is_empty() || labels.len() > SERVICES_MAX {
        return None;
    }
    labels
        .iter()
        .map(|label| ServiceOffering::from_label(label))
        .collect()
}
