//! Sample data shared by the tests of the other crates.

use std::sync::LazyLock;

use agency_models::contact::{ContactForm, ContactSubmission, ServiceOffering};

pub const RECIPIENT: &str = "hola@agency.example";
pub const SENDER: &str = "web@agency.example";

/// A form that passes validation unchanged.
pub static CONTACT_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    full_name: "Ana López".into(),
    company: "Tacos & Co.".into(),
    country: Some("México".into()),
    phone: "(555) 123-4567".into(),
    email: "test@test.com".into(),
    services: vec!["Desarrollo Web".into(), "SEO Optimization".into()],
    custom_message: Some("Queremos rediseñar nuestra web.".into()),
    date: Some("2024-05-17".into()),
    time: Some("10:30".into()),
    privacy_accepted: true,
});

/// [`CONTACT_FORM`] after validation.
pub static CONTACT_SUBMISSION: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    full_name: "Ana López".try_into().unwrap(),
    company: "Tacos & Co.".try_into().unwrap(),
    country: "México".try_into().unwrap(),
    phone: "(555) 123-4567".try_into().unwrap(),
    email: "test@test.com".parse().unwrap(),
    services: vec![ServiceOffering::WebDevelopment, ServiceOffering::SeoOptimization],
    custom_message: "Queremos rediseñar nuestra web.".try_into().unwrap(),
    date: "2024-05-17".try_into().unwrap(),
    time: "10:30".try_into().unwrap(),
});

/// The smallest form that passes validation: no optional fields.
pub static MINIMAL_CONTACT_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    full_name: "John Smith".into(),
    company: "Acme".into(),
    country: None,
    phone: "5551234567".into(),
    email: "test@test.com".into(),
    services: vec!["Web Development".into()],
    custom_message: None,
    date: None,
    time: None,
    privacy_accepted: true,
});
