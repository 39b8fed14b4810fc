use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;

use crate::{email_address::EmailAddress, locale::Locale};

/// Contact form as decoded from the request body, before sanitization and
/// validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub full_name: String,
    pub company: String,
    pub country: Option<String>,
    pub phone: String,
    pub email: String,
    pub services: Vec<String>,
    pub custom_message: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub privacy_accepted: bool,
}

/// A fully validated contact form submission.
///
/// Only constructed once every field passed validation and the privacy policy
/// has been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub full_name: ContactFullName,
    pub company: ContactCompany,
    pub country: ContactCountry,
    pub phone: ContactPhone,
    pub email: EmailAddress,
    pub services: Vec<ServiceOffering>,
    pub custom_message: ContactCustomMessage,
    pub date: ContactDate,
    pub time: ContactTime,
}

#[nutype(
    validate(len_char_min = 2, len_char_max = 100, regex = FULL_NAME_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactFullName(String);

#[nutype(
    validate(len_char_min = 2, len_char_max = 100, regex = COMPANY_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactCompany(String);

#[nutype(
    validate(len_char_max = 60, regex = COUNTRY_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactCountry(String);

#[nutype(
    validate(len_char_min = 10, len_char_max = 15, regex = PHONE_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactPhone(String);

#[nutype(
    validate(len_char_max = 1000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactCustomMessage(String);

/// `YYYY-MM-DD` or empty.
#[nutype(
    validate(regex = DATE_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactDate(String);

/// `HH:MM` (24h) or empty.
#[nutype(
    validate(regex = TIME_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactTime(String);

pub static FULL_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÿñÑ\s]+$").unwrap());
pub static COMPANY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9À-ÿñÑ\s.&-]+$").unwrap());
pub static COUNTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÿñÑ\s]*$").unwrap());
pub static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s()+-]+$").unwrap());
pub static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})?$").unwrap());
pub static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(([01][0-9]|2[0-3]):[0-5][0-9])?$").unwrap());

/// Second, deliberately simple check applied on top of RFC address parsing.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const EMAIL_MAX_LENGTH: usize = 100;
pub const SERVICES_MAX: usize = 10;

/// Services offered by the agency. Each one is accepted under its English and
/// its Spanish label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOffering {
    WebDevelopment,
    MobileApps,
    UiUxDesign,
    DigitalMarketing,
    SeoOptimization,
    Ecommerce,
    Consulting,
}

impl ServiceOffering {
    pub const ALL: [Self; 7] = [
        Self::WebDevelopment,
        Self::MobileApps,
        Self::UiUxDesign,
        Self::DigitalMarketing,
        Self::SeoOptimization,
        Self::Ecommerce,
        Self::Consulting,
    ];

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::WebDevelopment, Locale::En) => "Web Development",
            (Self::WebDevelopment, Locale::Es) => "Desarrollo Web",
            (Self::MobileApps, Locale::En) => "Mobile Apps",
            (Self::MobileApps, Locale::Es) => "Aplicaciones Móviles",
            (Self::UiUxDesign, Locale::En) => "UI/UX Design",
            (Self::UiUxDesign, Locale::Es) => "Diseño UI/UX",
            (Self::DigitalMarketing, Locale::En) => "Digital Marketing",
            (Self::DigitalMarketing, Locale::Es) => "Marketing Digital",
            (Self::SeoOptimization, Locale::En) => "SEO Optimization",
            (Self::SeoOptimization, Locale::Es) => "Optimización SEO",
            (Self::Ecommerce, Locale::En) => "E-commerce",
            (Self::Ecommerce, Locale::Es) => "Comercio Electrónico",
            (Self::Consulting, Locale::En) => "Consulting",
            (Self::Consulting, Locale::Es) => "Consultoría",
        }
    }

    /// Looks up a service by its exact English or Spanish label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|service| {
            [Locale::En, Locale::Es]
                .into_iter()
                .any(|locale| service.label(locale) == label)
        })
    }
}

/// Fields of the contact form, named as they appear in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FullName,
    Company,
    Country,
    Phone,
    Email,
    Services,
    CustomMessage,
    Date,
    Time,
    PrivacyAccepted,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Company => "company",
            Self::Country => "country",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Services => "services",
            Self::CustomMessage => "customMessage",
            Self::Date => "date",
            Self::Time => "time",
            Self::PrivacyAccepted => "privacyAccepted",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
