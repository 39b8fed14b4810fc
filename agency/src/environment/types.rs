use agency_core_contact_impl::ContactFeatureServiceImpl;
use agency_core_health_impl::HealthFeatureServiceImpl;
use agency_email_impl::EmailServiceImpl;
use agency_rate_limit_memory::MemoryRateLimitServiceImpl;
use agency_shared_impl::time::TimeServiceImpl;
use agency_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = agency_api_rest::RestServer<HealthFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Template
pub type Template = TemplateServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Rate limit
pub type RateLimit = MemoryRateLimitServiceImpl<Time>;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Email>;
pub type ContactFeature = ContactFeatureServiceImpl<RateLimit, Template, Email>;
