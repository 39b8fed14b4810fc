use std::convert::Infallible;

use agency_models::locale::Locale;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};

/// Locale negotiated from the `Accept-Language` header.
pub struct ApiLocale(pub Locale);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ApiLocale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|header| header.to_str().ok())
            .map(Locale::from_accept_language)
            .unwrap_or_default();

        Ok(Self(locale))
    }
}
