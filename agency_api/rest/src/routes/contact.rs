use std::{sync::Arc, time::Duration};

use agency_core_contact_contracts::{
    ContactFeatureService, ContactRateLimitError, ContactSubmitError, ContactValidationError,
};
use agency_models::locale::Locale;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::RETRY_AFTER, StatusCode},
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use futures::StreamExt;
use tracing::debug;

use super::{error, internal_server_error};
use crate::{
    extractors::locale::ApiLocale,
    messages,
    middlewares::client_ip::ClientKey,
    models::{contact::ApiContactForm, ApiError, ApiFieldError, ApiSuccess},
};

#[derive(Debug, Clone, Copy)]
pub struct ContactRouteConfig {
    pub max_body_length: usize,
    pub expose_internal_errors: bool,
}

struct ContactState<Contact> {
    service: Contact,
    config: ContactRouteConfig,
}

pub fn router<Contact: ContactFeatureService>(
    service: Contact,
    config: ContactRouteConfig,
) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit::<Contact>))
        .with_state(Arc::new(ContactState { service, config }))
}

async fn submit<Contact: ContactFeatureService>(
    State(state): State<Arc<ContactState<Contact>>>,
    Extension(client): Extension<ClientKey>,
    ApiLocale(locale): ApiLocale,
    request: Request,
) -> Response {
    let expose = state.config.expose_internal_errors;

    match state.service.check_rate_limit(&client.0).await {
        Ok(()) => {}
        Err(ContactRateLimitError::Limited { retry_after }) => {
            return too_many_requests(locale, retry_after)
        }
        Err(ContactRateLimitError::Other(err)) => return internal_server_error(err, expose),
    }

    let form = match decode(request.into_body(), state.config.max_body_length).await {
        Ok(form) => form,
        Err(DecodeError::TooLarge) => {
            return error(StatusCode::BAD_REQUEST, messages::REQUEST_TOO_LARGE)
        }
        Err(DecodeError::Invalid) => {
            return error(StatusCode::BAD_REQUEST, messages::INVALID_PAYLOAD)
        }
    };

    match state.service.submit(form.into()).await {
        Ok(()) => Json(ApiSuccess {
            success: true,
            message: messages::contact_success(locale),
        })
        .into_response(),
        Err(ContactSubmitError::Validation(err)) => validation_failed(locale, &err),
        Err(ContactSubmitError::NotConfigured) => error(
            StatusCode::SERVICE_UNAVAILABLE,
            messages::email_not_configured(locale),
        ),
        Err(ContactSubmitError::Send) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            messages::send_failed(locale),
        ),
        Err(ContactSubmitError::Other(err)) => internal_server_error(err, expose),
    }
}

#[derive(Debug)]
enum DecodeError {
    TooLarge,
    Invalid,
}

async fn decode(body: Body, max_chars: usize) -> Result<ApiContactForm, DecodeError> {
    // a char takes at most four bytes in utf-8
    let max_bytes = max_chars.saturating_mul(4);

    let mut stream = body.into_data_stream();
    let mut bytes = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| {
            debug!("failed to read contact form body: {err}");
            DecodeError::Invalid
        })?;
        if bytes.len() + chunk.len() > max_bytes {
            return Err(DecodeError::TooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    let text = std::str::from_utf8(&bytes).map_err(|_| DecodeError::Invalid)?;
    if text.chars().count() > max_chars {
        return Err(DecodeError::TooLarge);
    }

    ApiContactForm::from_json(text).map_err(|err| {
        debug!("failed to decode contact form: {err}");
        DecodeError::Invalid
    })
}

fn too_many_requests(locale: Locale, retry_after: Duration) -> Response {
    let seconds = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    (
        StatusCode::TOO_MANY_REQUESTS,
        [(RETRY_AFTER, seconds.to_string())],
        Json(ApiError {
            success: false,
            error: messages::too_many_requests(locale).into(),
            details: None,
        }),
    )
        .into_response()
}

fn validation_failed(locale: Locale, err: &ContactValidationError) -> Response {
    let details = err
        .fields
        .iter()
        .map(|&field| ApiFieldError {
            field: field.as_str(),
            message: messages::invalid_field(field, locale),
        })
        .collect();

    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            success: false,
            error: messages::VALIDATION_FAILED.into(),
            details: Some(details),
        }),
    )
        .into_response()
}
