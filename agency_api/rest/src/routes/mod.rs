use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{messages, models::ApiError};

pub mod contact;
pub mod health;

/// Logs the error and responds with a generic 500. The error message is only
/// included if `expose` is set.
pub fn internal_server_error(err: impl Into<anyhow::Error>, expose: bool) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    let message = if expose {
        format!("{}: {err:#}", messages::INTERNAL_SERVER_ERROR)
    } else {
        messages::INTERNAL_SERVER_ERROR.into()
    };
    error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn error(code: StatusCode, error: impl Into<String>) -> Response {
    (
        code,
        Json(ApiError {
            success: false,
            error: error.into(),
            details: None,
        }),
    )
        .into_response()
}
