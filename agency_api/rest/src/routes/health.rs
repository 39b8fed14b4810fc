use std::sync::Arc;

use agency_core_health_contracts::HealthFeatureService;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let status = service.get_status().await;

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (code, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use agency_core_health_contracts::{HealthStatus, MockHealthFeatureService};
    use axum::{body::Body, http};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    async fn call(service: MockHealthFeatureService) -> (StatusCode, Value) {
        let request = http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = router(Arc::new(service)).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let service = MockHealthFeatureService::new().with_get_status(HealthStatus {
            http: true,
            email: true,
        });

        // Act
        let (status, body) = call(service).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"http": true, "email": true}));
    }

    #[tokio::test]
    async fn email_down() {
        // Arrange
        let service = MockHealthFeatureService::new().with_get_status(HealthStatus {
            http: true,
            email: false,
        });

        // Act
        let (status, body) = call(service).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"http": true, "email": false}));
    }
}
