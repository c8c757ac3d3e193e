//! API Routes
//!
//! Configures the Axum router with all duties endpoints.

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    create_duty, delete_duty, get_duty, health_handler, list_duties, root_handler, update_duty,
    AppState,
};

/// Builds the CORS layer for a single allowed origin.
///
/// An origin that is not a valid header value disables cross-origin access.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = match HeaderValue::from_str(origin) {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            warn!("Ignoring invalid CORS origin: {}", origin);
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Greeting
/// - `GET /health` - Database and cache status
/// - `GET /duties` - Paged, sorted duty list
/// - `POST /duties` - Create a duty
/// - `GET /duties/:id` - Fetch one duty
/// - `PUT /duties/:id` - Rename a duty
/// - `DELETE /duties/:id` - Delete a duty
pub fn create_router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/duties", get(list_duties).post(create_duty))
        .route(
            "/duties/:id",
            get(get_duty).put(update_duty).delete(delete_duty),
        )
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryDutyRepository;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    const ORIGIN: &str = "http://localhost:3000";

    fn create_test_app() -> Router {
        let state = AppState::new(
            Arc::new(InMemoryDutyRepository::new()),
            Duration::from_secs(60),
            100,
        );
        create_router(state, ORIGIN)
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/duties?page=1&limit=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_configured_origin() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/duties")
                    .header("origin", ORIGIN)
                    .header("access-control-request-method", "DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            ORIGIN
        );
    }

    #[tokio::test]
    async fn test_unknown_method_rejected() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/duties")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
