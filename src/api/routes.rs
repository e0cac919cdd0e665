//! API Routes
//!
//! Configures the Axum router with all shareable URL endpoints.

use axum::{
    routing::{get, options},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_handler, empty_handler, item_handler, metadata_handler, method_not_allowed_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `/`: `POST` creates, `GET` is rejected, anything else (`HEAD` included) answers `{}`
/// - `/metadata`: `OPTIONS` preflight, `POST` batch lookup, anything else rejected
/// - any other path: item endpoint keyed by the path
///
/// # Middleware
/// - CORS: fixed header set on every response
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route(
            "/",
            // Explicit HEAD so it does not fall through to the GET rejection
            get(method_not_allowed_handler)
                .head(empty_handler)
                .post(create_handler)
                .fallback(empty_handler),
        )
        .route(
            "/metadata",
            options(empty_handler)
                .post(metadata_handler)
                .fallback(method_not_allowed_handler),
        )
        .fallback(item_handler);

    state
        .cors
        .layer(router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::in_memory())
    }

    #[tokio::test]
    async fn test_index_get_not_allowed() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_index_other_method_is_empty_ok() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_head_is_ok() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("HEAD")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metadata_options() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/metadata")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metadata_get_not_allowed() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metadata")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_item_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/d9208390-216d-4304-b00d-9b4a913ea087")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers_on_errors() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }
}
