use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use docgen_api::auth::jwt::{generate_access_token, JwtConfig};
use docgen_api::config::ServerConfig;
use docgen_api::router::build_app_router;
use docgen_api::state::AppState;
use docgen_generator::GenerationManager;

/// Shared JWT secret for tests.
const TEST_JWT_SECRET: &str = "test-secret-not-for-production";

/// Generation service URL for tests. Points at a closed port; tests that
/// must not depend on the service never let a request reach it.
const TEST_GENERATOR_URL: &str = "http://127.0.0.1:9";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        generator_url: TEST_GENERATOR_URL.to_string(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This uses the same `build_app_router` as `main.rs`, so integration
/// tests exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generation: GenerationManager::new(config.generator_url.clone()),
    };
    build_app_router(state, &config)
}

/// A valid bearer token for the given subject.
pub fn bearer_token(subject: &str) -> String {
    let config = test_config();
    let token = generate_access_token(subject, &config.jwt).expect("token generation");
    format!("Bearer {token}")
}

/// Send a request with no body and no auth header.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an authenticated request with an optional JSON body.
pub async fn request_as(
    app: Router,
    subject: &str,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", bearer_token(subject));

    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a `{ "error", "code" }` response with the expected status.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
    assert!(json["error"].is_string());
}
