//! Integration tests for Order Desk.
//!
//! # Running Tests
//!
//! ```bash
//! # Router-level tests against the in-memory backend
//! cargo test -p orderdesk-integration-tests
//!
//! # Live tests against a running server (PostgreSQL backend)
//! ORDERDESK_BASE_URL=http://localhost:8080 \
//!     cargo test -p orderdesk-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `clients_api` - Client registration, lookup, update and deletion
//! - `orders_api` - Order creation and queries
//! - `health` - Liveness and readiness endpoints
//! - `live_api` - The same flows over HTTP against a deployed server

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use orderdesk_server::state::AppState;

/// The full application router over a fresh in-memory store.
pub struct TestApp {
    router: Router,
}

/// Status and raw body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("response body is not JSON ({e}): {}", self.body))
    }

    /// Deserialize the body into a response type.
    ///
    /// # Panics
    ///
    /// Panics if the body does not match `T`.
    #[must_use]
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("unexpected response body ({e}): {}", self.body))
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build the application over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            router: orderdesk_server::app(AppState::in_memory()),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, Body::empty(), false).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, Body::empty(), false).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Body::from(body.to_string()), true)
            .await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, Body::from(body.to_string()), true)
            .await
    }

    /// POST a raw string with a JSON content type.
    pub async fn post_raw(&self, uri: &str, body: &'static str) -> TestResponse {
        self.send(Method::POST, uri, Body::from(body), true).await
    }

    /// Register a client through the API.
    pub async fn register_client(&self, id: &str, name: &str, email: &str) -> TestResponse {
        self.post_json(
            "/api/clientes/registrar",
            &serde_json::json!({ "id": id, "name": name, "email": email }),
        )
        .await
    }

    /// Create an order through the API.
    pub async fn create_order(&self, client_id: &str, total: Value, details: &[&str]) -> TestResponse {
        self.post_json(
            "/api/ordenes/registrar",
            &serde_json::json!({ "clientId": client_id, "total": total, "details": details }),
        )
        .await
    }

    async fn send(&self, method: Method, uri: &str, body: Body, json: bool) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if json {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body)
            .unwrap_or_else(|e| panic!("invalid request for {uri}: {e}"));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("failed to read response body: {e}"));

        TestResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Today's date as the server stamps it.
#[must_use]
pub fn today() -> String {
    chrono::Utc::now().date_naive().to_string()
}
