//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness check
//! GET    /health/ready                - Readiness check (storage reachable)
//!
//! # Clients
//! POST   /api/clientes/registrar      - Register a client
//! GET    /api/clientes                - List clients
//! GET    /api/clientes/{id}           - Client detail
//! PUT    /api/clientes/{id}           - Update name/email
//! DELETE /api/clientes/{id}           - Delete client (and its orders)
//! GET    /api/clientes/{id}/ordenes   - Orders of a client
//!
//! # Orders
//! POST   /api/ordenes/registrar       - Create an order
//! GET    /api/ordenes                 - List orders
//! GET    /api/ordenes/{id}            - Order detail
//! ```

pub mod clients;
pub mod health;
pub mod orders;
pub mod types;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Create the client routes router.
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/api/clientes", get(clients::index))
        .route("/api/clientes/registrar", post(clients::register))
        .route(
            "/api/clientes/{id}",
            get(clients::show)
                .put(clients::update)
                .delete(clients::destroy),
        )
        .route("/api/clientes/{id}/ordenes", get(clients::orders))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/api/ordenes", get(orders::index))
        .route("/api/ordenes/registrar", post(orders::register))
        .route("/api/ordenes/{id}", get(orders::show))
}

/// Create the complete application router with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(client_routes())
        .merge(order_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unwrap a JSON body, turning parse failures into a 400 with the parser message.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
