//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use super::json_body;
use super::types::{CreateOrderRequest, OrderCreated, OrderResponse};
use crate::error::{AppError, Result};
use crate::services::ServiceError;
use crate::state::AppState;

/// Create an order for an existing client.
///
/// An unknown client is the caller's mistake here, so it answers 400 rather
/// than 404.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderCreated>)> {
    let body = json_body(payload)?;

    let order = state
        .orders()
        .create_order(
            body.client_id.as_deref().unwrap_or_default(),
            // A missing total is rejected as non-positive
            body.total.unwrap_or_default(),
            body.details.unwrap_or_default(),
        )
        .await
        .map_err(|e| match e {
            ServiceError::ClientNotFound(message) => AppError::BadRequest(message),
            other => other.into(),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            message: "Order created successfully".to_owned(),
            order: order.into(),
        }),
    ))
}

/// Get an order by ID.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>> {
    let order = state.orders().search_order(&id).await?;
    Ok(Json(order.into()))
}

/// List all orders.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<OrderResponse>>> {
    let orders = state.orders().list_all_orders().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
