//! Client route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use super::json_body;
use super::types::{
    ClientRegistered, ClientResponse, OrderResponse, RegisterClientRequest, UpdateClientRequest,
};
use crate::error::Result;
use crate::state::AppState;

/// Register a new client.
///
/// Returns 201 with the stored client; 400 on invalid data, 409 on a
/// duplicate ID or email.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ClientRegistered>)> {
    let body = json_body(payload)?;

    let client = state
        .clients()
        .register_client(
            body.id.as_deref().unwrap_or_default(),
            body.name.as_deref().unwrap_or_default(),
            body.email.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ClientRegistered {
            message: format!("Client registered successfully: {}", client.name),
            client: client.into(),
        }),
    ))
}

/// Get a client by ID.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClientResponse>> {
    let client = state.clients().search_client(&id).await?;
    Ok(Json(client.into()))
}

/// List all clients.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ClientResponse>>> {
    let clients = state.clients().list_all_clients().await?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

/// Replace a client's name and email.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateClientRequest>, JsonRejection>,
) -> Result<Json<ClientResponse>> {
    let body = json_body(payload)?;

    let client = state
        .clients()
        .update_client(
            &id,
            body.name.as_deref().unwrap_or_default(),
            body.email.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(client.into()))
}

/// Delete a client and its orders, returning the deleted client.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClientResponse>> {
    let client = state.clients().delete_client(&id).await?;
    Ok(Json(client.into()))
}

/// List the orders of a client.
#[instrument(skip(state))]
pub async fn orders(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<OrderResponse>>> {
    let orders = state.orders().search_orders_client(&id).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
