//! Request and response bodies of the JSON API.
//!
//! Field names are camelCase on the wire.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Client, Order};

/// Body of `POST /api/clientes/registrar`.
///
/// Missing fields deserialize as `None` and are rejected by the service as blank.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClientRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Body of `PUT /api/clientes/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Body of `POST /api/ordenes/registrar`.
///
/// `total` accepts a JSON number or a decimal string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub client_id: Option<String>,
    pub total: Option<Decimal>,
    pub details: Option<Vec<String>>,
}

/// A client as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub registration_date: NaiveDate,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.into(),
            name: client.name.to_string(),
            email: client.email.into(),
            registration_date: client.registration_date,
        }
    }
}

/// An order as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub client_id: String,
    pub order_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub details: Vec<String>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            client_id: order.client_id.into(),
            order_date: order.order_date,
            total: order.total.amount(),
            details: order.details.into(),
        }
    }
}

/// Response of a successful client registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientRegistered {
    pub message: String,
    pub client: ClientResponse,
}

/// Response of a successful order creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderCreated {
    pub message: String,
    pub order: OrderResponse,
}
