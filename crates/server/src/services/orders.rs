//! Order creation and queries.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument, warn};

use orderdesk_core::{ClientId, OrderDetails, OrderId, OrderTotal};

use super::{ClientService, ServiceError, today};
use crate::db::{OrderRepository, RepositoryError};
use crate::models::Order;

/// Validates and persists orders. Clients are resolved through [`ClientService`].
#[derive(Clone)]
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
    clients: ClientService,
}

impl OrderService {
    /// Create a new order service.
    #[must_use]
    pub fn new(repository: Arc<dyn OrderRepository>, clients: ClientService) -> Self {
        Self {
            repository,
            clients,
        }
    }

    /// Create an order for an existing client, dated today.
    ///
    /// # Errors
    ///
    /// - `ServiceError::InvalidData` if the client ID is blank, the total is not
    ///   positive, or the details are empty or contain a blank item
    /// - `ServiceError::ClientNotFound` if the client does not exist
    /// - `ServiceError::DuplicateId` if the generated ID collides with a stored order
    #[instrument(skip(self, details), fields(items = details.len()))]
    pub async fn create_order(
        &self,
        client_id: &str,
        total: Decimal,
        details: Vec<String>,
    ) -> Result<Order, ServiceError> {
        debug!("Creating order");

        let (client_id, total, details) =
            parse_order_fields(client_id, total, details).inspect_err(|e| {
                error!(error = %e, "Rejected order");
            })?;

        let client = self.clients.find_existing(&client_id).await?;

        let order = Order {
            id: OrderId::generate(),
            client_id: client.id,
            order_date: today(),
            total,
            details,
        };

        let saved = self.repository.save(&order).await.map_err(|e| match e {
            // Client deleted between lookup and insert
            RepositoryError::MissingReference(_) => {
                ServiceError::client_not_found(&order.client_id)
            }
            RepositoryError::Conflict(_) => {
                ServiceError::DuplicateId(format!("order with id {} already exists", order.id))
            }
            other => other.into(),
        })?;

        info!(order_id = %saved.id, client_id = %saved.client_id, "Order created");
        Ok(saved)
    }

    /// Look up an order by ID.
    ///
    /// # Errors
    ///
    /// - `ServiceError::InvalidData` if the ID is blank or malformed
    /// - `ServiceError::OrderNotFound` if no order has this ID
    #[instrument(skip(self))]
    pub async fn search_order(&self, id: &str) -> Result<Order, ServiceError> {
        let id = OrderId::parse(id).map_err(|e| {
            error!(error = %e, "Invalid order id");
            ServiceError::InvalidData(format!("invalid order id: {e}"))
        })?;

        let Some(order) = self.repository.find_by_id(id).await? else {
            warn!(order_id = %id, "Order not found");
            return Err(ServiceError::order_not_found(id));
        };

        info!(order_id = %id, "Order found");
        Ok(order)
    }

    /// All orders of an existing client.
    ///
    /// # Errors
    ///
    /// - `ServiceError::InvalidData` if the client ID is blank
    /// - `ServiceError::ClientNotFound` if the client does not exist
    #[instrument(skip(self))]
    pub async fn search_orders_client(&self, client_id: &str) -> Result<Vec<Order>, ServiceError> {
        let client = self.clients.search_client(client_id).await?;
        let orders = self.repository.find_by_client_id(&client.id).await?;
        info!(client_id = %client.id, count = orders.len(), "Listed client orders");
        Ok(orders)
    }

    /// All orders in storage order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if storage fails.
    #[instrument(skip(self))]
    pub async fn list_all_orders(&self) -> Result<Vec<Order>, ServiceError> {
        let orders = self.repository.find_all().await?;
        info!(count = orders.len(), "Listed orders");
        Ok(orders)
    }
}

fn parse_order_fields(
    client_id: &str,
    total: Decimal,
    details: Vec<String>,
) -> Result<(ClientId, OrderTotal, OrderDetails), ServiceError> {
    let client_id = ClientId::parse(client_id)
        .map_err(|e| ServiceError::InvalidData(format!("invalid order data: {e}")))?;
    let total = OrderTotal::new(total)
        .map_err(|e| ServiceError::InvalidData(format!("invalid order data: {e}")))?;
    let details = OrderDetails::new(details)
        .map_err(|e| ServiceError::InvalidData(format!("invalid order data: {e}")))?;
    Ok((client_id, total, details))
}
