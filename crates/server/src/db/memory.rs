//! In-process store for clients and orders.
//!
//! One [`MemoryStore`] implements both repository traits so that deleting a
//! client can drop its orders, mirroring the `ON DELETE CASCADE` foreign key
//! of the `PostgreSQL` schema. All access goes through a single `RwLock`;
//! every check-then-write happens under one write guard.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use orderdesk_core::{ClientId, Email, OrderId};

use super::{ClientRepository, OrderRepository, RepositoryError};
use crate::models::{Client, Order};

#[derive(Default)]
struct MemoryState {
    clients: HashMap<ClientId, Client>,
    /// Client IDs in insertion order.
    client_sequence: Vec<ClientId>,
    orders: HashMap<OrderId, Order>,
    /// Order IDs in insertion order.
    order_sequence: Vec<OrderId>,
}

impl MemoryState {
    /// Whether a client other than `owner` already uses `email`.
    fn email_taken(&self, email: &Email, owner: &ClientId) -> bool {
        self.clients
            .values()
            .any(|c| &c.email == email && &c.id != owner)
    }
}

/// In-memory client and order store.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        Ok(self.state.read().await.clients.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Client>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.clients.values().find(|c| &c.email == email).cloned())
    }

    async fn exists_by_id(&self, id: &ClientId) -> Result<bool, RepositoryError> {
        Ok(self.state.read().await.clients.contains_key(id))
    }

    async fn insert(&self, client: &Client) -> Result<Client, RepositoryError> {
        let mut state = self.state.write().await;

        if state.clients.contains_key(&client.id) {
            return Err(RepositoryError::Conflict(
                "client id already exists".to_owned(),
            ));
        }
        if state.email_taken(&client.email, &client.id) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        state.client_sequence.push(client.id.clone());
        state.clients.insert(client.id.clone(), client.clone());
        Ok(client.clone())
    }

    async fn update(&self, client: &Client) -> Result<Option<Client>, RepositoryError> {
        let mut state = self.state.write().await;

        if !state.clients.contains_key(&client.id) {
            return Ok(None);
        }
        if state.email_taken(&client.email, &client.id) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        Ok(state.clients.get_mut(&client.id).map(|existing| {
            existing.name = client.name.clone();
            existing.email = client.email.clone();
            existing.clone()
        }))
    }

    async fn delete_by_id(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        let mut state = self.state.write().await;

        let Some(removed) = state.clients.remove(id) else {
            return Ok(None);
        };
        state.client_sequence.retain(|c| c != id);

        let MemoryState {
            orders,
            order_sequence,
            ..
        } = &mut *state;
        orders.retain(|_, order| &order.client_id != id);
        order_sequence.retain(|order_id| orders.contains_key(order_id));

        Ok(Some(removed))
    }

    async fn find_all(&self) -> Result<Vec<Client>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .client_sequence
            .iter()
            .filter_map(|id| state.clients.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.state.read().await.orders.get(&id).cloned())
    }

    async fn find_by_client_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .order_sequence
            .iter()
            .filter_map(|id| state.orders.get(id))
            .filter(|order| &order.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn save(&self, order: &Order) -> Result<Order, RepositoryError> {
        let mut state = self.state.write().await;

        if !state.clients.contains_key(&order.client_id) {
            return Err(RepositoryError::MissingReference(format!(
                "client {} does not exist",
                order.client_id
            )));
        }
        if state.orders.contains_key(&order.id) {
            return Err(RepositoryError::Conflict(
                "order id already exists".to_owned(),
            ));
        }

        state.order_sequence.push(order.id);
        state.orders.insert(order.id, order.clone());
        Ok(order.clone())
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .order_sequence
            .iter()
            .filter_map(|id| state.orders.get(id).cloned())
            .collect())
    }
}
