//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::{ServerConfig, StorageBackend};
use crate::db::{self, MemoryStore, PgClientRepository, PgOrderRepository};
use crate::services::{ClientService, OrderService};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("ORDERDESK_DATABASE_URL is required for the postgres backend")]
    MissingDatabaseUrl,
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// services and, for the `PostgreSQL` backend, the connection pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: Option<PgPool>,
    clients: ClientService,
    orders: OrderService,
}

impl AppState {
    /// Build state for the backend selected in `config`, connecting to
    /// `PostgreSQL` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database URL is missing or the pool cannot connect.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, StateError> {
        match config.storage {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_ref()
                    .ok_or(StateError::MissingDatabaseUrl)?;
                let pool = db::create_pool(url).await?;
                tracing::info!("Database pool created");
                Ok(Self::postgres(pool))
            }
        }
    }

    /// State backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        let clients = ClientService::new(Arc::new(PgClientRepository::new(pool.clone())));
        let orders = OrderService::new(
            Arc::new(PgOrderRepository::new(pool.clone())),
            clients.clone(),
        );
        Self::build(Some(pool), clients, orders)
    }

    /// State backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        let clients = ClientService::new(store.clone());
        let orders = OrderService::new(store, clients.clone());
        Self::build(None, clients, orders)
    }

    fn build(pool: Option<PgPool>, clients: ClientService, orders: OrderService) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                clients,
                orders,
            }),
        }
    }

    /// Get the database pool, if the `PostgreSQL` backend is in use.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Get the client service.
    #[must_use]
    pub fn clients(&self) -> &ClientService {
        &self.inner.clients
    }

    /// Get the order service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }
}
