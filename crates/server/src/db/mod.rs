//! Persistence for clients and orders.
//!
//! # Backends
//!
//! Services talk to storage only through the [`ClientRepository`] and
//! [`OrderRepository`] traits. Two implementations exist:
//!
//! - [`PgClientRepository`] / [`PgOrderRepository`] - `PostgreSQL` tables
//!   `clients` and `orders`
//! - [`MemoryStore`] - a single in-process store implementing both traits
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p orderdesk-cli -- migrate
//! ```

pub mod clients;
pub mod memory;
pub mod orders;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use orderdesk_core::{ClientId, Email, OrderId};

use crate::models::{Client, Order};

pub use clients::PgClientRepository;
pub use memory::MemoryStore;
pub use orders::PgOrderRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A referenced record does not exist (e.g., order for a deleted client).
    #[error("missing reference: {0}")]
    MissingReference(String),
}

/// Storage for client records.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Get a client by ID.
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError>;

    /// Get a client by email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Client>, RepositoryError>;

    /// Whether a client with this ID exists.
    async fn exists_by_id(&self, id: &ClientId) -> Result<bool, RepositoryError>;

    /// Insert a new client.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the ID or the email is taken.
    async fn insert(&self, client: &Client) -> Result<Client, RepositoryError>;

    /// Overwrite name and email of an existing client, keeping its
    /// registration date. Returns `None` if no client has this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if another client has the same email.
    async fn update(&self, client: &Client) -> Result<Option<Client>, RepositoryError>;

    /// Delete a client and its orders, returning the deleted client.
    async fn delete_by_id(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError>;

    /// All clients in storage order.
    async fn find_all(&self) -> Result<Vec<Client>, RepositoryError>;
}

/// Storage for order records.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Get an order by ID.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// All orders belonging to a client, in storage order.
    async fn find_by_client_id(&self, client_id: &ClientId)
    -> Result<Vec<Order>, RepositoryError>;

    /// Insert a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the client does not exist
    /// and `RepositoryError::Conflict` if the order ID is already taken.
    async fn save(&self, order: &Order) -> Result<Order, RepositoryError>;

    /// All orders in storage order.
    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Translate constraint violations raised by a write into repository errors.
fn map_write_error(e: sqlx::Error, conflict: &str, missing_reference: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(conflict.to_owned());
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::MissingReference(missing_reference.to_owned());
        }
    }
    RepositoryError::Database(e)
}
