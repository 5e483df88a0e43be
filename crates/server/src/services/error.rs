//! Service error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors returned by [`ClientService`](super::ClientService) and
/// [`OrderService`](super::OrderService).
///
/// The message of every variant except `Repository` is safe to show to API
/// callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input is missing, blank, or malformed.
    #[error("{0}")]
    InvalidData(String),

    /// A client ID or email is already registered.
    #[error("{0}")]
    DuplicateId(String),

    /// No client matches the given ID.
    #[error("{0}")]
    ClientNotFound(String),

    /// No order matches the given ID.
    #[error("{0}")]
    OrderNotFound(String),

    /// Storage failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub(crate) fn client_not_found(id: impl std::fmt::Display) -> Self {
        Self::ClientNotFound(format!("client with id {id} not found"))
    }

    pub(crate) fn order_not_found(id: impl std::fmt::Display) -> Self {
        Self::OrderNotFound(format!("order with id {id} not found"))
    }
}
