//! Core types for Order Desk.
//!
//! This module provides validated wrappers for the client and order domain.

pub mod email;
pub mod id;
pub mod order;
#[cfg(feature = "postgres")]
mod pg;

pub use email::{Email, EmailError};
pub use id::{ClientId, ClientIdError, OrderId, OrderIdError};
pub use order::{OrderDetails, OrderDetailsError, OrderTotal, OrderTotalError};
