//! Domain models for the order desk.
//!
//! These are validated domain objects, separate from database row types and
//! from the JSON shapes used at the HTTP boundary.

pub mod client;
pub mod order;

pub use client::{Client, ClientName, NAME_MAX_LENGTH};
pub use order::Order;
