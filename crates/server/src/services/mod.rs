//! Business logic for clients and orders.
//!
//! Services validate input, enforce uniqueness and reference rules, and call
//! the repositories. Route handlers never touch storage directly.

pub mod clients;
pub mod error;
pub mod orders;

use chrono::{NaiveDate, Utc};

pub use clients::ClientService;
pub use error::ServiceError;
pub use orders::OrderService;

/// Current UTC calendar date, used for registration and order dates.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}
