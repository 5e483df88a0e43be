//! Order domain types.

use chrono::NaiveDate;

use orderdesk_core::{ClientId, OrderDetails, OrderId, OrderTotal};

/// A purchase record tied to exactly one client.
///
/// Orders are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// System-generated ID.
    pub id: OrderId,
    /// Owning client.
    pub client_id: ClientId,
    /// Day the order was created.
    pub order_date: NaiveDate,
    /// Order total, always positive.
    pub total: OrderTotal,
    /// Line items, never empty.
    pub details: OrderDetails,
}
