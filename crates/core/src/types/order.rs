//! Order value types: the order total and its line-item details.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building an [`OrderTotal`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderTotalError {
    /// The amount is zero or negative.
    #[error("order total must be greater than zero (got {0})")]
    NotPositive(Decimal),
}

/// Total amount of an order. Always strictly positive.
///
/// ```
/// use orderdesk_core::OrderTotal;
/// use rust_decimal::Decimal;
///
/// assert!(OrderTotal::new(Decimal::new(5000, 2)).is_ok());
/// assert!(OrderTotal::new(Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct OrderTotal(Decimal);

impl OrderTotal {
    /// Create an order total.
    ///
    /// # Errors
    ///
    /// Returns [`OrderTotalError::NotPositive`] if `amount <= 0`.
    pub fn new(amount: Decimal) -> Result<Self, OrderTotalError> {
        if amount <= Decimal::ZERO {
            return Err(OrderTotalError::NotPositive(amount));
        }
        Ok(Self(amount))
    }

    /// Get the amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for OrderTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for OrderTotal {
    type Error = OrderTotalError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderTotal> for Decimal {
    fn from(total: OrderTotal) -> Self {
        total.0
    }
}

/// Errors that can occur when building [`OrderDetails`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderDetailsError {
    /// No line items were given.
    #[error("order details cannot be empty")]
    Empty,
    /// A line item is empty or whitespace only.
    #[error("order detail at position {0} is blank")]
    BlankItem(usize),
    /// A line item contains the storage delimiter.
    #[error("order detail at position {0} cannot contain \"{delimiter}\"", delimiter = OrderDetails::DELIMITER)]
    ContainsDelimiter(usize),
}

/// Ordered, non-empty list of free-text order line items.
///
/// Stored as a single string with items joined by [`OrderDetails::DELIMITER`].
/// Items containing the delimiter are rejected so the stored form always
/// splits back into the original list.
///
/// ```
/// use orderdesk_core::OrderDetails;
///
/// let details = OrderDetails::new(vec!["item1".into(), "item2".into()]).unwrap();
/// assert_eq!(details.to_storage(), "item1, item2");
/// assert_eq!(OrderDetails::from_storage("item1, item2").unwrap(), details);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct OrderDetails(Vec<String>);

impl OrderDetails {
    /// Separator between items in the stored form.
    pub const DELIMITER: &'static str = ", ";

    /// Build order details from line items. Each item is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, or an item is blank or contains
    /// the storage delimiter.
    pub fn new(items: Vec<String>) -> Result<Self, OrderDetailsError> {
        if items.is_empty() {
            return Err(OrderDetailsError::Empty);
        }

        items
            .into_iter()
            .enumerate()
            .map(|(position, item)| {
                let item = item.trim();
                if item.is_empty() {
                    Err(OrderDetailsError::BlankItem(position))
                } else if item.contains(Self::DELIMITER) {
                    Err(OrderDetailsError::ContainsDelimiter(position))
                } else {
                    Ok(item.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Rebuild order details from their stored form.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored string is blank or has a blank item.
    pub fn from_storage(stored: &str) -> Result<Self, OrderDetailsError> {
        if stored.trim().is_empty() {
            return Err(OrderDetailsError::Empty);
        }
        Self::new(stored.split(Self::DELIMITER).map(str::to_owned).collect())
    }

    /// Serialize to the stored form.
    #[must_use]
    pub fn to_storage(&self) -> String {
        self.0.join(Self::DELIMITER)
    }

    /// The line items, in order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.0
    }

    /// Number of line items. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no line items. Never true for a constructed value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for OrderDetails {
    type Error = OrderDetailsError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderDetails> for Vec<String> {
    fn from(details: OrderDetails) -> Self {
        details.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_total_positive() {
        let total = OrderTotal::new(Decimal::new(50, 0)).unwrap();
        assert_eq!(total.amount(), Decimal::new(50, 0));
        assert_eq!(total.to_string(), "50.00");
    }

    #[test]
    fn test_total_zero_and_negative() {
        assert_eq!(
            OrderTotal::new(Decimal::ZERO),
            Err(OrderTotalError::NotPositive(Decimal::ZERO))
        );
        assert!(OrderTotal::new(Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_details_empty() {
        assert_eq!(OrderDetails::new(vec![]), Err(OrderDetailsError::Empty));
    }

    #[test]
    fn test_details_blank_item() {
        assert_eq!(
            OrderDetails::new(items(&["item1", "  "])),
            Err(OrderDetailsError::BlankItem(1))
        );
    }

    #[test]
    fn test_details_delimiter_item() {
        assert_eq!(
            OrderDetails::new(items(&["apples, pears"])),
            Err(OrderDetailsError::ContainsDelimiter(0))
        );
        // A comma without the following space is fine.
        assert!(OrderDetails::new(items(&["1,5 kg rice"])).is_ok());
    }

    #[test]
    fn test_details_storage_form() {
        let details = OrderDetails::new(items(&[" item1 ", "item2", "item3"])).unwrap();
        assert_eq!(details.to_storage(), "item1, item2, item3");
        assert_eq!(details.len(), 3);

        let restored = OrderDetails::from_storage(&details.to_storage()).unwrap();
        assert_eq!(restored.items(), details.items());
    }

    #[test]
    fn test_details_from_blank_storage() {
        assert_eq!(
            OrderDetails::from_storage(""),
            Err(OrderDetailsError::Empty)
        );
    }

    #[test]
    fn test_details_deserialize_validates() {
        let details: OrderDetails = serde_json::from_str(r#"["item1"]"#).unwrap();
        assert_eq!(details.items(), ["item1".to_owned()]);
        assert!(serde_json::from_str::<OrderDetails>("[]").is_err());
    }
}
