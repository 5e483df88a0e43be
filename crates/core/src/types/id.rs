//! Type-safe identifiers for clients and orders.
//!
//! Client IDs are supplied by the caller when registering a client, so they
//! are validated strings. Order IDs are always generated by the system and
//! wrap a random UUID.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`ClientId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientIdError {
    /// The input is empty or whitespace only.
    #[error("client id cannot be blank")]
    Blank,
    /// The input is too long.
    #[error("client id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a control character.
    #[error("client id cannot contain control characters")]
    ControlCharacter,
}

/// Identifier of a registered client (e.g. `J001`).
///
/// Surrounding whitespace is trimmed on parse.
///
/// ```
/// use orderdesk_core::ClientId;
///
/// let id = ClientId::parse("  J001 ").unwrap();
/// assert_eq!(id.as_str(), "J001");
/// assert!(ClientId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    /// Maximum length of a client ID, in characters.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `ClientId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`] characters, or contains control characters.
    pub fn parse(s: &str) -> Result<Self, ClientIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ClientIdError::Blank);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(ClientIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ClientIdError::ControlCharacter);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClientId {
    type Err = ClientIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClientId {
    type Error = ClientIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when parsing an [`OrderId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderIdError {
    /// The input is empty or whitespace only.
    #[error("order id cannot be blank")]
    Blank,
    /// The input is not a UUID.
    #[error("order id is not a valid identifier: {0}")]
    Malformed(String),
}

/// System-generated identifier of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a fresh random order ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an `OrderId` from its textual form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or not a UUID.
    pub fn parse(s: &str) -> Result<Self, OrderIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(OrderIdError::Blank);
        }
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| OrderIdError::Malformed(trimmed.to_owned()))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for OrderId {
    type Err = OrderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OrderId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Uuid as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OrderId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <Uuid as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OrderId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Uuid as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_trims() {
        let id = ClientId::parse("  J001\t").unwrap();
        assert_eq!(id.as_str(), "J001");
        assert_eq!(id.to_string(), "J001");
    }

    #[test]
    fn test_client_id_blank() {
        assert_eq!(ClientId::parse(""), Err(ClientIdError::Blank));
        assert_eq!(ClientId::parse("   "), Err(ClientIdError::Blank));
    }

    #[test]
    fn test_client_id_too_long() {
        let long = "x".repeat(ClientId::MAX_LENGTH + 1);
        assert!(matches!(
            ClientId::parse(&long),
            Err(ClientIdError::TooLong { .. })
        ));
        assert!(ClientId::parse(&"x".repeat(ClientId::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_client_id_control_character() {
        assert_eq!(
            ClientId::parse("J0\u{0}01"),
            Err(ClientIdError::ControlCharacter)
        );
    }

    #[test]
    fn test_client_id_deserialize_validates() {
        let id: ClientId = serde_json::from_str("\"J001\"").unwrap();
        assert_eq!(id.as_str(), "J001");
        assert!(serde_json::from_str::<ClientId>("\"  \"").is_err());
    }

    #[test]
    fn test_order_id_generate_is_unique() {
        assert_ne!(OrderId::generate(), OrderId::generate());
    }

    #[test]
    fn test_order_id_parse() {
        let id = OrderId::generate();
        let parsed = OrderId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_order_id_parse_errors() {
        assert_eq!(OrderId::parse(" "), Err(OrderIdError::Blank));
        assert!(matches!(
            OrderId::parse("not-an-id"),
            Err(OrderIdError::Malformed(_))
        ));
    }
}
