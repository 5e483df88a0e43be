//! Client domain types.

use chrono::NaiveDate;

use orderdesk_core::{ClientId, Email};

/// Maximum length of a client name, in characters.
pub const NAME_MAX_LENGTH: usize = 100;

/// A registered client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// Caller-supplied unique ID.
    pub id: ClientId,
    /// Display name.
    pub name: ClientName,
    /// Unique email address.
    pub email: Email,
    /// Day the client registered. Never changes after creation.
    pub registration_date: NaiveDate,
}

/// A validated client name: trimmed, non-blank, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientName(String);

impl ClientName {
    /// Parse a client name, returning a message describing the problem on failure.
    ///
    /// # Errors
    ///
    /// Returns an error message if the name is blank or too long.
    pub fn parse(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("client name cannot be blank".to_owned());
        }
        if trimmed.chars().count() > NAME_MAX_LENGTH {
            return Err(format!(
                "client name must be at most {NAME_MAX_LENGTH} characters"
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
