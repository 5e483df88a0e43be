//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Error resolving the database connection settings.
#[derive(Debug, thiserror::Error)]
#[error("Missing environment variable: ORDERDESK_DATABASE_URL (or DATABASE_URL)")]
pub struct MissingDatabaseUrl;

/// Database URL from `ORDERDESK_DATABASE_URL`, falling back to `DATABASE_URL`.
///
/// Loads `.env` first if present.
pub fn database_url() -> Result<SecretString, MissingDatabaseUrl> {
    dotenvy::dotenv().ok();

    std::env::var("ORDERDESK_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MissingDatabaseUrl)
}
