//! `PostgreSQL` client repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use orderdesk_core::{ClientId, Email};

use super::{ClientRepository, RepositoryError, map_write_error};
use crate::models::{Client, ClientName};

/// Row shape of the `clients` table.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: String,
    name: String,
    email: String,
    registration_date: NaiveDate,
}

impl TryFrom<ClientRow> for Client {
    type Error = RepositoryError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let id = ClientId::parse(&row.id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid client id in database: {e}"))
        })?;
        let name = ClientName::parse(&row.name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid client name in database: {e}"))
        })?;
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id,
            name,
            email,
            registration_date: row.registration_date,
        })
    }
}

/// Repository for the `clients` table.
#[derive(Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    /// Create a new client repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        let row: Option<ClientRow> = sqlx::query_as(
            r"
            SELECT id, name, email, registration_date
            FROM clients
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Client::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Client>, RepositoryError> {
        let row: Option<ClientRow> = sqlx::query_as(
            r"
            SELECT id, name, email, registration_date
            FROM clients
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Client::try_from).transpose()
    }

    async fn exists_by_id(&self, id: &ClientId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, client: &Client) -> Result<Client, RepositoryError> {
        let row: ClientRow = sqlx::query_as(
            r"
            INSERT INTO clients (id, name, email, registration_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, registration_date
            ",
        )
        .bind(&client.id)
        .bind(client.name.as_str())
        .bind(&client.email)
        .bind(client.registration_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "client id or email already exists", "client reference"))?;

        Client::try_from(row)
    }

    async fn update(&self, client: &Client) -> Result<Option<Client>, RepositoryError> {
        let row: Option<ClientRow> = sqlx::query_as(
            r"
            UPDATE clients
            SET name = $2, email = $3
            WHERE id = $1
            RETURNING id, name, email, registration_date
            ",
        )
        .bind(&client.id)
        .bind(client.name.as_str())
        .bind(&client.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "email already exists", "client reference"))?;

        row.map(Client::try_from).transpose()
    }

    async fn delete_by_id(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        // Orders go with the client through ON DELETE CASCADE
        let row: Option<ClientRow> = sqlx::query_as(
            r"
            DELETE FROM clients
            WHERE id = $1
            RETURNING id, name, email, registration_date
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Client::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Client>, RepositoryError> {
        let rows: Vec<ClientRow> = sqlx::query_as(
            r"
            SELECT id, name, email, registration_date
            FROM clients
            ORDER BY created_at ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Client::try_from).collect()
    }
}
