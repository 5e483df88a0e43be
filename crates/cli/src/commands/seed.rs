//! Seed the database with demo data.
//!
//! Goes through the service layer so the same validation and uniqueness
//! rules apply as for API requests.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use orderdesk_server::db::{self, PgClientRepository, PgOrderRepository};
use orderdesk_server::services::{ClientService, OrderService, ServiceError};

use super::{MissingDatabaseUrl, database_url};

const DEMO_CLIENT_ID: &str = "J001";
const DEMO_CLIENT_NAME: &str = "Jose Salazar";
const DEMO_CLIENT_EMAIL: &str = "jose.98@gmail.com";

/// Error seeding demo data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    MissingDatabaseUrl(#[from] MissingDatabaseUrl),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Register the demo client and one order for it.
///
/// An already registered demo client is reported and left untouched.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a service call fails
/// for any reason other than the demo client already existing.
pub async fn demo() -> Result<(), SeedError> {
    let url = database_url()?;
    let pool = db::create_pool(&url).await?;

    let clients = ClientService::new(Arc::new(PgClientRepository::new(pool.clone())));
    let orders = OrderService::new(Arc::new(PgOrderRepository::new(pool)), clients.clone());

    match clients
        .register_client(DEMO_CLIENT_ID, DEMO_CLIENT_NAME, DEMO_CLIENT_EMAIL)
        .await
    {
        Ok(client) => info!(client_id = %client.id, "Demo client registered"),
        Err(ServiceError::DuplicateId(message)) => {
            warn!(%message, "Demo client already present, skipping seed");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let order = orders
        .create_order(
            DEMO_CLIENT_ID,
            Decimal::new(500, 1),
            vec!["item1".to_owned()],
        )
        .await?;
    info!(order_id = %order.id, total = %order.total, "Demo order created");

    Ok(())
}
