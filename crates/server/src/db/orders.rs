//! `PostgreSQL` order repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use orderdesk_core::{ClientId, OrderDetails, OrderId, OrderTotal};

use super::{OrderRepository, RepositoryError, map_write_error};
use crate::models::Order;

/// Row shape of the `orders` table.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    client_id: String,
    order_date: NaiveDate,
    total: Decimal,
    details: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let client_id = ClientId::parse(&row.client_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid client id on order {}: {e}", row.id))
        })?;
        let total = OrderTotal::new(row.total).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid total on order {}: {e}", row.id))
        })?;
        let details = OrderDetails::from_storage(&row.details).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid details on order {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            client_id,
            order_date: row.order_date,
            total,
            details,
        })
    }
}

/// Repository for the `orders` table.
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r"
            SELECT id, client_id, order_date, total, details
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    async fn find_by_client_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r"
            SELECT id, client_id, order_date, total, details
            FROM orders
            WHERE client_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn save(&self, order: &Order) -> Result<Order, RepositoryError> {
        let row: OrderRow = sqlx::query_as(
            r"
            INSERT INTO orders (id, client_id, order_date, total, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, client_id, order_date, total, details
            ",
        )
        .bind(order.id)
        .bind(&order.client_id)
        .bind(order.order_date)
        .bind(order.total.amount())
        .bind(order.details.to_storage())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                "order id already exists",
                &format!("client {} does not exist", order.client_id),
            )
        })?;

        Order::try_from(row)
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r"
            SELECT id, client_id, order_date, total, details
            FROM orders
            ORDER BY created_at ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
