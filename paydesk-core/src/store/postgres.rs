//! Postgres-backed order store.
//!
//! One row per order, keyed by the textual identifier. Statuses are
//! stored as text so the table stays readable from psql and the crate
//! builds without compile-time database access. The per-identifier
//! critical section is a `SELECT … FOR UPDATE` inside a transaction.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::warn;

use super::{OrderStore, StatusAdvance, StoreError};
use crate::entities::{Order, OrderId, OrderStatus};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS orders (
    id           TEXT PRIMARY KEY,
    tier         TEXT NOT NULL,
    price        NUMERIC NOT NULL,
    credits      BIGINT NOT NULL,
    status       TEXT NOT NULL,
    created_at   TIMESTAMPTZ NOT NULL,
    issued_token TEXT
)";

const SELECT_COLUMNS: &str =
    "SELECT id, tier, price, credits, status, created_at, issued_token FROM orders";

pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the backing table if it does not exist yet.
    #[tracing::instrument(skip_all, err, name = "SQL:EnsureOrdersSchema")]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

fn decode_row(row: &PgRow) -> Result<Order, StoreError> {
    let id: String = row.try_get("id")?;
    let tier: String = row.try_get("tier")?;
    let price: rust_decimal::Decimal = row.try_get("price")?;
    let credits: i64 = row.try_get("credits")?;
    let status: String = row.try_get("status")?;
    let created_at: time::OffsetDateTime = row.try_get("created_at")?;
    let issued_token: Option<String> = row.try_get("issued_token")?;

    let credits = u32::try_from(credits)
        .map_err(|_| StoreError::Corrupted(format!("order {id}: credits out of range")))?;
    let status: OrderStatus = status
        .parse()
        .map_err(|_| StoreError::Corrupted(format!("order {id}: unknown status {status:?}")))?;

    Ok(Order {
        id: OrderId::new(id),
        tier: tier.into(),
        price,
        credits,
        status,
        created_at,
        issued_token,
    })
}

#[async_trait]
impl OrderStore for PgOrderStore {
    #[tracing::instrument(skip_all, err, name = "SQL:GetOrder")]
    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(decode_row).transpose()
    }

    #[tracing::instrument(skip_all, err, name = "SQL:PutOrder")]
    async fn put(&self, order: Order) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO orders (id, tier, price, credits, status, created_at, issued_token) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET \
             tier = EXCLUDED.tier, price = EXCLUDED.price, credits = EXCLUDED.credits, \
             status = EXCLUDED.status, created_at = EXCLUDED.created_at, \
             issued_token = EXCLUDED.issued_token",
        )
        .bind(order.id.as_str())
        .bind(order.tier.as_str())
        .bind(order.price)
        .bind(i64::from(order.credits))
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.issued_token.as_deref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, err, name = "SQL:PutOrderIfAbsent")]
    async fn put_if_absent(&self, order: Order) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO orders (id, tier, price, credits, status, created_at, issued_token) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(order.id.as_str())
        .bind(order.tier.as_str())
        .bind(order.price)
        .bind(i64::from(order.credits))
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.issued_token.as_deref())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    #[tracing::instrument(skip_all, err, name = "SQL:ListOrders")]
    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query(SELECT_COLUMNS).fetch_all(&self.pool).await?;
        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            match decode_row(row) {
                Ok(order) => orders.push(order),
                Err(e) => warn!(error = %e, "skipping undecodable order row"),
            }
        }
        Ok(orders)
    }

    #[tracing::instrument(skip_all, err, name = "SQL:AdvanceOrderStatus")]
    async fn advance_status(
        &self,
        id: &OrderId,
        allowed_from: &[OrderStatus],
        to: OrderStatus,
    ) -> Result<StatusAdvance, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Row lock held until commit; concurrent advances on one id
        // queue up here.
        let row = sqlx::query("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(StatusAdvance::Missing);
        };

        let current: String = row.try_get("status")?;
        let current: OrderStatus = current
            .parse()
            .map_err(|_| StoreError::Corrupted(format!("order {id}: unknown status {current:?}")))?;
        if !allowed_from.contains(&current) {
            return Ok(StatusAdvance::Rejected { current });
        }

        sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(to.as_str())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(StatusAdvance::Applied { previous: current })
    }
}
