//! The order storage contract and its backends.
//!
//! All backends expose the same keyed contract; callers never assume more
//! exclusivity than one call. Mutations targeting a single identifier are
//! serialized inside each backend (`put_if_absent`, `advance_status`), so
//! racing confirmations resolve deterministically instead of losing an
//! update.

mod file;
mod memory;
mod postgres;

pub use file::JsonFileStore;
pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

use async_trait::async_trait;

use crate::entities::{Order, OrderId, OrderStatus};

/// Errors surfaced by store backends.
///
/// Absence of a record is never an error; `get` reports it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing medium could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The stored data exists but cannot be decoded.
    #[error("corrupted order data: {0}")]
    Corrupted(String),
}

/// Outcome of an atomic status advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAdvance {
    /// The transition was applied; `previous` is the status it replaced.
    Applied { previous: OrderStatus },
    /// The record exists but its status was outside the allowed set.
    Rejected { current: OrderStatus },
    /// No record with that identifier exists.
    Missing,
}

/// Keyed, durable storage for [`Order`] records.
///
/// `get` must reflect the most recent committed write for its identifier;
/// `put` either fully succeeds or leaves the prior record untouched.
/// `advance_status` is the per-identifier critical section — backends
/// serialize concurrent calls on the same id through a write lock, a file
/// mutex, or a conditional `UPDATE`.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetch a record by identifier.
    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// Upsert the full record.
    async fn put(&self, order: Order) -> Result<(), StoreError>;

    /// Insert the record only if its identifier is unclaimed.
    ///
    /// Returns `true` when the record was stored, `false` when the id was
    /// already taken. Backs collision-safe identifier allocation.
    async fn put_if_absent(&self, order: Order) -> Result<bool, StoreError>;

    /// Every well-formed stored record, in unspecified order.
    ///
    /// Malformed entries are skipped with a warning, never an error.
    async fn list_all(&self) -> Result<Vec<Order>, StoreError>;

    /// Atomically move a record's status to `to` if its current status is
    /// in `allowed_from`.
    async fn advance_status(
        &self,
        id: &OrderId,
        allowed_from: &[OrderStatus],
        to: OrderStatus,
    ) -> Result<StatusAdvance, StoreError>;
}
