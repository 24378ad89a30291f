//! Single-file JSON order store.
//!
//! The whole collection lives in one JSON object keyed by order id. Every
//! mutation reads the file fully, applies the change in memory, and
//! rewrites through a rename, so a write either lands completely or
//! leaves the previous contents in place. A mutex serializes mutations;
//! reads go against the last fully renamed file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use super::{OrderStore, StatusAdvance, StoreError};
use crate::entities::{Order, OrderId, OrderStatus};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`. A missing file reads as an empty
    /// collection until the first write creates it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the full collection. Entries stay raw JSON values so one
    /// malformed record cannot poison the rest.
    async fn load(&self) -> Result<BTreeMap<String, serde_json::Value>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupted(e.to_string()))
    }

    /// Rewrite the full collection, renaming into place so readers only
    /// ever see a complete file.
    async fn save(&self, records: &BTreeMap<String, serde_json::Value>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::Corrupted(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn decode(id: &str, value: &serde_json::Value) -> Result<Order, StoreError> {
        serde_json::from_value(value.clone())
            .map_err(|e| StoreError::Corrupted(format!("order {id}: {e}")))
    }

    fn encode(order: &Order) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(order).map_err(|e| StoreError::Corrupted(e.to_string()))
    }
}

#[async_trait]
impl OrderStore for JsonFileStore {
    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let records = self.load().await?;
        match records.get(id.as_str()) {
            Some(value) => Ok(Some(Self::decode(id.as_str(), value)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, order: Order) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        records.insert(order.id.as_str().to_owned(), Self::encode(&order)?);
        self.save(&records).await
    }

    async fn put_if_absent(&self, order: Order) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        if records.contains_key(order.id.as_str()) {
            return Ok(false);
        }
        records.insert(order.id.as_str().to_owned(), Self::encode(&order)?);
        self.save(&records).await?;
        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let records = self.load().await?;
        let mut orders = Vec::with_capacity(records.len());
        for (id, value) in &records {
            match Self::decode(id, value) {
                Ok(order) => orders.push(order),
                Err(e) => warn!(order_id = %id, error = %e, "skipping undecodable order record"),
            }
        }
        Ok(orders)
    }

    async fn advance_status(
        &self,
        id: &OrderId,
        allowed_from: &[OrderStatus],
        to: OrderStatus,
    ) -> Result<StatusAdvance, StoreError> {
        // Mutex held across read-modify-rewrite; this is the critical
        // section for racing confirmations on one id.
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let Some(value) = records.get(id.as_str()) else {
            return Ok(StatusAdvance::Missing);
        };
        let mut order = Self::decode(id.as_str(), value)?;
        if !allowed_from.contains(&order.status) {
            return Ok(StatusAdvance::Rejected {
                current: order.status,
            });
        }
        let previous = order.status;
        order.status = to;
        records.insert(id.as_str().to_owned(), Self::encode(&order)?);
        self.save(&records).await?;
        Ok(StatusAdvance::Applied { previous })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: OrderId::from(id),
            tier: "tier1".into(),
            price: rust_decimal::Decimal::from(10),
            credits: 100,
            status,
            created_at: time::OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            issued_token: None,
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("orders.json"));

        assert!(store.get(&OrderId::from("123456")).await.unwrap().is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");

        let store = JsonFileStore::new(&path);
        store.put(order("123456", OrderStatus::Pending)).await.unwrap();
        drop(store);

        let reopened = JsonFileStore::new(&path);
        let fetched = reopened
            .get(&OrderId::from("123456"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status, OrderStatus::Pending);
        assert_eq!(fetched.credits, 100);
    }

    #[tokio::test]
    async fn test_put_if_absent_and_advance() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("orders.json"));

        assert!(store
            .put_if_absent(order("123456", OrderStatus::Pending))
            .await
            .unwrap());
        assert!(!store
            .put_if_absent(order("123456", OrderStatus::Pending))
            .await
            .unwrap());

        let outcome = store
            .advance_status(
                &OrderId::from("123456"),
                &[OrderStatus::Pending, OrderStatus::UserConfirmed],
                OrderStatus::Completed,
            )
            .await
            .unwrap();
        assert_eq!(
            outcome,
            StatusAdvance::Applied {
                previous: OrderStatus::Pending
            }
        );

        let outcome = store
            .advance_status(
                &OrderId::from("123456"),
                &[OrderStatus::Pending, OrderStatus::UserConfirmed],
                OrderStatus::Completed,
            )
            .await
            .unwrap();
        assert_eq!(
            outcome,
            StatusAdvance::Rejected {
                current: OrderStatus::Completed
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_entries_are_skipped_in_listing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");

        let store = JsonFileStore::new(&path);
        store.put(order("123456", OrderStatus::Pending)).await.unwrap();

        // Corrupt the collection with a non-object entry, the way a stray
        // writer could.
        let mut records: BTreeMap<String, serde_json::Value> =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        records.insert("broken".to_owned(), serde_json::Value::from("not an order"));
        std::fs::write(&path, serde_json::to_vec_pretty(&records).unwrap()).unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_str(), "123456");
    }
}
