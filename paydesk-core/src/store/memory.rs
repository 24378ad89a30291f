//! In-process order store.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{OrderStore, StatusAdvance, StoreError};
use crate::entities::{Order, OrderId, OrderStatus};

/// `HashMap`-backed store.
///
/// The default for tests and single-process deployments. Cloning yields
/// another handle onto the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
    inner: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn put(&self, order: Order) -> Result<(), StoreError> {
        self.inner.write().await.insert(order.id.clone(), order);
        Ok(())
    }

    async fn put_if_absent(&self, order: Order) -> Result<bool, StoreError> {
        let mut map = self.inner.write().await;
        match map.entry(order.id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(order);
                Ok(true)
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.inner.read().await.values().cloned().collect())
    }

    async fn advance_status(
        &self,
        id: &OrderId,
        allowed_from: &[OrderStatus],
        to: OrderStatus,
    ) -> Result<StatusAdvance, StoreError> {
        // The write lock is the whole critical section.
        let mut map = self.inner.write().await;
        let Some(order) = map.get_mut(id) else {
            return Ok(StatusAdvance::Missing);
        };
        if !allowed_from.contains(&order.status) {
            return Ok(StatusAdvance::Rejected {
                current: order.status,
            });
        }
        let previous = order.status;
        order.status = to;
        Ok(StatusAdvance::Applied { previous })
    }
}
