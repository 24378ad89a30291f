use kanau::processor::Processor;
use tracing::debug;

use super::OrderService;
use crate::entities::Order;
use crate::error::OrderError;
use crate::store::OrderStore;

/// List every order awaiting operator action, most recent first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListActionableOrders;

impl<S: OrderStore> Processor<ListActionableOrders> for OrderService<S> {
    type Output = Vec<Order>;
    type Error = OrderError;

    async fn process(&self, _msg: ListActionableOrders) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .store
            .list_all()
            .await?
            .into_iter()
            .filter(|order| order.status.is_actionable())
            .collect();
        // Stable sort: equal timestamps keep their enumeration order
        // within this snapshot.
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(count = orders.len(), "actionable orders listed");
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{OrderId, OrderStatus};
    use crate::service::{ConfirmOrder, CreateOrder, CreationPolicy, TierClaim};
    use crate::store::MemoryOrderStore;
    use crate::tiers::TierCatalog;

    fn service() -> OrderService<MemoryOrderStore> {
        OrderService::new(
            MemoryOrderStore::new(),
            TierCatalog::standard(),
            CreationPolicy::Direct,
        )
    }

    fn order_at(id: &str, status: OrderStatus, unix: i64) -> Order {
        Order {
            id: OrderId::from(id),
            tier: "tier1".into(),
            price: rust_decimal::Decimal::from(10),
            credits: 100,
            status,
            created_at: time::OffsetDateTime::from_unix_timestamp(unix).unwrap(),
            issued_token: None,
        }
    }

    #[tokio::test]
    async fn test_listing_is_most_recent_first() {
        let service = service();
        let base = 1_700_000_000;
        for (id, offset) in [("000001", 10), ("000002", 30), ("000003", 20)] {
            service
                .store()
                .put(order_at(id, OrderStatus::Pending, base + offset))
                .await
                .unwrap();
        }

        let listed = service.process(ListActionableOrders).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["000002", "000003", "000001"]);
    }

    #[tokio::test]
    async fn test_completed_orders_never_appear() {
        let service = service();
        let created = service
            .process(CreateOrder {
                claim: TierClaim::Tier("tier1".into()),
            })
            .await
            .unwrap();
        service
            .store()
            .put(order_at("000009", OrderStatus::UserConfirmed, 1_700_000_000))
            .await
            .unwrap();

        assert_eq!(service.process(ListActionableOrders).await.unwrap().len(), 2);

        service
            .process(ConfirmOrder {
                id: created.id.clone(),
            })
            .await
            .unwrap();

        let listed = service.process(ListActionableOrders).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|o| o.id != created.id));
    }
}
