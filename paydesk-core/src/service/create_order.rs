use compact_str::CompactString;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use tracing::info;

use paydesk_sdk::voucher;

use super::{CreationPolicy, OrderService};
use crate::entities::{Order, OrderId, OrderStatus};
use crate::error::OrderError;
use crate::store::OrderStore;

/// How many fresh identifiers to try before giving up on allocation.
const MAX_ID_ATTEMPTS: u32 = 16;

/// Create a new order from a tier claim.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub claim: TierClaim,
}

/// The client's claim to a tier: direct selection or a signed voucher.
#[derive(Debug, Clone)]
pub enum TierClaim {
    Tier(CompactString),
    Voucher(String),
}

/// Result of a successful order creation.
#[derive(Debug, Clone)]
pub struct CreatedOrder {
    pub id: OrderId,
    pub price: Decimal,
}

impl<S: OrderStore> Processor<CreateOrder> for OrderService<S> {
    type Output = CreatedOrder;
    type Error = OrderError;

    /// Resolves the claim, prices it against the catalog, and persists a
    /// fresh `pending` record. Nothing is written on any failure path.
    async fn process(&self, msg: CreateOrder) -> Result<CreatedOrder, OrderError> {
        let (tier, issued_token) = self.resolve_claim(msg.claim)?;
        let spec = self
            .catalog
            .get(&tier)
            .ok_or_else(|| OrderError::InvalidTier(tier.clone()))?;

        let created_at = time::OffsetDateTime::now_utc();
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.id_format.generate();
            let order = Order {
                id: id.clone(),
                tier: tier.clone(),
                price: spec.price,
                credits: spec.credits,
                status: OrderStatus::Pending,
                created_at,
                issued_token: issued_token.clone(),
            };
            // Insert-if-absent makes the id claim atomic; a collision
            // just burns one attempt.
            if self.store.put_if_absent(order).await? {
                info!(order_id = %id, tier = %tier, "order created");
                return Ok(CreatedOrder {
                    id,
                    price: spec.price,
                });
            }
        }
        Err(OrderError::IdSpaceExhausted)
    }
}

impl<S: OrderStore> OrderService<S> {
    /// Resolve a claim to a catalog key according to the creation policy.
    ///
    /// Under the voucher policy this is where signature and expiry are
    /// checked; the token itself is kept for the order record.
    fn resolve_claim(
        &self,
        claim: TierClaim,
    ) -> Result<(CompactString, Option<String>), OrderError> {
        match (&self.policy, claim) {
            (CreationPolicy::Direct, TierClaim::Tier(tier)) => Ok((tier, None)),
            (CreationPolicy::Direct, TierClaim::Voucher(_)) => Err(OrderError::VouchersDisabled),
            (CreationPolicy::VoucherOnly { .. }, TierClaim::Tier(_)) => {
                Err(OrderError::VoucherRequired)
            }
            (CreationPolicy::VoucherOnly { key }, TierClaim::Voucher(token)) => {
                let claims = voucher::verify(&token, key)?;
                Ok((claims.tier, Some(token)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryOrderStore;
    use crate::tiers::TierCatalog;

    fn service() -> OrderService<MemoryOrderStore> {
        OrderService::new(
            MemoryOrderStore::new(),
            TierCatalog::standard(),
            CreationPolicy::Direct,
        )
    }

    #[tokio::test]
    async fn test_create_returns_pending_order_with_catalog_price() {
        let service = service();
        let created = service
            .process(CreateOrder {
                claim: TierClaim::Tier("tier2".into()),
            })
            .await
            .unwrap();

        assert_eq!(created.price, Decimal::from(20));

        let stored = service.store().get(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
        assert_eq!(stored.credits, 300);
        assert_eq!(stored.tier, "tier2");
        assert!(stored.issued_token.is_none());
    }

    #[tokio::test]
    async fn test_unknown_tier_writes_nothing() {
        let service = service();
        let err = service
            .process(CreateOrder {
                claim: TierClaim::Tier("tier9".into()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidTier(_)));
        assert!(service.store().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_created_ids_are_unique() {
        let service = service();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..32 {
            let created = service
                .process(CreateOrder {
                    claim: TierClaim::Tier("tier1".into()),
                })
                .await
                .unwrap();
            assert!(seen.insert(created.id.clone()));
        }
    }

    #[tokio::test]
    async fn test_voucher_under_direct_policy_is_rejected() {
        let service = service();
        let err = service
            .process(CreateOrder {
                claim: TierClaim::Voucher("whatever".to_owned()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::VouchersDisabled));
    }
}
