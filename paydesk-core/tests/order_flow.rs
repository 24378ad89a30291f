//! End-to-end lifecycle scenarios against real store backends.

use std::sync::Arc;

use kanau::processor::Processor;
use rust_decimal::Decimal;

use paydesk_core::entities::OrderStatus;
use paydesk_core::error::{ErrorKind, OrderError};
use paydesk_core::service::{
    ConfirmOrder, CreateOrder, CreationPolicy, GetOrderStatus, IssueVoucher, ListActionableOrders,
    OrderService, TierClaim, UserConfirmPayment,
};
use paydesk_core::store::{JsonFileStore, MemoryOrderStore, OrderStore};
use paydesk_core::tiers::TierCatalog;
use paydesk_sdk::voucher::VoucherKey;

fn direct_service() -> OrderService<MemoryOrderStore> {
    OrderService::new(
        MemoryOrderStore::new(),
        TierCatalog::standard(),
        CreationPolicy::Direct,
    )
}

#[tokio::test]
async fn tier2_purchase_runs_through_the_whole_lifecycle() {
    let service = direct_service();

    let created = service
        .process(CreateOrder {
            claim: TierClaim::Tier("tier2".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.price, Decimal::from(20));

    let view = service
        .process(GetOrderStatus {
            id: created.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(view.status, OrderStatus::Pending);
    assert_eq!(view.credits, 300);

    let confirmation = service
        .process(ConfirmOrder {
            id: created.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(confirmation.id, created.id);

    let view = service
        .process(GetOrderStatus {
            id: created.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(view.status, OrderStatus::Completed);
    assert_eq!(view.credits, 300);

    // Completed orders leave the operator's queue for good.
    let listed = service.process(ListActionableOrders).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn self_confirmed_orders_stay_actionable_until_the_operator_signs_off() {
    let service = direct_service();

    let created = service
        .process(CreateOrder {
            claim: TierClaim::Tier("tier1".into()),
        })
        .await
        .unwrap();
    service
        .process(UserConfirmPayment {
            id: created.id.clone(),
        })
        .await
        .unwrap();

    let listed = service.process(ListActionableOrders).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, OrderStatus::UserConfirmed);

    service
        .process(ConfirmOrder {
            id: created.id.clone(),
        })
        .await
        .unwrap();
    assert!(service.process(ListActionableOrders).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_confirmations_resolve_to_exactly_one_winner() {
    let service = Arc::new(direct_service());
    let created = service
        .process(CreateOrder {
            claim: TierClaim::Tier("tier3".into()),
        })
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..2 {
        let service = Arc::clone(&service);
        let id = created.id.clone();
        handles.push(tokio::spawn(async move {
            service.process(ConfirmOrder { id }).await
        }));
    }

    let mut successes = 0;
    let mut already_completed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(OrderError::AlreadyCompleted(_)) => already_completed += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(already_completed, 1);

    // Whatever the interleaving, the record ends consistent.
    let view = service
        .process(GetOrderStatus {
            id: created.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(view.status, OrderStatus::Completed);
    assert_eq!(view.credits, 500);
}

#[tokio::test]
async fn file_backed_orders_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");

    let service = OrderService::new(
        JsonFileStore::new(&path),
        TierCatalog::standard(),
        CreationPolicy::Direct,
    );
    let created = service
        .process(CreateOrder {
            claim: TierClaim::Tier("tier2".into()),
        })
        .await
        .unwrap();
    drop(service);

    // A fresh service over the same file sees the committed order.
    let service = OrderService::new(
        JsonFileStore::new(&path),
        TierCatalog::standard(),
        CreationPolicy::Direct,
    );
    let view = service
        .process(GetOrderStatus {
            id: created.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(view.status, OrderStatus::Pending);

    service
        .process(ConfirmOrder {
            id: created.id.clone(),
        })
        .await
        .unwrap();
    let err = service
        .process(ConfirmOrder {
            id: created.id.clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::AlreadyCompleted(_)));
}

#[tokio::test]
async fn voucher_relay_quotes_then_redeems() {
    let service = OrderService::new(
        MemoryOrderStore::new(),
        TierCatalog::standard(),
        CreationPolicy::VoucherOnly {
            key: VoucherKey::new(b"order-flow-test-key"),
        },
    );

    let quote = service
        .process(IssueVoucher {
            tier: "tier2".into(),
        })
        .await
        .unwrap();
    assert_eq!(quote.price, Decimal::from(20));

    // A bare tier key is not accepted on a voucher relay.
    let err = service
        .process(CreateOrder {
            claim: TierClaim::Tier("tier2".into()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    // Neither is a token signed with some other key.
    let (forged, _) =
        paydesk_sdk::voucher::issue("tier2", &VoucherKey::new(b"attacker-key")).unwrap();
    let err = service
        .process(CreateOrder {
            claim: TierClaim::Voucher(forged),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    // The genuine quote redeems into a pending order bound to its tier.
    let created = service
        .process(CreateOrder {
            claim: TierClaim::Voucher(quote.token.clone()),
        })
        .await
        .unwrap();
    let stored = service.store().get(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.tier, "tier2");
    assert_eq!(stored.status, OrderStatus::Pending);
    assert_eq!(stored.issued_token.as_deref(), Some(quote.token.as_str()));
}
