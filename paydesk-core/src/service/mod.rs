//! Order lifecycle operations.
//!
//! Each operation is a message struct processed by [`OrderService`]
//! through `kanau`'s `Processor` trait: validate the input, run exactly
//! one store call for any mutation, and report a typed result. The
//! service is pure logic — everything it needs (catalog, creation
//! policy, id format) is injected at construction.

mod confirm_order;
mod create_order;
mod get_status;
mod issue_voucher;
mod list_actionable;
mod user_confirm;

pub use confirm_order::{ConfirmOrder, Confirmation};
pub use create_order::{CreateOrder, CreatedOrder, TierClaim};
pub use get_status::{GetOrderStatus, OrderStatusView};
pub use issue_voucher::{IssueVoucher, IssuedVoucher};
pub use list_actionable::ListActionableOrders;
pub use user_confirm::UserConfirmPayment;

use paydesk_sdk::voucher::VoucherKey;

use crate::idgen::IdFormat;
use crate::store::OrderStore;
use crate::tiers::TierCatalog;

/// How new orders obtain their tier.
#[derive(Debug, Clone)]
pub enum CreationPolicy {
    /// The client names a catalog tier directly.
    Direct,
    /// The client must redeem a voucher issued by [`IssueVoucher`].
    VoucherOnly { key: VoucherKey },
}

/// The order lifecycle service.
///
/// Generic over the store so the same logic runs against the in-memory
/// map in tests and a real keyed store in production.
pub struct OrderService<S> {
    store: S,
    catalog: TierCatalog,
    policy: CreationPolicy,
    id_format: IdFormat,
}

impl<S: OrderStore> OrderService<S> {
    pub fn new(store: S, catalog: TierCatalog, policy: CreationPolicy) -> Self {
        Self {
            store,
            catalog,
            policy,
            id_format: IdFormat::default(),
        }
    }

    /// Override the identifier format (the default is six digits).
    pub fn with_id_format(mut self, id_format: IdFormat) -> Self {
        self.id_format = id_format;
        self
    }

    /// The underlying store handle.
    pub fn store(&self) -> &S {
        &self.store
    }
}
