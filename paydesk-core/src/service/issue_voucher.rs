use compact_str::CompactString;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use tracing::debug;

use paydesk_sdk::voucher::{self, VoucherError};

use super::{CreationPolicy, OrderService};
use crate::error::OrderError;
use crate::store::OrderStore;

/// Issue a signed tier voucher without touching the store.
#[derive(Debug, Clone)]
pub struct IssueVoucher {
    pub tier: CompactString,
}

/// A signed voucher together with its priced quote.
#[derive(Debug, Clone)]
pub struct IssuedVoucher {
    pub token: String,
    pub tier: CompactString,
    pub price: Decimal,
    /// Unix timestamp after which the token stops being redeemable.
    pub expires_at: i64,
}

impl<S: OrderStore> Processor<IssueVoucher> for OrderService<S> {
    type Output = IssuedVoucher;
    type Error = OrderError;

    /// Prices the tier and signs the claim. The store is not involved;
    /// the quote costs nothing until the client commits via redemption.
    async fn process(&self, msg: IssueVoucher) -> Result<IssuedVoucher, OrderError> {
        let CreationPolicy::VoucherOnly { key } = &self.policy else {
            return Err(OrderError::VouchersDisabled);
        };
        let spec = self
            .catalog
            .get(&msg.tier)
            .ok_or_else(|| OrderError::InvalidTier(msg.tier.clone()))?;

        let (token, claims) = voucher::issue(msg.tier.clone(), key)
            .map_err(|e| OrderError::Voucher(VoucherError::Json(e)))?;
        debug!(tier = %msg.tier, "voucher issued");

        Ok(IssuedVoucher {
            token,
            tier: msg.tier,
            price: spec.price,
            expires_at: claims.expires_at(),
        })
    }
}
