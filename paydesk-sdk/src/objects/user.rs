//! User API request and response types.
//!
//! These types are used by the purchase plugin to interact with the relay
//! on behalf of the paying user.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// Request body for creating a new order.
///
/// Exactly one of `tier` or `voucher` is set, depending on whether the
/// relay runs with direct tier selection or signed vouchers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<CompactString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher: Option<String>,
}

impl CreateOrderRequest {
    /// Build a direct-tier creation request.
    pub fn with_tier(tier: impl Into<CompactString>) -> Self {
        Self {
            tier: Some(tier.into()),
            voucher: None,
        }
    }

    /// Build a voucher-redemption creation request.
    pub fn with_voucher(voucher: impl Into<String>) -> Self {
        Self {
            tier: None,
            voucher: Some(voucher.into()),
        }
    }
}

/// Response returned after an order is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub id: CompactString,
    pub price: rust_decimal::Decimal,
}

/// Query parameters for polling order status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusQuery {
    pub id: CompactString,
}

/// Response returned by the status-polling endpoint.
///
/// `credits` never changes after creation, so it is safe to return at any
/// stage; it only becomes meaningful once the order completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusResponse {
    pub status: OrderStatus,
    pub credits: u32,
}

/// Request body for the user's own payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub id: CompactString,
}

/// Minimal acknowledgment body (`{"success": true}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Request body for obtaining a priced tier quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub tier: CompactString,
}

/// Response returned when a tier voucher is issued.
///
/// Carries the priced quote so the client can show the amount before any
/// order record exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherResponse {
    pub voucher: String,
    pub tier: CompactString,
    pub price: rust_decimal::Decimal,
    /// Unix timestamp after which the voucher is no longer redeemable.
    pub expires_at: i64,
}
