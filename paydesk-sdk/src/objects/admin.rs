//! Admin API request and response types.
//!
//! These endpoints are called by the operator dashboard and carry the
//! shared admin secret; the transport verifies it before any core call.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// Full order record as shown in the operator's actionable listing.
///
/// Field names match the persisted representation, so the listing is a
/// faithful view of the stored records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderResponse {
    pub id: CompactString,
    pub tier: CompactString,
    pub price: rust_decimal::Decimal,
    pub credits: u32,
    pub status: OrderStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_token: Option<String>,
}

/// Query parameters for the actionable-order listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActionableQuery {
    pub admin_secret: String,
}

/// Request body for the operator's order confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmOrderRequest {
    pub id: CompactString,
    pub admin_secret: String,
}

/// Response body for a successful operator confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmOrderResponse {
    pub success: bool,
    pub message: String,
}
