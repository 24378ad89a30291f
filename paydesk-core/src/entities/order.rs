use compact_str::CompactString;
use paydesk_sdk::objects::admin::AdminOrderResponse;
use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// Opaque order identifier.
///
/// Generated once at creation and never reused; the textual form is what
/// travels on the wire and keys the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(CompactString);

impl OrderId {
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

/// One purchase attempt, tracked through its status.
///
/// `price` and `credits` are copied out of the tier catalog when the
/// order is created; later catalog edits never rewrite existing orders.
/// Records are kept forever — confirmation flips the status, nothing is
/// ever deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub tier: CompactString,
    pub price: rust_decimal::Decimal,
    pub credits: u32,
    pub status: OrderStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_token: Option<String>,
}

impl Order {
    /// Project into the admin-listing DTO.
    pub fn to_admin_response(&self) -> AdminOrderResponse {
        AdminOrderResponse {
            id: self.id.as_str().into(),
            tier: self.tier.clone(),
            price: self.price,
            credits: self.credits,
            status: self.status.into(),
            created_at: self.created_at,
            issued_token: self.issued_token.clone(),
        }
    }
}
