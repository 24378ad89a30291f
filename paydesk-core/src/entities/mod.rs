pub mod order;

pub use order::{Order, OrderId};

use paydesk_sdk::objects::OrderStatus as SdkOrderStatus;
use serde::{Deserialize, Serialize};

/// Order status for storage and the state machine.
///
/// This is the persisted version. For API/DTO use, see
/// `paydesk_sdk::objects::OrderStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    UserConfirmed,
    Completed,
}

impl OrderStatus {
    /// Whether an operator still has something to do with this order.
    pub fn is_actionable(self) -> bool {
        matches!(self, Self::Pending | Self::UserConfirmed)
    }

    /// `completed` is terminal; no transition ever leaves it.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    ///
    /// The graph is `pending → user_confirmed → completed`, plus the
    /// operator shortcut `pending → completed` for orders the user never
    /// self-confirmed. Status never moves backward.
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::UserConfirmed)
                | (Self::Pending, Self::Completed)
                | (Self::UserConfirmed, Self::Completed)
        )
    }

    /// Stable textual form, identical to the serialized representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UserConfirmed => "user_confirmed",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for parsing a status string that is not part of the state
/// machine.
#[derive(Debug, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "user_confirmed" => Ok(Self::UserConfirmed),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

impl From<OrderStatus> for SdkOrderStatus {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Pending => SdkOrderStatus::Pending,
            OrderStatus::UserConfirmed => SdkOrderStatus::UserConfirmed,
            OrderStatus::Completed => SdkOrderStatus::Completed,
        }
    }
}

impl From<SdkOrderStatus> for OrderStatus {
    fn from(value: SdkOrderStatus) -> Self {
        match value {
            SdkOrderStatus::Pending => OrderStatus::Pending,
            SdkOrderStatus::UserConfirmed => OrderStatus::UserConfirmed,
            SdkOrderStatus::Completed => OrderStatus::Completed,
        }
    }
}
