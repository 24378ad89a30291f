//! Error taxonomy for the order lifecycle.

use compact_str::CompactString;
use paydesk_sdk::voucher::VoucherError;

use crate::entities::OrderId;
use crate::store::StoreError;

/// Errors surfaced by lifecycle operations.
///
/// Every variant carries enough structure for a transport to pick a
/// status code via [`kind`](OrderError::kind); the human-readable message
/// is the `Display` form. The core performs no internal retries — retry
/// policy belongs to whoever hosts it.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// The requested tier is not in the catalog.
    #[error("unknown tier: {0}")]
    InvalidTier(CompactString),

    /// No order with this identifier exists.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The order was already completed. Confirming again is rejected so
    /// credits cannot be granted twice.
    #[error("order {0} is already completed")]
    AlreadyCompleted(OrderId),

    /// This relay only creates orders from signed vouchers.
    #[error("a signed tier voucher is required")]
    VoucherRequired,

    /// This relay does not issue or accept vouchers.
    #[error("tier vouchers are not enabled")]
    VouchersDisabled,

    /// The voucher failed verification; the client needs a fresh one.
    #[error("voucher rejected: {0}")]
    Voucher(#[from] VoucherError),

    /// No unused identifier was found within the retry budget.
    #[error("could not allocate an unused order id")]
    IdSpaceExhausted,

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Coarse classification used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client-correctable input problem.
    InvalidInput,
    /// Unknown identifier.
    NotFound,
    /// Business-rule rejection of a repeated confirmation.
    AlreadyCompleted,
    /// Failed credential: bad voucher signature or expiry.
    Unauthorized,
    /// Infrastructure failure, possibly transient.
    Storage,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTier(_) | Self::VoucherRequired | Self::VouchersDisabled => {
                ErrorKind::InvalidInput
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyCompleted(_) => ErrorKind::AlreadyCompleted,
            Self::Voucher(_) => ErrorKind::Unauthorized,
            Self::IdSpaceExhausted | Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
