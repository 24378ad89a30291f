//! Request and response types for the paydesk transport contract.
//!
//! The transport layer (whatever HTTP surface hosts the relay) deserializes
//! requests into these types and serializes core results back out of them;
//! the `client` feature reuses them from the calling side.

pub mod admin;
pub mod user;

use serde::{Deserialize, Serialize};

/// Order status as it appears on the wire.
///
/// This is the serde version. For the core state machine, see the status
/// type in `paydesk-core`, which converts to and from this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    UserConfirmed,
    Completed,
}
