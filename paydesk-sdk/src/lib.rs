//! Shared types for paydesk, a manual payment-confirmation relay.
//!
//! This crate carries everything both sides of the wire need to agree on:
//! the request/response objects of the transport contract, the signed tier
//! voucher format, and the operator-secret verification predicate. The
//! optional `client` feature adds typed HTTP clients on top of the same
//! objects.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod objects;
pub mod voucher;
