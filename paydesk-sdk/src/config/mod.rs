//! Shared configuration value types.
//!
//! These are the validated types consumed by the relay core and whatever
//! transport hosts it; file loading and parsing happen at the host's edge.

mod admin;

pub use admin::AdminSecret;
