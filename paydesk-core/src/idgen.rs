//! Order identifier generation.
//!
//! Identifiers are short human-relayable codes, not UUIDs — the operator
//! reads them off a payment note. Both formats draw from a space large
//! enough that collisions stay negligible at this relay's volume, and the
//! caller retries through the store's insert-if-absent when one hits.

use compact_str::CompactString;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::OrderId;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Shape of freshly generated order identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdFormat {
    /// Six decimal digits, e.g. `493027`.
    #[default]
    Numeric6,
    /// Five lowercase base-36 symbols, e.g. `x7k2p`.
    Alphanumeric5,
}

impl IdFormat {
    /// Generate one candidate identifier.
    ///
    /// Candidates are uniform random draws; uniqueness is enforced by the
    /// caller's insert-if-absent retry loop, not here.
    pub fn generate(self) -> OrderId {
        let mut rng = rand::rng();
        let mut code = CompactString::default();
        match self {
            Self::Numeric6 => {
                for _ in 0..6 {
                    code.push(char::from(b'0' + rng.random_range(0..10u8)));
                }
            }
            Self::Alphanumeric5 => {
                for _ in 0..5 {
                    code.push(char::from(BASE36[rng.random_range(0..BASE36.len())]));
                }
            }
        }
        OrderId::new(code)
    }
}
