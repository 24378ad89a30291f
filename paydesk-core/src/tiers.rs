//! Tier catalog.
//!
//! Tiers are injected configuration: each key maps to the price charged
//! and the credits granted. Orders copy both values at creation, so later
//! catalog edits never touch orders that already exist.

use std::collections::BTreeMap;

use compact_str::CompactString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price and credit grant for one purchase tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSpec {
    pub price: Decimal,
    pub credits: u32,
}

/// The fixed set of purchasable tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierCatalog {
    tiers: BTreeMap<CompactString, TierSpec>,
}

impl TierCatalog {
    pub fn new(tiers: BTreeMap<CompactString, TierSpec>) -> Self {
        Self { tiers }
    }

    /// The stock three-tier catalog.
    pub fn standard() -> Self {
        let mut tiers = BTreeMap::new();
        tiers.insert(
            CompactString::from("tier1"),
            TierSpec {
                price: Decimal::from(10),
                credits: 100,
            },
        );
        tiers.insert(
            CompactString::from("tier2"),
            TierSpec {
                price: Decimal::from(20),
                credits: 300,
            },
        );
        tiers.insert(
            CompactString::from("tier3"),
            TierSpec {
                price: Decimal::from(30),
                credits: 500,
            },
        );
        Self { tiers }
    }

    /// Look up a tier by key.
    pub fn get(&self, key: &str) -> Option<TierSpec> {
        self.tiers.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tiers.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Iterate over `(key, spec)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CompactString, &TierSpec)> {
        self.tiers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = TierCatalog::standard();

        let tier2 = catalog.get("tier2").unwrap();
        assert_eq!(tier2.price, Decimal::from(20));
        assert_eq!(tier2.credits, 300);

        assert!(catalog.contains("tier1"));
        assert!(catalog.contains("tier3"));
        assert!(catalog.get("tier4").is_none());
        assert_eq!(catalog.iter().count(), 3);
    }

    #[test]
    fn test_custom_catalog() {
        let mut tiers = BTreeMap::new();
        tiers.insert(
            CompactString::from("starter"),
            TierSpec {
                price: Decimal::from(5),
                credits: 40,
            },
        );
        let catalog = TierCatalog::new(tiers);

        assert!(catalog.contains("starter"));
        assert!(!catalog.contains("tier1"));
    }
}
