//! Injected relay configuration.
//!
//! Everything the lifecycle needs arrives through this structure — tier
//! catalog, operator secret, voucher key, identifier format, and store
//! backend. Nothing is read from ambient global state, so tests can run
//! with alternate catalogs and secrets.

use std::path::{Path, PathBuf};

use paydesk_sdk::config::AdminSecret;
use paydesk_sdk::voucher::VoucherKey;
use serde::{Deserialize, Serialize};

use crate::idgen::IdFormat;
use crate::service::CreationPolicy;
use crate::tiers::TierCatalog;

/// Root configuration as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Purchase tiers on offer. Omitting the section keeps the standard
    /// three-tier catalog.
    #[serde(default = "TierCatalog::standard")]
    pub tiers: TierCatalog,
    pub admin: AdminSection,
    /// Present only when the relay runs on signed vouchers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vouchers: Option<VoucherSection>,
    #[serde(default)]
    pub id_format: IdFormat,
    #[serde(default)]
    pub store: StoreSection,
}

/// Operator authentication section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSection {
    /// The shared operator secret; plaintext, or an argon2 hash
    /// (detected by the `$argon2` prefix).
    pub secret: AdminSecret,
}

/// Voucher signing section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherSection {
    /// HMAC key material for signing vouchers.
    pub key: String,
}

/// Store backend selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreSection {
    /// In-process map; state dies with the process.
    #[default]
    Memory,
    /// Single JSON file rewritten on every mutation.
    File { path: PathBuf },
    /// Postgres table reached through `sqlx`.
    Postgres { url: String },
}

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl RelayConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Load and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&raw)?)
    }

    /// The creation policy this configuration implies: voucher-only when
    /// a signing key is configured, direct tier selection otherwise.
    pub fn creation_policy(&self) -> CreationPolicy {
        match &self.vouchers {
            Some(section) => CreationPolicy::VoucherOnly {
                key: VoucherKey::new(section.key.as_bytes()),
            },
            None => CreationPolicy::Direct,
        }
    }
}
