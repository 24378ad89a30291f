//! Signed tier vouchers.
//!
//! A voucher binds a tier choice before any order record exists, so the
//! client can hold a priced quote without costing the relay a storage
//! write. The wire format is:
//!
//! ```text
//! {base64_claims_json}.{base64_signature}
//! ```
//!
//! where the signature is `HMAC-SHA256(claims_json, key)`. Claims carry
//! the tier key, a random nonce, and the issue timestamp; a voucher stops
//! being redeemable [`VOUCHER_TTL`] seconds after issue.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed age of a voucher (in seconds).
pub const VOUCHER_TTL: i64 = 60 * 60;

/// Errors produced by voucher operations.
#[derive(Debug, thiserror::Error)]
pub enum VoucherError {
    #[error("invalid voucher format")]
    InvalidFormat,
    #[error("invalid base64 encoding")]
    InvalidBase64,
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid signature")]
    SignatureMismatch,
    #[error("voucher expired")]
    Expired,
}

impl From<ring::error::Unspecified> for VoucherError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::SignatureMismatch
    }
}

/// Key used to sign and verify vouchers.
#[derive(Clone)]
pub struct VoucherKey(Box<[u8]>);

impl VoucherKey {
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self(key.as_ref().to_owned().into_boxed_slice())
    }

    fn hmac_key(&self) -> ring::hmac::Key {
        ring::hmac::Key::new(ring::hmac::HMAC_SHA256, &self.0)
    }
}

impl std::fmt::Debug for VoucherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VoucherKey(..)")
    }
}

/// The signed payload of a voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherClaims {
    pub tier: CompactString,
    pub nonce: Uuid,
    pub issued_at: i64,
}

impl VoucherClaims {
    /// Unix timestamp after which these claims are no longer redeemable.
    pub fn expires_at(&self) -> i64 {
        self.issued_at + VOUCHER_TTL
    }
}

/// Issue a fresh voucher for `tier`, signed with `key`.
///
/// Returns the wire token together with the claims it encodes.
pub fn issue(
    tier: impl Into<CompactString>,
    key: &VoucherKey,
) -> Result<(String, VoucherClaims), serde_json::Error> {
    let claims = VoucherClaims {
        tier: tier.into(),
        nonce: Uuid::new_v4(),
        issued_at: time::OffsetDateTime::now_utc().unix_timestamp(),
    };
    let token = sign_claims(&claims, key)?;
    Ok((token, claims))
}

/// Serialize and sign claims into the `{payload}.{signature}` wire form.
pub fn sign_claims(claims: &VoucherClaims, key: &VoucherKey) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(claims)?;
    let signature = ring::hmac::sign(&key.hmac_key(), json.as_bytes());
    Ok(format!(
        "{}.{}",
        fast32::base64::RFC4648_NOPAD.encode(json.as_bytes()),
        fast32::base64::RFC4648_NOPAD.encode(signature.as_ref()),
    ))
}

/// Verify a voucher's signature and expiry, returning its claims.
///
/// The HMAC is checked before the payload is parsed, so unsigned input
/// never reaches the JSON deserializer.
pub fn verify(token: &str, key: &VoucherKey) -> Result<VoucherClaims, VoucherError> {
    let dot_pos = token.find('.').ok_or(VoucherError::InvalidFormat)?;
    let payload = fast32::base64::RFC4648_NOPAD
        .decode_str(&token[..dot_pos])
        .map_err(|_| VoucherError::InvalidBase64)?;
    let signature = fast32::base64::RFC4648_NOPAD
        .decode_str(&token[dot_pos + 1..])
        .map_err(|_| VoucherError::InvalidBase64)?;
    ring::hmac::verify(&key.hmac_key(), &payload, &signature)?;
    let claims: VoucherClaims = serde_json::from_slice(&payload)?;
    let now = time::OffsetDateTime::now_utc().unix_timestamp();
    if now > claims.expires_at() {
        return Err(VoucherError::Expired);
    }
    Ok(claims)
}
