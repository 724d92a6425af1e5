//! Cryptographic utilities for webhook signature verification.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

use crate::error::{RelayError, Result};

type HmacSha1 = Hmac<Sha1>;

/// Maximum webhook payload size (10MB).
pub const MAX_DELIVERY_SIZE: usize = 10 * 1024 * 1024;

/// Prefix carried by every `X-Hub-Signature` value.
pub const SIGNATURE_PREFIX: &str = "sha1=";

/// Length of a well-formed signature: the prefix plus 40 hex characters.
pub const SIGNATURE_LENGTH: usize = SIGNATURE_PREFIX.len() + 2 * SHA1_DIGEST_LEN;

const SHA1_DIGEST_LEN: usize = 20;

/// Computes the raw HMAC-SHA1 of data with the given key.
fn hmac_sha1(key: &[u8], data: &[u8]) -> [u8; SHA1_DIGEST_LEN] {
    let mut mac = <HmacSha1 as Mac>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);

    let mut digest = [0u8; SHA1_DIGEST_LEN];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

/// Computes HMAC-SHA1 of data with the given key and returns as hex string.
pub fn hmac_sha1_hex(key: &[u8], data: &[u8]) -> String {
    hex::encode(hmac_sha1(key, data))
}

/// Produces the `sha1=<hex>` signature a sender attaches to `body`.
pub fn sign_body(key: &[u8], body: &[u8]) -> String {
    format!("{}{}", SIGNATURE_PREFIX, hmac_sha1_hex(key, body))
}

/// Checks a `sha1=<hex>` signature against the body.
///
/// Format problems (length, prefix, non-hex digest) are reported as
/// [`RelayError::InvalidSignatureFormat`] before any HMAC is computed; a
/// well-formed signature that does not match is
/// [`RelayError::AuthenticationFailure`].
pub fn check_hub_signature(secret: &[u8], signature: &str, body: &[u8]) -> Result<()> {
    if signature.len() != SIGNATURE_LENGTH || !signature.starts_with(SIGNATURE_PREFIX) {
        return Err(RelayError::InvalidSignatureFormat);
    }

    let mut provided = [0u8; SHA1_DIGEST_LEN];
    hex::decode_to_slice(&signature[SIGNATURE_PREFIX.len()..], &mut provided)
        .map_err(|_| RelayError::InvalidSignatureFormat)?;

    let computed = hmac_sha1(secret, body);

    if constant_time_eq(&provided, &computed) {
        Ok(())
    } else {
        Err(RelayError::AuthenticationFailure)
    }
}

/// Verifies a `sha1=<hex>` webhook signature using constant-time comparison.
pub fn verify_hub_signature(secret: &[u8], signature: &str, body: &[u8]) -> bool {
    check_hub_signature(secret, signature, body).is_ok()
}

/// Constant-time equality comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
