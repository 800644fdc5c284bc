//! Cryptographic Utilities
//!
//! Session tokens have the shape `<payload>.<base64url(HMAC-SHA256(payload))>`.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of session signing secrets
pub const SECRET_LEN: usize = 32;

/// Generate a random signing secret
pub fn random_secret() -> [u8; SECRET_LEN] {
    let mut secret = [0u8; SECRET_LEN];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

fn mac_for(secret: &[u8; SECRET_LEN], payload: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac
}

/// Sign `payload`, producing `payload.signature`
pub fn sign_token(secret: &[u8; SECRET_LEN], payload: &str) -> String {
    let signature = mac_for(secret, payload).finalize().into_bytes();
    format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a token produced by [`sign_token`] and return its payload
///
/// Comparison is constant-time (delegated to `hmac`).
pub fn verify_token<'a>(secret: &[u8; SECRET_LEN], token: &'a str) -> Option<&'a str> {
    let (payload, signature_b64) = token.rsplit_once('.')?;
    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    mac_for(secret, payload).verify_slice(&signature).ok()?;
    Some(payload)
}
