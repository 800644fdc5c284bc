//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the `auth` context and the API binary:
//! - Signed session tokens (HMAC-SHA256, Base64url)
//! - Operator password verification (Argon2id PHC strings)
//! - Session cookie building and parsing
//! - Client fingerprinting (User-Agent hash, forwarded IP)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
