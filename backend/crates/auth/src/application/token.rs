//! Session tokens
//!
//! The cookie carries `<session uuid>.<base64url(HMAC-SHA256)>`; the database
//! row is looked up only after the signature checks out.

use kernel::id::AuthSessionId;
use platform::crypto::{SECRET_LEN, sign_token, verify_token};
use uuid::Uuid;

/// Generate signed session token
pub fn issue_session_token(secret: &[u8; SECRET_LEN], session_id: AuthSessionId) -> String {
    sign_token(secret, &session_id.to_string())
}

/// Verify a session token and extract the session ID
pub fn parse_session_token(secret: &[u8; SECRET_LEN], token: &str) -> Option<AuthSessionId> {
    let payload = verify_token(secret, token)?;
    payload.parse::<Uuid>().ok().map(AuthSessionId::from_uuid)
}
