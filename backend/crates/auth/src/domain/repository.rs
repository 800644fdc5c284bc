//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::auth_session::AuthSession;
use crate::error::AuthResult;
use chrono::{DateTime, Utc};
use kernel::id::AuthSessionId;

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find a session by ID and verify fingerprint
    ///
    /// Expired rows are returned as stored; callers decide what expiry means.
    ///
    /// Returns `AuthError::SessionFingerprintMismatch` when the session
    /// exists but was created by another client.
    async fn find_by_id(
        &self,
        session_id: AuthSessionId,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>>;

    /// Record activity on a session
    async fn touch(&self, session_id: AuthSessionId, at: DateTime<Utc>) -> AuthResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: AuthSessionId) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
