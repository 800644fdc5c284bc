//! Sign In Use Case
//!
//! Authenticates the configured operator and creates a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::issue_session_token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    pub operator: String,
    pub expires_at_ms: i64,
}

/// Re-export ClientFingerprint from platform
pub use platform::client::ClientFingerprint;

/// Sign in use case
pub struct SignInUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignInUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        let password_hash = self
            .config
            .operator_password_hash
            .as_ref()
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).ok_or(AuthError::InvalidCredentials)?;

        // Both checks always run so that a wrong name costs as much as a wrong password.
        let name_matches = input.user_name.trim() == self.config.operator_name;
        let password_matches = password_hash.verify(&password);
        if !(name_matches && password_matches) {
            return Err(AuthError::InvalidCredentials);
        }

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

        let session = AuthSession::new(
            self.config.operator_name.clone(),
            fingerprint.hash_vec(),
            fingerprint.ip_string(),
            fingerprint.user_agent.clone(),
            ttl,
        );

        self.session_repo.create(&session).await?;

        let session_token = issue_session_token(&self.config.session_secret, session.session_id);

        tracing::info!(
            session_id = %session.session_id,
            client_ip = ?session.client_ip,
            "Operator signed in"
        );

        Ok(SignInOutput {
            session_token,
            operator: session.operator,
            expires_at_ms: session.expires_at_ms,
        })
    }
}
