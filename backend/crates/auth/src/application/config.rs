//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::SessionCookie;
use platform::crypto::{SECRET_LEN, random_secret};
use platform::password::HashedPassword;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; SECRET_LEN],
    /// Session TTL
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Where browser navigations without a session are sent
    pub login_path: String,
    /// The single operator allowed to sign in
    pub operator_name: String,
    /// Argon2id PHC hash of the operator password; sign-in is refused when unset
    pub operator_password_hash: Option<HashedPassword>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "milk_session".to_string(),
            session_secret: [0u8; SECRET_LEN],
            session_ttl: Duration::from_secs(12 * 3600), // 12 hours
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            login_path: "/login".to_string(),
            operator_name: "operator".to_string(),
            operator_password_hash: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn with_operator(mut self, name: impl Into<String>, password_hash: HashedPassword) -> Self {
        self.operator_name = name.into();
        self.operator_password_hash = Some(password_hash);
        self
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    pub fn session_cookie(&self) -> SessionCookie {
        SessionCookie::new(
            self.session_cookie_name.clone(),
            self.cookie_secure,
            self.cookie_same_site,
        )
    }
}
