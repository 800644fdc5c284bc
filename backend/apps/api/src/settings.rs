//! Process settings read from the environment
//!
//! `.env` is loaded by `main` before anything here runs.

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use platform::crypto::SECRET_LEN;
use platform::password::HashedPassword;
use std::env;

const DEFAULT_PORT: u16 = 31113;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

pub struct Settings {
    pub database_url: String,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let frontend_origins = parse_origins(
            &env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        Ok(Self {
            database_url,
            port,
            frontend_origins,
            auth: auth_config()?,
        })
    }
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let operator_name = env::var("OPERATOR_NAME").context("OPERATOR_NAME must be set")?;
    let password_hash = env::var("OPERATOR_PASSWORD_HASH")
        .context("OPERATOR_PASSWORD_HASH must be set")
        .and_then(|phc| {
            HashedPassword::from_phc_string(phc)
                .context("OPERATOR_PASSWORD_HASH is not an Argon2 PHC string")
        })?;

    let base = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 = env::var("AUTH_SESSION_SECRET")
            .context("AUTH_SESSION_SECRET must be set in production")?;
        AuthConfig {
            session_secret: decode_secret(&secret_b64)?,
            ..AuthConfig::default()
        }
    };

    Ok(base.with_operator(operator_name, password_hash))
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; SECRET_LEN]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("AUTH_SESSION_SECRET is not valid base64")?;
    if bytes.len() != SECRET_LEN {
        bail!(
            "AUTH_SESSION_SECRET must decode to {SECRET_LEN} bytes, got {}",
            bytes.len()
        );
    }
    let mut secret = [0u8; SECRET_LEN];
    secret.copy_from_slice(&bytes);
    Ok(secret)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
