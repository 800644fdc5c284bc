//! Auth Middleware
//!
//! Guards the ledger routes behind an operator session.

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::AuthSessionId;
use platform::client::ClientFingerprint;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthError;

pub const AUTH_REQUIRED_HEADER: &str = "x-auth-required";

/// Middleware state
#[derive(Clone)]
pub struct AuthGuardState<R>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Operator behind the current request, available to downstream handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedOperator {
    pub session_id: AuthSessionId,
    pub operator: String,
    pub expires_at_ms: i64,
}

/// Middleware that requires a valid auth session
///
/// Browser navigations are redirected to the login page, API calls get a 401
/// carrying `X-Auth-Required: true`.
pub async fn require_auth_session<R>(
    State(state): State<AuthGuardState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let peer_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    let fingerprint = match ClientFingerprint::from_headers(req.headers(), peer_ip) {
        Ok(fp) => fp,
        Err(e) => return AuthError::from(e).into_response(),
    };

    let token = state.config.session_cookie().extract(req.headers());

    let session = match token {
        Some(token) => {
            let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
            use_case.get_session(&token, &fingerprint.hash).await.ok()
        }
        None => None,
    };

    let Some(session) = session else {
        return unauthenticated(req.headers(), &state.config);
    };

    req.extensions_mut().insert(AuthenticatedOperator {
        session_id: session.session_id,
        operator: session.operator,
        expires_at_ms: session.expires_at_ms,
    });

    next.run(req).await
}

fn unauthenticated(headers: &HeaderMap, config: &AuthConfig) -> Response {
    if wants_html(headers) {
        return (StatusCode::SEE_OTHER, [(header::LOCATION, config.login_path.clone())])
            .into_response();
    }

    let mut response = AuthError::SessionInvalid.into_response();
    response
        .headers_mut()
        .insert(AUTH_REQUIRED_HEADER, HeaderValue::from_static("true"));
    response
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}
