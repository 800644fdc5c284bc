//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::client::{ClientFingerprint, FingerprintError};

use crate::application::config::AuthConfig;
use crate::application::{CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase};
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{SessionStatusResponse, SignInRequest, SignInResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    fingerprint: Result<ClientFingerprint, FingerprintError>,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let fingerprint = fingerprint?;
    let Json(req) = body?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignInInput {
        user_name: req.user_name,
        password: req.password,
    };

    let output = use_case.execute(input, fingerprint).await?;

    let cookie = state
        .config
        .session_cookie()
        .issue(&output.session_token, state.config.session_ttl);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            operator: output.operator,
            expires_at_ms: output.expires_at_ms,
        }),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.config.session_cookie();

    if let Some(token) = cookie.extract(&headers) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // The cookie is cleared either way.
        if let Err(e) = use_case.execute(&token).await {
            tracing::debug!(error = %e, "Sign out without a live session");
        }
    }

    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie.clear())])
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    fingerprint: Result<ClientFingerprint, FingerprintError>,
) -> Json<SessionStatusResponse>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let (Ok(fingerprint), Some(token)) = (
        fingerprint,
        state.config.session_cookie().extract(&headers),
    ) else {
        return Json(SessionStatusResponse::anonymous());
    };

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    match use_case.get_session(&token, &fingerprint.hash).await {
        Ok(session) => Json(SessionStatusResponse {
            authenticated: true,
            operator: Some(session.operator),
            expires_at_ms: Some(session.expires_at_ms),
        }),
        Err(_) => Json(SessionStatusResponse::anonymous()),
    }
}
