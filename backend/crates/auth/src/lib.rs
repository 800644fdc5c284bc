//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entity, repository trait
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, guard middleware
//!
//! ## Features
//! - Single operator sign-in against an Argon2id password hash
//! - Server-side sessions with signed cookie tokens
//! - Route guard for the ledger API
//!
//! ## Security Model
//! - Sessions bound to client fingerprint (User-Agent)
//! - Session tokens are HMAC-signed, so forged ids never reach the database
//! - Expired sessions are purged at startup

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::CheckSessionUseCase;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, PgAuthRepository};
pub use presentation::middleware::AuthenticatedOperator;
pub use presentation::router::{auth_router, auth_router_generic, protect};
