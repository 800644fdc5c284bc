//! Domain Layer
//!
//! Contains the session entity and repository traits.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::auth_session::AuthSession;
pub use repository::AuthSessionRepository;
