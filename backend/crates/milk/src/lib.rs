//! Milk Ledger Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Value objects, entities, entry state machine, report aggregation
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory stores, xlsx writer
//! - `presentation/` - HTTP handlers
//!
//! ## Ledger Model
//! - One active per-liter price; setting a new one replaces it
//! - One consumption record per date, write-once
//! - Reports join the *current* price into every row at read time

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::MilkConfig;
pub use error::{MilkError, MilkResult};
pub use infra::memory::InMemoryMilkRepository;
pub use infra::postgres::PgMilkRepository;
pub use presentation::router::{milk_router, milk_router_generic};

#[cfg(test)]
mod tests;
