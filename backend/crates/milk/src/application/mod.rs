//! Application Layer - Use Cases
//!
//! Orchestrates domain logic and repositories.

pub mod config;
pub mod daily_entry;
pub mod monthly_report;
pub mod price;
