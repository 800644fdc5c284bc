//! Domain Layer - Ledger rules
//!
//! This layer contains:
//! - Value objects (Price, Quantity, EntryDate, ReportMonth)
//! - Entities (PriceRecord, ConsumptionRecord)
//! - The daily entry state machine
//! - Monthly report aggregation
//! - Repository traits (interfaces)

pub mod entities;
pub mod entry_state;
pub mod report;
pub mod repository;
pub mod value_objects;
