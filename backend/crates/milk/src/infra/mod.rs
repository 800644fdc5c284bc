//! Infrastructure Layer
//!
//! Store implementations and the spreadsheet writer.

pub mod memory;
pub mod postgres;
pub mod xlsx;

pub use memory::InMemoryMilkRepository;
pub use postgres::PgMilkRepository;
