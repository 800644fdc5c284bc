//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entities::{ConsumptionRecord, PriceRecord};
use crate::domain::value_objects::{EntryDate, ReportRange, ReportSort};
use crate::error::MilkResult;

/// Price store
#[trait_variant::make(PriceRepository: Send)]
pub trait LocalPriceRepository {
    /// The active price, if one was ever set
    async fn current(&self) -> MilkResult<Option<PriceRecord>>;

    /// Make `record` the only stored price
    ///
    /// Either the old price survives or the new one does; a failure never
    /// leaves the store empty after a price existed.
    async fn replace(&self, record: &PriceRecord) -> MilkResult<()>;
}

/// Consumption ledger
#[trait_variant::make(ConsumptionRepository: Send)]
pub trait LocalConsumptionRepository {
    /// First record for `date`, if any
    async fn find_by_date(&self, date: &EntryDate) -> MilkResult<Option<ConsumptionRecord>>;

    /// Insert a record
    ///
    /// Returns `MilkError::EntryLocked` when the date already has one.
    async fn create(&self, record: &ConsumptionRecord) -> MilkResult<()>;

    /// Records whose date string lies in `range` (inclusive), in `sort` order,
    /// ties broken by date ascending
    async fn list_in_range(
        &self,
        range: &ReportRange,
        sort: ReportSort,
    ) -> MilkResult<Vec<ConsumptionRecord>>;
}

/// Everything the ledger handlers need from a single backing store
pub trait MilkRepository:
    PriceRepository + ConsumptionRepository + Clone + Send + Sync + 'static
{
}

impl<T> MilkRepository for T where
    T: PriceRepository + ConsumptionRepository + Clone + Send + Sync + 'static
{
}
