//! In-memory repository
//!
//! Backs router tests and local experiments. Price replacement happens under
//! one write lock, so readers never observe an empty store mid-replace.

use crate::domain::entities::{ConsumptionRecord, PriceRecord};
use crate::domain::repository::{ConsumptionRepository, PriceRepository};
use crate::domain::value_objects::{EntryDate, ReportRange, ReportSort, SortField, SortOrder};
use crate::error::{MilkError, MilkResult};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryMilkRepository {
    prices: Arc<RwLock<Vec<PriceRecord>>>,
    records: Arc<RwLock<Vec<ConsumptionRecord>>>,
}

impl InMemoryMilkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored price rows
    pub async fn price_count(&self) -> usize {
        self.prices.read().await.len()
    }

    /// Number of ledger rows stored for `date`
    pub async fn record_count(&self, date: &EntryDate) -> usize {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.date == *date)
            .count()
    }
}

impl PriceRepository for InMemoryMilkRepository {
    async fn current(&self) -> MilkResult<Option<PriceRecord>> {
        Ok(self.prices.read().await.last().cloned())
    }

    async fn replace(&self, record: &PriceRecord) -> MilkResult<()> {
        let mut prices = self.prices.write().await;
        prices.clear();
        prices.push(record.clone());
        Ok(())
    }
}

impl ConsumptionRepository for InMemoryMilkRepository {
    async fn find_by_date(&self, date: &EntryDate) -> MilkResult<Option<ConsumptionRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.date == *date)
            .cloned())
    }

    async fn create(&self, record: &ConsumptionRecord) -> MilkResult<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.date == record.date) {
            return Err(MilkError::EntryLocked {
                date: record.date.to_string(),
            });
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list_in_range(
        &self,
        range: &ReportRange,
        sort: ReportSort,
    ) -> MilkResult<Vec<ConsumptionRecord>> {
        let mut rows: Vec<ConsumptionRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| range.contains(&r.date))
            .cloned()
            .collect();

        rows.sort_by(|a, b| compare(a, b, sort));
        Ok(rows)
    }
}

fn compare(a: &ConsumptionRecord, b: &ConsumptionRecord, sort: ReportSort) -> Ordering {
    let by_date = a.date.cmp(&b.date);
    let primary = match sort.field {
        SortField::Date => by_date,
        SortField::Quantity => a.quantity.value().cmp(&b.quantity.value()),
    };
    let primary = match sort.order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    };
    primary.then(by_date)
}
