//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{ConsumptionRecordId, PriceRecordId};

use crate::domain::value_objects::{EntryDate, Price, Quantity};

/// The active per-liter price
///
/// At most one exists at any time; setting a new price replaces it.
#[derive(Debug, Clone)]
pub struct PriceRecord {
    pub id: PriceRecordId,
    pub price: Price,
    pub created_at: DateTime<Utc>,
}

impl PriceRecord {
    pub fn new(price: Price) -> Self {
        Self {
            id: PriceRecordId::new(),
            price,
            created_at: Utc::now(),
        }
    }
}

/// Liters bought on one date
///
/// Write-once: a date that has a record can never be written again.
#[derive(Debug, Clone)]
pub struct ConsumptionRecord {
    pub id: ConsumptionRecordId,
    pub date: EntryDate,
    pub quantity: Quantity,
    pub created_at: DateTime<Utc>,
}

impl ConsumptionRecord {
    pub fn new(date: EntryDate, quantity: Quantity) -> Self {
        Self {
            id: ConsumptionRecordId::new(),
            date,
            quantity,
            created_at: Utc::now(),
        }
    }
}
