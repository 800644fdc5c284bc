//! API DTOs (Data Transfer Objects)

use crate::domain::entities::ConsumptionRecord;
use crate::domain::entry_state::EntryState;
use crate::domain::report::{MonthlyReport, ReportRow};
use crate::domain::value_objects::{EntryDate, Price, Quantity, ReportMonth, SortField, SortOrder};
use chrono::{DateTime, Utc};
use kernel::id::ConsumptionRecordId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response for GET /api/price
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub price: Option<Price>,
    pub currency_symbol: String,
}

/// Request for PUT /api/price
#[derive(Debug, Clone, Deserialize)]
pub struct SetPriceRequest {
    pub price: Decimal,
}

/// Response for PUT /api/price
#[derive(Debug, Clone, Serialize)]
pub struct SetPriceResponse {
    pub price: Price,
    pub replaced: bool,
    pub message: String,
}

/// Query for GET /api/entries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryQuery {
    #[serde(default)]
    pub date: Option<String>,
}

/// Request for POST /api/entries
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitEntryRequest {
    pub date: String,
    pub quantity: Decimal,
}

/// Entry state as seen by the form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStateResponse {
    pub state: &'static str,
    pub date: EntryDate,
    pub price: Option<Price>,
    /// Stored quantity when the date is locked
    pub quantity: Option<Quantity>,
    pub locked: bool,
    pub can_submit: bool,
}

impl From<EntryState> for EntryStateResponse {
    fn from(state: EntryState) -> Self {
        Self {
            state: state.name(),
            date: state.date(),
            price: state.price(),
            quantity: state.quantity(),
            locked: state.is_locked(),
            can_submit: state.can_submit(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub id: ConsumptionRecordId,
    pub date: EntryDate,
    pub quantity: Quantity,
    pub created_at: DateTime<Utc>,
}

impl From<ConsumptionRecord> for RecordResponse {
    fn from(record: ConsumptionRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            quantity: record.quantity,
            created_at: record.created_at,
        }
    }
}

/// Response for POST /api/entries
#[derive(Debug, Clone, Serialize)]
pub struct SubmitEntryResponse {
    pub recorded: RecordResponse,
    pub next: EntryStateResponse,
}

/// Query for GET /api/reports and /api/reports/export
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub sort_by: Option<SortField>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

/// Response for GET /api/reports
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub month: ReportMonth,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub rows: Vec<ReportRow>,
    pub total_quantity: Decimal,
    pub total_cost: Option<Decimal>,
    pub currency_symbol: String,
}

impl ReportResponse {
    pub fn new(report: MonthlyReport, currency_symbol: &str) -> Self {
        Self {
            month: report.month,
            sort_by: report.sort.field,
            sort_order: report.sort.order,
            rows: report.rows,
            total_quantity: report.total_quantity,
            total_cost: report.total_cost,
            currency_symbol: currency_symbol.to_string(),
        }
    }
}
