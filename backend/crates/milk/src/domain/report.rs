//! Monthly Report Aggregation
//!
//! Rows come from the store already filtered and ordered; aggregation only
//! joins the current price and computes totals.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::entities::ConsumptionRecord;
use crate::domain::value_objects::{EntryDate, Price, Quantity, ReportMonth, ReportSort};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub date: EntryDate,
    pub date_label: String,
    pub quantity: Quantity,
    /// Current price, joined at read time
    pub price: Option<Price>,
}

#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub month: ReportMonth,
    pub sort: ReportSort,
    pub rows: Vec<ReportRow>,
    pub total_quantity: Decimal,
    /// `None` when no price is set
    pub total_cost: Option<Decimal>,
}

impl MonthlyReport {
    /// Aggregate `records` in the order given
    pub fn build(
        month: ReportMonth,
        sort: ReportSort,
        records: Vec<ConsumptionRecord>,
        price: Option<Price>,
    ) -> Self {
        let total_quantity: Decimal = records.iter().map(|r| r.quantity.value()).sum();
        let total_cost = price.map(|p| total_quantity * p.value());

        let rows = records
            .into_iter()
            .map(|record| ReportRow {
                date: record.date,
                date_label: record.date.label(),
                quantity: record.quantity,
                price,
            })
            .collect();

        Self {
            month,
            sort,
            rows,
            total_quantity,
            total_cost,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Download name, `<prefix>_<YYYY-MM>.xlsx`
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}_{}.xlsx", prefix, self.month)
    }
}
