//! Application Configuration
//!
//! Configuration for the ledger application layer.

use crate::domain::value_objects::ReportSort;

/// Milk ledger configuration
#[derive(Debug, Clone)]
pub struct MilkConfig {
    /// Shown in the report price column header and in the UI
    pub currency_symbol: String,
    /// Name of the single worksheet in exported workbooks
    pub report_sheet_name: String,
    /// Export file name prefix, `<prefix>_<YYYY-MM>.xlsx`
    pub report_file_prefix: String,
    /// Ordering used when a report request names none
    pub default_sort: ReportSort,
}

impl Default for MilkConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            report_sheet_name: "Report".to_string(),
            report_file_prefix: "milk_report".to_string(),
            default_sort: ReportSort::default(),
        }
    }
}

impl MilkConfig {
    /// Header for the price column, e.g. `Price (₹)`
    pub fn price_header(&self) -> String {
        format!("Price ({})", self.currency_symbol)
    }
}
