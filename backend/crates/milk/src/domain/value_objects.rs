//! Domain Value Objects
//!
//! Immutable value types for the ledger domain.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MilkError, MilkResult};

/// Largest price or quantity the store accepts, matching `NUMERIC(14, 2)`
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Fractional digits kept for prices and quantities
pub const AMOUNT_SCALE: u32 = 2;

/// Amounts fit `NUMERIC(14, 2)`, so a month of totals stays far inside
/// `Decimal` range.
fn fits_column(value: Decimal) -> bool {
    value <= MAX_AMOUNT && value.normalize().scale() <= AMOUNT_SCALE
}

/// Per-liter price, strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> MilkResult<Self> {
        if value <= Decimal::ZERO || !fits_column(value) {
            return Err(MilkError::InvalidPrice(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Liters bought on one day, never negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    pub fn new(value: Decimal) -> MilkResult<Self> {
        if (value.is_sign_negative() && !value.is_zero()) || !fits_column(value) {
            return Err(MilkError::InvalidQuantity(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Calendar day of a ledger entry
///
/// Stored and compared as the zero-padded `YYYY-MM-DD` string, so the
/// textual form must round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryDate(NaiveDate);

impl EntryDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn parse(input: &str) -> MilkResult<Self> {
        let date = NaiveDate::parse_from_str(input, Self::FORMAT)
            .map_err(|_| MilkError::InvalidDate(input.to_string()))?;
        let entry = Self(date);
        // Rejects "2024-6-1" and similar drift that would break string ordering.
        if entry.as_iso() != input {
            return Err(MilkError::InvalidDate(input.to_string()));
        }
        Ok(entry)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today in UTC
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    pub fn next_day(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    pub fn as_iso(&self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }

    /// Display form used in reports, e.g. `Sat Jun 01`
    pub fn label(&self) -> String {
        self.0.format("%a %b %d").to_string()
    }

    pub fn month(&self) -> ReportMonth {
        ReportMonth {
            year: self.0.year(),
            month: self.0.month(),
        }
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for EntryDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A report month, `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    year: i32,
    month: u32,
}

impl ReportMonth {
    pub fn parse(input: &str) -> MilkResult<Self> {
        let invalid = || MilkError::InvalidMonth(input.to_string());

        let (year, month) = input.split_once('-').ok_or_else(invalid)?;
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }

    /// Current month in UTC
    pub fn current() -> Self {
        EntryDate::today().month()
    }

    /// Inclusive date-string interval `[YYYY-MM-01, YYYY-MM-31]`
    ///
    /// The upper bound is not calendar aware. For short months it names a day
    /// that no stored record can carry, so it never matches anything extra.
    pub fn range(&self) -> ReportRange {
        ReportRange {
            from: format!("{self}-01"),
            to: format!("{self}-31"),
        }
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for ReportMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Report range, compared lexicographically on ISO date strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRange {
    pub from: String,
    pub to: String,
}

impl ReportRange {
    pub fn contains(&self, date: &EntryDate) -> bool {
        let iso = date.as_iso();
        self.from.as_str() <= iso.as_str() && iso.as_str() <= self.to.as_str()
    }
}

/// Column a report is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    #[default]
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Report ordering; defaults to quantity, descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl ReportSort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_must_be_positive() {
        assert!(Price::new(dec!(60)).is_ok());
        assert!(matches!(Price::new(dec!(0)), Err(MilkError::InvalidPrice(_))));
        assert!(matches!(Price::new(dec!(-1.5)), Err(MilkError::InvalidPrice(_))));
    }

    #[test]
    fn test_quantity_may_be_zero() {
        assert_eq!(Quantity::new(dec!(0)).unwrap().value(), dec!(0));
        assert!(Quantity::new(dec!(1.25)).is_ok());
        assert!(matches!(
            Quantity::new(dec!(-0.5)),
            Err(MilkError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_amounts_bounded_by_column() {
        assert_eq!(MAX_AMOUNT, dec!(999999999999.99));
        assert!(Price::new(MAX_AMOUNT).is_ok());
        assert!(Quantity::new(MAX_AMOUNT).is_ok());
        assert!(matches!(
            Price::new(dec!(100000000000000000000)),
            Err(MilkError::InvalidPrice(_))
        ));
        assert!(matches!(
            Quantity::new(dec!(1000000000000)),
            Err(MilkError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_amounts_keep_two_decimals() {
        assert!(Price::new(dec!(60.50)).is_ok());
        assert!(Quantity::new(dec!(1.250)).is_ok());
        assert!(Price::new(dec!(60.505)).is_err());
        assert!(Quantity::new(dec!(0.125)).is_err());
    }

    #[test]
    fn test_entry_date_round_trip_is_strict() {
        assert_eq!(EntryDate::parse("2024-06-01").unwrap().as_iso(), "2024-06-01");
        assert!(EntryDate::parse("2024-6-1").is_err());
        assert!(EntryDate::parse("2024-02-30").is_err());
        assert!(EntryDate::parse("01/06/2024").is_err());
    }

    #[test]
    fn test_entry_date_next_day_crosses_month() {
        let date = EntryDate::parse("2024-02-29").unwrap();
        assert_eq!(date.next_day().unwrap().as_iso(), "2024-03-01");
    }

    #[test]
    fn test_entry_date_label() {
        let date = EntryDate::parse("2024-06-01").unwrap();
        assert_eq!(date.label(), "Sat Jun 01");
    }

    #[test]
    fn test_report_month_parse() {
        assert_eq!(ReportMonth::parse("2024-06").unwrap().to_string(), "2024-06");
        assert!(ReportMonth::parse("2024-13").is_err());
        assert!(ReportMonth::parse("2024-00").is_err());
        assert!(ReportMonth::parse("2024-6").is_err());
        assert!(ReportMonth::parse("24-06").is_err());
        assert!(ReportMonth::parse("2024/06").is_err());
    }

    #[test]
    fn test_february_range() {
        let range = ReportMonth::parse("2024-02").unwrap().range();
        assert_eq!(range.from, "2024-02-01");
        assert_eq!(range.to, "2024-02-31");
        assert!(range.contains(&EntryDate::parse("2024-02-28").unwrap()));
        assert!(range.contains(&EntryDate::parse("2024-02-29").unwrap()));
        assert!(!range.contains(&EntryDate::parse("2024-03-01").unwrap()));
        assert!(!range.contains(&EntryDate::parse("2024-01-31").unwrap()));
    }

    #[test]
    fn test_default_sort() {
        let sort = ReportSort::default();
        assert_eq!(sort.field, SortField::Quantity);
        assert_eq!(sort.order, SortOrder::Desc);
        assert_eq!(sort.order.reversed(), SortOrder::Asc);
    }
}
