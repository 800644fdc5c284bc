//! Spreadsheet export
//!
//! Layout mirrors the on-screen table:
//!
//! | Date       | Quantity (liters) | Price (₹) |
//! |------------|-------------------|-----------|
//! | Sat Jun 01 | 2                 | 60        |
//! |            |                   |           |
//! | Total Quantity | 3.5           |           |
//! | Total Cost     | 210           |           |

use crate::application::config::MilkConfig;
use crate::domain::report::MonthlyReport;
use crate::error::MilkResult;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

pub const CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const TOTAL_QUANTITY_LABEL: &str = "Total Quantity";
pub const TOTAL_COST_LABEL: &str = "Total Cost";

/// Render `report` as an xlsx workbook with a single sheet
pub fn render_report(report: &MonthlyReport, config: &MilkConfig) -> MilkResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook
        .add_worksheet()
        .set_name(&config.report_sheet_name)?;

    let price_header = config.price_header();
    let headers = ["Date", "Quantity (liters)", price_header.as_str()];
    for (col, title) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }

    for (idx, row) in report.rows.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, &row.date_label)?;
        sheet.write_number(r, 1, to_f64(row.quantity.value()))?;
        if let Some(price) = row.price {
            sheet.write_number(r, 2, to_f64(price.value()))?;
        }
    }

    // One blank row between the table and the totals.
    let totals = report.rows.len() as u32 + 2;
    sheet.write_string_with_format(totals, 0, TOTAL_QUANTITY_LABEL, &bold)?;
    sheet.write_number(totals, 1, to_f64(report.total_quantity))?;
    sheet.write_string_with_format(totals + 1, 0, TOTAL_COST_LABEL, &bold)?;
    if let Some(cost) = report.total_cost {
        sheet.write_number(totals + 1, 1, to_f64(cost))?;
    }

    sheet.set_column_width(0, 16)?;
    sheet.set_column_width(1, 18)?;
    sheet.set_column_width(2, 12)?;

    Ok(workbook.save_to_buffer()?)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ConsumptionRecord;
    use crate::domain::value_objects::{EntryDate, Price, Quantity, ReportMonth, ReportSort};
    use calamine::{Data, Reader, Xlsx};
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn report(price: Option<Decimal>) -> MonthlyReport {
        let records = vec![
            ConsumptionRecord::new(
                EntryDate::parse("2024-06-01").unwrap(),
                Quantity::new(dec!(2.0)).unwrap(),
            ),
            ConsumptionRecord::new(
                EntryDate::parse("2024-06-02").unwrap(),
                Quantity::new(dec!(1.5)).unwrap(),
            ),
        ];
        MonthlyReport::build(
            ReportMonth::parse("2024-06").unwrap(),
            ReportSort::default(),
            records,
            price.map(|p| Price::new(p).unwrap()),
        )
    }

    fn read_back(bytes: Vec<u8>) -> calamine::Range<Data> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        workbook.worksheet_range("Report").unwrap()
    }

    #[test]
    fn test_layout() {
        let bytes = render_report(&report(Some(dec!(60))), &MilkConfig::default()).unwrap();
        let range = read_back(bytes);

        assert_eq!(
            range.get_value((0, 2)),
            Some(&Data::String("Price (₹)".to_string()))
        );
        assert_eq!(
            range.get_value((1, 0)),
            Some(&Data::String("Sat Jun 01".to_string()))
        );
        assert_eq!(range.get_value((1, 1)), Some(&Data::Float(2.0)));
        assert_eq!(range.get_value((2, 2)), Some(&Data::Float(60.0)));

        // header + 2 rows + blank + 2 totals
        assert_eq!(range.height(), 6);
        assert!(matches!(range.get_value((3, 0)), None | Some(Data::Empty)));
        assert_eq!(
            range.get_value((4, 0)),
            Some(&Data::String(TOTAL_QUANTITY_LABEL.to_string()))
        );
        assert_eq!(range.get_value((4, 1)), Some(&Data::Float(3.5)));
        assert_eq!(range.get_value((5, 1)), Some(&Data::Float(210.0)));
    }

    #[test]
    fn test_without_price_leaves_cells_blank() {
        let bytes = render_report(&report(None), &MilkConfig::default()).unwrap();
        let range = read_back(bytes);

        assert!(matches!(range.get_value((1, 2)), None | Some(Data::Empty)));
        assert_eq!(
            range.get_value((5, 0)),
            Some(&Data::String(TOTAL_COST_LABEL.to_string()))
        );
        assert!(matches!(range.get_value((5, 1)), None | Some(Data::Empty)));
    }
}
