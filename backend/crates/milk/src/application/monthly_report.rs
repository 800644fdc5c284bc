//! Monthly Report Use Case

use crate::application::config::MilkConfig;
use crate::domain::report::MonthlyReport;
use crate::domain::repository::{ConsumptionRepository, PriceRepository};
use crate::domain::value_objects::{ReportMonth, ReportSort};
use crate::error::{MilkError, MilkResult};
use crate::infra::xlsx;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct ReportQuery {
    pub month: ReportMonth,
    pub sort: ReportSort,
}

/// A rendered workbook ready for download
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

/// Monthly Report Use Case
pub struct MonthlyReportUseCase<P, C>
where
    P: PriceRepository,
    C: ConsumptionRepository,
{
    price_repo: Arc<P>,
    consumption_repo: Arc<C>,
    config: Arc<MilkConfig>,
}

impl<P, C> MonthlyReportUseCase<P, C>
where
    P: PriceRepository,
    C: ConsumptionRepository,
{
    pub fn new(price_repo: Arc<P>, consumption_repo: Arc<C>, config: Arc<MilkConfig>) -> Self {
        Self {
            price_repo,
            consumption_repo,
            config,
        }
    }

    pub async fn execute(&self, query: ReportQuery) -> MilkResult<MonthlyReport> {
        // Price is read once per report.
        let price = self.price_repo.current().await?.map(|record| record.price);

        let range = query.month.range();
        let records = self
            .consumption_repo
            .list_in_range(&range, query.sort)
            .await?;

        let report = MonthlyReport::build(query.month, query.sort, records, price);

        tracing::debug!(
            month = %report.month,
            rows = report.rows.len(),
            total_quantity = %report.total_quantity,
            "Monthly report built"
        );

        Ok(report)
    }

    /// Render the report for `query` as an xlsx workbook
    pub async fn export(&self, query: ReportQuery) -> MilkResult<ExportedReport> {
        let report = self.execute(query).await?;
        if report.is_empty() {
            return Err(MilkError::EmptyReport {
                month: report.month.to_string(),
            });
        }

        let bytes = xlsx::render_report(&report, &self.config)?;

        tracing::info!(
            month = %report.month,
            rows = report.rows.len(),
            bytes = bytes.len(),
            "Monthly report exported"
        );

        Ok(ExportedReport {
            file_name: report.file_name(&self.config.report_file_prefix),
            bytes,
            rows: report.rows.len(),
        })
    }
}
