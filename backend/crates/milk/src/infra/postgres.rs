//! PostgreSQL Repository Implementations

use crate::domain::entities::{ConsumptionRecord, PriceRecord};
use crate::domain::repository::{ConsumptionRepository, PriceRepository};
use crate::domain::value_objects::{
    EntryDate, Price, Quantity, ReportRange, ReportSort, SortField, SortOrder,
};
use crate::error::{MilkError, MilkResult};
use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{ConsumptionRecordId, PriceRecordId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgMilkRepository {
    pool: PgPool,
}

impl PgMilkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PriceRepository for PgMilkRepository {
    async fn current(&self) -> MilkResult<Option<PriceRecord>> {
        let row = sqlx::query_as::<_, PriceRow>(
            r#"
            SELECT price_id, price, created_at
            FROM milk_prices
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(PriceRow::into_price_record).transpose()
    }

    async fn replace(&self, record: &PriceRecord) -> MilkResult<()> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM milk_prices")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query(
            r#"
            INSERT INTO milk_prices (price_id, price, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(record.id.into_uuid())
        .bind(record.price.value())
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(price_id = %record.id, removed, "Price row replaced");

        Ok(())
    }
}

impl ConsumptionRepository for PgMilkRepository {
    async fn find_by_date(&self, date: &EntryDate) -> MilkResult<Option<ConsumptionRecord>> {
        let row = sqlx::query_as::<_, ConsumptionRow>(
            r#"
            SELECT record_id, entry_date, quantity, created_at
            FROM milk_consumption
            WHERE entry_date = $1
            LIMIT 1
            "#,
        )
        .bind(date.as_iso())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ConsumptionRow::into_record).transpose()
    }

    async fn create(&self, record: &ConsumptionRecord) -> MilkResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO milk_consumption (record_id, entry_date, quantity, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id.into_uuid())
        .bind(record.date.as_iso())
        .bind(record.quantity.value())
        .bind(record.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Lost a race with another submission for the same date.
            Err(e) if is_unique_violation(&e) => Err(MilkError::EntryLocked {
                date: record.date.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_in_range(
        &self,
        range: &ReportRange,
        sort: ReportSort,
    ) -> MilkResult<Vec<ConsumptionRecord>> {
        let sql = format!(
            r#"
            SELECT record_id, entry_date, quantity, created_at
            FROM milk_consumption
            WHERE entry_date >= $1 AND entry_date <= $2
            ORDER BY {}
            "#,
            order_by(sort)
        );

        let rows = sqlx::query_as::<_, ConsumptionRow>(&sql)
            .bind(&range.from)
            .bind(&range.to)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ConsumptionRow::into_record).collect()
    }
}

/// ORDER BY clause; only these fixed strings ever reach the query text
fn order_by(sort: ReportSort) -> &'static str {
    match (sort.field, sort.order) {
        (SortField::Date, SortOrder::Asc) => "entry_date ASC",
        (SortField::Date, SortOrder::Desc) => "entry_date DESC",
        (SortField::Quantity, SortOrder::Asc) => "quantity ASC, entry_date ASC",
        (SortField::Quantity, SortOrder::Desc) => "quantity DESC, entry_date ASC",
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PriceRow {
    price_id: Uuid,
    price: Decimal,
    created_at: DateTime<Utc>,
}

impl PriceRow {
    fn into_price_record(self) -> MilkResult<PriceRecord> {
        let price = Price::new(self.price)
            .map_err(|e| MilkError::Internal(format!("Stored price is invalid: {}", e)))?;

        Ok(PriceRecord {
            id: PriceRecordId::from_uuid(self.price_id),
            price,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ConsumptionRow {
    record_id: Uuid,
    entry_date: String,
    quantity: Decimal,
    created_at: DateTime<Utc>,
}

impl ConsumptionRow {
    fn into_record(self) -> MilkResult<ConsumptionRecord> {
        let date = EntryDate::parse(&self.entry_date)
            .map_err(|e| MilkError::Internal(format!("Stored date is invalid: {}", e)))?;
        let quantity = Quantity::new(self.quantity)
            .map_err(|e| MilkError::Internal(format!("Stored quantity is invalid: {}", e)))?;

        Ok(ConsumptionRecord {
            id: ConsumptionRecordId::from_uuid(self.record_id),
            date,
            quantity,
            created_at: self.created_at,
        })
    }
}
