//! Price Use Cases

use crate::domain::entities::PriceRecord;
use crate::domain::repository::PriceRepository;
use crate::domain::value_objects::Price;
use crate::error::MilkResult;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Confirmation shown after a price change
pub const PRICE_UPDATED_MESSAGE: &str = "Price updated successfully.";

#[derive(Debug, Clone)]
pub struct SetPriceOutput {
    pub price: Price,
    /// Whether an earlier price was replaced
    pub replaced: bool,
    pub message: &'static str,
}

/// Price Store Use Case
pub struct PriceUseCase<P>
where
    P: PriceRepository,
{
    price_repo: Arc<P>,
}

impl<P> PriceUseCase<P>
where
    P: PriceRepository,
{
    pub fn new(price_repo: Arc<P>) -> Self {
        Self { price_repo }
    }

    /// The active price, if any
    pub async fn current(&self) -> MilkResult<Option<Price>> {
        Ok(self.price_repo.current().await?.map(|record| record.price))
    }

    /// Replace the active price with `value`
    pub async fn set(&self, value: Decimal) -> MilkResult<SetPriceOutput> {
        let price = Price::new(value)?;
        let previous = self.price_repo.current().await?;

        let record = PriceRecord::new(price);
        self.price_repo.replace(&record).await?;

        tracing::info!(
            price_id = %record.id,
            price = %price,
            previous = ?previous.as_ref().map(|p| p.price.value()),
            "Price updated"
        );

        Ok(SetPriceOutput {
            price,
            replaced: previous.is_some(),
            message: PRICE_UPDATED_MESSAGE,
        })
    }
}
