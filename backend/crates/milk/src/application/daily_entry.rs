//! Daily Entry Use Case
//!
//! Drives [`EntryState`] with the results of store lookups.

use crate::domain::entities::ConsumptionRecord;
use crate::domain::entry_state::{EntryEvent, EntryState};
use crate::domain::repository::{ConsumptionRepository, PriceRepository};
use crate::domain::value_objects::{EntryDate, Quantity};
use crate::error::{MilkError, MilkResult};
use std::sync::Arc;

/// Input DTO for submitting a quantity
#[derive(Debug, Clone)]
pub struct SubmitEntryInput {
    pub date: EntryDate,
    pub quantity: Quantity,
}

/// Output DTO for a recorded quantity
#[derive(Debug, Clone)]
pub struct SubmitEntryOutput {
    pub recorded: ConsumptionRecord,
    /// The day after the recorded date, already looked up
    pub next: EntryState,
}

/// Daily Entry Use Case
pub struct DailyEntryUseCase<P, C>
where
    P: PriceRepository,
    C: ConsumptionRepository,
{
    price_repo: Arc<P>,
    consumption_repo: Arc<C>,
}

impl<P, C> DailyEntryUseCase<P, C>
where
    P: PriceRepository,
    C: ConsumptionRepository,
{
    pub fn new(price_repo: Arc<P>, consumption_repo: Arc<C>) -> Self {
        Self {
            price_repo,
            consumption_repo,
        }
    }

    /// State of `date` (today when absent)
    ///
    /// Store failures are logged and end in `Stopped` rather than an error.
    pub async fn lookup(&self, date: Option<EntryDate>) -> EntryState {
        let date = date.unwrap_or_else(EntryDate::today);

        match self.price_repo.current().await {
            Ok(price) => {
                let state = EntryState::initial(date, price.map(|record| record.price));
                self.resolve(state).await
            }
            Err(e) => {
                tracing::error!(error = %e, date = %date, "Price lookup failed");
                EntryState::NoPriceSet { date }.apply(EntryEvent::Failed)
            }
        }
    }

    /// Record `quantity` for a free date, then look up the following day
    pub async fn submit(&self, input: SubmitEntryInput) -> MilkResult<SubmitEntryOutput> {
        let date = input.date;
        let next_date = date
            .next_day()
            .ok_or_else(|| MilkError::InvalidDate(date.to_string()))?;

        let price = self.price_repo.current().await?.map(|record| record.price);
        let mut state = EntryState::initial(date, price);
        if state.is_awaiting_lookup() {
            let existing = self.consumption_repo.find_by_date(&date).await?;
            state = state.apply(EntryEvent::LookupCompleted(
                existing.map(|record| record.quantity),
            ));
        }

        if !state.can_submit() {
            return Err(match state {
                EntryState::NoPriceSet { .. } => MilkError::PriceNotSet,
                _ => MilkError::EntryLocked {
                    date: date.to_string(),
                },
            });
        }

        let record = ConsumptionRecord::new(date, input.quantity);
        self.consumption_repo.create(&record).await?;

        tracing::info!(
            record_id = %record.id,
            date = %record.date,
            quantity = %record.quantity,
            "Quantity recorded"
        );

        let locked = state.apply(EntryEvent::QuantityRecorded(record.quantity));
        let next = self
            .resolve(locked.apply(EntryEvent::DateSelected(next_date)))
            .await;

        Ok(SubmitEntryOutput {
            recorded: record,
            next,
        })
    }

    async fn resolve(&self, state: EntryState) -> EntryState {
        if !state.is_awaiting_lookup() {
            return state;
        }

        match self.consumption_repo.find_by_date(&state.date()).await {
            Ok(record) => state.apply(EntryEvent::LookupCompleted(
                record.map(|record| record.quantity),
            )),
            Err(e) => {
                tracing::error!(error = %e, date = %state.date(), "Entry lookup failed");
                state.apply(EntryEvent::Failed)
            }
        }
    }
}
