//! Daily Entry State Machine
//!
//! One state per selected date. Transitions are a pure function of the
//! current state and an event; the use case performs the I/O and feeds the
//! outcome back in as events.

use crate::domain::value_objects::{EntryDate, Price, Quantity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// No price exists yet, so the form asks for one
    NoPriceSet { date: EntryDate },
    /// A price exists and the date's record is being fetched
    AwaitingLookup { date: EntryDate, price: Price },
    /// The date is free; a quantity can be submitted
    NoRecordForDate { date: EntryDate, price: Price },
    /// The date already has a record and is locked to it
    RecordExists {
        date: EntryDate,
        price: Price,
        quantity: Quantity,
    },
    /// A lookup failed; nothing is retried
    Stopped {
        date: EntryDate,
        price: Option<Price>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEvent {
    PriceSet(Price),
    DateSelected(EntryDate),
    /// Result of the per-date lookup, `None` when no record exists
    LookupCompleted(Option<Quantity>),
    QuantityRecorded(Quantity),
    Failed,
}

impl EntryState {
    /// State on first load for `date`
    pub fn initial(date: EntryDate, price: Option<Price>) -> Self {
        match price {
            Some(price) => EntryState::AwaitingLookup { date, price },
            None => EntryState::NoPriceSet { date },
        }
    }

    pub fn date(&self) -> EntryDate {
        match *self {
            EntryState::NoPriceSet { date }
            | EntryState::AwaitingLookup { date, .. }
            | EntryState::NoRecordForDate { date, .. }
            | EntryState::RecordExists { date, .. }
            | EntryState::Stopped { date, .. } => date,
        }
    }

    pub fn price(&self) -> Option<Price> {
        match *self {
            EntryState::NoPriceSet { .. } => None,
            EntryState::AwaitingLookup { price, .. }
            | EntryState::NoRecordForDate { price, .. }
            | EntryState::RecordExists { price, .. } => Some(price),
            EntryState::Stopped { price, .. } => price,
        }
    }

    /// Stored quantity when the date is locked
    pub fn quantity(&self) -> Option<Quantity> {
        match *self {
            EntryState::RecordExists { quantity, .. } => Some(quantity),
            _ => None,
        }
    }

    pub fn is_awaiting_lookup(&self) -> bool {
        matches!(self, EntryState::AwaitingLookup { .. })
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, EntryState::RecordExists { .. })
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, EntryState::NoRecordForDate { .. })
    }

    /// Wire name of the state
    pub fn name(&self) -> &'static str {
        match self {
            EntryState::NoPriceSet { .. } => "noPriceSet",
            EntryState::AwaitingLookup { .. } => "awaitingLookup",
            EntryState::NoRecordForDate { .. } => "noRecordForDate",
            EntryState::RecordExists { .. } => "recordExists",
            EntryState::Stopped { .. } => "stopped",
        }
    }

    /// Reducer. Events that make no sense in the current state leave it
    /// unchanged.
    pub fn apply(self, event: EntryEvent) -> Self {
        use EntryEvent::*;
        use EntryState::*;

        match (self, event) {
            (state, Failed) => Stopped {
                date: state.date(),
                price: state.price(),
            },

            (NoPriceSet { date }, PriceSet(price))
            | (Stopped { date, .. }, PriceSet(price))
            | (AwaitingLookup { date, .. }, PriceSet(price)) => AwaitingLookup { date, price },
            (NoRecordForDate { date, .. }, PriceSet(price)) => NoRecordForDate { date, price },
            (RecordExists { date, quantity, .. }, PriceSet(price)) => RecordExists {
                date,
                price,
                quantity,
            },

            (state, DateSelected(date)) => EntryState::initial(date, state.price()),

            (AwaitingLookup { date, price }, LookupCompleted(Some(quantity))) => RecordExists {
                date,
                price,
                quantity,
            },
            (AwaitingLookup { date, price }, LookupCompleted(None)) => {
                NoRecordForDate { date, price }
            }

            (NoRecordForDate { date, price }, QuantityRecorded(quantity)) => RecordExists {
                date,
                price,
                quantity,
            },

            (state, _) => state,
        }
    }
}
