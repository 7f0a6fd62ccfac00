//! Hunttrack Core Ledger
//!
//! Platform-agnostic tracking logic for the Hunttrack play-session log.
//! This crate owns the record types, the append-only persistence contract,
//! and every derived view (weekly filters, cumulative profit, level
//! timeline, goal progress) without any terminal or UI dependencies.

pub mod constants;
pub mod drops;
pub mod hunt;
pub mod progress;
pub mod storage;

// Re-export commonly used types
pub use drops::{BossDropRecord, BossFilter, boss_names, filter_by_boss, top_by_value};
pub use hunt::{
    DaySummary, HuntRecord, WeekStart, cumulative_profit, current_level, day_summary,
    filter_by_day, filter_by_week, format_duration, level_timeline, sorted_by_date, week_bounds,
};
pub use progress::{
    ConversionError, GoalConfig, GoalProgress, Totals, compute_totals, estimate_real_value,
    goal_progress, progress_percent, progress_percent_clamped,
};
pub use storage::{CsvStore, FieldError, RowError, StoreError, TableRecord};

use std::marker::PhantomData;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised when a candidate record violates the append invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be non-negative (got {value})")]
    NegativeField { field: &'static str, value: i64 },
    #[error("'{input}' is not a valid calendar date: {message}")]
    InvalidDate { input: String, message: String },
}

pub(crate) fn non_negative(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeField { field, value });
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` input date, rejecting anything that is not a real
/// calendar date.
///
/// # Errors
///
/// Returns `ValidationError::InvalidDate` when the input does not name a
/// valid calendar date.
pub fn parse_input_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| {
        ValidationError::InvalidDate {
            input: input.to_string(),
            message: e.to_string(),
        }
    })
}

/// A record type that can live in an append-only ledger.
pub trait LogRecord: Clone {
    /// Calendar day the record belongs to.
    fn date(&self) -> NaiveDate;

    /// Check the append invariants for this record.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when any numeric field is negative.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Trait for abstracting record persistence
/// Platform-specific implementations should provide this
pub trait RecordStore<R> {
    /// Load the full persisted collection in insertion order.
    ///
    /// An absent backing store is an empty collection, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store exists but cannot be read.
    fn load(&self) -> Result<Vec<R>, StoreError>;

    /// Replace the persisted collection with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be written durably.
    fn save(&self, records: &[R]) -> Result<(), StoreError>;
}

/// Errors surfaced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Append-only ledger binding a record type to an explicit store handle.
///
/// The persisted store is the sole source of truth: `append` re-reads it
/// after writing so that any store-side normalization is reflected in the
/// returned collection.
pub struct Ledger<R, S> {
    store: S,
    _record: PhantomData<R>,
}

/// Ledger over hunt session records.
pub type HuntLedger<S> = Ledger<hunt::HuntRecord, S>;

/// Ledger over boss drop records.
pub type DropLedger<S> = Ledger<drops::BossDropRecord, S>;

impl<R, S> Ledger<R, S>
where
    R: LogRecord,
    S: RecordStore<R>,
{
    /// Create a ledger over the provided store handle.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Load the full collection from the backing store.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the backing store cannot be read.
    pub fn load(&self) -> Result<Vec<R>, LedgerError> {
        Ok(self.store.load()?)
    }

    /// Validate `record`, persist the extended collection, and return the
    /// freshly reloaded result.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` when the record violates an append
    /// invariant; the store is left untouched. Returns `LedgerError::Store`
    /// when the backing store cannot be read or written.
    pub fn append(&self, record: R) -> Result<Vec<R>, LedgerError> {
        record.validate()?;
        let mut records = self.store.load()?;
        records.push(record);
        self.store.save(&records)?;
        Ok(self.store.load()?)
    }

    /// Access the underlying store handle.
    pub const fn store(&self) -> &S {
        &self.store
    }
}
