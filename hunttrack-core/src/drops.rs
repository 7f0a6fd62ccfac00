//! Boss drop records and ranking views.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{LogRecord, ValidationError, non_negative};

/// An item obtained from a boss encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossDropRecord {
    pub date: NaiveDate,
    pub boss: String,
    pub item: String,
    /// In-game currency value of the item.
    pub value: i64,
    pub notes: String,
}

impl LogRecord for BossDropRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_negative("value", self.value)
    }
}

/// Boss selection for drop views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BossFilter {
    /// Every recorded drop, regardless of boss.
    #[default]
    All,
    /// Exact, case-sensitive boss name.
    Name(String),
}

impl BossFilter {
    /// Build a filter from optional user input.
    #[must_use]
    pub fn from_option(name: Option<String>) -> Self {
        match name {
            Some(name) => Self::Name(name),
            None => Self::All,
        }
    }
}

/// Drops matching `filter`; an unknown boss name yields an empty vec, not
/// an error.
#[must_use]
pub fn filter_by_boss(records: &[BossDropRecord], filter: &BossFilter) -> Vec<BossDropRecord> {
    match filter {
        BossFilter::All => records.to_vec(),
        BossFilter::Name(name) => records
            .iter()
            .filter(|r| r.boss == *name)
            .cloned()
            .collect(),
    }
}

/// Up to `n` drops ranked by value descending; equal values keep their
/// original relative order.
#[must_use]
pub fn top_by_value(records: &[BossDropRecord], n: usize) -> Vec<BossDropRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by_key(|r| std::cmp::Reverse(r.value));
    ranked.truncate(n);
    ranked
}

/// Unique boss names in first-appearance order.
#[must_use]
pub fn boss_names(records: &[BossDropRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        if !names.iter().any(|n| n == &record.boss) {
            names.push(record.boss.clone());
        }
    }
    names
}
