//! CSV-backed record stores.
//!
//! Each ledger persists as a headed CSV table; the file is the sole source
//! of truth. Writes are atomic: the collection is serialized to a sibling
//! temp file and renamed over the target, so an interrupted write never
//! leaves a truncated store behind. A missing file is an empty collection;
//! a file with unparseable rows is a hard error enumerating every bad row.
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use thiserror::Error;

use crate::RecordStore;
use crate::drops::BossDropRecord;
use crate::hunt::HuntRecord;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single unparseable persisted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based data row number (the header row is not counted).
    pub row: usize,
    pub column: &'static str,
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}: {}", self.row, self.column, self.message)
    }
}

/// Field-level decode failure inside one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub column: &'static str,
    pub message: String,
}

/// Errors raised when a backing store cannot be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{} malformed row(s) in {}: {}", rows.len(), path.display(), describe_rows(rows))]
    Malformed { path: PathBuf, rows: Vec<RowError> },
}

fn describe_rows(rows: &[RowError]) -> String {
    rows.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Row codec for a CSV-backed record type.
pub trait TableRecord: Sized {
    /// Header row, in column order.
    const HEADERS: &'static [&'static str];

    /// Encode one record as a CSV row.
    fn to_row(&self) -> Vec<String>;

    /// Decode one CSV row.
    ///
    /// # Errors
    ///
    /// Returns a `FieldError` naming the offending column when a field
    /// fails to parse. Malformed values are never coerced to defaults.
    fn from_row(row: &StringRecord) -> Result<Self, FieldError>;
}

fn field<'r>(row: &'r StringRecord, index: usize) -> &'r str {
    row.get(index).unwrap_or("")
}

fn parse_date(column: &'static str, raw: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| FieldError {
        column,
        message: e.to_string(),
    })
}

fn parse_int(column: &'static str, raw: &str) -> Result<i64, FieldError> {
    raw.trim().parse::<i64>().map_err(|e| FieldError {
        column,
        message: e.to_string(),
    })
}

impl TableRecord for HuntRecord {
    const HEADERS: &'static [&'static str] = &[
        "Date",
        "Location",
        "Duration_Minutes",
        "Profit",
        "LevelsGained",
        "Notes",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.location.clone(),
            self.duration_minutes.to_string(),
            self.profit.to_string(),
            self.levels_gained.to_string(),
            self.notes.clone(),
        ]
    }

    fn from_row(row: &StringRecord) -> Result<Self, FieldError> {
        Ok(Self {
            date: parse_date("Date", field(row, 0))?,
            location: field(row, 1).to_string(),
            duration_minutes: parse_int("Duration_Minutes", field(row, 2))?,
            profit: parse_int("Profit", field(row, 3))?,
            levels_gained: parse_int("LevelsGained", field(row, 4))?,
            notes: field(row, 5).to_string(),
        })
    }
}

impl TableRecord for BossDropRecord {
    const HEADERS: &'static [&'static str] = &["Date", "Boss", "Item", "Value_GP", "Notes"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.boss.clone(),
            self.item.clone(),
            self.value.to_string(),
            self.notes.clone(),
        ]
    }

    fn from_row(row: &StringRecord) -> Result<Self, FieldError> {
        Ok(Self {
            date: parse_date("Date", field(row, 0))?,
            boss: field(row, 1).to_string(),
            item: field(row, 2).to_string(),
            value: parse_int("Value_GP", field(row, 3))?,
            notes: field(row, 4).to_string(),
        })
    }
}

/// File-backed store keeping one record type as a headed CSV table.
pub struct CsvStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R> CsvStore<R> {
    /// Create a store handle for the given file path. The file does not
    /// have to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| "store".into(), ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<R: TableRecord> RecordStore<R> for CsvStore<R> {
    fn load(&self) -> Result<Vec<R>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));
        let mut records = Vec::new();
        let mut bad_rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row = result?;
            match R::from_row(&row) {
                Ok(record) => records.push(record),
                Err(err) => bad_rows.push(RowError {
                    row: index + 1,
                    column: err.column,
                    message: err.message,
                }),
            }
        }

        if bad_rows.is_empty() {
            Ok(records)
        } else {
            Err(StoreError::Malformed {
                path: self.path.clone(),
                rows: bad_rows,
            })
        }
    }

    fn save(&self, records: &[R]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        let mut writer = WriterBuilder::new().from_path(&temp)?;
        writer.write_record(R::HEADERS)?;
        for record in records {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;
        drop(writer);

        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
