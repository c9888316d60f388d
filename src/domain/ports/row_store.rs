//! RowStore port
//!
//! A table keyed by `(name, version)` where every field keeps timestamped
//! cells. The one primitive the registry relies on for concurrency is
//! [`RowStore::check_and_commit`]: a per-key compare-and-swap on the newest
//! value of one field.

use std::path::PathBuf;

use crate::domain::entities::{CellValue, DataRequest, Row, RowKey};
use crate::domain::value_objects::RecordField;

pub type StoreResult<T> = Result<T, StoreError>;

/// Single-pass, lazily evaluated sequence of rows. Dropping it closes the scan.
pub type RowScanner<'a> = Box<dyn Iterator<Item = StoreResult<Row>> + Send + 'a>;

pub trait RowStore: Send + Sync {
    /// Point read, projected through `request`. `Ok(None)` when the row has no cells.
    fn get(&self, key: &RowKey, request: &DataRequest) -> StoreResult<Option<Row>>;

    /// Forward scan over every row, in key order
    fn scan(&self, request: &DataRequest) -> StoreResult<RowScanner<'_>>;

    /// Unconditional single-field write
    fn put(&self, key: &RowKey, field: RecordField, value: CellValue) -> StoreResult<()>;

    /// Apply the staged writes only if the newest value of `field` equals
    /// `expected` (`None`: the field has no value at all).
    ///
    /// Returns `Ok(false)` without writing anything when the check fails.
    /// Check and write are atomic with respect to every other mutation of the
    /// same key.
    fn check_and_commit(
        &self,
        put: ConditionalPut,
        field: RecordField,
        expected: Option<&CellValue>,
    ) -> StoreResult<bool>;

    /// Remove every cell of the row. Deleting an absent row is not an error.
    fn delete_row(&self, key: &RowKey) -> StoreResult<()>;
}

/// Writes staged against one key, applied together by `check_and_commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalPut {
    key: RowKey,
    staged: Vec<(RecordField, CellValue)>,
}

impl ConditionalPut {
    pub fn new(key: RowKey) -> Self {
        Self {
            key,
            staged: Vec::new(),
        }
    }

    pub fn put(mut self, field: RecordField, value: impl Into<CellValue>) -> Self {
        self.stage(field, value);
        self
    }

    pub fn stage(&mut self, field: RecordField, value: impl Into<CellValue>) {
        self.staged.push((field, value.into()));
    }

    pub fn key(&self) -> &RowKey {
        &self.key
    }

    pub fn staged(&self) -> &[(RecordField, CellValue)] {
        &self.staged
    }

    /// Whether `row` satisfies the commit condition
    pub fn condition_holds(
        row: Option<&Row>,
        field: RecordField,
        expected: Option<&CellValue>,
    ) -> bool {
        let current = row.and_then(|r| r.most_recent(field));
        current == expected
    }

    /// Append every staged value to `row` at `now_millis`
    pub fn apply_to(self, row: &mut Row, now_millis: i64) {
        for (field, value) in self.staged {
            row.append(field, value, now_millis);
        }
    }

    pub fn into_key(self) -> RowKey {
        self.key
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("failed to access model table: {message}")]
    AccessError { message: String },

    #[error("failed to serialize model table: {message}")]
    SerializationError { message: String },

    #[error(
        "model table corrupted: {path}\n  → Fix: restore the table from a backup or reinstall the repository\n  → Details: {message}"
    )]
    Corrupted { path: PathBuf, message: String },
}
