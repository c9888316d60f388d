//! In-memory row store
//!
//! Every operation takes the table mutex once, so a conditional commit's
//! check and write can never interleave with another mutation.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use super::now_millis;
use crate::domain::entities::{CellValue, DataRequest, Row, RowKey};
use crate::domain::ports::{ConditionalPut, RowScanner, RowStore, StoreResult};
use crate::domain::value_objects::RecordField;

/// Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowStore {
    rows: Arc<Mutex<BTreeMap<RowKey, Row>>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    fn table(&self) -> MutexGuard<'_, BTreeMap<RowKey, Row>> {
        // A panicking writer leaves whole rows behind; the map itself stays valid.
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RowStore for MemoryRowStore {
    fn get(&self, key: &RowKey, request: &DataRequest) -> StoreResult<Option<Row>> {
        Ok(self
            .table()
            .get(key)
            .map(|row| row.project(request))
            .filter(|row| !row.is_empty()))
    }

    fn scan(&self, request: &DataRequest) -> StoreResult<RowScanner<'_>> {
        let snapshot: Vec<Row> = self
            .table()
            .values()
            .map(|row| row.project(request))
            .filter(|row| !row.is_empty())
            .collect();
        Ok(Box::new(snapshot.into_iter().map(Ok)))
    }

    fn put(&self, key: &RowKey, field: RecordField, value: CellValue) -> StoreResult<()> {
        let mut table = self.table();
        table
            .entry(key.clone())
            .or_insert_with(|| Row::new(key.clone()))
            .append(field, value, now_millis());
        Ok(())
    }

    fn check_and_commit(
        &self,
        put: ConditionalPut,
        field: RecordField,
        expected: Option<&CellValue>,
    ) -> StoreResult<bool> {
        let mut table = self.table();
        if !ConditionalPut::condition_holds(table.get(put.key()), field, expected) {
            trace!(key = %put.key(), %field, "conditional commit rejected");
            return Ok(false);
        }

        let key = put.key().clone();
        let row = table.entry(key.clone()).or_insert_with(|| Row::new(key));
        put.apply_to(row, now_millis());
        Ok(true)
    }

    fn delete_row(&self, key: &RowKey) -> StoreResult<()> {
        self.table().remove(key);
        Ok(())
    }
}
