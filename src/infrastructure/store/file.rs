//! File-backed row store
//!
//! The whole table is one JSON document, `table.json`, next to `table.lock`.
//! Mutations hold an exclusive `fs2` lock across load, change and atomic
//! replace; reads hold a shared lock while loading. Any number of threads or
//! processes on one host can share a table this way.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::now_millis;
use crate::domain::entities::{Cell, CellValue, DataRequest, Row, RowKey};
use crate::domain::ports::{
    ConditionalPut, RowScanner, RowStore, StoreError, StoreResult, TableAdmin,
};
use crate::domain::value_objects::{LayoutVersion, RecordField};

const TABLE_FILE: &str = "table.json";
const LOCK_FILE: &str = "table.lock";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonTable {
    layout: LayoutVersion,
    #[serde(default)]
    rows: Vec<JsonRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonRow {
    name: String,
    version: String,
    fields: BTreeMap<RecordField, Vec<JsonCell>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonCell {
    ts: i64,
    value: JsonValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum JsonValue {
    Bool(bool),
    Text(String),
    Blob(Vec<u8>),
}

enum LockMode {
    Shared,
    Exclusive,
}

pub struct FileRowStore {
    dir: PathBuf,
}

impl FileRowStore {
    /// Store rooted at `dir`. Nothing is read or created until first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self) -> PathBuf {
        self.dir.join(TABLE_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }

    /// Layout recorded in the table file
    pub fn layout(&self) -> StoreResult<LayoutVersion> {
        self.with_lock(LockMode::Shared, || Ok(self.load()?.layout))
    }

    fn with_lock<T>(&self, mode: LockMode, f: impl FnOnce() -> StoreResult<T>) -> StoreResult<T> {
        fs::create_dir_all(&self.dir).map_err(access_error)?;
        let lock_file = File::create(self.lock_path()).map_err(access_error)?;
        match mode {
            LockMode::Shared => lock_file.lock_shared(),
            LockMode::Exclusive => lock_file.lock_exclusive(),
        }
        .map_err(access_error)?;

        let result = f();

        let _ = lock_file.unlock();
        result
    }

    fn load(&self) -> StoreResult<JsonTable> {
        let path = self.table_path();
        let content = fs::read_to_string(&path).map_err(|e| StoreError::AccessError {
            message: format!("{}: {}", path.display(), e),
        })?;

        let table: JsonTable =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupted {
                path: path.clone(),
                message: e.to_string(),
            })?;

        if table.layout > LayoutVersion::LATEST {
            return Err(StoreError::Corrupted {
                path,
                message: format!(
                    "layout {} is newer than the supported {}",
                    table.layout,
                    LayoutVersion::LATEST
                ),
            });
        }
        Ok(table)
    }

    fn save(&self, table: &JsonTable) -> StoreResult<()> {
        let content =
            serde_json::to_vec_pretty(table).map_err(|e| StoreError::SerializationError {
                message: e.to_string(),
            })?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(access_error)?;
        tmp.write_all(&content).map_err(access_error)?;
        tmp.as_file().sync_all().map_err(access_error)?;
        tmp.persist(self.table_path())
            .map_err(|e| access_error(e.error))?;
        Ok(())
    }

    /// Load, apply `f` to the rows, save. `f` decides whether anything changed.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<RowKey, Row>) -> (T, bool),
    ) -> StoreResult<T> {
        self.with_lock(LockMode::Exclusive, || {
            let table = self.load()?;
            let layout = table.layout;
            let mut rows = rows_from_json(table.rows);
            let (out, changed) = f(&mut rows);
            if changed {
                self.save(&JsonTable {
                    layout,
                    rows: rows_to_json(&rows),
                })?;
            }
            Ok(out)
        })
    }

    fn read_rows(&self) -> StoreResult<BTreeMap<RowKey, Row>> {
        self.with_lock(LockMode::Shared, || Ok(rows_from_json(self.load()?.rows)))
    }
}

impl RowStore for FileRowStore {
    fn get(&self, key: &RowKey, request: &DataRequest) -> StoreResult<Option<Row>> {
        Ok(self
            .read_rows()?
            .get(key)
            .map(|row| row.project(request))
            .filter(|row| !row.is_empty()))
    }

    fn scan(&self, request: &DataRequest) -> StoreResult<RowScanner<'_>> {
        let request = request.clone();
        let rows = self.read_rows()?;
        Ok(Box::new(
            rows.into_values()
                .map(move |row| row.project(&request))
                .filter(|row| !row.is_empty())
                .map(Ok),
        ))
    }

    fn put(&self, key: &RowKey, field: RecordField, value: CellValue) -> StoreResult<()> {
        self.mutate(|rows| {
            rows.entry(key.clone())
                .or_insert_with(|| Row::new(key.clone()))
                .append(field, value, now_millis());
            ((), true)
        })
    }

    fn check_and_commit(
        &self,
        put: ConditionalPut,
        field: RecordField,
        expected: Option<&CellValue>,
    ) -> StoreResult<bool> {
        self.mutate(|rows| {
            if !ConditionalPut::condition_holds(rows.get(put.key()), field, expected) {
                trace!(key = %put.key(), %field, "conditional commit rejected");
                return (false, false);
            }
            let key = put.key().clone();
            let row = rows.entry(key.clone()).or_insert_with(|| Row::new(key));
            put.apply_to(row, now_millis());
            (true, true)
        })
    }

    fn delete_row(&self, key: &RowKey) -> StoreResult<()> {
        self.mutate(|rows| ((), rows.remove(key).is_some()))
    }
}

impl TableAdmin for FileRowStore {
    fn table_exists(&self) -> bool {
        self.table_path().is_file()
    }

    fn create_table(&self, layout: LayoutVersion) -> StoreResult<()> {
        self.with_lock(LockMode::Exclusive, || {
            debug!(path = %self.table_path().display(), %layout, "creating model table");
            self.save(&JsonTable {
                layout,
                rows: Vec::new(),
            })
        })
    }

    fn migrate_table(&self, to: LayoutVersion) -> StoreResult<()> {
        self.with_lock(LockMode::Exclusive, || {
            let mut table = self.load()?;
            debug!(from = %table.layout, %to, "migrating model table");
            table.layout = to;
            self.save(&table)
        })
    }

    fn drop_table(&self) -> StoreResult<()> {
        self.with_lock(LockMode::Exclusive, || remove_if_present(&self.table_path()))?;
        remove_if_present(&self.lock_path())
    }
}

fn remove_if_present(path: &Path) -> StoreResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(access_error(e)),
    }
}

fn access_error(e: std::io::Error) -> StoreError {
    StoreError::AccessError {
        message: e.to_string(),
    }
}

fn rows_from_json(rows: Vec<JsonRow>) -> BTreeMap<RowKey, Row> {
    rows.into_iter()
        .map(|json| {
            let key = RowKey {
                name: json.name,
                version: json.version,
            };
            let cells = json
                .fields
                .into_iter()
                .map(|(field, cells)| (field, cells.into_iter().map(cell_from_json).collect()))
                .collect();
            (key.clone(), Row::from_cells(key, cells))
        })
        .collect()
}

fn rows_to_json(rows: &BTreeMap<RowKey, Row>) -> Vec<JsonRow> {
    rows.values()
        .filter(|row| !row.is_empty())
        .map(|row| JsonRow {
            name: row.key().name.clone(),
            version: row.key().version.clone(),
            fields: row
                .fields()
                .map(|(field, cells)| (field, cells.iter().map(cell_to_json).collect()))
                .collect(),
        })
        .collect()
}

fn cell_from_json(cell: JsonCell) -> Cell {
    let value = match cell.value {
        JsonValue::Bool(b) => CellValue::Bool(b),
        JsonValue::Text(s) => CellValue::Text(s),
        JsonValue::Blob(bytes) => CellValue::Blob(bytes),
    };
    Cell {
        timestamp: cell.ts,
        value,
    }
}

fn cell_to_json(cell: &Cell) -> JsonCell {
    let value = match &cell.value {
        CellValue::Bool(b) => JsonValue::Bool(*b),
        CellValue::Text(s) => JsonValue::Text(s.clone()),
        CellValue::Blob(bytes) => JsonValue::Blob(bytes.clone()),
    };
    JsonCell {
        ts: cell.timestamp,
        value,
    }
}

/// Decode a table document without touching the filesystem
///
/// Used by the fuzz targets; returns the number of rows on success.
pub fn decode_table(content: &str) -> Result<usize, serde_json::Error> {
    let table: JsonTable = serde_json::from_str(content)?;
    Ok(rows_from_json(table.rows).len())
}
