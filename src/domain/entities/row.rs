//! Row entity
//!
//! A row of the model table: one key, and for every field a list of
//! timestamped cells kept newest first.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::value_objects::{ArtifactIdentity, ContainerBlob, RecordField, SemanticVersion};

/// Table key: the name and canonical version string of an artifact
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey {
    pub name: String,
    pub version: String,
}

impl RowKey {
    pub fn new(name: impl Into<String>, version: SemanticVersion) -> Self {
        Self {
            name: name.into(),
            version: version.to_canonical_string(),
        }
    }

    /// Key for a versioned identity; `None` while the version is unresolved.
    pub fn for_identity(identity: &ArtifactIdentity) -> Option<Self> {
        identity
            .version()
            .map(|version| Self::new(identity.name(), version))
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Bool(bool),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            CellValue::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<ContainerBlob> for CellValue {
    fn from(blob: ContainerBlob) -> Self {
        CellValue::Blob(blob.into_bytes())
    }
}

/// One timestamped value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub value: CellValue,
}

/// Which fields, and how many versions of each, a read should return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRequest {
    /// `None` selects every field
    pub fields: Option<BTreeSet<RecordField>>,
    pub max_versions: usize,
}

impl DataRequest {
    /// All fields, newest cell only
    pub fn all() -> Self {
        Self {
            fields: None,
            max_versions: 1,
        }
    }

    pub fn fields(fields: impl IntoIterator<Item = RecordField>) -> Self {
        Self {
            fields: Some(fields.into_iter().collect()),
            max_versions: 1,
        }
    }

    pub fn with_max_versions(mut self, max_versions: usize) -> Self {
        self.max_versions = max_versions;
        self
    }

    pub fn includes(&self, field: RecordField) -> bool {
        self.fields.as_ref().map_or(true, |f| f.contains(&field))
    }
}

impl Default for DataRequest {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: RowKey,
    cells: BTreeMap<RecordField, Vec<Cell>>,
}

impl Row {
    pub fn new(key: RowKey) -> Self {
        Self {
            key,
            cells: BTreeMap::new(),
        }
    }

    /// Rebuild a row from stored cells. Each list is re-sorted newest first.
    pub fn from_cells(key: RowKey, cells: BTreeMap<RecordField, Vec<Cell>>) -> Self {
        let cells = cells
            .into_iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(field, mut list)| {
                list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                (field, list)
            })
            .collect();
        Self { key, cells }
    }

    pub fn key(&self) -> &RowKey {
        &self.key
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, field: RecordField) -> bool {
        self.cells.contains_key(&field)
    }

    /// Newest value of `field`
    pub fn most_recent(&self, field: RecordField) -> Option<&CellValue> {
        self.cells
            .get(&field)
            .and_then(|list| list.first())
            .map(|cell| &cell.value)
    }

    /// All retained cells of `field`, newest first
    pub fn cells(&self, field: RecordField) -> &[Cell] {
        self.cells.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = (RecordField, &[Cell])> + '_ {
        self.cells.iter().map(|(field, list)| (*field, list.as_slice()))
    }

    /// Record a new value for `field`.
    ///
    /// The cell's timestamp is `now_millis`, bumped past the field's current
    /// newest cell if the clock has not moved on.
    pub fn append(&mut self, field: RecordField, value: CellValue, now_millis: i64) {
        let list = self.cells.entry(field).or_default();
        let timestamp = match list.first() {
            Some(newest) if newest.timestamp >= now_millis => newest.timestamp + 1,
            _ => now_millis,
        };
        list.insert(0, Cell { timestamp, value });
    }

    /// Copy of this row limited to the requested fields and versions
    pub fn project(&self, request: &DataRequest) -> Row {
        let cells = self
            .cells
            .iter()
            .filter(|(field, _)| request.includes(**field))
            .map(|(field, list)| {
                let kept = list.iter().take(request.max_versions).cloned().collect();
                (*field, kept)
            })
            .collect();
        Row::from_cells(self.key.clone(), cells)
    }
}
