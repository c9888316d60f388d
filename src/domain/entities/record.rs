//! Model record entity
//!
//! The read-side view of a committed row.

use chrono::{DateTime, Utc};

use super::row::{CellValue, Row};
use crate::domain::value_objects::{
    ArtifactIdentity, ContainerBlob, IdentityError, RecordField, SemanticVersion,
};

/// One changelog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

/// A published model, projected to whatever fields were requested
///
/// Fields that were not requested (or never written) are `None`. `messages`
/// holds the retained history, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRecord {
    pub identity: ArtifactIdentity,
    pub location: Option<String>,
    pub production_ready: Option<bool>,
    pub container: Option<ContainerBlob>,
    pub messages: Vec<MessageEntry>,
}

impl ModelRecord {
    pub fn from_row(row: &Row) -> Result<Self, IdentityError> {
        let version: SemanticVersion = row.key().version.parse()?;
        let identity = ArtifactIdentity::versioned(row.key().name.clone(), version)?;

        let messages = row
            .cells(RecordField::Message)
            .iter()
            .filter_map(|cell| {
                let text = cell.value.as_text()?;
                Some(MessageEntry {
                    timestamp: DateTime::from_timestamp_millis(cell.timestamp)?,
                    text: text.to_string(),
                })
            })
            .collect();

        Ok(Self {
            identity,
            location: row
                .most_recent(RecordField::Location)
                .and_then(CellValue::as_text)
                .map(str::to_string),
            production_ready: row
                .most_recent(RecordField::ProductionReady)
                .and_then(CellValue::as_bool),
            container: row
                .most_recent(RecordField::Container)
                .and_then(CellValue::as_blob)
                .map(|bytes| ContainerBlob::new(bytes.to_vec())),
            messages,
        })
    }

    /// Newest changelog entry
    pub fn message(&self) -> Option<&str> {
        self.messages.first().map(|entry| entry.text.as_str())
    }

    pub fn is_production_ready(&self) -> bool {
        self.production_ready.unwrap_or(false)
    }
}
