//! Record Field Value Object
//!
//! The column names of an artifact record. These strings are the wire contract
//! with the row store, so they must never change spelling.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Uploaded,
    Location,
    ProductionReady,
    Message,
    Container,
}

impl RecordField {
    pub const ALL: [RecordField; 5] = [
        RecordField::Uploaded,
        RecordField::Location,
        RecordField::ProductionReady,
        RecordField::Message,
        RecordField::Container,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordField::Uploaded => "uploaded",
            RecordField::Location => "location",
            RecordField::ProductionReady => "production_ready",
            RecordField::Message => "message",
            RecordField::Container => "container",
        }
    }

    /// Fields returned by queries when the caller asks for none in particular.
    /// `uploaded` is a visibility gate, never part of a result.
    pub fn default_projection() -> BTreeSet<RecordField> {
        [
            RecordField::Container,
            RecordField::Location,
            RecordField::ProductionReady,
            RecordField::Message,
        ]
        .into_iter()
        .collect()
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}' (expected one of: uploaded, location, production_ready, message, container)")]
pub struct UnknownFieldError(pub String);

impl FromStr for RecordField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
