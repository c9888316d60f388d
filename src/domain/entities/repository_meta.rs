//! Repository metadata entity

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::LayoutVersion;

/// What a repository records about itself
///
/// Read once when the repository is opened; the handle carries it from there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMeta {
    pub layout: LayoutVersion,
    /// Root the uploader writes packages under, relative to the repository
    /// root unless absolute
    pub base_storage: String,
}

impl RepositoryMeta {
    pub fn new(base_storage: impl Into<String>) -> Self {
        Self {
            layout: LayoutVersion::LATEST,
            base_storage: base_storage.into(),
        }
    }

    pub fn needs_upgrade(&self) -> bool {
        self.layout < LayoutVersion::LATEST
    }
}
