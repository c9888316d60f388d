//! MetaRepository and TableAdmin ports
//!
//! Repository-level administration: the metadata record and the existence
//! and layout of the model table itself.

use std::path::PathBuf;

use crate::domain::entities::RepositoryMeta;
use crate::domain::value_objects::LayoutVersion;

use super::row_store::StoreError;

pub trait MetaRepository: Send + Sync {
    fn exists(&self) -> bool;
    fn load(&self) -> Result<RepositoryMeta, MetaError>;
    fn save(&self, meta: &RepositoryMeta) -> Result<(), MetaError>;
    fn remove(&self) -> Result<(), MetaError>;
}

/// Creation, migration and removal of the model table
pub trait TableAdmin: Send + Sync {
    fn table_exists(&self) -> bool;
    fn create_table(&self, layout: LayoutVersion) -> Result<(), StoreError>;
    /// Rewrite the table at `to`. Rows are carried over unchanged.
    fn migrate_table(&self, to: LayoutVersion) -> Result<(), StoreError>;
    fn drop_table(&self) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MetaError {
    #[error("no model repository at {path}\n  → Run: modelrepo init")]
    NotInstalled { path: PathBuf },

    #[error("{path} exists but is not a model repository")]
    NotARepository { path: PathBuf },

    #[error("repository layout {found} is newer than the supported {supported}; upgrade modelrepo")]
    UnsupportedLayout {
        found: LayoutVersion,
        supported: LayoutVersion,
    },

    #[error("Failed to access repository metadata: {message}")]
    AccessError { message: String },

    #[error("Failed to serialize repository metadata: {message}")]
    SerializationError { message: String },

    #[error("repository metadata corrupted: {path}\n  → Details: {message}")]
    Corrupted { path: PathBuf, message: String },

    #[error(transparent)]
    Table(#[from] StoreError),
}
