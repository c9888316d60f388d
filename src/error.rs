//! Error types for modelrepo
//!
//! Uses `thiserror` for library errors. Each port has its own error enum;
//! [`ModelRepoError`] is what the use cases return.

use thiserror::Error;

use crate::domain::entities::RowKey;
use crate::domain::ports::{MetaError, PackageError, StoreError, UploadError};
use crate::domain::services::ResolveError;
use crate::domain::value_objects::{IdentityError, RecordField, SemanticVersion};

/// Result type alias for registry operations
pub type ModelRepoResult<T> = Result<T, ModelRepoError>;

/// Main error type for registry operations
#[derive(Error, Debug)]
pub enum ModelRepoError {
    /// Bad input detected before anything was written
    #[error("{message}")]
    Precondition { message: String },

    /// Another deployer already reserved this version
    #[error("Error Version {version} exists.")]
    Conflict { version: SemanticVersion },

    /// A requested model or one of its fields is not readable
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Packaging or upload failed after the reservation
    #[error("artifact upload failed: {0}")]
    Upload(#[from] ArtifactError),

    /// The compensating delete failed too; the reservation is still in the table
    #[error("deploy of {key} failed ({cause}) and its reservation could not be removed: {rollback}")]
    Rollback {
        key: RowKey,
        cause: Box<ModelRepoError>,
        rollback: StoreError,
    },

    /// Commit found the row no longer reserved
    #[error("commit of {key} rejected: the row is no longer reserved")]
    Consistency { key: RowKey },

    #[error("Model {name}-{version} does not exist.")]
    ModelNotFound {
        name: String,
        version: SemanticVersion,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Meta(#[from] MetaError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl ModelRepoError {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<PackageError> for ModelRepoError {
    fn from(err: PackageError) -> Self {
        Self::Upload(ArtifactError::Package(err))
    }
}

impl From<UploadError> for ModelRepoError {
    fn from(err: UploadError) -> Self {
        Self::Upload(ArtifactError::Upload(err))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// Absent, or reserved but never committed
    #[error("requested model could not be extracted")]
    ModelMissing,

    #[error("required field was not extracted: {field}")]
    FieldMissing { field: RecordField },
}

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error(transparent)]
    Package(#[from] PackageError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}
