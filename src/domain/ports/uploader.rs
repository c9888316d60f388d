//! ArtifactUploader port
//!
//! Moves a packaged unit into durable storage and answers whether a stored
//! location still holds an intact package.

use std::path::{Path, PathBuf};

use super::packager::PackagedArtifact;
use crate::domain::value_objects::ArtifactIdentity;

pub trait ArtifactUploader: Send + Sync {
    /// Store `package` for `identity` under `base` and return its location,
    /// relative to `base`. `identity` must carry a version.
    fn upload(
        &self,
        identity: &ArtifactIdentity,
        base: &Path,
        package: &PackagedArtifact,
    ) -> Result<String, UploadError>;

    /// Check that `location` resolves to a stored package. With `download`,
    /// also fetch it and confirm its integrity.
    fn verify(&self, base: &Path, location: &str, download: bool) -> Result<(), UploadError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("cannot upload '{identity}': no version resolved")]
    Unversioned { identity: String },

    #[error("failed to write {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    #[error("artifact not found at {location}")]
    NotFound { location: String },

    #[error("checksum mismatch for {location}: expected {expected}, found {actual}")]
    ChecksumMismatch {
        location: String,
        expected: String,
        actual: String,
    },

    #[error("artifact at {location} is unreadable: {message}")]
    Unreadable { location: String, message: String },
}
