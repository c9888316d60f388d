//! Packager port
//!
//! Bundles a primary file and its dependencies into one uploadable unit.

use std::path::{Path, PathBuf};

use tempfile::TempPath;

pub trait Packager: Send + Sync {
    fn package(
        &self,
        primary: &Path,
        dependencies: &[PathBuf],
    ) -> Result<PackagedArtifact, PackageError>;
}

/// A packaged unit on local disk
///
/// The file is temporary: it is removed when the value is dropped, whether or
/// not the upload succeeded.
#[derive(Debug)]
pub struct PackagedArtifact {
    file: TempPath,
    entries: usize,
}

impl PackagedArtifact {
    pub fn new(file: TempPath, entries: usize) -> Self {
        Self { file, entries }
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Number of files in the package
    pub fn entries(&self) -> usize {
        self.entries
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("package input not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("failed to package {path}: {message}")]
    Io { path: PathBuf, message: String },
}
