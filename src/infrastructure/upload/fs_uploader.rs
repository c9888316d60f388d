//! Filesystem uploader
//!
//! Copies packages under a base directory at
//! `<group path>/<artifact>/<version>/<artifact>-<version>.tar`, where the
//! group path is the group with `.` replaced by `/`, and writes the
//! package digest to a `.sha256` file beside it.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::domain::ports::{ArtifactUploader, PackagedArtifact, UploadError};
use crate::domain::value_objects::{ArtifactIdentity, PackageDigest};

pub const PACKAGE_EXTENSION: &str = "tar";
pub const DIGEST_EXTENSION: &str = "sha256";

/// Canonical relative location of the package for `identity`
///
/// `None` when the identity carries no version.
pub fn storage_location(identity: &ArtifactIdentity) -> Option<String> {
    let version = identity.version()?;
    let artifact = identity.artifact();
    let mut parts: Vec<&str> = identity.group().split('.').collect();
    let version = version.to_string();
    let file = format!("{artifact}-{version}.{PACKAGE_EXTENSION}");
    parts.push(artifact);
    parts.push(&version);
    parts.push(&file);
    Some(parts.join("/"))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsUploader;

impl FsUploader {
    pub fn new() -> Self {
        Self
    }

    fn digest_path(package: &Path) -> PathBuf {
        let mut name = package.as_os_str().to_owned();
        name.push(".");
        name.push(DIGEST_EXTENSION);
        PathBuf::from(name)
    }

    /// Join `location` onto `base`, refusing anything that would leave `base`
    fn resolve(base: &Path, location: &str) -> Result<PathBuf, UploadError> {
        let relative = Path::new(location);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if location.is_empty() || escapes {
            return Err(UploadError::NotFound {
                location: location.to_string(),
            });
        }
        Ok(base.join(relative))
    }
}

impl ArtifactUploader for FsUploader {
    fn upload(
        &self,
        identity: &ArtifactIdentity,
        base: &Path,
        package: &PackagedArtifact,
    ) -> Result<String, UploadError> {
        let location = storage_location(identity).ok_or_else(|| UploadError::Unversioned {
            identity: identity.to_string(),
        })?;
        let dest = Self::resolve(base, &location)?;
        let write_err = |path: &Path| {
            let path = path.to_path_buf();
            move |e: io::Error| UploadError::WriteFailed {
                path,
                message: e.to_string(),
            }
        };

        let parent = dest.parent().unwrap_or(base);
        fs::create_dir_all(parent).map_err(write_err(parent))?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err(parent))?;
        let mut source = File::open(package.path()).map_err(write_err(package.path()))?;
        io::copy(&mut source, tmp.as_file_mut()).map_err(write_err(&dest))?;
        tmp.as_file().sync_all().map_err(write_err(&dest))?;
        tmp.persist(&dest).map_err(|e| write_err(&dest)(e.error))?;

        let digest = PackageDigest::of_reader(File::open(&dest).map_err(write_err(&dest))?)
            .map_err(write_err(&dest))?;
        let digest_path = Self::digest_path(&dest);
        fs::write(&digest_path, format!("{digest}\n")).map_err(write_err(&digest_path))?;

        info!(identity = %identity, %location, %digest, "uploaded artifact");
        Ok(location)
    }

    fn verify(&self, base: &Path, location: &str, download: bool) -> Result<(), UploadError> {
        let path = Self::resolve(base, location)?;
        if !path.is_file() {
            return Err(UploadError::NotFound {
                location: location.to_string(),
            });
        }
        if !download {
            return Ok(());
        }

        let unreadable = |message: String| UploadError::Unreadable {
            location: location.to_string(),
            message,
        };

        let expected = fs::read_to_string(Self::digest_path(&path))
            .map(|raw| PackageDigest::new(&raw))
            .map_err(|e| unreadable(format!("digest file: {e}")))?;
        let open = || File::open(&path).map_err(|e| unreadable(e.to_string()));
        let actual = PackageDigest::of_reader(open()?).map_err(|e| unreadable(e.to_string()))?;
        if actual != expected {
            return Err(UploadError::ChecksumMismatch {
                location: location.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }

        let mut archive = tar::Archive::new(open()?);
        let entries = archive
            .entries()
            .map_err(|e| unreadable(e.to_string()))?;
        let mut count = 0usize;
        for entry in entries {
            let mut entry = entry.map_err(|e| unreadable(e.to_string()))?;
            io::copy(&mut entry, &mut io::sink()).map_err(|e| unreadable(e.to_string()))?;
            count += 1;
        }
        if count == 0 {
            return Err(unreadable("archive has no entries".to_string()));
        }

        debug!(location, entries = count, "verified artifact");
        Ok(())
    }
}
