//! Tar packager
//!
//! The primary file goes at the archive root under its own file name;
//! dependencies go under `lib/`.

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::ports::{PackageError, PackagedArtifact, Packager};

pub const LIB_DIR: &str = "lib";

#[derive(Debug, Default, Clone, Copy)]
pub struct TarPackager;

impl TarPackager {
    pub fn new() -> Self {
        Self
    }
}

impl Packager for TarPackager {
    fn package(
        &self,
        primary: &Path,
        dependencies: &[PathBuf],
    ) -> Result<PackagedArtifact, PackageError> {
        let primary_name = file_name(primary)?;
        let mut entries = vec![(primary.to_path_buf(), PathBuf::from(primary_name))];
        for dependency in dependencies {
            let name = file_name(dependency)?;
            entries.push((dependency.clone(), Path::new(LIB_DIR).join(name)));
        }

        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |e: std::io::Error| PackageError::Io {
                path,
                message: e.to_string(),
            }
        };

        let mut tmp = tempfile::Builder::new()
            .prefix("modelrepo-")
            .suffix(".tar")
            .tempfile()
            .map_err(io_err(primary))?;

        {
            let mut builder = tar::Builder::new(tmp.as_file_mut());
            for (source, name) in &entries {
                let mut file = File::open(source).map_err(io_err(source))?;
                builder
                    .append_file(name, &mut file)
                    .map_err(io_err(source))?;
            }
            builder.finish().map_err(io_err(primary))?;
        }

        let file = tmp.as_file_mut();
        file.flush().map_err(io_err(primary))?;
        let size = file.seek(SeekFrom::End(0)).map_err(io_err(primary))?;

        debug!(
            primary = %primary.display(),
            entries = entries.len(),
            size,
            "packaged artifact"
        );

        Ok(PackagedArtifact::new(tmp.into_temp_path(), entries.len()))
    }
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr, PackageError> {
    if !path.is_file() {
        return Err(PackageError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    path.file_name().ok_or_else(|| PackageError::MissingInput {
        path: path.to_path_buf(),
    })
}
