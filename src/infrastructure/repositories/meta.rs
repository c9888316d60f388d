//! TOML Meta Repository
//!
//! Persists repository metadata at `<root>/repo.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::entities::RepositoryMeta;
use crate::domain::ports::{MetaError, MetaRepository};
use crate::domain::value_objects::LayoutVersion;

pub const META_FILE: &str = "repo.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlMeta {
    layout: LayoutVersion,
    base_storage: String,
}

pub struct TomlMetaRepository {
    path: PathBuf,
}

impl TomlMetaRepository {
    /// Metadata of the repository rooted at `root`
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(META_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn root(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

impl MetaRepository for TomlMetaRepository {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> Result<RepositoryMeta, MetaError> {
        if !self.path.exists() {
            return Err(MetaError::NotInstalled { path: self.root() });
        }

        let content = fs::read_to_string(&self.path).map_err(|e| MetaError::AccessError {
            message: e.to_string(),
        })?;

        let meta: TomlMeta = toml::from_str(&content).map_err(|e| MetaError::Corrupted {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        Ok(RepositoryMeta {
            layout: meta.layout,
            base_storage: meta.base_storage,
        })
    }

    fn save(&self, meta: &RepositoryMeta) -> Result<(), MetaError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| MetaError::AccessError {
                message: e.to_string(),
            })?;
        }

        let lock_file = fs::File::create(self.lock_path()).map_err(|e| MetaError::AccessError {
            message: e.to_string(),
        })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| MetaError::AccessError {
                message: e.to_string(),
            })?;

        let toml_meta = TomlMeta {
            layout: meta.layout,
            base_storage: meta.base_storage.clone(),
        };
        let result = toml::to_string_pretty(&toml_meta)
            .map_err(|e| MetaError::SerializationError {
                message: e.to_string(),
            })
            .and_then(|content| {
                fs::write(&self.path, content).map_err(|e| MetaError::AccessError {
                    message: e.to_string(),
                })
            });

        let _ = lock_file.unlock();
        result
    }

    fn remove(&self) -> Result<(), MetaError> {
        for path in [self.path.clone(), self.lock_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(MetaError::AccessError {
                        message: e.to_string(),
                    })
                }
            }
        }
        Ok(())
    }
}
