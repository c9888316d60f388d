//! Repository Lifecycle Use Case
//!
//! Install, open, upgrade and drop a model repository. A repository is a
//! directory holding its metadata and the model table.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::entities::RepositoryMeta;
use crate::domain::ports::{MetaError, MetaRepository, TableAdmin};
use crate::domain::value_objects::LayoutVersion;
use crate::error::ModelRepoResult;

/// An opened repository
///
/// Layout and base storage are read once at open time and travel with the
/// handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    root: PathBuf,
    meta: RepositoryMeta,
}

impl Repository {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> LayoutVersion {
        self.meta.layout
    }

    pub fn meta(&self) -> &RepositoryMeta {
        &self.meta
    }

    /// Directory packages are uploaded under
    pub fn base_storage(&self) -> PathBuf {
        let base = Path::new(&self.meta.base_storage);
        if base.is_absolute() {
            base.to_path_buf()
        } else {
            self.root.join(base)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Upgraded { from: LayoutVersion },
    AlreadyCurrent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Upgraded { from: LayoutVersion },
    AlreadyCurrent,
}

pub struct LifecycleUseCase<M, T>
where
    M: MetaRepository,
    T: TableAdmin,
{
    root: PathBuf,
    meta: M,
    table: T,
}

impl<M, T> LifecycleUseCase<M, T>
where
    M: MetaRepository,
    T: TableAdmin,
{
    pub fn new(root: impl Into<PathBuf>, meta: M, table: T) -> Self {
        Self {
            root: root.into(),
            meta,
            table,
        }
    }

    /// Create the repository, or upgrade it if one is already there
    pub fn install(&self, base_storage: &str) -> ModelRepoResult<InstallOutcome> {
        if self.meta.exists() {
            return Ok(match self.upgrade()? {
                UpgradeOutcome::Upgraded { from } => InstallOutcome::Upgraded { from },
                UpgradeOutcome::AlreadyCurrent => InstallOutcome::AlreadyCurrent,
            });
        }
        self.ensure_not_foreign()?;

        let meta = RepositoryMeta::new(base_storage);
        self.table.create_table(meta.layout).map_err(MetaError::from)?;
        self.meta.save(&meta)?;
        info!(root = %self.root.display(), layout = %meta.layout, "installed model repository");
        Ok(InstallOutcome::Installed)
    }

    /// Read the metadata and hand back a repository handle
    ///
    /// A repository written by a newer release is refused; an older layout
    /// opens with a warning.
    pub fn open(&self) -> ModelRepoResult<Repository> {
        let meta = self.meta.load()?;
        check_supported(meta.layout)?;
        if !self.table.table_exists() {
            return Err(MetaError::NotARepository {
                path: self.root.clone(),
            }
            .into());
        }
        if meta.needs_upgrade() {
            warn!(
                layout = %meta.layout,
                latest = %LayoutVersion::LATEST,
                "repository layout is out of date; run `modelrepo upgrade`"
            );
        }
        Ok(Repository {
            root: self.root.clone(),
            meta,
        })
    }

    /// Bring the table and metadata to the latest layout
    pub fn upgrade(&self) -> ModelRepoResult<UpgradeOutcome> {
        let mut meta = self.meta.load()?;
        check_supported(meta.layout)?;
        if !meta.needs_upgrade() {
            return Ok(UpgradeOutcome::AlreadyCurrent);
        }

        let from = meta.layout;
        self.table
            .migrate_table(LayoutVersion::LATEST)
            .map_err(MetaError::from)?;
        meta.layout = LayoutVersion::LATEST;
        self.meta.save(&meta)?;
        info!(%from, to = %LayoutVersion::LATEST, "upgraded model repository");
        Ok(UpgradeOutcome::Upgraded { from })
    }

    /// Delete the table and metadata. Stored packages are left alone.
    pub fn drop_repository(&self) -> ModelRepoResult<()> {
        if !self.meta.exists() {
            if self.table.table_exists() {
                return Err(MetaError::NotARepository {
                    path: self.root.clone(),
                }
                .into());
            }
            return Err(MetaError::NotInstalled {
                path: self.root.clone(),
            }
            .into());
        }

        self.table.drop_table().map_err(MetaError::from)?;
        self.meta.remove()?;
        // Only succeeds when nothing else (e.g. base storage) lives in the root.
        let _ = fs::remove_dir(&self.root);
        info!(root = %self.root.display(), "dropped model repository");
        Ok(())
    }

    fn ensure_not_foreign(&self) -> ModelRepoResult<()> {
        let foreign = (self.root.exists() && !self.root.is_dir()) || self.table.table_exists();
        if foreign {
            return Err(MetaError::NotARepository {
                path: self.root.clone(),
            }
            .into());
        }
        Ok(())
    }
}

fn check_supported(layout: LayoutVersion) -> Result<(), MetaError> {
    if layout > LayoutVersion::LATEST {
        return Err(MetaError::UnsupportedLayout {
            found: layout,
            supported: LayoutVersion::LATEST,
        });
    }
    Ok(())
}
