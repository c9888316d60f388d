//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.
//!
//! Everything except the lifecycle use case needs an opened [`Repository`],
//! so the layout and base storage are read once and threaded through here.

use std::path::Path;

use crate::application::{
    DeployUseCase, LifecycleUseCase, QueryUseCase, ReadinessUseCase, Repository,
};
use crate::error::ModelRepoResult;
use crate::infrastructure::{FileRowStore, FsUploader, TarPackager, TomlMetaRepository};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<FileRowStore, TarPackager, FsUploader>;

/// Type alias for the concrete QueryUseCase with all dependencies
pub type ConcreteQueryUseCase = QueryUseCase<FileRowStore, FsUploader>;

pub type ConcreteReadinessUseCase = ReadinessUseCase<FileRowStore>;

pub type ConcreteLifecycleUseCase = LifecycleUseCase<TomlMetaRepository, FileRowStore>;

/// Create a lifecycle use case for the repository rooted at `root`
pub fn create_lifecycle_use_case(root: &Path) -> ConcreteLifecycleUseCase {
    LifecycleUseCase::new(root, TomlMetaRepository::new(root), FileRowStore::new(root))
}

/// Open the repository rooted at `root`
pub fn open_repository(root: &Path) -> ModelRepoResult<Repository> {
    create_lifecycle_use_case(root).open()
}

/// Create a deploy use case with all dependencies wired up
pub fn create_deploy_use_case(repo: &Repository) -> ConcreteDeployUseCase {
    DeployUseCase::new(
        FileRowStore::new(repo.root()),
        TarPackager::new(),
        FsUploader::new(),
        repo.base_storage(),
    )
}

pub fn create_query_use_case(repo: &Repository) -> ConcreteQueryUseCase {
    QueryUseCase::new(
        FileRowStore::new(repo.root()),
        FsUploader::new(),
        repo.base_storage(),
    )
}

pub fn create_readiness_use_case(repo: &Repository) -> ConcreteReadinessUseCase {
    ReadinessUseCase::new(FileRowStore::new(repo.root()))
}
