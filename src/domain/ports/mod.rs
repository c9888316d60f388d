//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod deploy_events;
pub mod meta_repository;
pub mod packager;
pub mod row_store;
pub mod uploader;

pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use meta_repository::{MetaError, MetaRepository, TableAdmin};
pub use packager::{PackageError, PackagedArtifact, Packager};
pub use row_store::{ConditionalPut, RowScanner, RowStore, StoreError, StoreResult};
pub use uploader::{ArtifactUploader, UploadError};
