//! modelrepo - versioned model artifact registry
//!
//! Records immutable, versioned model packages and their metadata, and
//! coordinates concurrent publication so that two deployers never clobber
//! each other and a failed deploy leaves nothing visible behind.
//!
//! Layers follow the usual split: `domain` (entities, ports, services),
//! `infrastructure` (row stores, packager, uploader), `application` (use
//! cases) and `presentation` (wiring and rendering).

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{DeployOptions, DeployResult, DeployUseCase, QueryUseCase};
pub use config::Config;
pub use domain::entities::{ModelRecord, RowKey};
pub use domain::value_objects::{ArtifactIdentity, RecordField, SemanticVersion};
pub use error::{ModelRepoError, ModelRepoResult};
