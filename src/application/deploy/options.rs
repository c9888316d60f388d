//! Deploy Options
//!
//! Configuration types for deploy operations.

use std::path::PathBuf;

use crate::domain::value_objects::{ArtifactIdentity, ContainerBlob};

/// Where the deployed package comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploySource {
    /// Package and upload local files
    Fresh {
        primary: PathBuf,
        dependencies: Vec<PathBuf>,
    },
    /// Reuse the stored package of an existing, committed artifact
    Clone { source: ArtifactIdentity },
}

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Target; without a version the next patch version is used
    pub identity: ArtifactIdentity,
    pub source: DeploySource,
    pub container: ContainerBlob,
    pub production_ready: bool,
    /// Changelog entry; `None` writes no message cell
    pub message: Option<String>,
}

impl DeployOptions {
    pub fn fresh(identity: ArtifactIdentity, primary: impl Into<PathBuf>) -> Self {
        Self::new(
            identity,
            DeploySource::Fresh {
                primary: primary.into(),
                dependencies: Vec::new(),
            },
        )
    }

    pub fn clone_from(identity: ArtifactIdentity, source: ArtifactIdentity) -> Self {
        Self::new(identity, DeploySource::Clone { source })
    }

    fn new(identity: ArtifactIdentity, source: DeploySource) -> Self {
        Self {
            identity,
            source,
            container: ContainerBlob::default(),
            production_ready: false,
            message: None,
        }
    }

    /// Replace the dependency list. Ignored for clone deploys.
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = PathBuf>) -> Self {
        if let DeploySource::Fresh { dependencies, .. } = &mut self.source {
            *dependencies = deps.into_iter().collect();
        }
        self
    }

    pub fn with_container(mut self, container: impl Into<ContainerBlob>) -> Self {
        self.container = container.into();
        self
    }

    pub fn with_production_ready(mut self, ready: bool) -> Self {
        self.production_ready = ready;
        self
    }

    /// Set the changelog entry. An empty string counts as no message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message = (!message.is_empty()).then_some(message);
        self
    }
}
