//! Deploy Result

use crate::domain::value_objects::ArtifactIdentity;

/// A committed deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployResult {
    /// The target, with its version resolved
    pub identity: ArtifactIdentity,
    /// Stored package location, relative to the base storage
    pub location: String,
    /// Whether the version was picked by the resolver
    pub auto_versioned: bool,
}
