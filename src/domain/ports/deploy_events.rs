//! Deploy Event Port
//!
//! Observable progress of the deployment coordinator. Each state transition
//! of a deploy emits exactly one event.

use crate::domain::value_objects::{ArtifactIdentity, SemanticVersion};

/// Event emitted during deploy operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Target version decided
    Resolved {
        name: String,
        version: SemanticVersion,
        /// Whether the version came from the resolver rather than the caller
        auto: bool,
    },

    /// Row reserved with `uploaded = false`
    Reserved { identity: ArtifactIdentity },

    /// Another deployer already holds the key
    Conflict { identity: ArtifactIdentity },

    /// Package uploaded (or source location copied)
    Produced {
        identity: ArtifactIdentity,
        location: String,
    },

    /// Row published with `uploaded = true`
    Committed {
        identity: ArtifactIdentity,
        location: String,
    },

    /// Reservation deleted after a failure
    RolledBack {
        identity: ArtifactIdentity,
        reason: String,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - JsonEventSink: NDJSON event stream for scripting
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
