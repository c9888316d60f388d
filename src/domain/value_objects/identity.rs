//! Artifact Identity Value Object
//!
//! Identities are written `<group>.<artifact>[-<major>.<minor>.<patch>]`,
//! e.g. `org.acme.model` or `org.acme.model-1.0.0`.
//!
//! - The group may contain periods but not hyphens
//! - The artifact may contain neither periods nor hyphens
//! - Segments are non-empty and limited to `[A-Za-z0-9_]`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::version::{SemanticVersion, VersionParseError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("invalid artifact name '{input}': expected <group name>.<artifact name>[-<version>]")]
    InvalidName { input: String },

    #[error(transparent)]
    InvalidVersion(#[from] VersionParseError),
}

/// `(name, version)` pair addressing one artifact record
///
/// The version is optional until the deployment coordinator resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactIdentity {
    name: String,
    version: Option<SemanticVersion>,
}

impl ArtifactIdentity {
    /// Build an identity, validating the name grammar
    pub fn new(
        name: impl Into<String>,
        version: Option<SemanticVersion>,
    ) -> Result<Self, IdentityError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, version })
    }

    pub fn versioned(
        name: impl Into<String>,
        version: SemanticVersion,
    ) -> Result<Self, IdentityError> {
        Self::new(name, Some(version))
    }

    /// Parse `<group>.<artifact>[-<version>]`
    pub fn parse(input: &str) -> Result<Self, IdentityError> {
        match input.split_once('-') {
            Some((name, version)) => Self::new(name, Some(version.parse()?)),
            None => Self::new(input, None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<SemanticVersion> {
        self.version
    }

    pub fn is_version_specified(&self) -> bool {
        self.version.is_some()
    }

    /// Same name, pinned to `version`
    pub fn with_version(&self, version: SemanticVersion) -> Self {
        Self {
            name: self.name.clone(),
            version: Some(version),
        }
    }

    /// Group part of the name (everything before the last period)
    pub fn group(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(group, _)| group)
            .unwrap_or_default()
    }

    /// Artifact part of the name (everything after the last period)
    pub fn artifact(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(_, artifact)| artifact)
            .unwrap_or(&self.name)
    }
}

impl fmt::Display for ArtifactIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(version) => write!(f, "{}-{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for ArtifactIdentity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn validate_name(name: &str) -> Result<(), IdentityError> {
    let invalid = || IdentityError::InvalidName {
        input: name.to_string(),
    };

    let (group, artifact) = name.rsplit_once('.').ok_or_else(invalid)?;
    let segment_ok = |segment: &str| {
        !segment.is_empty()
            && segment
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    };

    if !segment_ok(artifact) || !group.split('.').all(segment_ok) {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_unversioned() {
        let id = ArtifactIdentity::parse("org.acme.model").unwrap();
        assert_eq!(id.name(), "org.acme.model");
        assert_eq!(id.version(), None);
        assert_eq!(id.group(), "org.acme");
        assert_eq!(id.artifact(), "model");
    }

    #[test]
    fn parse_versioned() {
        let id = ArtifactIdentity::parse("org.acme.sample_model-1.0.2").unwrap();
        assert_eq!(id.name(), "org.acme.sample_model");
        assert_eq!(id.version(), Some(SemanticVersion::new(1, 0, 2)));
        assert_eq!(id.to_string(), "org.acme.sample_model-1.0.2");
    }

    #[test]
    fn parse_rejects_missing_group() {
        assert!(matches!(
            ArtifactIdentity::parse("model"),
            Err(IdentityError::InvalidName { .. })
        ));
    }

    #[test]
    fn parse_rejects_bad_version() {
        assert!(matches!(
            ArtifactIdentity::parse("org.acme.model-1.x"),
            Err(IdentityError::InvalidVersion(_))
        ));
    }

    #[test]
    fn parse_rejects_path_like_segments() {
        for input in ["org..model", ".model", "org.", "org/acme.model", "org.acme.mo del"] {
            assert!(ArtifactIdentity::parse(input).is_err(), "accepted {}", input);
        }
    }

    #[test]
    fn with_version_keeps_name() {
        let id = ArtifactIdentity::parse("org.acme.model").unwrap();
        let pinned = id.with_version(SemanticVersion::new(0, 0, 1));
        assert_eq!(pinned.to_string(), "org.acme.model-0.0.1");
        assert!(!id.is_version_specified());
        assert!(pinned.is_version_specified());
    }
}
