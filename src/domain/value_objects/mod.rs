//! Value Objects
//!
//! Immutable, validated values used throughout the domain.

mod container;
mod field;
mod hash;
mod identity;
mod layout;
mod version;

pub use container::ContainerBlob;
pub use field::{RecordField, UnknownFieldError};
pub use hash::PackageDigest;
pub use identity::{ArtifactIdentity, IdentityError};
pub use layout::{LayoutParseError, LayoutVersion};
pub use version::{SemanticVersion, VersionParseError};
