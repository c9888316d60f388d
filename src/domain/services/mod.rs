//! Domain Services
//!
//! Business logic that operates on domain entities through ports.

mod version_resolver;

pub use version_resolver::{next_version, ResolveError};
