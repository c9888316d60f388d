//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod meta;

pub use meta::{TomlMetaRepository, META_FILE};
