//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `store/` - Row stores (Memory, File)
//! - `packaging/` - Tar packager
//! - `upload/` - Filesystem uploader
//! - `repositories/` - Repository metadata
//! - `events/` - Deploy event sinks

pub mod events;
pub mod packaging;
pub mod repositories;
pub mod store;
pub mod upload;

pub use events::JsonEventSink;
pub use packaging::TarPackager;
pub use repositories::TomlMetaRepository;
pub use store::{FileRowStore, MemoryRowStore};
pub use upload::FsUploader;
