//! Row Store Implementations
//!
//! - `MemoryRowStore`: process-local table for tests and embedding
//! - `FileRowStore`: JSON table guarded by an advisory file lock

mod file;
mod memory;

pub use file::{decode_table, FileRowStore};
pub use memory::MemoryRowStore;

/// Wall-clock milliseconds used as cell timestamps
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
