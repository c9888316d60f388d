//! Domain Entities
//!
//! - `Row` - One key of the model table with its versioned cells
//! - `ModelRecord` - Read-side view of a committed row
//! - `RepositoryMeta` - Layout version and storage root of a repository

mod record;
mod repository_meta;
mod row;

pub use record::{MessageEntry, ModelRecord};
pub use repository_meta::RepositoryMeta;
pub use row::{Cell, CellValue, DataRequest, Row, RowKey};
