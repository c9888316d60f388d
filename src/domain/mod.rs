//! Domain Layer
//!
//! The registry's model and rules, without I/O of its own.
//!
//! ## Structure
//!
//! - `entities/` - Rows, records and repository metadata
//! - `value_objects/` - Identities, versions, field names, layout ids
//! - `services/` - Version resolution
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Ports & Adapters** - All storage and transport go through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
