//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! Argument parsing lives with the binary.
//!
//! ## Usage
//!
//! ```ignore
//! use modelrepo::presentation::factory;
//!
//! let repo = factory::open_repository(Path::new(".modelrepo"))?;
//! let result = factory::create_deploy_use_case(&repo).execute(&options)?;
//! ```

pub mod factory;
pub mod output;

pub use factory::{create_deploy_use_case, open_repository};
pub use output::OutputFormat;
