//! Deploy Module
//!
//! Publishes a new artifact version.
//!
//! ## Structure
//!
//! - `options` - What to deploy (`DeployOptions`, `DeploySource`)
//! - `result` - What was committed (`DeployResult`)
//! - `use_case` - The coordinator state machine (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use modelrepo::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(store, packager, uploader, base_storage);
//! let result = use_case.execute(&DeployOptions::fresh(identity, "model.jar"))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::{DeployOptions, DeploySource};
pub use result::DeployResult;
pub use use_case::DeployUseCase;
