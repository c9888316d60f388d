//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Resolve, reserve, produce, commit, roll back
//! - `QueryUseCase` - Point reads, listings, location audit
//! - `ReadinessUseCase` - Production-ready updates and removal
//! - `LifecycleUseCase` - Install, open, upgrade, drop

pub mod deploy;
pub mod lifecycle;
pub mod query;
pub mod readiness;

pub use deploy::{DeployOptions, DeployResult, DeploySource, DeployUseCase};
pub use lifecycle::{InstallOutcome, LifecycleUseCase, Repository, UpgradeOutcome};
pub use query::{ListOptions, LocationIssue, QueryUseCase};
pub use readiness::ReadinessUseCase;
