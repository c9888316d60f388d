//! Configuration module for modelrepo
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (MODELREPO_*)
//! 3. Project config (./modelrepo.toml)
//! 4. User config (<config dir>/modelrepo/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_layered, load_with_warnings, user_config_path, with_env_overrides, with_overrides_from,
    ConfigError, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{Config, DeployConfig, OutputConfig, RepositoryConfig, Verbosity};
