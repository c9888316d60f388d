//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the repository lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository root
    #[serde(default = "default_repository_path")]
    pub path: PathBuf,

    /// Package storage, relative to the repository root unless absolute.
    /// Only read by `init`; an installed repository records its own.
    #[serde(default = "default_base_storage")]
    pub base_storage: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: default_repository_path(),
            base_storage: default_base_storage(),
        }
    }
}

fn default_repository_path() -> PathBuf {
    PathBuf::from(".modelrepo")
}

fn default_base_storage() -> String {
    "artifacts".to_string()
}

/// Defaults for `modelrepo deploy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeployConfig {
    #[serde(default)]
    pub production_ready: bool,

    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Raise the level by `count` `-v` flags
    pub fn bumped(self, count: u8) -> Self {
        match (self as u8).saturating_add(count) {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            2 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }

    /// `tracing` filter directive for this level
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}
