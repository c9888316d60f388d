//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use super::types::{Config, Verbosity};

pub const PROJECT_CONFIG_FILE: &str = "modelrepo.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        load_with_warnings(path).map(|(config, _)| config)
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from `./modelrepo.toml`, the user config file, or defaults, then
/// apply `MODELREPO_*` overrides.
///
/// The first file found wins; files are not merged.
pub fn load_layered(project_dir: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let candidates = [
        Some(project_dir.join(PROJECT_CONFIG_FILE)),
        user_config_path(),
    ];

    for path in candidates.into_iter().flatten() {
        if path.is_file() {
            let (config, warnings) = load_with_warnings(&path)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// `<config dir>/modelrepo/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("modelrepo").join("config.toml"))
}

/// Apply environment variable overrides (MODELREPO_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |name| std::env::var(name).ok())
}

/// Apply overrides looked up through `var`
pub fn with_overrides_from(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // MODELREPO_PATH
    if let Some(path) = var("MODELREPO_PATH").filter(|p| !p.is_empty()) {
        config.repository.path = PathBuf::from(path);
    }

    // MODELREPO_BASE_STORAGE
    if let Some(base) = var("MODELREPO_BASE_STORAGE").filter(|b| !b.is_empty()) {
        config.repository.base_storage = base;
    }

    // MODELREPO_VERBOSITY
    if let Some(verbosity) = var("MODELREPO_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "repository",
        "path",
        "base_storage",
        "deploy",
        "production_ready",
        "message",
        "output",
        "verbosity",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
