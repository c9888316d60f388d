//! Command handlers
//!
//! Each handler turns parsed arguments into a use case call and prints the
//! rendered result. Errors propagate to `main`.

pub mod deploy;
pub mod lifecycle;
pub mod query;
pub mod readiness;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use modelrepo::application::Repository;
use modelrepo::presentation::{factory, OutputFormat};
use modelrepo::{Config, RecordField};

/// Settings shared by every command
pub struct Context {
    pub root: PathBuf,
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    pub fn open(&self) -> Result<Repository> {
        factory::open_repository(&self.root)
            .with_context(|| format!("failed to open repository at {}", self.root.display()))
    }

    pub fn root_display(&self) -> String {
        self.root.display().to_string()
    }
}

pub fn emit(rendered: &str) {
    if !rendered.is_empty() {
        println!("{rendered}");
    }
}

/// An empty `--fields` list means the default projection
pub fn field_selection(fields: Vec<RecordField>) -> Option<BTreeSet<RecordField>> {
    if fields.is_empty() {
        None
    } else {
        Some(fields.into_iter().collect())
    }
}
