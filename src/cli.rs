use std::path::PathBuf;

use clap::{Parser, Subcommand};
use modelrepo::{ArtifactIdentity, RecordField};

/// modelrepo - versioned model artifact registry
#[derive(Parser, Debug)]
#[command(name = "modelrepo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Repository root (overrides config and MODELREPO_PATH)
    #[arg(long, global = true, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Read configuration from this file instead of the usual locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a model repository, or upgrade an existing one
    Init {
        /// Where packages are stored, relative to the repository root unless absolute
        #[arg(long, value_name = "DIR")]
        base_storage: Option<String>,
    },

    /// Bring the repository to the latest layout
    Upgrade,

    /// Delete the repository table and metadata (stored packages are kept)
    Drop {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Publish a new model version
    #[command(group(
        clap::ArgGroup::new("source")
            .required(true)
            .args(["artifact", "clone_from"])
    ))]
    Deploy {
        /// Model name, optionally with a version (group.artifact[-x.y.z])
        identity: ArtifactIdentity,

        /// Primary file to package
        #[arg(long, value_name = "FILE")]
        artifact: Option<PathBuf>,

        /// Dependency files packaged under lib/
        #[arg(long, value_name = "FILE", value_delimiter = ',', requires = "artifact")]
        deps: Vec<PathBuf>,

        /// Reuse the package of an existing versioned model instead of uploading
        #[arg(long, value_name = "IDENTITY")]
        clone_from: Option<ArtifactIdentity>,

        /// File holding the model container (stored as opaque bytes)
        #[arg(long, value_name = "FILE")]
        container: Option<PathBuf>,

        /// Mark the new version production ready
        #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
        production_ready: Option<bool>,

        /// Changelog message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Show one published model
    Get {
        identity: ArtifactIdentity,

        /// Comma-separated fields (container, location, production_ready, message)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<RecordField>,
    },

    /// List published models
    List {
        /// Comma-separated fields (container, location, production_ready, message)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<RecordField>,

        /// Message history depth per model
        #[arg(long, default_value_t = 1)]
        max_versions: usize,

        /// Only production-ready models
        #[arg(long)]
        production_ready: bool,
    },

    /// Change the production-ready flag of a published model
    Update {
        identity: ArtifactIdentity,

        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set, required = true)]
        production_ready: bool,

        /// Changelog message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Remove a model version (its package is left in storage)
    Remove {
        identity: ArtifactIdentity,

        /// Also remove a version whose deploy never committed
        #[arg(long)]
        force: bool,
    },

    /// Verify that every published model's package is still in storage
    Check {
        /// Also read each package back and compare its digest
        #[arg(long)]
        download: bool,
    },
}
