//! Common test utilities for modelrepo CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated working directory and config home
//! - Fixtures: Reusable model files and identities

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
