//! Layout Version Value Object
//!
//! The on-disk table format is versioned as `MR-<n>`. The value is read once
//! when a repository is opened and passed to whatever needs it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LayoutVersion(u32);

impl LayoutVersion {
    pub const PREFIX: &'static str = "MR-";

    /// Newest layout this build can read and write
    pub const LATEST: LayoutVersion = LayoutVersion(1);

    pub const fn new(version: u32) -> Self {
        Self(version)
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn is_latest(self) -> bool {
        self == Self::LATEST
    }
}

impl fmt::Display for LayoutVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid layout id '{0}': expected MR-<number>")]
pub struct LayoutParseError(pub String);

impl FromStr for LayoutVersion {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX)
            .and_then(|n| n.parse().ok())
            .map(LayoutVersion)
            .ok_or_else(|| LayoutParseError(s.to_string()))
    }
}

impl TryFrom<String> for LayoutVersion {
    type Error = LayoutParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LayoutVersion> for String {
    fn from(layout: LayoutVersion) -> Self {
        layout.to_string()
    }
}
