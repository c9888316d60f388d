//! Version resolver
//!
//! Computes the next version for a name by scanning the model table.
//!
//! The result is only as fresh as the scan: two callers resolving at the same
//! time can pick the same version. The reservation step is what settles that.

use tracing::debug;

use crate::domain::entities::DataRequest;
use crate::domain::ports::{RowStore, StoreError};
use crate::domain::value_objects::{SemanticVersion, VersionParseError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("model table holds an unreadable version for '{name}': {source}")]
    CorruptVersion {
        name: String,
        #[source]
        source: VersionParseError,
    },

    #[error("no patch version left after {name}-{latest}; deploy an explicit version")]
    Exhausted {
        name: String,
        latest: SemanticVersion,
    },
}

/// Highest version stored for `name` (seeded with `0.0.0`), bumped one patch
///
/// Reserved and committed rows both count.
pub fn next_version<S>(store: &S, name: &str) -> Result<SemanticVersion, ResolveError>
where
    S: RowStore + ?Sized,
{
    let mut latest = SemanticVersion::ZERO;

    for row in store.scan(&DataRequest::all())? {
        let row = row?;
        let key = row.key();
        if key.name != name {
            continue;
        }
        let version: SemanticVersion = key.version.parse().map_err(|source| {
            ResolveError::CorruptVersion {
                name: name.to_string(),
                source,
            }
        })?;
        latest = latest.max(version);
    }

    let next = latest
        .next_patch()
        .ok_or_else(|| ResolveError::Exhausted {
            name: name.to_string(),
            latest,
        })?;
    debug!(name, latest = %latest, next = %next, "resolved next version");
    Ok(next)
}
