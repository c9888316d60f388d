//! Readiness Use Case
//!
//! Post-publication changes to a committed model: flipping its
//! production-ready flag, appending a changelog entry, or removing it.

use tracing::info;

use crate::domain::entities::{CellValue, DataRequest, RowKey};
use crate::domain::ports::{ConditionalPut, RowStore};
use crate::domain::value_objects::{ArtifactIdentity, RecordField, SemanticVersion};
use crate::error::{ModelRepoError, ModelRepoResult};

pub struct ReadinessUseCase<RS: RowStore> {
    store: RS,
}

impl<RS: RowStore> ReadinessUseCase<RS> {
    pub fn new(store: RS) -> Self {
        Self { store }
    }

    /// Set `production_ready` (and optionally append a message) on a committed row
    ///
    /// Never creates a row and never touches `uploaded`.
    pub fn set_production_ready(
        &self,
        identity: &ArtifactIdentity,
        ready: bool,
        message: Option<&str>,
    ) -> ModelRepoResult<()> {
        let (key, version) = versioned_key(identity)?;

        let mut update = ConditionalPut::new(key).put(RecordField::ProductionReady, ready);
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            update.stage(RecordField::Message, message);
        }

        let committed = CellValue::Bool(true);
        if !self
            .store
            .check_and_commit(update, RecordField::Uploaded, Some(&committed))?
        {
            return Err(not_found(identity, version));
        }

        info!(%identity, ready, "updated production readiness");
        Ok(())
    }

    /// Delete a model row
    ///
    /// The stored package is left in place; clones may share its location.
    ///
    /// A row that is still reserved is only removed with `force`. If its
    /// deploy is actually in flight, a second deployer can then reserve the
    /// same key and both write the same package path, so the committed row
    /// may point at the second deployer's bytes. Use it for reservations
    /// whose deployer is known to be gone.
    pub fn remove(&self, identity: &ArtifactIdentity, force: bool) -> ModelRepoResult<()> {
        let (key, version) = versioned_key(identity)?;
        let request = DataRequest::fields([RecordField::Uploaded]);
        let Some(row) = self.store.get(&key, &request)? else {
            return Err(not_found(identity, version));
        };
        let committed = row
            .most_recent(RecordField::Uploaded)
            .and_then(CellValue::as_bool)
            == Some(true);
        if !committed && !force {
            return Err(ModelRepoError::precondition(format!(
                "{identity} is reserved by a deploy that has not committed; \
                 pass --force to remove it anyway"
            )));
        }

        self.store.delete_row(&key)?;
        info!(%identity, "removed model");
        Ok(())
    }
}

fn versioned_key(identity: &ArtifactIdentity) -> ModelRepoResult<(RowKey, SemanticVersion)> {
    let version = identity.version().ok_or_else(|| {
        ModelRepoError::precondition(format!("'{identity}' must specify a version"))
    })?;
    Ok((RowKey::new(identity.name(), version), version))
}

fn not_found(identity: &ArtifactIdentity, version: SemanticVersion) -> ModelRepoError {
    ModelRepoError::ModelNotFound {
        name: identity.name().to_string(),
        version,
    }
}
