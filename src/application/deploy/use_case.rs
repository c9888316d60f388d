//! Deploy Use Case
//!
//! Runs one deployment through its states:
//! 1. Resolve the target version
//! 2. Reserve the row (`uploaded = false`, only if absent)
//! 3. Produce a location (package + upload, or copy from the clone source)
//! 4. Commit (`uploaded = true`, only if still reserved)
//!
//! A failure after the reservation deletes the row again. The use case holds
//! no locks of its own; all coordination goes through the store's
//! conditional commit.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use crate::application::query::committed_row;
use crate::domain::entities::{CellValue, RowKey};
use crate::domain::ports::{
    ArtifactUploader, ConditionalPut, DeployEvent, DeployEventSink, NoopEventSink, Packager,
    RowStore,
};
use crate::domain::services::next_version;
use crate::domain::value_objects::{ArtifactIdentity, RecordField};
use crate::error::{ExtractionError, ModelRepoError, ModelRepoResult};

use super::options::{DeployOptions, DeploySource};
use super::result::DeployResult;

/// Deploy use case - the deployment coordinator
///
/// Parameterized by its ports so tests can swap in failing stores and
/// uploaders.
pub struct DeployUseCase<RS, P, U>
where
    RS: RowStore,
    P: Packager,
    U: ArtifactUploader,
{
    store: RS,
    packager: P,
    uploader: U,
    base_storage: PathBuf,
}

impl<RS, P, U> DeployUseCase<RS, P, U>
where
    RS: RowStore,
    P: Packager,
    U: ArtifactUploader,
{
    pub fn new(store: RS, packager: P, uploader: U, base_storage: impl Into<PathBuf>) -> Self {
        Self {
            store,
            packager,
            uploader,
            base_storage: base_storage.into(),
        }
    }

    pub fn store(&self) -> &RS {
        &self.store
    }

    /// Execute the deploy use case
    pub fn execute(&self, options: &DeployOptions) -> ModelRepoResult<DeployResult> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the deploy use case with event reporting
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        events: Arc<dyn DeployEventSink>,
    ) -> ModelRepoResult<DeployResult> {
        let span = info_span!("deploy", name = %options.identity.name());
        let _enter = span.enter();

        check_preconditions(&options.source)?;

        // RESOLVE
        let auto_versioned = !options.identity.is_version_specified();
        let version = match options.identity.version() {
            Some(version) => version,
            None => next_version(&self.store, options.identity.name())?,
        };
        let identity = options.identity.with_version(version);
        let key = RowKey::new(identity.name(), version);
        debug!(%version, auto = auto_versioned, "resolved version");
        events.on_event(DeployEvent::Resolved {
            name: identity.name().to_string(),
            version,
            auto: auto_versioned,
        });

        // RESERVE
        let reservation = ConditionalPut::new(key.clone()).put(RecordField::Uploaded, false);
        if !self
            .store
            .check_and_commit(reservation, RecordField::Uploaded, None)?
        {
            warn!(%identity, "version already exists");
            events.on_event(DeployEvent::Conflict { identity });
            return Err(ModelRepoError::Conflict { version });
        }
        debug!(%identity, "reserved");
        events.on_event(DeployEvent::Reserved {
            identity: identity.clone(),
        });

        // PRODUCE
        let location = match self.produce(&identity, &options.source) {
            Ok(location) => location,
            Err(cause) => return Err(self.roll_back(&key, &identity, cause, events.as_ref())),
        };
        events.on_event(DeployEvent::Produced {
            identity: identity.clone(),
            location: location.clone(),
        });

        // COMMIT
        let mut commit = ConditionalPut::new(key.clone())
            .put(RecordField::Container, options.container.clone())
            .put(RecordField::Location, location.as_str())
            .put(RecordField::ProductionReady, options.production_ready);
        if let Some(message) = &options.message {
            commit.stage(RecordField::Message, message.as_str());
        }
        commit.stage(RecordField::Uploaded, true);

        let reserved = CellValue::Bool(false);
        match self
            .store
            .check_and_commit(commit, RecordField::Uploaded, Some(&reserved))
        {
            Ok(true) => {}
            Ok(false) => return Err(ModelRepoError::Consistency { key }),
            Err(err) => {
                return Err(self.roll_back(&key, &identity, err.into(), events.as_ref()));
            }
        }

        info!(%identity, %location, "deployed");
        events.on_event(DeployEvent::Committed {
            identity: identity.clone(),
            location: location.clone(),
        });

        Ok(DeployResult {
            identity,
            location,
            auto_versioned,
        })
    }

    fn produce(
        &self,
        identity: &ArtifactIdentity,
        source: &DeploySource,
    ) -> ModelRepoResult<String> {
        match source {
            DeploySource::Fresh {
                primary,
                dependencies,
            } => {
                let package = self.packager.package(primary, dependencies)?;
                // `package` is a temp file; it goes away at the end of this arm.
                Ok(self
                    .uploader
                    .upload(identity, &self.base_storage, &package)?)
            }
            DeploySource::Clone { source } => self.source_location(source),
        }
    }

    fn source_location(&self, source: &ArtifactIdentity) -> ModelRepoResult<String> {
        let key = RowKey::for_identity(source).ok_or_else(unversioned_source)?;
        let fields = [RecordField::Location].into_iter().collect();
        let row = committed_row(&self.store, &key, &fields)?;
        row.most_recent(RecordField::Location)
            .and_then(CellValue::as_text)
            .filter(|location| !location.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ExtractionError::FieldMissing {
                    field: RecordField::Location,
                }
                .into()
            })
    }

    /// Delete the reservation for `key` and hand back the error to report
    fn roll_back(
        &self,
        key: &RowKey,
        identity: &ArtifactIdentity,
        cause: ModelRepoError,
        events: &dyn DeployEventSink,
    ) -> ModelRepoError {
        match self.store.delete_row(key) {
            Ok(()) => {
                warn!(%identity, error = %cause, "deploy failed; reservation removed");
                events.on_event(DeployEvent::RolledBack {
                    identity: identity.clone(),
                    reason: cause.to_string(),
                });
                cause
            }
            Err(rollback) => {
                warn!(%identity, error = %cause, %rollback, "deploy failed; reservation left behind");
                ModelRepoError::Rollback {
                    key: key.clone(),
                    cause: Box::new(cause),
                    rollback,
                }
            }
        }
    }

    /// Base directory packages are uploaded under
    pub fn base_storage(&self) -> &Path {
        &self.base_storage
    }
}

fn unversioned_source() -> ModelRepoError {
    ModelRepoError::precondition("source artifact must specify a version")
}

fn check_preconditions(source: &DeploySource) -> ModelRepoResult<()> {
    match source {
        DeploySource::Fresh {
            primary,
            dependencies,
        } => {
            for path in std::iter::once(primary).chain(dependencies) {
                if !path.is_file() {
                    return Err(ModelRepoError::precondition(format!(
                        "file not found: {}",
                        path.display()
                    )));
                }
                File::open(path).map_err(|e| {
                    ModelRepoError::precondition(format!("cannot read {}: {e}", path.display()))
                })?;
            }
            Ok(())
        }
        DeploySource::Clone { source } if !source.is_version_specified() => {
            Err(unversioned_source())
        }
        DeploySource::Clone { .. } => Ok(()),
    }
}
