//! Query Use Case
//!
//! Read side of the registry: point reads, filtered listings and a location
//! audit. A row is visible only once its newest `uploaded` cell is `true`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::domain::entities::{CellValue, DataRequest, ModelRecord, Row, RowKey};
use crate::domain::ports::{ArtifactUploader, RowStore};
use crate::domain::value_objects::{ArtifactIdentity, RecordField};
use crate::error::{ExtractionError, ModelRepoError, ModelRepoResult};

/// Options for listing published models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// `None` selects the default projection
    pub fields: Option<BTreeSet<RecordField>>,
    /// Message history depth, at least 1
    pub max_versions: usize,
    pub production_ready_only: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            fields: None,
            max_versions: 1,
            production_ready_only: false,
        }
    }
}

/// A committed row whose package cannot be confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationIssue {
    /// Row key as `name-version`
    pub model: String,
    pub location: Option<String>,
    pub problem: String,
}

pub struct QueryUseCase<RS, U>
where
    RS: RowStore,
    U: ArtifactUploader,
{
    store: RS,
    uploader: U,
    base_storage: PathBuf,
}

impl<RS, U> QueryUseCase<RS, U>
where
    RS: RowStore,
    U: ArtifactUploader,
{
    pub fn new(store: RS, uploader: U, base_storage: impl Into<PathBuf>) -> Self {
        Self {
            store,
            uploader,
            base_storage: base_storage.into(),
        }
    }

    /// Read one published model
    pub fn get(
        &self,
        identity: &ArtifactIdentity,
        fields: Option<&BTreeSet<RecordField>>,
    ) -> ModelRepoResult<ModelRecord> {
        let key = RowKey::for_identity(identity).ok_or_else(|| {
            ModelRepoError::precondition(format!("'{identity}' must specify a version"))
        })?;
        let wanted = fields.cloned().unwrap_or_else(RecordField::default_projection);
        let row = committed_row(&self.store, &key, &wanted)?;
        Ok(ModelRecord::from_row(&row.project(&DataRequest::fields(wanted)))?)
    }

    /// Every published model, optionally only production-ready ones
    ///
    /// Rows still reserved by an in-flight deploy are never returned.
    pub fn list(&self, options: &ListOptions) -> ModelRepoResult<Vec<ModelRecord>> {
        if options.max_versions == 0 {
            return Err(ModelRepoError::precondition(
                "max versions must be at least 1",
            ));
        }

        let wanted = options
            .fields
            .clone()
            .unwrap_or_else(RecordField::default_projection);
        let mut scan_fields = wanted.clone();
        scan_fields.insert(RecordField::Uploaded);
        scan_fields.insert(RecordField::ProductionReady);
        let request = DataRequest::fields(scan_fields).with_max_versions(options.max_versions);
        let projection = DataRequest::fields(wanted).with_max_versions(options.max_versions);

        let mut records = Vec::new();
        for row in self.store.scan(&request)? {
            let row = row?;
            if !is_committed(&row) {
                continue;
            }
            if options.production_ready_only
                && row
                    .most_recent(RecordField::ProductionReady)
                    .and_then(CellValue::as_bool)
                    != Some(true)
            {
                continue;
            }
            records.push(ModelRecord::from_row(&row.project(&projection))?);
        }

        debug!(count = records.len(), "listed models");
        Ok(records)
    }

    /// Confirm every published location still holds its package
    ///
    /// With `download`, each package is also read back and checked against
    /// its stored digest. All problems are collected; none stops the audit.
    pub fn check_locations(&self, download: bool) -> ModelRepoResult<Vec<LocationIssue>> {
        let request = DataRequest::fields([RecordField::Uploaded, RecordField::Location]);
        let mut issues = Vec::new();

        for row in self.store.scan(&request)? {
            let row = row?;
            if !is_committed(&row) {
                continue;
            }
            let model = row.key().to_string();
            let location = row
                .most_recent(RecordField::Location)
                .and_then(CellValue::as_text)
                .filter(|l| !l.is_empty());

            let Some(location) = location else {
                issues.push(LocationIssue {
                    model,
                    location: None,
                    problem: ExtractionError::FieldMissing {
                        field: RecordField::Location,
                    }
                    .to_string(),
                });
                continue;
            };

            if let Err(err) = self
                .uploader
                .verify(&self.base_storage, location, download)
            {
                warn!(%model, location, error = %err, "location check failed");
                issues.push(LocationIssue {
                    model,
                    location: Some(location.to_string()),
                    problem: err.to_string(),
                });
            }
        }

        Ok(issues)
    }
}

fn is_committed(row: &Row) -> bool {
    row.most_recent(RecordField::Uploaded)
        .and_then(CellValue::as_bool)
        == Some(true)
}

/// Read `key` with `fields`, failing unless the row is committed
pub(crate) fn committed_row<S>(
    store: &S,
    key: &RowKey,
    fields: &BTreeSet<RecordField>,
) -> ModelRepoResult<Row>
where
    S: RowStore + ?Sized,
{
    let mut request_fields = fields.clone();
    request_fields.insert(RecordField::Uploaded);
    let row = store
        .get(key, &DataRequest::fields(request_fields))?
        .filter(is_committed)
        .ok_or(ExtractionError::ModelMissing)?;
    Ok(row)
}
