//! get / list / check

use anyhow::{bail, Result};
use modelrepo::application::ListOptions;
use modelrepo::presentation::{factory, output};
use modelrepo::{ArtifactIdentity, RecordField};

use super::{emit, field_selection, Context};

pub fn run_get(ctx: &Context, identity: &ArtifactIdentity, fields: Vec<RecordField>) -> Result<()> {
    let repo = ctx.open()?;
    let fields = field_selection(fields);
    let record = factory::create_query_use_case(&repo).get(identity, fields.as_ref())?;
    emit(&output::render_records(&[record], ctx.format));
    Ok(())
}

pub fn run_list(
    ctx: &Context,
    fields: Vec<RecordField>,
    max_versions: usize,
    production_ready_only: bool,
) -> Result<()> {
    let repo = ctx.open()?;
    let options = ListOptions {
        fields: field_selection(fields),
        max_versions,
        production_ready_only,
    };
    let mut records = factory::create_query_use_case(&repo).list(&options)?;
    records.sort_by(|a, b| a.identity.cmp(&b.identity));
    emit(&output::render_records(&records, ctx.format));
    Ok(())
}

pub fn run_check(ctx: &Context, download: bool) -> Result<()> {
    let repo = ctx.open()?;
    let issues = factory::create_query_use_case(&repo).check_locations(download)?;
    emit(&output::render_issues(&issues, ctx.format));
    if !issues.is_empty() {
        bail!("{} model location(s) failed verification", issues.len());
    }
    Ok(())
}
