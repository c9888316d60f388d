//! update / remove

use anyhow::Result;
use modelrepo::presentation::{factory, output};
use modelrepo::ArtifactIdentity;

use super::{emit, Context};

pub fn run_update(
    ctx: &Context,
    identity: &ArtifactIdentity,
    production_ready: bool,
    message: Option<&str>,
) -> Result<()> {
    let repo = ctx.open()?;
    factory::create_readiness_use_case(&repo).set_production_ready(
        identity,
        production_ready,
        message,
    )?;
    emit(&output::render_done(
        "update",
        &identity.to_string(),
        &format!("{identity} production_ready = {production_ready}"),
        ctx.format,
    ));
    Ok(())
}

pub fn run_remove(ctx: &Context, identity: &ArtifactIdentity, force: bool) -> Result<()> {
    let repo = ctx.open()?;
    factory::create_readiness_use_case(&repo).remove(identity, force)?;
    emit(&output::render_done(
        "remove",
        &identity.to_string(),
        &format!("Removed {identity}"),
        ctx.format,
    ));
    Ok(())
}
