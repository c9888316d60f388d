//! init / upgrade / drop

use anyhow::{bail, Result};
use modelrepo::presentation::{factory, output};

use super::{emit, Context};

pub fn run_init(ctx: &Context, base_storage: Option<String>) -> Result<()> {
    let base = base_storage.unwrap_or_else(|| ctx.config.repository.base_storage.clone());
    let outcome = factory::create_lifecycle_use_case(&ctx.root).install(&base)?;
    emit(&output::render_install(outcome, &ctx.root_display(), ctx.format));
    Ok(())
}

pub fn run_upgrade(ctx: &Context) -> Result<()> {
    let outcome = factory::create_lifecycle_use_case(&ctx.root).upgrade()?;
    emit(&output::render_upgrade(outcome, &ctx.root_display(), ctx.format));
    Ok(())
}

pub fn run_drop(ctx: &Context, yes: bool) -> Result<()> {
    let root = ctx.root_display();
    if !yes {
        bail!("refusing to drop the repository at {root} without --yes");
    }
    factory::create_lifecycle_use_case(&ctx.root).drop_repository()?;
    emit(&output::render_done(
        "drop",
        &root,
        &format!("Dropped model repository at {root}"),
        ctx.format,
    ));
    Ok(())
}
