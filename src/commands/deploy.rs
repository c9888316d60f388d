//! deploy

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use modelrepo::application::DeployOptions;
use modelrepo::domain::ports::{DeployEventSink, NoopEventSink};
use modelrepo::infrastructure::JsonEventSink;
use modelrepo::presentation::{factory, output, OutputFormat};
use modelrepo::ArtifactIdentity;

use super::{emit, Context};

pub struct DeployArgs {
    pub identity: ArtifactIdentity,
    pub artifact: Option<PathBuf>,
    pub deps: Vec<PathBuf>,
    pub clone_from: Option<ArtifactIdentity>,
    pub container: Option<PathBuf>,
    pub production_ready: Option<bool>,
    pub message: Option<String>,
}

pub fn run(ctx: &Context, args: DeployArgs) -> Result<()> {
    let mut options = match (args.artifact, args.clone_from) {
        (Some(primary), None) => {
            DeployOptions::fresh(args.identity, primary).with_dependencies(args.deps)
        }
        (None, Some(source)) => DeployOptions::clone_from(args.identity, source),
        _ => bail!("deploy needs exactly one of --artifact or --clone-from"),
    };

    if let Some(path) = &args.container {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read container {}", path.display()))?;
        options = options.with_container(bytes);
    }
    options = options.with_production_ready(
        args.production_ready
            .unwrap_or(ctx.config.deploy.production_ready),
    );
    if let Some(message) = args.message.or_else(|| ctx.config.deploy.message.clone()) {
        options = options.with_message(message);
    }

    let repo = ctx.open()?;
    let events: Arc<dyn DeployEventSink> = match ctx.format {
        OutputFormat::Json => Arc::new(JsonEventSink::stdout()),
        OutputFormat::Text => Arc::new(NoopEventSink),
    };
    let result = factory::create_deploy_use_case(&repo).execute_with_events(&options, events)?;
    emit(&output::render_deploy(&result, ctx.format));
    Ok(())
}
