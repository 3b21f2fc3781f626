use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prometheus::{Encoder, Registry, TextEncoder};
use tokio::fs;
use tracing::{info, warn};

use crate::cli::context::CliContext;
use hora::replay::Replayer;
use hora::script::{parse_script, ScriptFormat};
use hora_engagement::metrics::register_metrics;
use hora_transport::{AnalyticsTransport, TracingTransport};

#[derive(Args, Clone, Debug)]
pub struct ReplayArgs {
    /// Interaction script (YAML, or JSON with a .json extension)
    pub script: PathBuf,

    /// Stop on the first failing step
    #[arg(long)]
    pub strict: bool,

    /// Write the final widget registry state to this file as JSON
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Print engagement metrics to stderr after the replay
    #[arg(long)]
    pub metrics: bool,
}

pub async fn cmd_replay(args: ReplayArgs, ctx: &CliContext) -> Result<()> {
    let raw = fs::read_to_string(&args.script)
        .await
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let steps = parse_script(&raw, ScriptFormat::from_path(&args.script))?;
    info!(steps = steps.len(), script = %args.script.display(), "replaying script");

    let mut replayer = Replayer::new(ctx.config().tracker.clone());
    let outcome = replayer.run(&steps, args.strict)?;

    let mirror = ctx.debug().then_some(TracingTransport);
    for hit in &outcome.hits {
        println!("{}", serde_json::to_string(hit)?);
        if let Some(mirror) = &mirror {
            mirror.dispatch(hit.clone());
        }
    }

    if let Some(path) = &args.state {
        let snapshot = serde_json::to_string_pretty(&replayer.snapshot())?;
        fs::write(path, snapshot)
            .await
            .with_context(|| format!("Failed to write state to {}", path.display()))?;
    }

    if args.metrics {
        let registry = Registry::new();
        register_metrics(&registry);
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
        eprint!("{}", String::from_utf8(buffer)?);
    }

    if !outcome.failures.is_empty() {
        warn!(failed = outcome.failures.len(), "some steps were rejected");
    }
    info!(hits = outcome.hits.len(), "replay finished");
    Ok(())
}
