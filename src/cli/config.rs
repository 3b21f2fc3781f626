use std::path::Path;

use crate::cli::context::CliContext;
use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use hora::config::{parse_config, HoraConfig};
use tokio::fs;
use tracing::info;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write the default configuration to the configuration file
    Reset,

    /// Validate the configuration file
    Validate,
}

pub async fn cmd_config(args: ConfigArgs, ctx: &CliContext) -> Result<()> {
    let path = ctx.config_path();
    match args.action {
        ConfigAction::Show => {
            println!("{}", serde_yaml::to_string(ctx.config())?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Reset => {
            save_config_file(path, &HoraConfig::default()).await?;
            info!("Configuration reset to defaults");
            println!(
                "Configuration reset to defaults and written to {}",
                path.display()
            );
        }
        ConfigAction::Validate => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            let content = fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config = parse_config(&content)?;
            if config.tracker.tracker_name.trim().is_empty() {
                bail!("tracker.tracker_name must not be empty");
            }
            if config.tracker.first_interaction_key.trim().is_empty() {
                bail!("tracker.first_interaction_key must not be empty");
            }
            println!("Configuration is valid: {}", path.display());
        }
    }
    Ok(())
}

async fn save_config_file(path: &Path, config: &HoraConfig) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("No configuration path available; pass --config");
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let yaml = serde_yaml::to_string(config)?;
    fs::write(path, yaml)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
