use clap::Subcommand;

use super::config::ConfigArgs;
use super::replay::ReplayArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Replay an interaction script and print the resulting hits
    Replay(ReplayArgs),

    /// Configuration management
    Config(ConfigArgs),
}
