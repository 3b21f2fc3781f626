use std::path::{Path, PathBuf};

use hora::config::HoraConfig;

pub struct CliContext {
    config: HoraConfig,
    config_path: PathBuf,
    debug: bool,
}

impl CliContext {
    pub fn new(config: HoraConfig, config_path: PathBuf, debug: bool) -> Self {
        Self {
            config,
            config_path,
            debug,
        }
    }

    pub fn config(&self) -> &HoraConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Set by either `--debug` or `debug: true` in the config file.
    pub fn debug(&self) -> bool {
        self.debug || self.config.debug
    }
}
