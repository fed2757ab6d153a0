//! Re-reading `config.ron` while the orrery runs.

use std::path::PathBuf;

use orrery_config::{CliArgs, Config, ConfigError};

/// The config file contents and the command-line overrides layered on top.
///
/// Overrides are kept apart from the file so a reload compares like with like
/// and the command line still wins afterwards.
#[derive(Clone, Debug)]
pub struct ConfigSource {
    dir: PathBuf,
    file: Config,
    overrides: CliArgs,
}

impl ConfigSource {
    pub fn new(dir: PathBuf, file: Config, overrides: CliArgs) -> Self {
        Self {
            dir,
            file,
            overrides,
        }
    }

    /// The file config with command-line overrides applied.
    pub fn effective(&self) -> Config {
        let mut config = self.file.clone();
        config.apply_cli_overrides(&self.overrides);
        config
    }

    /// Re-read the file. Returns the new effective config if the file changed.
    pub fn reload(&mut self) -> Result<Option<Config>, ConfigError> {
        match self.file.reload(&self.dir)? {
            Some(file) => {
                self.file = file;
                Ok(Some(self.effective()))
            }
            None => Ok(None),
        }
    }
}
