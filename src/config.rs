//! Application configuration management.
//!
//! Settings are merged from several layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`config.toml` in the platform config directory, or the
//!    file given with `--config`)
//! 3. `XXDUPE_*` environment variables (e.g. `XXDUPE_MIN_SIZE=1024`)
//! 4. Command-line flags
//!
//! # Example
//!
//! ```toml
//! min_size = 1024
//! jobs = 8
//! hide_recent = true
//! output = "json"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::finder::DEFAULT_JOBS;
use crate::report::ReportOptions;
use crate::scanner::{SizeBounds, DEFAULT_MAX_SIZE};

/// Prefix of environment variables read as configuration.
pub const ENV_PREFIX: &str = "XXDUPE_";

/// File name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exclusive lower size bound in bytes
    pub min_size: u64,
    /// Exclusive upper size bound in bytes
    pub max_size: u64,
    /// Hashing worker count
    pub jobs: usize,
    /// Leave the newest member out of each listed group
    pub hide_recent: bool,
    /// Omit group hash headers
    pub hide_hash: bool,
    /// Omit member modification times
    pub hide_time: bool,
    /// Skip unreadable files instead of failing the run
    pub skip_unreadable: bool,
    /// Report format
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_size: 0,
            max_size: DEFAULT_MAX_SIZE,
            jobs: DEFAULT_JOBS,
            hide_recent: false,
            hide_hash: false,
            hide_time: false,
            skip_unreadable: false,
            output: OutputFormat::Text,
        }
    }
}

/// Errors raised while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A layer could not be parsed or has values of the wrong type.
    #[error("Invalid configuration: {0}")]
    Parse(#[source] Box<figment::Error>),

    /// The size window admits no file size at all.
    #[error("Size window min_size={min}, max_size={max} admits no file size")]
    EmptySizeRange {
        /// Configured lower bound
        min: u64,
        /// Configured upper bound
        max: u64,
    },

    /// Zero hashing workers requested.
    #[error("jobs must be at least 1")]
    NoWorkers,
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Parse(Box::new(err))
    }
}

impl Config {
    /// Resolve the effective configuration for a command line.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `--config` file is missing, a layer
    /// cannot be parsed, or the merged values are invalid.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::load(cli.config.as_deref())?;
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Report format selected by a command line and the file and
    /// environment layers it sees.
    ///
    /// Unlike [`Config::resolve`] this never fails: a layer that cannot be
    /// loaded falls back to text output.
    #[must_use]
    pub fn output_format(cli: &Cli) -> OutputFormat {
        if let Some(output) = cli.output {
            return output;
        }
        Self::load(cli.config.as_deref()).map_or(OutputFormat::Text, |config| config.output)
    }

    /// Load defaults, file and environment layers.
    ///
    /// With `explicit` unset, the platform default file is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if `explicit` does not exist or the environment
    /// layer is malformed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => Self::load_layers(Self::default_path().as_deref()),
        }
    }

    /// Load using a specific configuration file, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file is missing.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::load_layers(Some(path))
    }

    fn load_layers(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            log::debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        match figment.merge(Env::prefixed(ENV_PREFIX)).extract() {
            Ok(config) => Ok(config),
            Err(err) if file.is_some() => {
                log::warn!("Ignoring malformed configuration file: {err}");
                Ok(Figment::from(Serialized::defaults(Self::default()))
                    .merge(Env::prefixed(ENV_PREFIX))
                    .extract()?)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Platform-specific default configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "xxdupe", "xxdupe")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Overlay values given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(min) = cli.min_size {
            self.min_size = min;
        }
        if let Some(max) = cli.max_size {
            self.max_size = max;
        }
        if let Some(jobs) = cli.jobs {
            self.jobs = usize::try_from(jobs).unwrap_or(usize::MAX);
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        self.hide_recent |= cli.hide_recent;
        self.hide_hash |= cli.hide_hash;
        self.hide_time |= cli.hide_time;
        self.skip_unreadable |= cli.skip_unreadable;
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if no size fits strictly between `min_size` and
    /// `max_size`, or if `jobs == 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bounds().is_satisfiable() {
            return Err(ConfigError::EmptySizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.jobs == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }

    /// Size window for discovery.
    #[must_use]
    pub fn bounds(&self) -> SizeBounds {
        SizeBounds::new(self.min_size, self.max_size)
    }

    /// Presentation switches for the report.
    #[must_use]
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            hide_recent: self.hide_recent,
            hide_hash: self.hide_hash,
            hide_time: self.hide_time,
        }
    }
}
