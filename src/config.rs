//! Layered application configuration.
//!
//! Values are merged in increasing priority:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory, or the file passed
//!    with `--config`
//! 3. `DUPFIND_*` environment variables (e.g. `DUPFIND_IO_THREADS=2`)
//! 4. Command-line flags
//!
//! # Example
//!
//! ```toml
//! io_threads = 2
//! skip_errors = true
//! output = "json"
//! buffer_size = 131072
//! ```

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{CommonArgs, OutputFormat};
use crate::duplicates::FinderConfig;
use crate::scanner::{ErrorPolicy, DEFAULT_BUFFER_SIZE};

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "DUPFIND_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of I/O threads for hashing.
    pub io_threads: usize,
    /// Skip unreadable entries instead of aborting.
    pub skip_errors: bool,
    /// Unlink removed copies instead of moving them to the trash.
    pub permanent: bool,
    /// Default output format.
    pub output: OutputFormat,
    /// Hashing read buffer size in bytes.
    pub buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            io_threads: 4,
            skip_errors: false,
            permanent: false,
            output: OutputFormat::Text,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Build the provider stack without extracting it.
    ///
    /// `file` replaces the platform default config file when given.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match file.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => {
                log::debug!("Reading configuration from {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => log::debug!("No configuration directory available"),
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration.
    ///
    /// A missing default config file is not an error; a missing explicit one is.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file does not exist, a file is not
    /// valid TOML, or a value has the wrong type.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            if !path.is_file() {
                bail!("Configuration file not found: {}", path.display());
            }
        }
        Self::figment(file)
            .extract()
            .context("Failed to load configuration")
    }

    /// Platform-specific default config file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupfind", "dupfind")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply command-line overrides on top of the loaded values.
    #[must_use]
    pub fn with_cli(mut self, args: &CommonArgs) -> Self {
        if let Some(output) = args.output {
            self.output = output;
        }
        if let Some(threads) = args.io_threads {
            self.io_threads = threads;
        }
        if args.skip_errors {
            self.skip_errors = true;
        }
        self
    }

    /// Error policy implied by `skip_errors`.
    #[must_use]
    pub fn error_policy(&self) -> ErrorPolicy {
        if self.skip_errors {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        }
    }

    /// Finder settings derived from this configuration.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_io_threads(self.io_threads)
            .with_error_policy(self.error_policy())
            .with_buffer_size(self.buffer_size.max(1))
    }
}
