//! Configuration types and loading for the colorsense detector.
//!
//! The main entry point is [`Config`], which holds the detector's read-only
//! options. Configuration is loaded with [`load_config`], layering sources in
//! increasing priority:
//!
//! 1. Built-in defaults (`verbose = false`, `stream = "stdout"`)
//! 2. An optional config file (`.toml`, `.yaml` or `.yml`)
//! 3. Environment variables prefixed with `COLORSENSE_`

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "COLORSENSE_";

/// Environment variable naming a config file to load.
pub const CONFIG_PATH_ENV: &str = "COLORSENSE_CONFIG";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The config file extension is not one of the supported formats.
    #[error("unsupported config format for {} (expected .toml, .yaml or .yml)", path.display())]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// A source could not be read or a value had the wrong shape.
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Stream
// ---------------------------------------------------------------------------

/// The output stream whose interactivity gates color support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    /// Standard output (default).
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

impl Stream {
    /// Returns the lowercase name used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// Detector configuration. Set once at construction, read-only afterward.
///
/// All fields use `serde` defaults so a partially specified file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Report probe failures (such as a missing terminfo database) as
    /// diagnostic warnings.
    #[serde(default)]
    pub verbose: bool,

    /// Stream tested for an interactive terminal.
    #[serde(default)]
    pub stream: Stream,
}

impl Config {
    /// Returns a copy with `verbose` forced on when `flag` is set.
    ///
    /// Used to let a command-line `--verbose` flag win over file and
    /// environment sources without being able to turn verbosity off.
    pub fn with_verbose_flag(mut self, flag: bool) -> Self {
        self.verbose |= flag;
        self
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the layered [`Figment`] for the given optional config file.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if `path` is given but does not exist,
/// or [`ConfigError::UnsupportedFormat`] if its extension is unrecognized.
pub fn figment(path: Option<&Path>) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = path {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
    }

    Ok(figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config"])))
}

/// Load configuration from defaults, the optional file, and the environment.
///
/// # Errors
///
/// Returns any error from [`figment`], or [`ConfigError::Load`] if a source
/// holds a value of the wrong type (for example `stream = "printer"`).
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = figment(path)?.extract()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
