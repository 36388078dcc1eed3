//! Configuration file support for ferro-norm.
//!
//! Normalization defaults and the log level can be kept in a TOML file
//! instead of being repeated on every command line.
//!
//! # Example Configuration
//!
//! ```toml
//! [normalize]
//! direction = "5prime"
//! cross_boundaries = false
//! fill = true
//! alt_aln_method = "splign"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! # Config File Locations
//!
//! Unless a path is given explicitly, configuration is searched in this order
//! (first found wins):
//! 1. `.ferro-norm.toml` in current directory
//! 2. `~/.config/ferro/norm.toml`
//!
//! CLI flags take precedence over config file settings.

use crate::error::NormError;
use crate::normalize::{NormalizeConfig, ShuffleDirection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// `[normalize]` table
    pub normalize: NormalizeConfig,
    /// `[logging]` table
    pub logging: LoggingConfig,
}

/// Logging section of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `ferro_norm=debug`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Normalization settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub direction: Option<ShuffleDirection>,
    pub cross_boundaries: bool,
    pub no_fill: bool,
    pub alt_aln_method: Option<String>,
}

impl FileConfig {
    /// Parse configuration from TOML content
    pub fn parse(content: &str) -> Result<Self, NormError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, NormError> {
        let content = fs::read_to_string(path).map_err(|e| NormError::Config {
            msg: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::parse(&content).map_err(|e| NormError::Config {
            msg: format!("{}: {}", path.display(), e),
        })
    }

    /// Load the first existing file among `candidates`
    pub fn load_first(candidates: &[PathBuf]) -> Result<Option<(PathBuf, Self)>, NormError> {
        for path in candidates {
            if path.is_file() {
                let config = Self::load_from_path(path)?;
                return Ok(Some((path.clone(), config)));
            }
        }
        Ok(None)
    }

    /// Search locations, in priority order
    pub fn default_locations() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".ferro-norm.toml")];
        if let Some(home) = dirs_home() {
            paths.push(home.join(".config").join("ferro").join("norm.toml"));
        }
        paths
    }

    /// Load `explicit` if given, otherwise the first file found in the default
    /// locations, otherwise defaults
    ///
    /// A file that exists but does not parse is an error, never skipped.
    pub fn load(explicit: Option<&Path>) -> Result<Self, NormError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        match Self::load_first(&Self::default_locations())? {
            Some((path, config)) => {
                log::debug!("loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Merge this config with CLI arguments; CLI arguments take precedence
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> NormalizeConfig {
        let mut config = self.normalize.clone();
        if let Some(direction) = cli.direction {
            config = config.with_direction(direction);
        }
        if cli.cross_boundaries {
            config = config.allow_crossing_boundaries();
        }
        if cli.no_fill {
            config = config.with_fill(false);
        }
        if let Some(method) = &cli.alt_aln_method {
            config = config.with_alt_aln_method(method.clone());
        }
        config
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, NormError> {
        toml::to_string_pretty(self).map_err(|e| NormError::Config { msg: e.to_string() })
    }
}

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
