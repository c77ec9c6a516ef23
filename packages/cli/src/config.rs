//! `civic_stats.toml` configuration.
//!
//! Every key is optional. Dataset paths are only required by the commands
//! that read them, and command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Config file picked up from the working directory when `--config` is
/// not given.
pub const DEFAULT_CONFIG_FILE: &str = "civic_stats.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub datasets: DatasetPaths,
    pub resolver: ResolverConfig,
    pub output: OutputConfig,
}

/// Input file locations, keyed by dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetPaths {
    pub arrests: Option<PathBuf>,
    pub crimes: Option<PathBuf>,
    pub income: Option<PathBuf>,
    pub race: Option<PathBuf>,
    pub dst: Option<PathBuf>,
    pub full_moon: Option<PathBuf>,
    pub zip_centroids: Option<PathBuf>,
}

macro_rules! dataset_accessor {
    ($($name:ident),* $(,)?) => {
        impl DatasetPaths {
            $(
                #[doc = concat!("Path of the `", stringify!($name), "` dataset.")]
                ///
                /// # Errors
                ///
                /// Returns [`CliError::MissingDataset`] if the path is not configured.
                pub fn $name(&self) -> Result<&Path, CliError> {
                    self.$name.as_deref().ok_or(CliError::MissingDataset {
                        key: stringify!($name),
                    })
                }
            )*
        }
    };
}

dataset_accessor!(arrests, crimes, income, race, dst, full_moon, zip_centroids);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Rayon worker count. Defaults to one per core.
    pub threads: Option<usize>,
    /// Skip rows whose location cannot be decoded instead of aborting.
    pub skip_malformed: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threads: None,
            skip_malformed: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Serialization format for command output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl Config {
    /// Parses a config document.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] if the document is not valid TOML or has
    /// unknown keys.
    pub fn parse(toml_str: &str) -> Result<Self, CliError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Loads the config from `path`, or from [`DEFAULT_CONFIG_FILE`] if it
    /// exists. Falls back to defaults when neither is available.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] if an explicitly requested file cannot be
    /// read, or [`CliError::Config`] if the file does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        log::debug!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(&path)?;
        Self::parse(&contents)
    }
}
