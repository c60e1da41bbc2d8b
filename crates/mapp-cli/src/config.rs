//! # Run Configuration
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. command-line flags,
//! 2. an optional YAML file passed with `--config`,
//! 3. built-in defaults (`results.txt`, text format, system temp dir,
//!    members `metadata.json` and `file.sapp`).
//!
//! ```yaml
//! output: reports/servicenow.txt
//! format: text
//! work_dir: /var/tmp
//! strict: true
//! metadata_member: metadata.json
//! configuration_member: file.sapp
//! ```
//!
//! The rules themselves are not configurable.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use mapp_bundle::BundleLayout;
use serde::Deserialize;
use thiserror::Error;

use crate::check::CheckArgs;

/// Report written when no output path is configured.
pub const DEFAULT_OUTPUT: &str = "results.txt";

/// Report encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Sectioned plain text for reviewers.
    #[default]
    Text,
    /// Pretty-printed JSON for tooling.
    Json,
}

/// Error loading the YAML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Contents of the `--config` YAML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub output: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub work_dir: Option<PathBuf>,
    pub strict: Option<bool>,
    pub metadata_member: Option<String>,
    pub configuration_member: Option<String>,
}

impl FileConfig {
    /// Load and parse a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse YAML text. Blank text yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSettings {
    /// Bundle archive to check.
    pub archive: PathBuf,
    /// Report destination.
    pub output: PathBuf,
    pub format: ReportFormat,
    /// Parent of the extraction directory; `None` means the system temp dir.
    pub work_dir: Option<PathBuf>,
    /// Exit non-zero when any violation is recorded.
    pub strict: bool,
    pub layout: BundleLayout,
}

impl CheckSettings {
    /// Merge command-line flags over file values over defaults.
    pub fn resolve(args: &CheckArgs, file: &FileConfig) -> Self {
        let defaults = BundleLayout::default();
        Self {
            archive: args.file.clone(),
            output: args
                .output
                .clone()
                .or_else(|| file.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            format: args.format.or(file.format).unwrap_or_default(),
            work_dir: args.work_dir.clone().or_else(|| file.work_dir.clone()),
            strict: args.strict || file.strict.unwrap_or(false),
            layout: BundleLayout {
                metadata_member: file
                    .metadata_member
                    .clone()
                    .unwrap_or(defaults.metadata_member),
                configuration_member: file
                    .configuration_member
                    .clone()
                    .unwrap_or(defaults.configuration_member),
            },
        }
    }
}
