//! TOML configuration file support.
//!
//! Instead of passing the same flags on every run, settings can live in a
//! config file:
//!
//! ```toml
//! # datscan.toml
//! [parser]
//! encodings = ["utf-8", "iso-8859-1"]
//! infer_measurement_type = true
//! numeric_locale = "invariant"
//!
//! [segments]
//! tolerance = 0.5
//! min_rows = 10
//! auto_detect = false
//! ```
//!
//! Command-line flags override file values, which override the per-type
//! measurement defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use datscan::parser::ParserConfig;

/// Root configuration structure for datscan.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Parser settings.
    #[serde(default)]
    pub parser: ParserConfig,

    /// Segment matching settings.
    #[serde(default)]
    pub segments: SegmentsConfig,
}

/// Configuration for the segments and export commands.
#[derive(Debug, Default, Deserialize)]
pub struct SegmentsConfig {
    /// Tolerance around the mean.
    pub tolerance: Option<f64>,

    /// Minimum number of continuous rows.
    pub min_rows: Option<usize>,

    /// Auto-detect clusters when no mean is given. With `false`, the mean of
    /// the whole column is used as target.
    pub auto_detect: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
