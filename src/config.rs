//! Output configuration for the command-line front end
//!
//! Defaults can be overridden from the environment:
//!   CALC_OUTPUT_FORMAT (table | csv | json), CALC_DECIMALS, CALC_PREVIEW_ROWS

use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Largest supported number of decimal places; f64 carries no more
pub const MAX_DECIMALS: usize = 15;

/// How results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub format: OutputFormat,

    /// Decimal places for monetary amounts
    pub decimals: usize,

    /// Limit on schedule rows printed in table format (None = all)
    pub preview_rows: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            decimals: 2,
            preview_rows: None,
        }
    }
}

impl RenderConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparseable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(format) = parse_var(&lookup, "CALC_OUTPUT_FORMAT") {
            config.format = format;
        }
        if let Some(decimals) = parse_var::<usize, _>(&lookup, "CALC_DECIMALS") {
            config.set_decimals(decimals);
        }
        if let Some(rows) = parse_var(&lookup, "CALC_PREVIEW_ROWS") {
            config.preview_rows = Some(rows);
        }

        config
    }

    /// Set decimal places, clamped to `MAX_DECIMALS`
    pub fn set_decimals(&mut self, decimals: usize) {
        if decimals > MAX_DECIMALS {
            warn!("Clamping {} decimal places to {}", decimals, MAX_DECIMALS);
        }
        self.decimals = decimals.min(MAX_DECIMALS);
    }
}

fn parse_var<T: FromStr, F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}
