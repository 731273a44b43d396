//! Application configuration

use std::env;

use tracing::warn;

use crate::error::{Error, Result};

/// Default "last N months" window applied before derivation
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 1;

/// Retained PR count above which a large-dataset warning is logged
pub const DEFAULT_LARGE_DATASET_THRESHOLD: usize = 150;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Months of history kept by the date-range pre-filter
    pub lookback_months: u32,
    pub large_dataset_threshold: usize,
    /// Recompute weekly and per-user aggregates over the filtered metrics
    pub filter_recomputes_summaries: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            large_dataset_threshold: DEFAULT_LARGE_DATASET_THRESHOLD,
            filter_recomputes_summaries: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            lookback_months: parse_var("LOOKBACK_MONTHS").unwrap_or(defaults.lookback_months),
            large_dataset_threshold: parse_var("LARGE_DATASET_THRESHOLD")
                .unwrap_or(defaults.large_dataset_threshold),
            filter_recomputes_summaries: env::var("FILTER_RECOMPUTES_SUMMARIES")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.filter_recomputes_summaries),
        }
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.lookback_months == 0 {
            return Err(Error::Config(
                "LOOKBACK_MONTHS must be at least 1".to_string(),
            ));
        }
        if self.large_dataset_threshold == 0 {
            return Err(Error::Config(
                "LARGE_DATASET_THRESHOLD must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {}={:?}, using default", name, raw);
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
