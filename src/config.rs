//! Runtime configuration, read from environment variables.
//!
//! - `OLYMPIC_DATA_SOURCE`: file path or URL of the dataset
//!   (default `assets/olympic.json`)
//! - `OLYMPIC_LOAD_TIMEOUT_SECS`: give up waiting for the load after this
//!   many seconds (default: wait forever)

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_DATA_SOURCE: &str = "assets/olympic.json";

const SOURCE_VAR: &str = "OLYMPIC_DATA_SOURCE";
const TIMEOUT_VAR: &str = "OLYMPIC_LOAD_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Where the dataset is fetched from.
    pub data_source: String,
    /// How long the presenter waits for the load to settle.
    pub load_timeout: Option<Duration>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            load_timeout: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(source) = lookup(SOURCE_VAR) {
            config.data_source = parse_source(SOURCE_VAR, &source)?;
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            config.load_timeout = Some(parse_timeout(TIMEOUT_VAR, &secs)?);
        }

        Ok(config)
    }

    /// Replace the data source, e.g. from a command-line flag.
    pub fn with_data_source(mut self, source: &str) -> Result<Self, ConfigError> {
        self.data_source = parse_source("--source", source)?;
        Ok(self)
    }

    pub fn with_load_timeout_secs(mut self, secs: u64) -> Result<Self, ConfigError> {
        self.load_timeout = Some(parse_timeout("--timeout-secs", &secs.to_string())?);
        Ok(self)
    }
}

fn parse_source(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Empty { name });
    }
    Ok(value.to_string())
}

fn parse_timeout(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        }),
    }
}
