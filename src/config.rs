use std::time::Duration;

use crate::data::source::DatasetSource;

/// Dataset URL or local path.
pub const DATASET_ENV: &str = "SURVEY_DATASET";
/// Download timeout in seconds.
pub const TIMEOUT_ENV: &str = "SURVEY_FETCH_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source: DatasetSource,
    pub fetch_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            source: DatasetSource::default(),
            fetch_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset or blank values keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = DashboardConfig::default();

        if let Some(raw) = get(DATASET_ENV) {
            config.source = DatasetSource::parse(&raw);
        }

        if let Some(raw) = get(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.fetch_timeout = Duration::from_secs(secs),
                _ => log::warn!(
                    "Ignoring {TIMEOUT_ENV}={raw:?}; using {}s",
                    DEFAULT_TIMEOUT.as_secs()
                ),
            }
        }

        config
    }
}
