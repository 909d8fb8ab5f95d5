use crate::error::{Result, ScreeningError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScreeningConfig {
    /// Threshold applied to queries built by the engine.
    pub default_threshold: u8,
    /// Shard count for the parallel scan; 0 or 1 scans sequentially.
    pub workers: usize,
    /// Lists smaller than this are always scanned sequentially.
    pub parallel_min_subjects: usize,
    /// Country code -> display name and advisory.
    pub countries: BTreeMap<String, CountryInfo>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CountryInfo {
    pub name: String,
    #[serde(default)]
    pub advisory: Option<String>,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            default_threshold: 80,
            workers: 4,
            parallel_min_subjects: 512,
            countries: BTreeMap::new(),
        }
    }
}

impl ScreeningConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: ScreeningConfig =
            toml::from_str(raw).map_err(|e| ScreeningError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ScreeningError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&raw)?;
        info!(
            "Loaded screening config from {} ({} countries)",
            path.display(),
            config.countries.len()
        );
        Ok(config)
    }

    /// Apply `SCREENING_DEFAULT_THRESHOLD`, `SCREENING_WORKERS` and
    /// `SCREENING_PARALLEL_MIN_SUBJECTS` from the environment.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(threshold) = env_var::<u8>("SCREENING_DEFAULT_THRESHOLD")? {
            self.default_threshold = threshold;
        }
        if let Some(workers) = env_var::<usize>("SCREENING_WORKERS")? {
            self.workers = workers;
        }
        if let Some(min) = env_var::<usize>("SCREENING_PARALLEL_MIN_SUBJECTS")? {
            self.parallel_min_subjects = min;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_threshold > 100 {
            return Err(ScreeningError::InvalidThreshold(self.default_threshold));
        }
        for (code, info) in &self.countries {
            if info.name.trim().is_empty() {
                warn!("Country {} has no display name", code);
            }
        }
        Ok(())
    }
}

fn env_var<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ScreeningError::Config(format!("{}={}: {}", key, raw, e))),
        Err(_) => Ok(None),
    }
}
