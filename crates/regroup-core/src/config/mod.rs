use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegroupError, Result};
use crate::extract::ExtractOptions;
use crate::llm_io::parse_env_bool;

mod env;
mod markers;

pub use markers::LineMarkers;

pub const ENV_MIN_SIZE: &str = "REGROUP_MIN_SIZE";
pub const ENV_MAX_SIZE: &str = "REGROUP_MAX_SIZE";
pub const ENV_STRICT_IDS: &str = "REGROUP_STRICT_IDS";

pub const DEFAULT_MIN_SIZE: usize = 8;
pub const DEFAULT_MAX_SIZE: usize = 10;

/// Validated sub-group size bounds: `1 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeBounds {
    min: usize,
    max: usize,
}

impl SizeBounds {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min == 0 {
            return Err(RegroupError::Configuration(
                "min_size must be >= 1".to_string(),
            ));
        }
        if max == 0 {
            return Err(RegroupError::Configuration(
                "max_size must be >= 1".to_string(),
            ));
        }
        if min > max {
            return Err(RegroupError::Configuration(format!(
                "min_size ({min}) must not exceed max_size ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    #[must_use]
    pub const fn admits(&self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SIZE,
            max: DEFAULT_MAX_SIZE,
        }
    }
}

/// Run configuration. Sizes stay raw here so every layer (file, env, flags)
/// can override them; `bounds()` validates the final combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegroupConfig {
    pub min_size: usize,
    pub max_size: usize,
    pub strict_ids: bool,
    pub markers: LineMarkers,
}

impl Default for RegroupConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            strict_ids: false,
            markers: LineMarkers::default(),
        }
    }
}

impl RegroupConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(min_size) = env::read_env_usize_optional(ENV_MIN_SIZE) {
            self.min_size = min_size;
        }
        if let Some(max_size) = env::read_env_usize_optional(ENV_MAX_SIZE) {
            self.max_size = max_size;
        }
        if let Some(raw) = env::read_non_empty_env(ENV_STRICT_IDS) {
            self.strict_ids = parse_env_bool(Some(&raw));
        }
        self
    }

    pub fn bounds(&self) -> Result<SizeBounds> {
        SizeBounds::new(self.min_size, self.max_size)
    }

    #[must_use]
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            strict_ids: self.strict_ids,
            markers: self.markers.clone(),
        }
    }
}
