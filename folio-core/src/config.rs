//! Processing configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default bound, in pixels, for the larger side of a cover thumbnail
pub const DEFAULT_MAX_COVER_IMAGE_SIZE: u32 = 999;

/// Environment variable overriding [`ProcessorConfig::max_cover_image_size`]
pub const MAX_COVER_IMAGE_SIZE_ENV: &str = "FOLIO_MAX_COVER_IMAGE_SIZE";

/// Options read by the book processors and the thumbnail generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Larger dimension of generated cover thumbnails
    pub max_cover_image_size: u32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_cover_image_size: DEFAULT_MAX_COVER_IMAGE_SIZE,
        }
    }
}

impl ProcessorConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (used by tests)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(MAX_COVER_IMAGE_SIZE_ENV) {
            self.max_cover_image_size = match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: MAX_COVER_IMAGE_SIZE_ENV.to_string(),
                        value,
                    })
                }
            };
        }
        Ok(self)
    }
}
