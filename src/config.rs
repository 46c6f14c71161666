//! Configuration for huffpack

use crate::error::{CompressError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest input the container can describe: `total_symbols` is a `u32`.
pub const MAX_CONTAINER_SYMBOLS: u64 = u32::MAX as u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub max_input_size: u64,
    pub io_buffer_size: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_input_size: MAX_CONTAINER_SYMBOLS,
            io_buffer_size: 64 * 1024, // 64 KiB
        }
    }
}

impl CompressionConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CompressError::file_access(path, e))?;
        let config: CompressionConfig = serde_json::from_str(&raw)
            .map_err(|e| CompressError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.io_buffer_size == 0 {
            return Err(CompressError::Config("io_buffer_size must be nonzero".into()));
        }
        if self.max_input_size > MAX_CONTAINER_SYMBOLS {
            return Err(CompressError::Config(format!(
                "max_input_size {} exceeds the container limit of {}",
                self.max_input_size, MAX_CONTAINER_SYMBOLS
            )));
        }
        Ok(())
    }
}
