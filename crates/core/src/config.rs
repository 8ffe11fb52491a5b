//! Dataset configuration.
//!
//! # Example
//!
//! ```toml
//! [dataset]
//! data_dir = "data/scan"
//! subset = "addprim_jump"
//! n_sample = 0.1
//! seed = 42
//! max_len = 9
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Subset;
use crate::error::ScanError;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
}

/// `[dataset]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Root directory holding the `*_split` directories.
    pub data_dir: PathBuf,
    pub subset: Subset,
    /// Fraction (`<= 1.0`) or count of examples to keep after shuffling.
    pub n_sample: Option<f64>,
    /// Shuffle seed used when `n_sample` is set.
    pub seed: u64,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            data_dir: PathBuf::from("data"),
            subset: Subset::default(),
            n_sample: None,
            seed: 0,
            min_len: None,
            max_len: None,
        }
    }
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<(), ScanError> {
        if let Some(n) = self.n_sample {
            if !n.is_finite() || n < 0.0 {
                return Err(ScanError::Config {
                    message: format!("n_sample must be a non-negative number, got {}", n),
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min_len, self.max_len) {
            if min > max {
                return Err(ScanError::Config {
                    message: format!("min_len {} is greater than max_len {}", min, max),
                });
            }
        }
        Ok(())
    }
}

impl ScanConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ScanError> {
        let config: ScanConfig = toml::from_str(text).map_err(|e| ScanError::Config {
            message: e.to_string(),
        })?;
        config.dataset.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file. Relative `data_dir` values
    /// are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ScanError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text).map_err(|e| match e {
            ScanError::Config { message } => ScanError::Config {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })?;
        if config.dataset.data_dir.is_relative() {
            if let Some(base) = path.parent() {
                config.dataset.data_dir = base.join(&config.dataset.data_dir);
            }
        }
        debug!(path = %path.display(), data_dir = %config.dataset.data_dir.display(), "loaded configuration");
        Ok(config)
    }
}
