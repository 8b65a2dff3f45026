use crate::error::{Result, TreasureError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "treasure.json";
const DEFAULT_DATA_DIR: &str = "hunt";
const DEFAULT_COMBINED_LOG: &str = "hunt_log.txt";

/// How the combined log is regenerated after each logged operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Truncate and rewrite; repeated merges produce the same file.
    #[default]
    Rebuild,
    /// Append every merge to the existing file. Earlier merges are duplicated.
    Append,
}

/// Configuration, stored as `treasure.json` in the base directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreasureConfig {
    /// Directory holding one `hunt<id>` directory per hunt
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// File the per-hunt logs are merged into
    #[serde(default = "default_combined_log")]
    pub combined_log: String,

    #[serde(default)]
    pub merge_mode: MergeMode,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_combined_log() -> String {
    DEFAULT_COMBINED_LOG.to_string()
}

impl Default for TreasureConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            combined_log: default_combined_log(),
            merge_mode: MergeMode::default(),
        }
    }
}

impl TreasureConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TreasureError::Io)?;
        let config: TreasureConfig =
            serde_json::from_str(&content).map_err(TreasureError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    #[cfg(test)]
    pub fn save<P: AsRef<Path>>(&self, base_dir: P) -> Result<()> {
        let base_dir = base_dir.as_ref();

        if !base_dir.exists() {
            fs::create_dir_all(base_dir).map_err(TreasureError::Io)?;
        }

        let config_path = base_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TreasureError::Serialization)?;
        fs::write(config_path, content).map_err(TreasureError::Io)?;
        Ok(())
    }
}
