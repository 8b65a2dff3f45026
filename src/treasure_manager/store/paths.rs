use crate::config::TreasureConfig;
use crate::error::{Result, TreasureError};
use std::path::{Path, PathBuf};

/// Longest derived path accepted, in bytes.
pub const MAX_PATH_LEN: usize = 512;

pub const HUNT_DIR_PREFIX: &str = "hunt";
pub const RECORDS_FILENAME: &str = "treasures.dat";
pub const LOG_FILENAME: &str = "logged_hunt.txt";
pub const LOCK_FILENAME: &str = ".lock";

/// Every on-disk location, derived from the base directory and configuration.
///
/// All methods return freshly owned paths; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct HuntPaths {
    data_root: PathBuf,
    combined_log: PathBuf,
}

impl HuntPaths {
    pub fn new(data_root: impl Into<PathBuf>, combined_log: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            combined_log: combined_log.into(),
        }
    }

    pub fn from_config(base: &Path, config: &TreasureConfig) -> Self {
        Self::new(base.join(&config.data_dir), base.join(&config.combined_log))
    }

    /// Namespace holding one directory per hunt.
    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub fn combined_log(&self) -> &Path {
        &self.combined_log
    }

    pub fn hunt_dir(&self, hunt_id: &str) -> Result<PathBuf> {
        check_hunt_id(hunt_id)?;
        bounded(
            self.data_root
                .join(format!("{}{}", HUNT_DIR_PREFIX, hunt_id)),
        )
    }

    pub fn records_file(&self, hunt_id: &str) -> Result<PathBuf> {
        bounded(self.hunt_dir(hunt_id)?.join(RECORDS_FILENAME))
    }

    pub fn log_file(&self, hunt_id: &str) -> Result<PathBuf> {
        bounded(self.hunt_dir(hunt_id)?.join(LOG_FILENAME))
    }

    pub fn lock_file(&self, hunt_id: &str) -> Result<PathBuf> {
        bounded(self.hunt_dir(hunt_id)?.join(LOCK_FILENAME))
    }

    /// Log file inside an already enumerated hunt directory.
    pub fn log_file_in(&self, hunt_dir_name: &str) -> Result<PathBuf> {
        bounded(self.data_root.join(hunt_dir_name).join(LOG_FILENAME))
    }
}

fn check_hunt_id(hunt_id: &str) -> Result<()> {
    if hunt_id.is_empty() || hunt_id.contains(['/', '\\', '\0']) {
        return Err(TreasureError::InvalidHuntId(hunt_id.to_string()));
    }
    Ok(())
}

fn bounded(path: PathBuf) -> Result<PathBuf> {
    let len = path.as_os_str().len();
    if len > MAX_PATH_LEN {
        return Err(TreasureError::PathTooLong {
            path,
            len,
            max: MAX_PATH_LEN,
        });
    }
    Ok(path)
}
