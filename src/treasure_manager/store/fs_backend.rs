use super::backend::{HuntLock, HuntLog, StorageBackend};
use super::paths::HuntPaths;
use crate::config::MergeMode;
use crate::error::{Result, TreasureError};
use crate::model::StorageInfo;
use chrono::{DateTime, Local};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use uuid::Uuid;

pub struct FsBackend {
    paths: HuntPaths,
}

impl FsBackend {
    pub fn new(paths: HuntPaths) -> Self {
        Self { paths }
    }

    /// Read a file, treating a missing file as `None`.
    fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TreasureError::StorageUnavailable {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write to a temp file beside `target`, then rename over it.
    fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
        let dir = target.parent().unwrap_or_else(|| Path::new("."));
        let tmp_path = dir.join(format!(".write-{}.tmp", Uuid::new_v4()));
        let write_err = |source| TreasureError::StorageWriteError {
            path: target.to_path_buf(),
            source,
        };

        if let Err(e) = fs::write(&tmp_path, bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(write_err(e));
        }
        fs::rename(&tmp_path, target).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            write_err(e)
        })
    }

    fn append(path: &Path, text: &str) -> Result<()> {
        let write_err = |source| TreasureError::StorageWriteError {
            path: path.to_path_buf(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(write_err)?;
        file.write_all(text.as_bytes()).map_err(write_err)?;
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn ensure_hunt(&self, hunt_id: &str) -> Result<()> {
        let dir = self.paths.hunt_dir(hunt_id)?;
        fs::create_dir_all(&dir).map_err(|source| TreasureError::StorageUnavailable {
            path: dir.clone(),
            source,
        })
    }

    fn lock_hunt(&self, hunt_id: &str) -> Result<HuntLock> {
        let lock_path = self.paths.lock_file(hunt_id)?;
        let unavailable = |source| TreasureError::StorageUnavailable {
            path: lock_path.clone(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(unavailable)?;

        // Blocks while another process holds the hunt
        file.lock_exclusive().map_err(unavailable)?;
        Ok(HuntLock::held(file))
    }

    fn read_records(&self, hunt_id: &str) -> Result<Option<Vec<u8>>> {
        Self::read_optional(&self.paths.records_file(hunt_id)?)
    }

    fn write_records(&self, hunt_id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.paths.records_file(hunt_id)?;
        Self::write_atomic(&path, bytes)
    }

    fn records_info(&self, hunt_id: &str) -> Result<Option<StorageInfo>> {
        let path = self.paths.records_file(hunt_id)?;
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(TreasureError::StorageUnavailable { path, source }),
        };
        let modified: DateTime<Local> = meta.modified().unwrap_or(SystemTime::now()).into();
        Ok(Some(StorageInfo {
            size_bytes: meta.len(),
            modified,
        }))
    }

    fn append_log_line(&self, hunt_id: &str, line: &str) -> Result<()> {
        let path = self.paths.log_file(hunt_id)?;
        Self::append(&path, &format!("{}\n", line))
    }

    fn read_log(&self, hunt_id: &str) -> Result<Option<String>> {
        let bytes = Self::read_optional(&self.paths.log_file(hunt_id)?)?;
        Ok(bytes.map(|b| String::from_utf8_lossy(&b).into_owned()))
    }

    fn hunt_logs(&self) -> Result<Vec<HuntLog>> {
        let root = self.paths.data_root();
        let entries = fs::read_dir(root).map_err(|source| TreasureError::StorageUnavailable {
            path: root.to_path_buf(),
            source,
        })?;

        let mut logs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.path().is_dir() {
                continue;
            }
            let dir_name = entry.file_name().to_string_lossy().into_owned();
            let log_path: PathBuf = match self.paths.log_file_in(&dir_name) {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(hunt = %dir_name, error = %e, "skipping hunt log");
                    continue;
                }
            };
            // One unreadable log must not drop every other hunt from the merge
            match Self::read_optional(&log_path) {
                Ok(Some(bytes)) => logs.push(HuntLog {
                    dir_name,
                    contents: String::from_utf8_lossy(&bytes).into_owned(),
                }),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(hunt = %dir_name, error = %e, "skipping hunt log");
                }
            }
        }
        Ok(logs)
    }

    fn write_combined_log(&self, text: &str, mode: MergeMode) -> Result<()> {
        let path = self.paths.combined_log();
        match mode {
            MergeMode::Rebuild => Self::write_atomic(path, text.as_bytes()),
            MergeMode::Append => Self::append(path, text),
        }
    }
}
