use super::backend::{HuntLock, HuntLog, StorageBackend};
use super::paths::HuntPaths;
use crate::config::MergeMode;
use crate::error::{Result, TreasureError};
use crate::model::StorageInfo;
use chrono::{DateTime, Local};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Clone)]
struct RecordsEntry {
    bytes: Vec<u8>,
    mtime: DateTime<Local>,
}

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the tool is single-threaded.
/// Hunt ids go through the same [`HuntPaths`] checks as on disk, so path
/// length and id errors surface identically.
pub struct MemBackend {
    paths: HuntPaths,
    // Insertion order stands in for directory listing order
    hunts: RefCell<Vec<String>>,
    records: RefCell<HashMap<String, RecordsEntry>>,
    logs: RefCell<HashMap<String, String>>,
    combined: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
    simulate_log_error: RefCell<bool>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            paths: HuntPaths::new("hunt", "hunt_log.txt"),
            hunts: RefCell::new(Vec::new()),
            records: RefCell::new(HashMap::new()),
            logs: RefCell::new(HashMap::new()),
            combined: RefCell::new(None),
            simulate_write_error: RefCell::new(false),
            simulate_log_error: RefCell::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make record writes fail, for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make log appends fail, for testing that operations still complete.
    pub fn set_simulate_log_error(&self, simulate: bool) {
        *self.simulate_log_error.borrow_mut() = simulate;
    }

    /// Test helper to plant arbitrary bytes as a hunt's record file.
    pub fn set_raw_records(&self, hunt_id: &str, bytes: Vec<u8>) {
        self.register(hunt_id);
        self.records.borrow_mut().insert(
            hunt_id.to_string(),
            RecordsEntry {
                bytes,
                mtime: Local::now(),
            },
        );
    }

    /// Current combined log, if one has been written.
    pub fn combined_log(&self) -> Option<String> {
        self.combined.borrow().clone()
    }

    /// Number of lines in a hunt's log.
    pub fn log_line_count(&self, hunt_id: &str) -> usize {
        self.logs
            .borrow()
            .get(hunt_id)
            .map(|log| log.lines().count())
            .unwrap_or(0)
    }

    fn register(&self, hunt_id: &str) {
        let mut hunts = self.hunts.borrow_mut();
        if !hunts.iter().any(|h| h == hunt_id) {
            hunts.push(hunt_id.to_string());
        }
    }

    fn is_registered(&self, hunt_id: &str) -> bool {
        self.hunts.borrow().iter().any(|h| h == hunt_id)
    }

    fn simulated(&self, flag: &RefCell<bool>, what: &str, hunt_id: &str) -> Result<()> {
        if *flag.borrow() {
            return Err(TreasureError::StorageWriteError {
                path: self.paths.hunt_dir(hunt_id)?,
                source: std::io::Error::other(format!("simulated {} error", what)),
            });
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn ensure_hunt(&self, hunt_id: &str) -> Result<()> {
        self.paths.hunt_dir(hunt_id)?;
        self.register(hunt_id);
        Ok(())
    }

    fn lock_hunt(&self, hunt_id: &str) -> Result<HuntLock> {
        self.paths.lock_file(hunt_id)?;
        Ok(HuntLock::noop())
    }

    fn read_records(&self, hunt_id: &str) -> Result<Option<Vec<u8>>> {
        self.paths.records_file(hunt_id)?;
        Ok(self.records.borrow().get(hunt_id).map(|e| e.bytes.clone()))
    }

    fn write_records(&self, hunt_id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.paths.records_file(hunt_id)?;
        self.simulated(&self.simulate_write_error, "write", hunt_id)?;
        if !self.is_registered(hunt_id) {
            return Err(TreasureError::StorageWriteError {
                path,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "hunt not provisioned"),
            });
        }
        self.records.borrow_mut().insert(
            hunt_id.to_string(),
            RecordsEntry {
                bytes: bytes.to_vec(),
                mtime: Local::now(),
            },
        );
        Ok(())
    }

    fn records_info(&self, hunt_id: &str) -> Result<Option<StorageInfo>> {
        self.paths.records_file(hunt_id)?;
        Ok(self.records.borrow().get(hunt_id).map(|e| StorageInfo {
            size_bytes: e.bytes.len() as u64,
            modified: e.mtime,
        }))
    }

    fn append_log_line(&self, hunt_id: &str, line: &str) -> Result<()> {
        self.paths.log_file(hunt_id)?;
        self.simulated(&self.simulate_log_error, "log", hunt_id)?;
        self.register(hunt_id);
        let mut logs = self.logs.borrow_mut();
        let log = logs.entry(hunt_id.to_string()).or_default();
        log.push_str(line);
        log.push('\n');
        Ok(())
    }

    fn read_log(&self, hunt_id: &str) -> Result<Option<String>> {
        self.paths.log_file(hunt_id)?;
        Ok(self.logs.borrow().get(hunt_id).cloned())
    }

    fn hunt_logs(&self) -> Result<Vec<HuntLog>> {
        let logs = self.logs.borrow();
        Ok(self
            .hunts
            .borrow()
            .iter()
            .filter_map(|hunt_id| {
                logs.get(hunt_id).map(|contents| HuntLog {
                    dir_name: format!("{}{}", super::paths::HUNT_DIR_PREFIX, hunt_id),
                    contents: contents.clone(),
                })
            })
            .collect())
    }

    fn write_combined_log(&self, text: &str, mode: MergeMode) -> Result<()> {
        let mut combined = self.combined.borrow_mut();
        match mode {
            MergeMode::Rebuild => *combined = Some(text.to_string()),
            MergeMode::Append => combined.get_or_insert_with(String::new).push_str(text),
        }
        Ok(())
    }
}
