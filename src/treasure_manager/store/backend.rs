use crate::config::MergeMode;
use crate::error::Result;
use crate::model::StorageInfo;
use std::fs::File;

/// Contents of one hunt's activity log, as found while enumerating hunts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntLog {
    /// Name of the hunt's directory (`hunt<id>`)
    pub dir_name: String,
    pub contents: String,
}

/// Exclusive hold on one hunt. Released when dropped.
#[derive(Debug)]
pub struct HuntLock {
    _file: Option<File>,
}

impl HuntLock {
    pub(crate) fn held(file: File) -> Self {
        Self { _file: Some(file) }
    }

    /// A lock that guards nothing, for backends with no other writers.
    pub(crate) fn noop() -> Self {
        Self { _file: None }
    }
}

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while HuntRepository and the activity module handle the "what".
///
/// Every method taking a `hunt_id` rejects ids whose derived paths are
/// invalid or exceed the length bound.
pub trait StorageBackend {
    // --- Hunt Namespace ---

    /// Create the hunt's namespace if it does not exist yet. Idempotent.
    fn ensure_hunt(&self, hunt_id: &str) -> Result<()>;

    /// Take the hunt's exclusive lock. The hunt must already be provisioned.
    fn lock_hunt(&self, hunt_id: &str) -> Result<HuntLock>;

    // --- Record File ---

    /// Raw record bytes. Ok(None) when the hunt has never been saved.
    fn read_records(&self, hunt_id: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the record bytes in full.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_records(&self, hunt_id: &str, bytes: &[u8]) -> Result<()>;

    /// Size and mtime of the record file, if it exists.
    fn records_info(&self, hunt_id: &str) -> Result<Option<StorageInfo>>;

    // --- Activity Logs ---

    /// Append one line (a newline is added) to the hunt's log, creating it if needed.
    fn append_log_line(&self, hunt_id: &str, line: &str) -> Result<()>;

    /// Full text of the hunt's log. Ok(None) if nothing has been logged.
    fn read_log(&self, hunt_id: &str) -> Result<Option<String>>;

    /// Every hunt namespace that holds a log, in listing order.
    fn hunt_logs(&self) -> Result<Vec<HuntLog>>;

    /// Write the combined log, replacing or extending it according to `mode`.
    fn write_combined_log(&self, text: &str, mode: MergeMode) -> Result<()>;
}
