use crate::activity::ActivityLogger;
use crate::config::MergeMode;
use crate::error::TreasureError;
use crate::model::{LogEntry, Operation, StorageInfo, Treasure};
use crate::store::backend::StorageBackend;
use crate::store::repository::HuntRepository;

pub mod add;
pub mod list;
pub mod log;
pub mod merge;
pub mod view;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Whether the command did what was asked. A `Failed` command still ran to
/// completion (and was logged); the CLI turns it into a non-zero exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Completed,
    Failed,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub outcome: Outcome,
    pub affected_treasures: Vec<Treasure>,
    pub listed_treasures: Vec<Treasure>,
    pub storage_info: Option<StorageInfo>,
    pub log_entries: Vec<LogEntry>,
    pub merged_hunts: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn failed(mut self, message: impl Into<String>) -> Self {
        self.outcome = Outcome::Failed;
        self.messages.push(CmdMessage::error(message));
        self
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == Outcome::Failed
    }

    pub fn with_affected_treasures(mut self, treasures: Vec<Treasure>) -> Self {
        self.affected_treasures = treasures;
        self
    }

    pub fn with_listed_treasures(mut self, treasures: Vec<Treasure>) -> Self {
        self.listed_treasures = treasures;
        self
    }

    pub fn with_storage_info(mut self, info: Option<StorageInfo>) -> Self {
        self.storage_info = info;
        self
    }

    pub fn with_log_entries(mut self, entries: Vec<LogEntry>) -> Self {
        self.log_entries = entries;
        self
    }

    pub fn with_merged_hunts(mut self, hunts: Vec<String>) -> Self {
        self.merged_hunts = hunts;
        self
    }
}

/// Errors raised before a hunt's log location is known to be valid.
fn is_unloggable(err: &TreasureError) -> bool {
    matches!(
        err,
        TreasureError::InvalidHuntId(_) | TreasureError::PathTooLong { .. }
    )
}

/// Writes the operation's single log entry. A failed append becomes a
/// warning on the result; the operation itself is not undone.
fn log_outcome<B: StorageBackend>(
    repo: &HuntRepository<B>,
    mode: MergeMode,
    hunt_id: &str,
    operation: Operation,
    details: &str,
    result: &mut CmdResult,
) {
    let logger = ActivityLogger::new(repo.backend(), mode);
    if let Err(e) = logger.record(hunt_id, operation, details) {
        tracing::warn!(hunt = hunt_id, %operation, error = %e, "activity log append failed");
        result.add_message(CmdMessage::warning(format!(
            "Could not write activity log: {}",
            e
        )));
    }
}

/// Logs a hard failure (when the hunt can be logged at all) and hands the
/// error back for propagation.
fn log_failure<B: StorageBackend>(
    repo: &HuntRepository<B>,
    mode: MergeMode,
    hunt_id: &str,
    operation: Operation,
    err: TreasureError,
) -> TreasureError {
    if !is_unloggable(&err) {
        let mut ignored = CmdResult::default();
        log_outcome(
            repo,
            mode,
            hunt_id,
            operation,
            &format!("Failed: {}", err),
            &mut ignored,
        );
    }
    err
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::store::mem_backend::MemBackend;
    use crate::store::repository::HuntRepository;

    pub fn repo() -> HuntRepository<MemBackend> {
        HuntRepository::with_backend(MemBackend::new())
    }
}
