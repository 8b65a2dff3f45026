use crate::activity::ActivityLogger;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::MergeMode;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::repository::HuntRepository;

/// Reads a hunt's activity log. Reading is not itself logged.
pub fn run<B: StorageBackend>(
    repo: &HuntRepository<B>,
    mode: MergeMode,
    hunt_id: &str,
) -> Result<CmdResult> {
    let entries = ActivityLogger::new(repo.backend(), mode).entries(hunt_id)?;

    let mut result = CmdResult::default();
    if entries.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No activity logged for hunt: {}",
            hunt_id
        )));
    }
    Ok(result.with_log_entries(entries))
}
