use crate::commands::{log_failure, log_outcome, CmdMessage, CmdResult};
use crate::config::MergeMode;
use crate::error::Result;
use crate::model::Operation;
use crate::store::backend::StorageBackend;
use crate::store::repository::HuntRepository;

pub fn run<B: StorageBackend>(
    repo: &HuntRepository<B>,
    mode: MergeMode,
    hunt_id: &str,
) -> Result<CmdResult> {
    // Saves replace the record file atomically, so reads need no lock
    let store = repo
        .load(hunt_id)
        .map_err(|e| log_failure(repo, mode, hunt_id, Operation::List, e))?;

    let mut result = CmdResult::default();
    if store.is_empty() {
        log_outcome(
            repo,
            mode,
            hunt_id,
            Operation::List,
            "No treasures found",
            &mut result,
        );
        result.add_message(CmdMessage::info(format!(
            "No treasures found in hunt: {}",
            hunt_id
        )));
        return Ok(result);
    }

    let info = repo
        .storage_info(hunt_id)
        .map_err(|e| log_failure(repo, mode, hunt_id, Operation::List, e))?;

    log_outcome(
        repo,
        mode,
        hunt_id,
        Operation::List,
        &format!("Listed {} treasures", store.count()),
        &mut result,
    );
    Ok(result
        .with_storage_info(info)
        .with_listed_treasures(store.treasures().to_vec()))
}
