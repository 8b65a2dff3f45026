use crate::commands::{log_failure, log_outcome, CmdResult};
use crate::config::MergeMode;
use crate::error::Result;
use crate::model::Operation;
use crate::store::backend::StorageBackend;
use crate::store::repository::HuntRepository;

pub fn run<B: StorageBackend>(
    repo: &HuntRepository<B>,
    mode: MergeMode,
    hunt_id: &str,
    treasure_id: u32,
) -> Result<CmdResult> {
    let store = repo
        .load(hunt_id)
        .map_err(|e| log_failure(repo, mode, hunt_id, Operation::View, e))?;

    let mut result = CmdResult::default();
    match store.find_by_id(treasure_id) {
        Some(treasure) => {
            log_outcome(
                repo,
                mode,
                hunt_id,
                Operation::View,
                &format!(
                    "Viewed treasure ID: {}, Username: {}",
                    treasure.id, treasure.username
                ),
                &mut result,
            );
            Ok(result.with_listed_treasures(vec![treasure.clone()]))
        }
        None => {
            log_outcome(
                repo,
                mode,
                hunt_id,
                Operation::View,
                &format!("Failed to view treasure ID: {} (not found)", treasure_id),
                &mut result,
            );
            Ok(result.failed(format!(
                "Treasure with ID {} not found in hunt {}",
                treasure_id, hunt_id
            )))
        }
    }
}
