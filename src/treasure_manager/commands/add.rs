use crate::commands::{log_failure, log_outcome, CmdMessage, CmdResult};
use crate::config::MergeMode;
use crate::error::{Result, TreasureError};
use crate::model::{NewTreasure, Operation, Treasure};
use crate::store::backend::StorageBackend;
use crate::store::repository::HuntRepository;

pub fn run<B: StorageBackend>(
    repo: &HuntRepository<B>,
    mode: MergeMode,
    hunt_id: &str,
    fields: NewTreasure,
) -> Result<CmdResult> {
    match append(repo, hunt_id, fields) {
        Ok(treasure) => {
            let mut result = CmdResult::default();
            log_outcome(
                repo,
                mode,
                hunt_id,
                Operation::Add,
                &format!(
                    "Added treasure ID: {}, Username: {}, Value: {}",
                    treasure.id, treasure.username, treasure.value
                ),
                &mut result,
            );
            result.add_message(CmdMessage::success(format!(
                "Treasure added successfully with ID: {}",
                treasure.id
            )));
            Ok(result.with_affected_treasures(vec![treasure]))
        }
        Err(TreasureError::CapacityExceeded { .. }) => {
            let mut result = CmdResult::default();
            log_outcome(
                repo,
                mode,
                hunt_id,
                Operation::Add,
                "Failed: Maximum number of treasures reached",
                &mut result,
            );
            Ok(result.failed("Error: Maximum number of treasures reached"))
        }
        Err(e @ (TreasureError::FieldTooLong { .. } | TreasureError::InvalidField { .. })) => {
            let mut result = CmdResult::default();
            log_outcome(
                repo,
                mode,
                hunt_id,
                Operation::Add,
                &format!("Failed: {}", e),
                &mut result,
            );
            Ok(result.failed(format!("Error: {}", e)))
        }
        Err(e) => Err(log_failure(repo, mode, hunt_id, Operation::Add, e)),
    }
}

/// Load, append and save under the hunt's lock.
fn append<B: StorageBackend>(
    repo: &HuntRepository<B>,
    hunt_id: &str,
    fields: NewTreasure,
) -> Result<Treasure> {
    let _lock = repo.lock(hunt_id)?;
    let mut store = repo.load(hunt_id)?;
    let id = store.append(fields)?;
    repo.save(&store)?;

    let treasure = store
        .find_by_id(id)
        .cloned()
        .ok_or(TreasureError::NotFound {
            hunt_id: hunt_id.to_string(),
            id,
        })?;
    Ok(treasure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::repo;
    use crate::store::record::MAX_TREASURES;

    fn alice() -> NewTreasure {
        NewTreasure::new("alice", 10.0, 20.0, "find me", 500)
    }

    #[test]
    fn adds_first_treasure_with_id_one() {
        let repo = repo();
        let result = run(&repo, MergeMode::Rebuild, "1", alice()).unwrap();

        assert!(!result.is_failed());
        assert_eq!(result.affected_treasures.len(), 1);
        assert_eq!(result.affected_treasures[0].id, 1);
        assert_eq!(repo.load("1").unwrap().count(), 1);
    }

    #[test]
    fn ids_follow_insertion_order() {
        let repo = repo();
        for expected in 1..=4u32 {
            let result = run(&repo, MergeMode::Rebuild, "1", alice()).unwrap();
            assert_eq!(result.affected_treasures[0].id, expected);
        }
    }

    #[test]
    fn logs_exactly_one_entry() {
        let repo = repo();
        run(&repo, MergeMode::Rebuild, "1", alice()).unwrap();
        assert_eq!(repo.backend.log_line_count("1"), 1);

        let combined = repo.backend.combined_log().unwrap();
        assert!(combined.contains("ADD: Added treasure ID: 1, Username: alice, Value: 500"));
    }

    #[test]
    fn capacity_exceeded_is_reported_and_logged() {
        let repo = repo();
        for _ in 0..MAX_TREASURES {
            run(&repo, MergeMode::Rebuild, "1", alice()).unwrap();
        }
        let before = repo.load("1").unwrap();

        let result = run(&repo, MergeMode::Rebuild, "1", alice()).unwrap();
        assert!(result.is_failed());
        assert!(result.affected_treasures.is_empty());
        assert_eq!(repo.load("1").unwrap(), before);
        assert_eq!(repo.backend.log_line_count("1"), MAX_TREASURES + 1);

        let last = repo.backend.read_log("1").unwrap().unwrap();
        assert!(last
            .lines()
            .last()
            .unwrap()
            .ends_with("ADD: Failed: Maximum number of treasures reached"));
    }

    #[test]
    fn invalid_fields_fail_without_saving() {
        let repo = repo();
        let result = run(
            &repo,
            MergeMode::Rebuild,
            "1",
            NewTreasure::new("two words", 0.0, 0.0, "x", 1),
        )
        .unwrap();
        assert!(result.is_failed());
        assert!(repo.load("1").unwrap().is_empty());
        assert_eq!(repo.backend.log_line_count("1"), 1);
    }

    #[test]
    fn write_failure_propagates_after_logging() {
        let repo = repo();
        repo.backend.set_simulate_write_error(true);
        let err = run(&repo, MergeMode::Rebuild, "1", alice()).unwrap_err();
        assert!(matches!(err, TreasureError::StorageWriteError { .. }));
        assert_eq!(repo.backend.log_line_count("1"), 1);
    }

    #[test]
    fn log_failure_does_not_undo_the_add() {
        let repo = repo();
        repo.backend.set_simulate_log_error(true);
        let result = run(&repo, MergeMode::Rebuild, "1", alice()).unwrap();

        assert!(!result.is_failed());
        assert_eq!(repo.load("1").unwrap().count(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.starts_with("Could not write activity log")));
    }

    #[test]
    fn path_too_long_is_an_error_and_not_logged() {
        let repo = repo();
        let long = "z".repeat(600);
        let err = run(&repo, MergeMode::Rebuild, &long, alice()).unwrap_err();
        assert!(matches!(err, TreasureError::PathTooLong { .. }));
        assert_eq!(repo.backend.combined_log(), None);
    }
}
