use crate::activity::LogAggregator;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::MergeMode;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::repository::HuntRepository;

/// Regenerates the combined log on demand.
pub fn run<B: StorageBackend>(repo: &HuntRepository<B>, mode: MergeMode) -> Result<CmdResult> {
    let report = LogAggregator::new(repo.backend(), mode).rebuild()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Hunt logs merged successfully ({} hunts)",
        report.hunts.len()
    )));
    Ok(result.with_merged_hunts(report.hunts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::commands::test_support::repo;
    use crate::model::NewTreasure;

    #[test]
    fn merges_every_logged_hunt() {
        let repo = repo();
        for hunt in ["A", "B"] {
            add::run(
                &repo,
                MergeMode::Rebuild,
                hunt,
                NewTreasure::new("alice", 0.0, 0.0, "clue", 1),
            )
            .unwrap();
        }

        let result = run(&repo, MergeMode::Rebuild).unwrap();
        assert_eq!(result.merged_hunts, vec!["huntA", "huntB"]);
    }
}
