//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all treasure operations, regardless of the UI being used.
//!
//! The facade dispatches to `commands/*.rs`, carries the configured
//! [`MergeMode`], and returns structured `Result<CmdResult>` values. It does no
//! printing and holds no business logic.
//!
//! ## Generic Over StorageBackend
//!
//! `HuntApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `HuntApi<FsBackend>`
//! - Testing: `HuntApi<MemBackend>`

use crate::commands;
use crate::config::{MergeMode, TreasureConfig};
use crate::error::Result;
use crate::model::NewTreasure;
use crate::store::backend::StorageBackend;
use crate::store::repository::HuntRepository;

/// The main API facade for treasure hunt operations.
pub struct HuntApi<B: StorageBackend> {
    repo: HuntRepository<B>,
    config: TreasureConfig,
}

impl<B: StorageBackend> HuntApi<B> {
    pub fn new(backend: B, config: TreasureConfig) -> Self {
        Self {
            repo: HuntRepository::with_backend(backend),
            config,
        }
    }

    pub fn add_treasure(&self, hunt_id: &str, fields: NewTreasure) -> Result<CmdResult> {
        commands::add::run(&self.repo, self.merge_mode(), hunt_id, fields)
    }

    pub fn list_treasures(&self, hunt_id: &str) -> Result<CmdResult> {
        commands::list::run(&self.repo, self.merge_mode(), hunt_id)
    }

    pub fn view_treasure(&self, hunt_id: &str, treasure_id: u32) -> Result<CmdResult> {
        commands::view::run(&self.repo, self.merge_mode(), hunt_id, treasure_id)
    }

    pub fn hunt_log(&self, hunt_id: &str) -> Result<CmdResult> {
        commands::log::run(&self.repo, self.merge_mode(), hunt_id)
    }

    pub fn merge_logs(&self) -> Result<CmdResult> {
        commands::merge::run(&self.repo, self.merge_mode())
    }

    pub fn config(&self) -> &TreasureConfig {
        &self.config
    }

    pub fn repository(&self) -> &HuntRepository<B> {
        &self.repo
    }

    fn merge_mode(&self) -> MergeMode {
        self.config.merge_mode
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel, Outcome};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn api() -> HuntApi<MemBackend> {
        HuntApi::new(MemBackend::new(), TreasureConfig::default())
    }

    #[test]
    fn add_then_view_scenario() {
        let api = api();
        api.add_treasure("1", NewTreasure::new("alice", 10.0, 20.0, "find me\n", 500))
            .unwrap();

        let found = api.view_treasure("1", 1).unwrap();
        assert_eq!(found.listed_treasures[0].username, "alice");
        assert_eq!(found.listed_treasures[0].latitude, 10.0);
        assert_eq!(found.listed_treasures[0].longitude, 20.0);
        assert_eq!(found.listed_treasures[0].clue, "find me");

        let missing = api.view_treasure("1", 2).unwrap();
        assert!(missing.is_failed());
    }

    #[test]
    fn every_primary_operation_logs_once() {
        let api = api();
        let backend = api.repository().backend();

        api.add_treasure("1", NewTreasure::new("alice", 0.0, 0.0, "c", 1))
            .unwrap();
        assert_eq!(backend.log_line_count("1"), 1);
        api.list_treasures("1").unwrap();
        assert_eq!(backend.log_line_count("1"), 2);
        api.view_treasure("1", 1).unwrap();
        assert_eq!(backend.log_line_count("1"), 3);
        api.view_treasure("1", 9).unwrap();
        assert_eq!(backend.log_line_count("1"), 4);
        api.hunt_log("1").unwrap();
        assert_eq!(backend.log_line_count("1"), 4);
    }

    #[test]
    fn append_mode_is_threaded_to_the_aggregator() {
        let config = TreasureConfig {
            merge_mode: MergeMode::Append,
            ..TreasureConfig::default()
        };
        let api = HuntApi::new(MemBackend::new(), config);
        api.list_treasures("1").unwrap();
        api.list_treasures("1").unwrap();

        let combined = api.repository().backend().combined_log().unwrap();
        assert_eq!(combined.matches("=== Log for Hunt: hunt1 ===").count(), 2);
    }
}
