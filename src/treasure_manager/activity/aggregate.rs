use crate::config::MergeMode;
use crate::error::Result;
use crate::store::backend::StorageBackend;

/// Hunts whose logs went into the combined log, in merge order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    pub hunts: Vec<String>,
}

/// Consolidates every per-hunt log into the combined log.
pub struct LogAggregator<'a, B: StorageBackend> {
    backend: &'a B,
    mode: MergeMode,
}

impl<'a, B: StorageBackend> LogAggregator<'a, B> {
    pub fn new(backend: &'a B, mode: MergeMode) -> Self {
        Self { backend, mode }
    }

    /// Writes a header, the verbatim log and a blank line for each hunt that
    /// has a log, in directory listing order.
    ///
    /// Fails without touching the combined log when the hunt namespace cannot
    /// be listed.
    pub fn rebuild(&self) -> Result<AggregateReport> {
        let logs = self.backend.hunt_logs()?;

        let mut text = String::new();
        let mut report = AggregateReport::default();
        for log in logs {
            text.push_str(&header(&log.dir_name));
            text.push_str(&log.contents);
            text.push('\n');
            report.hunts.push(log.dir_name);
        }

        self.backend.write_combined_log(&text, self.mode)?;
        tracing::debug!(hunts = report.hunts.len(), mode = ?self.mode, "merged hunt logs");
        Ok(report)
    }
}

pub fn header(dir_name: &str) -> String {
    format!("=== Log for Hunt: {} ===\n", dir_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn backend_with_logs() -> MemBackend {
        let backend = MemBackend::new();
        backend.append_log_line("A", "[t] ADD: first in A").unwrap();
        backend.append_log_line("B", "[t] ADD: first in B").unwrap();
        backend.append_log_line("A", "[t] LIST: Listed 1 treasures").unwrap();
        backend
    }

    #[test]
    fn covers_every_hunt_with_a_log() {
        let backend = backend_with_logs();
        backend.ensure_hunt("silent").unwrap();

        let report = LogAggregator::new(&backend, MergeMode::Rebuild)
            .rebuild()
            .unwrap();
        assert_eq!(report.hunts, vec!["huntA", "huntB"]);

        let combined = backend.combined_log().unwrap();
        assert_eq!(
            combined,
            "=== Log for Hunt: huntA ===\n\
             [t] ADD: first in A\n\
             [t] LIST: Listed 1 treasures\n\
             \n\
             === Log for Hunt: huntB ===\n\
             [t] ADD: first in B\n\
             \n"
        );
    }

    #[test]
    fn rebuild_mode_is_idempotent() {
        let backend = backend_with_logs();
        let aggregator = LogAggregator::new(&backend, MergeMode::Rebuild);
        aggregator.rebuild().unwrap();
        let first = backend.combined_log().unwrap();
        aggregator.rebuild().unwrap();
        assert_eq!(backend.combined_log().unwrap(), first);
    }

    #[test]
    fn append_mode_duplicates_earlier_merges() {
        let backend = backend_with_logs();
        let aggregator = LogAggregator::new(&backend, MergeMode::Append);
        aggregator.rebuild().unwrap();
        let first = backend.combined_log().unwrap();
        aggregator.rebuild().unwrap();
        assert_eq!(backend.combined_log().unwrap(), format!("{}{}", first, first));
    }

    #[test]
    fn no_logs_yields_empty_combined_log() {
        let backend = MemBackend::new();
        let report = LogAggregator::new(&backend, MergeMode::Rebuild)
            .rebuild()
            .unwrap();
        assert!(report.hunts.is_empty());
        assert_eq!(backend.combined_log().unwrap(), "");
    }
}
