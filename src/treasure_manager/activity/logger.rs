use super::aggregate::LogAggregator;
use crate::config::MergeMode;
use crate::error::Result;
use crate::model::{LogEntry, Operation};
use crate::store::backend::StorageBackend;

/// Appends timestamped entries to a hunt's activity log.
pub struct ActivityLogger<'a, B: StorageBackend> {
    backend: &'a B,
    mode: MergeMode,
}

impl<'a, B: StorageBackend> ActivityLogger<'a, B> {
    pub fn new(backend: &'a B, mode: MergeMode) -> Self {
        Self { backend, mode }
    }

    /// Appends one entry, then merges all hunt logs into the combined log.
    ///
    /// Only a failed append is returned; a failed merge is reported through
    /// tracing and otherwise ignored, as the combined log can be regenerated.
    pub fn record(&self, hunt_id: &str, operation: Operation, details: &str) -> Result<LogEntry> {
        let entry = LogEntry::now(operation, details);
        {
            self.backend.ensure_hunt(hunt_id)?;
            let _lock = self.backend.lock_hunt(hunt_id)?;
            self.backend.append_log_line(hunt_id, &entry.to_line())?;
        }
        tracing::debug!(hunt = hunt_id, entry = %entry, "logged operation");

        if let Err(e) = LogAggregator::new(self.backend, self.mode).rebuild() {
            tracing::warn!(error = %e, "could not merge hunt logs");
        }
        Ok(entry)
    }

    /// Parsed entries of a hunt's log, oldest first. Lines that do not parse
    /// are skipped.
    pub fn entries(&self, hunt_id: &str) -> Result<Vec<LogEntry>> {
        let Some(text) = self.backend.read_log(hunt_id)? else {
            return Ok(Vec::new());
        };
        Ok(text
            .lines()
            .filter_map(|line| {
                let parsed = LogEntry::parse_line(line);
                if parsed.is_none() && !line.is_empty() {
                    tracing::debug!(hunt = hunt_id, line, "unparseable log line");
                }
                parsed
            })
            .collect())
    }
}
