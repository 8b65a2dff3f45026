//! # Activity Logs
//!
//! Each hunt keeps an append-only log of the operations run against it, one
//! `[timestamp] OPERATION: details` line per operation. After every append,
//! all hunt logs are merged into a single combined log outside the hunt
//! namespace.
//!
//! The combined log is derived data. Losing it loses nothing; the next logged
//! operation (or `merge-logs`) regenerates it. How it is regenerated is set by
//! [`MergeMode`](crate::config::MergeMode): `rebuild` rewrites it from
//! scratch, `append` keeps adding full merges to the end.

pub mod aggregate;
pub mod logger;

pub use aggregate::{AggregateReport, LogAggregator};
pub use logger::ActivityLogger;
