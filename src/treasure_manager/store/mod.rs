//! # Storage Layer
//!
//! Everything that touches persisted hunt data.
//!
//! ## Pieces
//!
//! - [`record::RecordStore`]: one hunt's treasures in memory, plus the
//!   fixed-width binary format they are saved in.
//! - [`paths::HuntPaths`]: derives every on-disk location from a hunt id and
//!   enforces the path length bound.
//! - [`backend::StorageBackend`]: raw I/O, implemented by
//!   [`fs_backend::FsBackend`] (production) and [`mem_backend::MemBackend`]
//!   (tests).
//! - [`repository::HuntRepository`]: the load → mutate → save lifecycle.
//!
//! ## Storage Format
//!
//! ```text
//! <base>/
//! ├── hunt/
//! │   ├── hunt<id>/
//! │   │   ├── treasures.dat     # count + fixed-size records
//! │   │   ├── logged_hunt.txt   # activity log, one entry per line
//! │   │   └── .lock             # advisory lock file
//! │   └── ...
//! └── hunt_log.txt              # combined log, derived from the per-hunt logs
//! ```
//!
//! A hunt that was never saved has no `treasures.dat`; loading it yields an
//! empty store rather than an error.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod paths;
pub mod record;
pub mod repository;
