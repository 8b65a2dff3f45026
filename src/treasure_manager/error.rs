use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreasureError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Maximum number of treasures reached ({max}) in hunt {hunt_id}")]
    CapacityExceeded { hunt_id: String, max: usize },

    #[error("Treasure with ID {id} not found in hunt {hunt_id}")]
    NotFound { hunt_id: String, id: u32 },

    #[error("Path too long ({len} bytes, limit {max}): {path}")]
    PathTooLong {
        path: PathBuf,
        len: usize,
        max: usize,
    },

    #[error("Invalid hunt id {0:?}")]
    InvalidHuntId(String),

    #[error("Field '{field}' is too long ({len} bytes, limit {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("Storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    StorageWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt treasure store for hunt {hunt_id}: {reason}")]
    CorruptStore { hunt_id: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TreasureError>;
