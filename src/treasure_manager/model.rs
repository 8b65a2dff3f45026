use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;

/// ctime-style, always 24 characters wide: `Sat Oct 17 09:05:01 2026`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Longest details text a log line may carry, in bytes.
pub const MAX_LOG_DETAILS: usize = 1023;

#[derive(Debug, Clone, PartialEq)]
pub struct Treasure {
    pub id: u32,
    pub username: String,
    pub latitude: f64,
    pub longitude: f64,
    pub clue: String,
    pub value: i32,
}

/// Caller supplied fields of a treasure. The id is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTreasure {
    pub username: String,
    pub latitude: f64,
    pub longitude: f64,
    pub clue: String,
    pub value: i32,
}

impl NewTreasure {
    pub fn new(
        username: impl Into<String>,
        latitude: f64,
        longitude: f64,
        clue: impl Into<String>,
        value: i32,
    ) -> Self {
        Self {
            username: username.into(),
            latitude,
            longitude,
            clue: clue.into(),
            value,
        }
    }

    pub(crate) fn into_treasure(self, id: u32) -> Treasure {
        Treasure {
            id,
            username: self.username,
            latitude: self.latitude,
            longitude: self.longitude,
            clue: self.clue,
            value: self.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    List,
    View,
}

impl Operation {
    pub fn tag(&self) -> &'static str {
        match self {
            Operation::Add => "ADD",
            Operation::List => "LIST",
            Operation::View => "VIEW",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD" => Ok(Operation::Add),
            "LIST" => Ok(Operation::List),
            "VIEW" => Ok(Operation::View),
            other => Err(format!("unknown operation tag: {}", other)),
        }
    }
}

/// One line of a hunt's activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub operation: Operation,
    pub details: String,
}

impl LogEntry {
    pub fn new(at: DateTime<Local>, operation: Operation, details: &str) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            operation,
            details: bound_details(details),
        }
    }

    pub fn now(operation: Operation, details: &str) -> Self {
        Self::new(Local::now(), operation, details)
    }

    /// The line as written to disk, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!("[{}] {}: {}", self.timestamp, self.operation, self.details)
    }

    /// Parses a line produced by [`LogEntry::to_line`].
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('[')?;
        let (timestamp, rest) = rest.split_once("] ")?;
        let (tag, details) = rest.split_once(": ")?;
        let operation = tag.parse().ok()?;
        Some(Self {
            timestamp: timestamp.to_string(),
            operation,
            details: details.to_string(),
        })
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Flattens details to a single line and caps them at [`MAX_LOG_DETAILS`] bytes.
fn bound_details(details: &str) -> String {
    let flat: String = details
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.len() <= MAX_LOG_DETAILS {
        return flat;
    }
    let mut cut = MAX_LOG_DETAILS;
    while !flat.is_char_boundary(cut) {
        cut -= 1;
    }
    flat[..cut].to_string()
}

/// Size and modification time of a hunt's record file.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageInfo {
    pub size_bytes: u64,
    pub modified: DateTime<Local>,
}
