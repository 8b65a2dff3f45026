//! # Record Store
//!
//! In-memory form of one hunt's treasures and the binary format it is
//! persisted in.
//!
//! ## File Format
//!
//! ```text
//! offset  size            field
//! 0       4               count (i32, little-endian)
//! 4       count * 1568    records, in insertion order
//! ```
//!
//! Each record has the natural C struct layout of a 64-bit host, so
//! `treasures.dat` files written by C tooling stay readable:
//!
//! ```text
//! 0     i32        id
//! 4     [u8; 512]  username (NUL padded)
//! 516   4 bytes    padding
//! 520   f64        latitude
//! 528   f64        longitude
//! 536   [u8; 1024] clue (NUL padded)
//! 1560  i32        value
//! 1564  4 bytes    padding
//! ```
//!
//! Text buffers always keep one terminating NUL, so a username holds at most
//! 511 bytes and a clue at most 1023. Over-length input is rejected with
//! [`TreasureError::FieldTooLong`], never truncated. On decode, a record with
//! a non-positive id or an unterminated text buffer is
//! [`TreasureError::CorruptStore`].

use crate::error::{Result, TreasureError};
use crate::model::{NewTreasure, Treasure};

pub const MAX_TREASURES: usize = 100;
pub const USERNAME_CAPACITY: usize = 512;
pub const CLUE_CAPACITY: usize = 1024;

const COUNT_SIZE: usize = 4;
const ID_OFFSET: usize = 0;
const USERNAME_OFFSET: usize = 4;
const LATITUDE_OFFSET: usize = 520;
const LONGITUDE_OFFSET: usize = 528;
const CLUE_OFFSET: usize = 536;
const VALUE_OFFSET: usize = 1560;
pub const RECORD_SIZE: usize = 1568;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    hunt_id: String,
    treasures: Vec<Treasure>,
}

impl RecordStore {
    pub fn new(hunt_id: impl Into<String>) -> Self {
        Self {
            hunt_id: hunt_id.into(),
            treasures: Vec::new(),
        }
    }

    pub fn hunt_id(&self) -> &str {
        &self.hunt_id
    }

    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    pub fn count(&self) -> usize {
        self.treasures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treasures.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.treasures.len() >= MAX_TREASURES
    }

    /// Validates the fields and appends a treasure, returning its id.
    ///
    /// The store is left untouched on any error.
    pub fn append(&mut self, fields: NewTreasure) -> Result<u32> {
        let fields = validate(fields)?;
        if self.is_full() {
            return Err(TreasureError::CapacityExceeded {
                hunt_id: self.hunt_id.clone(),
                max: MAX_TREASURES,
            });
        }
        let id = self.treasures.len() as u32 + 1;
        self.treasures.push(fields.into_treasure(id));
        Ok(id)
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Treasure> {
        self.treasures.iter().find(|t| t.id == id)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(COUNT_SIZE + self.treasures.len() * RECORD_SIZE);
        bytes.extend_from_slice(&(self.treasures.len() as i32).to_le_bytes());
        for treasure in &self.treasures {
            bytes.extend_from_slice(&encode_record(treasure));
        }
        bytes
    }

    /// Decodes a store. Empty input is an empty store; anything whose length
    /// does not match its declared count is [`TreasureError::CorruptStore`].
    pub fn decode(hunt_id: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let hunt_id = hunt_id.into();
        if bytes.is_empty() {
            return Ok(Self::new(hunt_id));
        }

        let corrupt = |reason: String| TreasureError::CorruptStore {
            hunt_id: hunt_id.clone(),
            reason,
        };

        if bytes.len() < COUNT_SIZE {
            return Err(corrupt(format!(
                "header is {} bytes, expected {}",
                bytes.len(),
                COUNT_SIZE
            )));
        }

        let count = read_i32(bytes, 0);
        if count < 0 || count as usize > MAX_TREASURES {
            return Err(corrupt(format!(
                "declared count {} is outside 0..={}",
                count, MAX_TREASURES
            )));
        }
        let count = count as usize;

        let body = &bytes[COUNT_SIZE..];
        let expected = count * RECORD_SIZE;
        if body.len() < expected {
            return Err(corrupt(format!(
                "declared {} records but only {} bytes of record data",
                count,
                body.len()
            )));
        }
        if body.len() > expected {
            return Err(corrupt(format!(
                "{} trailing bytes after {} records",
                body.len() - expected,
                count
            )));
        }

        let treasures = body
            .chunks_exact(RECORD_SIZE)
            .enumerate()
            .map(|(index, buf)| {
                decode_record(buf).map_err(|reason| corrupt(format!("record {}: {}", index, reason)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { hunt_id, treasures })
    }
}

/// Applies the field rules: one trailing newline is trimmed from the clue,
/// the username must be a single non-empty token, and neither may exceed its
/// buffer.
pub fn validate(mut fields: NewTreasure) -> Result<NewTreasure> {
    if let Some(stripped) = fields.clue.strip_suffix('\n') {
        let stripped = stripped.strip_suffix('\r').unwrap_or(stripped);
        fields.clue = stripped.to_string();
    }

    if fields.username.is_empty() {
        return Err(TreasureError::InvalidField {
            field: "username",
            reason: "must not be empty".to_string(),
        });
    }
    if fields.username.chars().any(|c| c.is_whitespace() || c == '\0') {
        return Err(TreasureError::InvalidField {
            field: "username",
            reason: "must be a single word".to_string(),
        });
    }
    check_len("username", &fields.username, USERNAME_CAPACITY)?;

    if fields.clue.contains(['\n', '\r', '\0']) {
        return Err(TreasureError::InvalidField {
            field: "clue",
            reason: "must be a single line".to_string(),
        });
    }
    check_len("clue", &fields.clue, CLUE_CAPACITY)?;

    Ok(fields)
}

fn check_len(field: &'static str, text: &str, capacity: usize) -> Result<()> {
    let max = capacity - 1;
    if text.len() > max {
        return Err(TreasureError::FieldTooLong {
            field,
            len: text.len(),
            max,
        });
    }
    Ok(())
}

fn encode_record(t: &Treasure) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[ID_OFFSET..ID_OFFSET + 4].copy_from_slice(&(t.id as i32).to_le_bytes());
    write_text(&mut buf[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_CAPACITY], &t.username);
    buf[LATITUDE_OFFSET..LATITUDE_OFFSET + 8].copy_from_slice(&t.latitude.to_le_bytes());
    buf[LONGITUDE_OFFSET..LONGITUDE_OFFSET + 8].copy_from_slice(&t.longitude.to_le_bytes());
    write_text(&mut buf[CLUE_OFFSET..CLUE_OFFSET + CLUE_CAPACITY], &t.clue);
    buf[VALUE_OFFSET..VALUE_OFFSET + 4].copy_from_slice(&t.value.to_le_bytes());
    buf
}

fn decode_record(buf: &[u8]) -> std::result::Result<Treasure, String> {
    let id = read_i32(buf, ID_OFFSET);
    if id < 1 {
        return Err(format!("id {} is not positive", id));
    }
    Ok(Treasure {
        id: id as u32,
        username: read_text("username", &buf[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_CAPACITY])?,
        latitude: read_f64(buf, LATITUDE_OFFSET),
        longitude: read_f64(buf, LONGITUDE_OFFSET),
        clue: read_text("clue", &buf[CLUE_OFFSET..CLUE_OFFSET + CLUE_CAPACITY])?,
        value: read_i32(buf, VALUE_OFFSET),
    })
}

// Callers guarantee `text` fits with its terminator (see `validate`).
fn write_text(dst: &mut [u8], text: &str) {
    let len = text.len().min(dst.len() - 1);
    dst[..len].copy_from_slice(&text.as_bytes()[..len]);
}

// A buffer without its terminator could not be saved back unchanged.
fn read_text(field: &str, src: &[u8]) -> std::result::Result<String, String> {
    let end = src
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| format!("{} is not NUL terminated", field))?;
    Ok(String::from_utf8_lossy(&src[..end]).into_owned())
}

fn read_i32(buf: &[u8], offset: usize) -> i32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&buf[offset..offset + 4]);
    i32::from_le_bytes(raw)
}

fn read_f64(buf: &[u8], offset: usize) -> f64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&buf[offset..offset + 8]);
    f64::from_le_bytes(raw)
}
