//! Fixed-size record table keyed by a 1-based entry ID (§4.2).
//!
//! Row size is fixed for the lifetime of a table, set by the first
//! `append`. `entry_id` is monotonically increasing and always equal to
//! the prior entry count plus one — there is no delete, no compaction, no
//! reuse of IDs.

use std::io;
use std::path::Path;

use super::{compute_crc32, MAGIC};
use crate::error::{FerretError, Result};

pub struct TableStore {
    row_size: usize,
    rows: Vec<u8>,
}

impl TableStore {
    /// Create an empty table with the given fixed row width.
    pub fn new(row_size: usize) -> Self {
        Self {
            row_size,
            rows: Vec::new(),
        }
    }

    pub fn row_size(&self) -> usize {
        self.row_size
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.rows.len() / self.row_size.max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a row, returning its 1-based entry ID.
    ///
    /// `row_bytes.len()` must equal `row_size`; this is a programming
    /// error, not a recoverable one, so it panics rather than returning a
    /// `Result` (callers pre-size rows from a fixed layout).
    pub fn append(&mut self, row_bytes: &[u8]) -> u32 {
        assert_eq!(
            row_bytes.len(),
            self.row_size,
            "row size mismatch: table expects {}, got {}",
            self.row_size,
            row_bytes.len()
        );
        self.rows.extend_from_slice(row_bytes);
        self.len() as u32
    }

    /// Read the row for `entry_id` (1-based).
    pub fn read(&self, entry_id: u32) -> Result<&[u8]> {
        if entry_id == 0 {
            return Err(FerretError::InvalidDocumentId(entry_id));
        }
        let index = (entry_id - 1) as usize;
        let start = index * self.row_size;
        let end = start + self.row_size;
        self.rows
            .get(start..end)
            .ok_or(FerretError::DocumentDoesNotExist(entry_id))
    }

    /// Serialize to bytes: magic, row_size, row_count, rows, CRC32 footer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.rows.len() + 32);
        buf.extend_from_slice(&MAGIC);
        buf.extend_from_slice(&(self.row_size as u32).to_be_bytes());
        buf.extend_from_slice(&(self.len() as u32).to_be_bytes());
        buf.extend_from_slice(&self.rows);
        let crc = compute_crc32(&buf);
        buf.extend_from_slice(&crc.to_be_bytes());
        buf
    }

    /// Parse a table previously written by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 12 + 4 {
            return Err(FerretError::Eof);
        }
        let (body, footer) = bytes.split_at(bytes.len() - 4);
        let expected_crc = u32::from_be_bytes(footer.try_into().unwrap());
        if compute_crc32(body) != expected_crc {
            return Err(FerretError::ReadFailed("table CRC32 mismatch".into()));
        }
        if body[0..4] != MAGIC {
            return Err(FerretError::ReadFailed("bad table magic".into()));
        }
        let row_size = u32::from_be_bytes(body[4..8].try_into().unwrap()) as usize;
        let row_count = u32::from_be_bytes(body[8..12].try_into().unwrap()) as usize;
        let rows = body[12..].to_vec();
        if rows.len() != row_size * row_count {
            return Err(FerretError::ReadFailed(
                "table row count/size mismatch".into(),
            ));
        }
        Ok(Self { row_size, rows })
    }

    pub fn write_to_path(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_bytes())
    }

    pub fn read_from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(FerretError::from)?;
        Self::from_bytes(&bytes)
    }
}
