//! Ordered string→term-record map (§4.4).
//!
//! Insertion must arrive in strictly ascending key order during build —
//! that's what makes `scan_from` a simple `BTreeMap` range scan rather
//! than requiring a separate sort pass. Violations are fatal because a
//! misordered dictionary silently breaks every downstream prefix scan.

use std::collections::BTreeMap;

use crate::codec::{
    read_varuint, read_varuint as read_varu64, write_varuint, write_varuint as write_varu64,
};
use crate::error::{FerretError, Result};
use crate::posting::TermType;

/// Value bytes stored for a term-dictionary key (§3 term-dictionary record).
#[derive(Debug, Clone, PartialEq)]
pub struct TermRecord {
    pub term_type: TermType,
    pub term_count: u32,
    pub document_count: u32,
    pub index_block_id: u64,
    /// 1-based field IDs the term appears in; empty means "default field only".
    pub field_ids: Vec<u32>,
}

impl TermRecord {
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let term_type_code = match self.term_type {
            TermType::Regular => 0,
            TermType::Stop => 1,
            TermType::Unknown => 2,
        };
        write_varuint(term_type_code, &mut buf);
        write_varuint(self.term_count as u64, &mut buf);
        write_varuint(self.document_count as u64, &mut buf);
        write_varu64(self.index_block_id, &mut buf);
        write_varuint(self.field_ids.len() as u64, &mut buf);
        for &id in &self.field_ids {
            write_varuint(id as u64, &mut buf);
        }
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut pos = 0;
        let (term_type_code, next) = read_varuint(bytes, pos)?;
        pos = next;
        let term_type = match term_type_code {
            0 => TermType::Regular,
            1 => TermType::Stop,
            _ => TermType::Unknown,
        };
        let (term_count, next) = read_varuint(bytes, pos)?;
        pos = next;
        let (document_count, next) = read_varuint(bytes, pos)?;
        pos = next;
        let (index_block_id, next) = read_varu64(bytes, pos)?;
        pos = next;
        let (field_count, next) = read_varuint(bytes, pos)?;
        pos = next;
        let mut field_ids = Vec::with_capacity(field_count as usize);
        for _ in 0..field_count {
            let (id, next) = read_varuint(bytes, pos)?;
            field_ids.push(id as u32);
            pos = next;
        }
        Ok(Self {
            term_type,
            term_count: term_count as u32,
            document_count: document_count as u32,
            index_block_id,
            field_ids,
        })
    }

    /// Whether this term occurs in any of the field IDs selected by `bitmap`
    /// (bit `i` set ⇔ field ID `i+1`), or in the default field when the
    /// record carries no field IDs and `bitmap` is `None`.
    pub fn occurs_in(&self, bitmap: Option<u64>) -> bool {
        match bitmap {
            None => true,
            Some(mask) => {
                if self.field_ids.is_empty() {
                    // Default-field-only term: matches only the "no filter" case.
                    mask == 0
                } else {
                    self.field_ids.iter().any(|&id| {
                        id >= 1 && (mask & (1u64 << (id - 1))) != 0
                    })
                }
            }
        }
    }
}

/// Sentinel returned from a [`TermDictionary::scan_from`] callback to end
/// the scan early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    Stop,
}

#[derive(Default)]
pub struct TermDictionary {
    entries: BTreeMap<String, Vec<u8>>,
    last_inserted: Option<String>,
}

impl TermDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` with `value_bytes`. Keys must arrive in strictly
    /// ascending byte order; a violation is fatal (§4.4).
    pub fn insert(&mut self, key: &str, value_bytes: Vec<u8>) -> Result<()> {
        if let Some(last) = &self.last_inserted {
            if key.as_bytes() <= last.as_bytes() {
                return Err(FerretError::InvalidPostingsList(format!(
                    "term dictionary keys must be strictly ascending: '{last}' then '{key}'"
                )));
            }
        }
        self.last_inserted = Some(key.to_string());
        self.entries.insert(key.to_string(), value_bytes);
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> Result<&[u8]> {
        self.entries
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| FerretError::TermNotFound(key.to_string()))
    }

    pub fn lookup_record(&self, key: &str) -> Result<TermRecord> {
        TermRecord::decode(self.lookup(key)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke `callback` with successive `(key, value)` pairs in ascending
    /// order starting at the first key ≥ `prefix_key`, until it returns
    /// [`ScanControl::Stop`] or the dictionary is exhausted.
    pub fn scan_from<F>(&self, prefix_key: &str, mut callback: F)
    where
        F: FnMut(&str, &[u8]) -> ScanControl,
    {
        for (key, value) in self.entries.range(prefix_key.to_string()..) {
            if callback(key, value) == ScanControl::Stop {
                break;
            }
        }
    }

    /// Iterate every key starting with `prefix`, in ascending order.
    pub fn scan_prefix<F>(&self, prefix: &str, mut callback: F)
    where
        F: FnMut(&str, &[u8]) -> ScanControl,
    {
        self.scan_from(prefix, |key, value| {
            if !key.starts_with(prefix) {
                return ScanControl::Stop;
            }
            callback(key, value)
        });
    }

    /// Serialize the whole dictionary: ascending `(key, value)` pairs,
    /// length-prefixed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_varu64(self.entries.len() as u64, &mut buf);
        for (key, value) in &self.entries {
            write_varu64(key.len() as u64, &mut buf);
            buf.extend_from_slice(key.as_bytes());
            write_varu64(value.len() as u64, &mut buf);
            buf.extend_from_slice(value);
        }
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut pos = 0;
        let (count, next) = read_varuint(bytes, pos)?;
        pos = next;
        let mut dict = Self::new();
        for _ in 0..count {
            let (key_len, next) = read_varuint(bytes, pos)?;
            pos = next;
            let key = std::str::from_utf8(
                bytes.get(pos..pos + key_len as usize).ok_or(FerretError::Eof)?,
            )
            .map_err(|_| FerretError::ReadFailed("invalid utf-8 term key".into()))?
            .to_string();
            pos += key_len as usize;
            let (value_len, next) = read_varuint(bytes, pos)?;
            pos = next;
            let value = bytes
                .get(pos..pos + value_len as usize)
                .ok_or(FerretError::Eof)?
                .to_vec();
            pos += value_len as usize;
            dict.insert(&key, value)?;
        }
        Ok(dict)
    }
}
