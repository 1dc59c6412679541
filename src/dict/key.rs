//! Maps external document keys to internal `doc_id`s (§3 Key dictionary).

use std::collections::BTreeMap;

use crate::error::{FerretError, Result};

#[derive(Default)]
pub struct KeyDictionary {
    entries: BTreeMap<String, u32>,
}

impl KeyDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` as mapping to `doc_id`. A duplicate key is rejected —
    /// document keys are expected to be externally unique.
    pub fn insert(&mut self, key: &str, doc_id: u32) -> Result<()> {
        if self.entries.contains_key(key) {
            return Err(FerretError::InvalidDocumentKey(format!(
                "duplicate document key: {key}"
            )));
        }
        self.entries.insert(key.to_string(), doc_id);
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> Result<u32> {
        self.entries
            .get(key)
            .copied()
            .ok_or_else(|| FerretError::InvalidDocumentKey(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        use crate::codec::write_varuint;
        let mut buf = Vec::new();
        write_varuint(self.entries.len() as u64, &mut buf);
        for (key, doc_id) in &self.entries {
            write_varuint(key.len() as u64, &mut buf);
            buf.extend_from_slice(key.as_bytes());
            write_varuint(*doc_id as u64, &mut buf);
        }
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        use crate::codec::read_varuint;
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
            .map_err(|_| FerretError::InvalidDocumentKey("invalid utf-8 key".into()))?
            .to_string();
            pos += key_len as usize;
            let (doc_id, next) = read_varuint(bytes, pos)?;
            pos = next;
            dict.insert(&key, doc_id as u32)?;
        }
        Ok(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_registered_doc_id() {
        let mut d = KeyDictionary::new();
        d.insert("doc1", 1).unwrap();
        d.insert("doc2", 2).unwrap();
        assert_eq!(d.lookup("doc1").unwrap(), 1);
        assert_eq!(d.lookup("doc2").unwrap(), 2);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut d = KeyDictionary::new();
        d.insert("doc1", 1).unwrap();
        assert!(d.insert("doc1", 2).is_err());
    }

    #[test]
    fn unknown_key_is_not_found() {
        let d = KeyDictionary::new();
        assert!(d.lookup("missing").is_err());
    }
}
