//! Variable-length record store returning a stable ID on append (§4.3).
//!
//! Blob IDs are opaque — callers must not assume they equal an ordinal
//! count or a byte offset, only that they are stable across reopen. Here
//! they happen to be byte offsets into the blob arena, but that's an
//! implementation detail, not a contract.

use std::io;
use std::path::Path;

use super::{compute_crc32, MAGIC};
use crate::codec::{read_varuint, write_varuint};
use crate::error::{FerretError, Result};

pub struct BlobStore {
    data: Vec<u8>,
    /// Byte offset of the start of each blob, indexed by `blob_id`.
    offsets: Vec<u64>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            offsets: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Append `bytes`, returning a stable `blob_id`.
    pub fn append(&mut self, bytes: &[u8]) -> u64 {
        let offset = self.data.len() as u64;
        self.offsets.push(offset);
        write_varuint(bytes.len() as u64, &mut self.data);
        self.data.extend_from_slice(bytes);
        (self.offsets.len() - 1) as u64
    }

    /// Read the blob previously stored under `blob_id`.
    pub fn read(&self, blob_id: u64) -> Result<&[u8]> {
        let offset = *self
            .offsets
            .get(blob_id as usize)
            .ok_or(FerretError::ReadFailed(format!(
                "no blob with id {blob_id}"
            )))? as usize;
        let (len, body_start) = read_varuint(&self.data, offset)?;
        self.data
            .get(body_start..body_start + len as usize)
            .ok_or(FerretError::Eof)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.data.len() + 32);
        buf.extend_from_slice(&MAGIC);
        write_varuint(self.offsets.len() as u64, &mut buf);
        for &off in &self.offsets {
            write_varuint(off, &mut buf);
        }
        write_varuint(self.data.len() as u64, &mut buf);
        buf.extend_from_slice(&self.data);
        let crc = compute_crc32(&buf);
        buf.extend_from_slice(&crc.to_be_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 8 {
            return Err(FerretError::Eof);
        }
        let (body, footer) = bytes.split_at(bytes.len() - 4);
        let expected_crc = u32::from_be_bytes(footer.try_into().unwrap());
        if compute_crc32(body) != expected_crc {
            return Err(FerretError::ReadFailed("blob store CRC32 mismatch".into()));
        }
        if body[0..4] != MAGIC {
            return Err(FerretError::ReadFailed("bad blob store magic".into()));
        }
        let mut pos = 4;
        let (count, next) = read_varuint(body, pos)?;
        pos = next;
        let mut offsets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let (off, next) = read_varuint(body, pos)?;
            offsets.push(off);
            pos = next;
        }
        let (data_len, next) = read_varuint(body, pos)?;
        pos = next;
        let data = body
            .get(pos..pos + data_len as usize)
            .ok_or(FerretError::Eof)?
            .to_vec();
        Ok(Self { data, offsets })
    }

    pub fn write_to_path(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_bytes())
    }

    pub fn read_from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(FerretError::from)?;
        Self::from_bytes(&bytes)
    }
}

impl Default for BlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_read_roundtrips() {
        let mut s = BlobStore::new();
        let id1 = s.append(b"hello");
        let id2 = s.append(b"world, longer blob");
        assert_eq!(s.read(id1).unwrap(), b"hello");
        assert_eq!(s.read(id2).unwrap(), b"world, longer blob");
    }

    #[test]
    fn empty_blob_roundtrips() {
        let mut s = BlobStore::new();
        let id = s.append(b"");
        assert_eq!(s.read(id).unwrap(), b"");
    }

    #[test]
    fn ids_are_stable_across_reopen() {
        let mut s = BlobStore::new();
        let id = s.append(b"persisted");
        let bytes = s.to_bytes();
        let restored = BlobStore::from_bytes(&bytes).unwrap();
        assert_eq!(restored.read(id).unwrap(), b"persisted");
    }

    #[test]
    fn unknown_id_is_read_failed() {
        let s = BlobStore::new();
        assert!(s.read(0).is_err());
    }
}
