//! Document entities and the document store (§3, component F).
//!
//! Composes a [`TableStore`] (fixed-width document-table rows keyed by
//! `doc_id`) and a [`BlobStore`] (document-data blobs holding title, key,
//! and items). `doc_id`s are dense and contiguous over `[1,
//! document_count]` (§3 invariant 2) because the table store's `append`
//! already guarantees that.

use crate::codec::{
    read_cstr, read_u32_be, read_u64_be, read_varsint, read_varuint, write_cstr, write_u32_be,
    write_u64_be, write_varsint, write_varuint,
};
use crate::error::{FerretError, Result};
use crate::store::{BlobStore, TableStore};

pub const DOCUMENT_TABLE_ROW_SIZE: usize = 8 + 4 + 4 + 8 + 4;

/// Fixed-width document-table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentTableRow {
    pub doc_data_id: u64,
    pub rank: u32,
    pub term_count: u32,
    pub ansi_date: u64,
    pub language_id: u32,
}

impl DocumentTableRow {
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(DOCUMENT_TABLE_ROW_SIZE);
        write_u64_be(self.doc_data_id, &mut buf);
        write_u32_be(self.rank, &mut buf);
        write_u32_be(self.term_count, &mut buf);
        write_u64_be(self.ansi_date, &mut buf);
        write_u32_be(self.language_id, &mut buf);
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            doc_data_id: read_u64_be(bytes, 0)?,
            rank: read_u32_be(bytes, 8)?,
            term_count: read_u32_be(bytes, 12)?,
            ansi_date: read_u64_be(bytes, 16)?,
            language_id: read_u32_be(bytes, 24)?,
        })
    }
}

/// One document item (a chunk/file/url attached to a document).
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentItem {
    pub item_id: u32,
    pub item_length: u32,
    pub url: String,
    pub file_path: String,
    pub start_offset: i64,
    pub end_offset: i64,
    pub data: Vec<u8>,
}

/// Document-data blob payload: title, key, and items (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentData {
    pub title: String,
    pub doc_key: String,
    pub items: Vec<DocumentItem>,
}

impl DocumentData {
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_cstr(&self.title, &mut buf);
        write_cstr(&self.doc_key, &mut buf);
        write_varuint(self.items.len() as u64, &mut buf);
        for item in &self.items {
            write_varuint(item.item_id as u64, &mut buf);
            write_varuint(item.item_length as u64, &mut buf);
            write_cstr(&item.url, &mut buf);
            write_cstr(&item.file_path, &mut buf);
            write_varsint(item.start_offset, &mut buf);
            write_varsint(item.end_offset, &mut buf);
            write_varuint(item.data.len() as u64, &mut buf);
            buf.extend_from_slice(&item.data);
        }
        buf
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (title, mut pos) = read_cstr(bytes, 0)?;
        let (doc_key, next) = read_cstr(bytes, pos)?;
        pos = next;
        let (item_count, next) = read_varuint(bytes, pos)?;
        pos = next;
        let mut items = Vec::with_capacity(item_count as usize);
        for _ in 0..item_count {
            let (item_id, next) = read_varuint(bytes, pos)?;
            pos = next;
            let (item_length, next) = read_varuint(bytes, pos)?;
            pos = next;
            let (url, next) = read_cstr(bytes, pos)?;
            pos = next;
            let (file_path, next) = read_cstr(bytes, pos)?;
            pos = next;
            let (start_offset, next) = read_varsint(bytes, pos)?;
            pos = next;
            let (end_offset, next) = read_varsint(bytes, pos)?;
            pos = next;
            let (data_len, next) = read_varuint(bytes, pos)?;
            pos = next;
            let data = bytes
                .get(pos..pos + data_len as usize)
                .ok_or(FerretError::Eof)?
                .to_vec();
            pos += data_len as usize;
            items.push(DocumentItem {
                item_id: item_id as u32,
                item_length: item_length as u32,
                url,
                file_path,
                start_offset,
                end_offset,
                data,
            });
        }
        Ok(Self {
            title,
            doc_key,
            items,
        })
    }

    /// Raw byte-range extraction for one item (§1 Non-goals: no
    /// highlighting, just the slice the caller asked for).
    pub fn extract_range(&self, item_id: u32, start: i64, end: i64) -> Result<&[u8]> {
        let item = self
            .items
            .iter()
            .find(|i| i.item_id == item_id)
            .ok_or_else(|| FerretError::InvalidItemName(item_id.to_string()))?;
        if start < 0 || end < start || end as usize > item.data.len() {
            return Err(FerretError::InvalidChunkRange { start, end });
        }
        Ok(&item.data[start as usize..end as usize])
    }
}

/// Composes the document-table and document-data stores into document
/// entities addressable by `doc_id`.
#[derive(Default)]
pub struct DocumentStore {
    table: TableStore,
    blobs: BlobStore,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            table: TableStore::new(DOCUMENT_TABLE_ROW_SIZE),
            blobs: BlobStore::new(),
        }
    }

    /// Append a new document, returning its 1-based `doc_id`.
    pub fn append(
        &mut self,
        data: &DocumentData,
        rank: u32,
        term_count: u32,
        ansi_date: u64,
        language_id: u32,
    ) -> u32 {
        let doc_data_id = self.blobs.append(&data.encode());
        let row = DocumentTableRow {
            doc_data_id,
            rank,
            term_count,
            ansi_date,
            language_id,
        };
        self.table.append(&row.encode())
    }

    pub fn document_count(&self) -> u32 {
        self.table.len() as u32
    }

    pub fn row(&self, doc_id: u32) -> Result<DocumentTableRow> {
        DocumentTableRow::decode(self.table.read(doc_id)?)
    }

    pub fn data(&self, doc_id: u32) -> Result<DocumentData> {
        let row = self.row(doc_id)?;
        DocumentData::decode(self.blobs.read(row.doc_data_id)?)
    }

    pub fn write_table_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        self.table.write_to_path(path)
    }

    pub fn write_blobs_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        self.blobs.write_to_path(path)
    }

    pub fn read_from_dir(table_path: &std::path::Path, blob_path: &std::path::Path) -> Result<Self> {
        Ok(Self {
            table: TableStore::read_from_path(table_path)?,
            blobs: BlobStore::read_from_path(blob_path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data(title: &str, key: &str) -> DocumentData {
        DocumentData {
            title: title.to_string(),
            doc_key: key.to_string(),
            items: vec![DocumentItem {
                item_id: 1,
                item_length: 5,
                url: "https://example.test".to_string(),
                file_path: "/docs/a.txt".to_string(),
                start_offset: 0,
                end_offset: 5,
                data: b"hello".to_vec(),
            }],
        }
    }

    #[test]
    fn document_data_roundtrip_preserves_items() {
        let data = sample_data("Title", "doc-1");
        let decoded = DocumentData::decode(&data.encode()).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn table_row_roundtrip() {
        let row = DocumentTableRow {
            doc_data_id: 7,
            rank: 42,
            term_count: 100,
            ansi_date: 20260101,
            language_id: 1,
        };
        assert_eq!(DocumentTableRow::decode(&row.encode()).unwrap(), row);
    }

    #[test]
    fn doc_ids_are_dense_and_one_based() {
        let mut store = DocumentStore::new();
        let id1 = store.append(&sample_data("A", "a"), 0, 1, 0, 1);
        let id2 = store.append(&sample_data("B", "b"), 0, 1, 0, 1);
        assert_eq!(id1, 1);
        assert_eq!(id2, 2);
        assert_eq!(store.document_count(), 2);
    }

    #[test]
    fn extract_range_is_raw_bytes_only() {
        let data = sample_data("Title", "doc-1");
        assert_eq!(data.extract_range(1, 1, 4).unwrap(), b"ell");
        assert!(data.extract_range(1, 3, 1).is_err());
    }
}
