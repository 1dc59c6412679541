//! On-disk record stores: fixed-row tables and variable-length blobs.
//!
//! Both stores are append-only during a build and read-only during search
//! (§5 resource model: B/C are exclusively owned by the build, readers
//! attach only once it completes). Each store is backed by an in-memory
//! byte buffer plus an optional file; the file carries a CRC32 footer so a
//! truncated or corrupted store is detected at open time rather than
//! surfacing as a bad read deep inside a query.

pub mod blob;
pub mod table;

pub use blob::BlobStore;
pub use table::TableStore;

use crc32fast::Hasher as Crc32Hasher;

/// Magic bytes written at the start of every store file.
const MAGIC: [u8; 4] = *b"FRT1";

fn compute_crc32(bytes: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}
