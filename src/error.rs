//! Error taxonomy, grouped by component.
//!
//! Low-level routines fail fast with a [`FerretError`] variant; mid-level
//! code logs once (via `eprintln!`, see module docs on [`crate`]) with
//! context and propagates the same variant; the top-level façade decides
//! whether to abort (build) or return to the caller (query).
//!
//! Empty posting lists and [`FerretError::TermDoesNotOccur`] are not
//! failures in the algebra — they are values. Don't wrap them, return them.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum FerretError {
    // --- IO / corrupt-store ---
    ReadFailed(String),
    Eof,
    LockHeld,

    // --- Document ---
    InvalidDocumentId(u32),
    InvalidDocumentKey(String),
    InvalidItemName(String),
    InvalidChunkRange { start: i64, end: i64 },
    DocumentDoesNotExist(u32),

    // --- Term dictionary ---
    TermNotFound(String),
    TermDoesNotOccur(String),
    BadRange(String),
    BadWildCard(String),
    RegexCompile(String),

    // --- Posting algebra ---
    InvalidPostingsList(String),
    InvalidSearchBooleanModifier(String),
    InvalidTermDistance(i32),

    // --- Short results ---
    InvalidSortOrder,
    InvalidIndices { start: usize, end: usize },

    // --- Ingest ---
    InvalidVersion { major: u32, minor: u32 },
    InvalidTag(String),
    InvalidDocumentTermTag(String),
    InvalidDocumentItemTag(String),
    InvalidStreamEndTag,

    // --- Resource ---
    OutOfMemory,
    ReturnParameterError(String),
}

impl fmt::Display for FerretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed(msg) => write!(f, "read failed: {msg}"),
            Self::Eof => write!(f, "unexpected end of store"),
            Self::LockHeld => write!(f, "index lock is held"),
            Self::InvalidDocumentId(id) => write!(f, "invalid document id: {id}"),
            Self::InvalidDocumentKey(key) => write!(f, "invalid document key: {key}"),
            Self::InvalidItemName(name) => write!(f, "invalid item name: {name}"),
            Self::InvalidChunkRange { start, end } => {
                write!(f, "invalid chunk range: [{start}, {end}]")
            }
            Self::DocumentDoesNotExist(id) => write!(f, "document {id} does not exist"),
            Self::TermNotFound(term) => write!(f, "term not found: {term}"),
            Self::TermDoesNotOccur(term) => write!(f, "term does not occur in field: {term}"),
            Self::BadRange(msg) => write!(f, "bad range: {msg}"),
            Self::BadWildCard(msg) => write!(f, "bad wildcard: {msg}"),
            Self::RegexCompile(msg) => write!(f, "regex compile error: {msg}"),
            Self::InvalidPostingsList(msg) => write!(f, "invalid postings list: {msg}"),
            Self::InvalidSearchBooleanModifier(msg) => {
                write!(f, "invalid boolean modifier: {msg}")
            }
            Self::InvalidTermDistance(d) => write!(f, "invalid term distance: {d}"),
            Self::InvalidSortOrder => write!(f, "invalid sort order"),
            Self::InvalidIndices { start, end } => {
                write!(f, "invalid splice indices: start={start} end={end}")
            }
            Self::InvalidVersion { major, minor } => {
                write!(f, "invalid stream version: {major}.{minor}")
            }
            Self::InvalidTag(line) => write!(f, "invalid tag: {line}"),
            Self::InvalidDocumentTermTag(line) => write!(f, "invalid term tag: {line}"),
            Self::InvalidDocumentItemTag(line) => write!(f, "invalid item tag: {line}"),
            Self::InvalidStreamEndTag => write!(f, "invalid stream end"),
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::ReturnParameterError(msg) => write!(f, "bad parameter: {msg}"),
        }
    }
}

impl std::error::Error for FerretError {}

impl From<io::Error> for FerretError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Self::Eof,
            _ => Self::ReadFailed(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, FerretError>;

/// Log a recoverable error once with context, then hand it back to the caller.
///
/// Mirrors the mid-level "log once with context, return the kind" propagation
/// rule: the core never aborts a process on its own, it only reports.
pub fn log_once(context: &str, err: FerretError) -> FerretError {
    eprintln!("ferret: {context}: {err}");
    err
}
