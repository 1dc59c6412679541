//! Regex match mode: compile once per query, execute per scanned key.

use regex::Regex;

use super::{scan_collect, TermInfo};
use crate::dict::TermDictionary;
use crate::error::{FerretError, Result};

/// The scan seed spans the character class of the pattern's first literal
/// character; if the pattern opens with a meta-character (`.`, `[`, `(`,
/// an anchor, …) there is no useful seed and the scan covers everything.
fn scan_seed(pattern: &str) -> String {
    match pattern.chars().next() {
        Some(c) if c.is_alphanumeric() => c.to_string(),
        _ => String::new(),
    }
}

pub fn scan(dict: &TermDictionary, pattern: &str, field_bitmap: Option<u64>) -> Result<Vec<TermInfo>> {
    let regex = Regex::new(pattern).map_err(|e| FerretError::RegexCompile(e.to_string()))?;
    let seed = scan_seed(pattern);
    let within_window = |key: &str| -> bool { seed.is_empty() || key.starts_with(&seed) };
    scan_collect(dict, &seed, field_bitmap, within_window, |key| {
        regex.is_match(key)
    })
}
