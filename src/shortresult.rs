//! Short-result sort/splice engine (§4.7).
//!
//! A short result is a reduced per-document tuple — just what sort and
//! window-splice need, strictly smaller than a posting list (§3). Sort
//! method is chosen per [`select_sort_method`]: string keys always
//! quicksort; numeric keys above a size threshold fall back to radix only
//! when a one-pass Pearson correlation between `doc_id` and `sort_key`
//! suggests the data is already close to sorted by `doc_id` (a radix
//! counting pass wastes less work than a comparison sort on
//! near-sequential input).

use crate::error::{FerretError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortType {
    DoubleAsc,
    DoubleDesc,
    FloatAsc,
    FloatDesc,
    U32Asc,
    U32Desc,
    U64Asc,
    U64Desc,
    StringAsc,
    StringDesc,
    NoSort,
}

impl SortType {
    fn is_string(self) -> bool {
        matches!(self, Self::StringAsc | Self::StringDesc)
    }

    fn is_descending(self) -> bool {
        matches!(
            self,
            Self::DoubleDesc | Self::FloatDesc | Self::U32Desc | Self::U64Desc | Self::StringDesc
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    F64(f64),
    F32(f32),
    U32(u32),
    U64(u64),
    Str(String),
    Absent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortResult {
    pub doc_id: u32,
    pub index_ref: u64,
    pub sort_key: SortKey,
}

const RADIX_THRESHOLD: usize = 1_000_000;
const CORRELATION_THRESHOLD: usize = 100_000;
const CORRELATION_CUTOFF: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortMethod {
    Quicksort,
    Radix,
}

/// One-pass Welford-style Pearson correlation between `doc_id` and a
/// numeric projection of `sort_key`.
fn pearson_correlation(results: &[ShortResult], project: impl Fn(&SortKey) -> f64) -> f64 {
    let mut n = 0f64;
    let (mut mean_x, mut mean_y) = (0f64, 0f64);
    let (mut m2_x, mut m2_y, mut c_xy) = (0f64, 0f64, 0f64);

    for r in results {
        let x = r.doc_id as f64;
        let y = project(&r.sort_key);
        n += 1.0;
        let dx = x - mean_x;
        mean_x += dx / n;
        let dy = y - mean_y;
        mean_y += dy / n;
        m2_x += dx * (x - mean_x);
        m2_y += dy * (y - mean_y);
        c_xy += dx * (y - mean_y);
    }

    if n < 2.0 || m2_x == 0.0 || m2_y == 0.0 {
        return 0.0;
    }
    c_xy / (m2_x.sqrt() * m2_y.sqrt())
}

fn numeric_projection() -> impl Fn(&SortKey) -> f64 {
    move |key| match key {
        SortKey::F64(v) => *v,
        SortKey::F32(v) => *v as f64,
        SortKey::U32(v) => *v as f64,
        SortKey::U64(v) => *v as f64,
        _ => 0.0,
    }
}

fn select_sort_method(results: &[ShortResult], sort_type: SortType) -> SortMethod {
    if sort_type.is_string() {
        return SortMethod::Quicksort;
    }
    let len = results.len();
    if len > RADIX_THRESHOLD {
        return SortMethod::Radix;
    }
    if len > CORRELATION_THRESHOLD {
        let r = pearson_correlation(results, numeric_projection());
        if r.abs() >= CORRELATION_CUTOFF {
            return SortMethod::Radix;
        }
    }
    SortMethod::Quicksort
}

fn key_cmp(a: &ShortResult, b: &ShortResult, sort_type: SortType) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    let ord = match (&a.sort_key, &b.sort_key) {
        (SortKey::F64(x), SortKey::F64(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortKey::F32(x), SortKey::F32(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortKey::U32(x), SortKey::U32(y)) => x.cmp(y),
        (SortKey::U64(x), SortKey::U64(y)) => x.cmp(y),
        (SortKey::Str(x), SortKey::Str(y)) => x.cmp(y),
        _ => Ordering::Equal,
    };
    if sort_type.is_descending() {
        ord.reverse()
    } else {
        ord
    }
}

fn quicksort(results: &mut [ShortResult], sort_type: SortType) {
    // Introsort-style: plain `sort_by` already guards against adversarial
    // worst-case recursion depth (pattern-defeating quicksort fallback),
    // so there's no hand-rolled recursive quicksort to bound here.
    results.sort_by(|a, b| key_cmp(a, b, sort_type));
}

/// LSB-first per-byte counting sort over the native bit representation of
/// the key. Descending order is achieved by sweeping the histogram prefix
/// sum in reverse at each byte pass. A byte pass whose histogram has a
/// single non-zero bucket covering every element is skipped entirely.
///
/// Negative floats are out of scope (§9 open question b): callers must
/// normalize scores to non-negative before requesting a float radix sort.
fn radix_sort(results: &mut Vec<ShortResult>, sort_type: SortType) -> Result<()> {
    let keys: Vec<u64> = results
        .iter()
        .map(|r| radix_key(&r.sort_key))
        .collect::<Result<Vec<_>>>()?;

    let len = results.len();
    let mut indices: Vec<usize> = (0..len).collect();
    let mut scratch = vec![0usize; len];

    for byte in 0..8 {
        let shift = byte * 8;
        let mut histogram = [0usize; 256];
        for &idx in &indices {
            let bucket = ((keys[idx] >> shift) & 0xFF) as usize;
            histogram[bucket] += 1;
        }

        let nonzero_buckets = histogram.iter().filter(|&&c| c != 0).count();
        if nonzero_buckets <= 1 {
            continue; // every key shares this byte; nothing to reorder
        }

        let mut offsets = [0usize; 256];
        if sort_type.is_descending() {
            let mut running = 0;
            for bucket in (0..256).rev() {
                offsets[bucket] = running;
                running += histogram[bucket];
            }
        } else {
            let mut running = 0;
            for bucket in 0..256 {
                offsets[bucket] = running;
                running += histogram[bucket];
            }
        }

        for &idx in &indices {
            let bucket = ((keys[idx] >> shift) & 0xFF) as usize;
            scratch[offsets[bucket]] = idx;
            offsets[bucket] += 1;
        }
        std::mem::swap(&mut indices, &mut scratch);
    }

    let sorted: Vec<ShortResult> = indices.iter().map(|&idx| results[idx].clone()).collect();
    *results = sorted;
    Ok(())
}

fn radix_key(key: &SortKey) -> Result<u64> {
    match key {
        SortKey::U32(v) => Ok(*v as u64),
        SortKey::U64(v) => Ok(*v),
        SortKey::F32(v) => {
            if *v < 0.0 {
                return Err(FerretError::InvalidSortOrder);
            }
            Ok((v.to_bits() as u64) & 0xFFFF_FFFF)
        }
        SortKey::F64(v) => {
            if *v < 0.0 {
                return Err(FerretError::InvalidSortOrder);
            }
            Ok(v.to_bits())
        }
        SortKey::Str(_) | SortKey::Absent => Err(FerretError::InvalidSortOrder),
    }
}

/// Sort `results` in place per `sort_type`. A no-op for `n < 2` or
/// `NoSort`.
pub fn sort(results: &mut Vec<ShortResult>, sort_type: SortType) -> Result<()> {
    if sort_type == SortType::NoSort || results.len() < 2 {
        return Ok(());
    }
    match select_sort_method(results, sort_type) {
        SortMethod::Quicksort => {
            quicksort(results, sort_type);
            Ok(())
        }
        SortMethod::Radix => radix_sort(results, sort_type),
    }
}

/// Compact the inclusive `[start, end]` window into positions `[0,
/// end-start]`, dropping everything outside the window (string sort keys
/// outside the window are released unconditionally — §9 open question c).
pub fn splice(results: &mut Vec<ShortResult>, start: usize, end: usize) -> Result<()> {
    if results.len() < 2 {
        return Ok(());
    }
    if start > end || end >= results.len() {
        return Err(FerretError::InvalidIndices { start, end });
    }
    let window: Vec<ShortResult> = results[start..=end].to_vec();
    *results = window;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sr(doc_id: u32, key: u32) -> ShortResult {
        ShortResult {
            doc_id,
            index_ref: 0,
            sort_key: SortKey::U32(key),
        }
    }

    #[test]
    fn small_input_sort_is_noop() {
        let mut results = vec![sr(1, 5)];
        sort(&mut results, SortType::U32Asc).unwrap();
        assert_eq!(results[0].sort_key, SortKey::U32(5));
    }

    #[test]
    fn small_input_splice_identity() {
        let mut results = vec![sr(1, 5)];
        splice(&mut results, 0, 0).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn quicksort_sorts_ascending() {
        let mut results = vec![sr(1, 9), sr(2, 3), sr(3, 7)];
        sort(&mut results, SortType::U32Asc).unwrap();
        let keys: Vec<u32> = results
            .iter()
            .map(|r| match r.sort_key {
                SortKey::U32(v) => v,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(keys, vec![3, 7, 9]);
    }

    #[test]
    fn radix_and_quicksort_agree_on_multiset() {
        let mut rng_state = 0x2545F4914F6CDD1Du64;
        let mut next = || {
            rng_state ^= rng_state << 13;
            rng_state ^= rng_state >> 7;
            rng_state ^= rng_state << 17;
            (rng_state % 1000) as u32
        };
        let values: Vec<u32> = (0..2000).map(|_| next()).collect();

        let mut by_quicksort: Vec<ShortResult> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| sr(i as u32, v))
            .collect();
        let mut by_radix = by_quicksort.clone();

        quicksort(&mut by_quicksort, SortType::U32Asc);
        radix_sort(&mut by_radix, SortType::U32Asc).unwrap();

        let extract = |rs: &[ShortResult]| -> Vec<u32> {
            rs.iter()
                .map(|r| match r.sort_key {
                    SortKey::U32(v) => v,
                    _ => unreachable!(),
                })
                .collect()
        };
        assert_eq!(extract(&by_quicksort), extract(&by_radix));
    }

    #[test]
    fn splice_shrinks_and_preserves_order() {
        let mut results = vec![sr(1, 1), sr(2, 2), sr(3, 3), sr(4, 4)];
        splice(&mut results, 1, 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].doc_id, 2);
        assert_eq!(results[1].doc_id, 3);
    }

    #[test]
    fn splice_invalid_indices_errors() {
        let mut results = vec![sr(1, 1), sr(2, 2)];
        assert!(matches!(
            splice(&mut results, 1, 0),
            Err(FerretError::InvalidIndices { .. })
        ));
    }

    #[test]
    fn negative_float_radix_is_rejected() {
        let mut results = vec![
            ShortResult {
                doc_id: 1,
                index_ref: 0,
                sort_key: SortKey::F64(-1.0),
            },
            ShortResult {
                doc_id: 2,
                index_ref: 0,
                sort_key: SortKey::F64(2.0),
            },
        ];
        assert!(radix_sort(&mut results, SortType::DoubleAsc).is_err());
    }
}
