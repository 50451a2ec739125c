//! The three chunk-matching strategies and the run driver.

use serde::{Deserialize, Serialize};

use crate::bloom::Bloom;
use crate::consts::{DEFAULT_CHUNK_LEN, DEFAULT_MODULUS, FILTER_PREVIEW_BITS, HASH_PREVIEW_LEN};
use crate::errors::{MatchError, Result};
use crate::modulus::Modulus;
use crate::rolling::WindowHasher;

/// Strategy used to test query chunks against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Naive,
    Rolling,
    RollingBatch,
}

/// Per-run settings, validated by [`match_documents`] before any matching.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub chunk_len: usize,
    pub mode: MatchMode,
    pub modulus: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            chunk_len: DEFAULT_CHUNK_LEN,
            mode: MatchMode::Naive,
            modulus: DEFAULT_MODULUS,
        }
    }
}

/// Outcome of one matching run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Matched chunks (naive/rolling) or matched target windows (batch).
    pub matched: usize,
    /// Whole chunks the query divides into; a trailing partial chunk is
    /// dropped from matching and from this count alike.
    pub total_chunks: usize,
    /// Hashes of the leading target windows (rolling mode only).
    pub window_hashes: Vec<u64>,
    /// Hex of the filter's leading bits after insertion (batch mode only).
    pub bloom_prefix_hex: Option<String>,
}

impl MatchReport {
    /// Matched fraction of the chunk total; 0.0 for a chunkless query.
    pub fn ratio(&self) -> f64 {
        if self.total_chunks == 0 {
            0.0
        } else {
            self.matched as f64 / self.total_chunks as f64
        }
    }
}

/// Aggregate result of [`batch_match`].
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Target windows with at least one byte-confirmed chunk.
    pub matched: usize,
    /// Hex of the populated filter's leading bits; `None` when the query had
    /// no whole chunk and no filter was built.
    pub bloom_prefix_hex: Option<String>,
}

/// Does `chunk` occur in `target`? Byte-compares every window.
///
/// `chunk` must be nonempty.
pub fn naive_contains(chunk: &[u8], target: &[u8]) -> bool {
    target.windows(chunk.len()).any(|w| w == chunk)
}

/// Does `chunk` occur in `target`? Hashes the chunk once, rolls over the
/// target, and byte-confirms every hash hit before trusting it.
///
/// `chunk` must hold exactly `hasher.window_len()` bytes.
pub fn rolling_contains(hasher: &WindowHasher, chunk: &[u8], target: &[u8]) -> bool {
    let k = hasher.window_len();
    let needle = hasher.hash(chunk);
    hasher
        .window_hashes(target)
        .any(|(off, h)| h == needle && &target[off..off + k] == chunk)
}

/// Match every whole chunk of `query` against `target` in one pass.
///
/// All chunk hashes go into a Bloom filter sized at roughly ten bits per
/// chunk, floored to a byte boundary. Each target window is then looked up in
/// the filter; on a hit the chunks are scanned and byte-compared against the
/// window. A window counts at most once, for the first chunk that confirms,
/// so a chunk repeated across the target raises the count beyond the chunk
/// total while duplicate query chunks do not.
pub fn batch_match(hasher: &WindowHasher, query: &[u8], target: &[u8]) -> Result<BatchOutcome> {
    let k = hasher.window_len();
    let chunks: Vec<&[u8]> = query.chunks_exact(k).collect();
    if chunks.is_empty() {
        return Ok(BatchOutcome {
            matched: 0,
            bloom_prefix_hex: None,
        });
    }

    let mut filter = Bloom::new((query.len() * 10 / k) & !7)?;
    for chunk in &chunks {
        filter.insert(hasher.hash(chunk));
    }
    let bloom_prefix_hex = filter.dump_prefix(FILTER_PREVIEW_BITS);

    let mut matched = 0usize;
    for (off, h) in hasher.window_hashes(target) {
        if !filter.contains(h) {
            continue;
        }
        let window = &target[off..off + k];
        if chunks.iter().any(|chunk| *chunk == window) {
            matched += 1;
        }
    }

    Ok(BatchOutcome {
        matched,
        bloom_prefix_hex: Some(bloom_prefix_hex),
    })
}

/// Run one matching pass over a pair of documents.
///
/// Documents are matched byte-for-byte as given; callers wanting
/// case/whitespace-insensitive behavior normalize first (see
/// [`crate::text::normalize`]).
pub fn match_documents(cfg: &MatchConfig, query: &[u8], target: &[u8]) -> Result<MatchReport> {
    if cfg.chunk_len == 0 {
        return Err(MatchError::BadChunkLen);
    }
    let modulus = Modulus::new(cfg.modulus)?;
    let k = cfg.chunk_len;
    let total_chunks = query.len() / k;

    match cfg.mode {
        MatchMode::Naive => {
            let matched = query
                .chunks_exact(k)
                .filter(|chunk| naive_contains(chunk, target))
                .count();
            Ok(MatchReport {
                matched,
                total_chunks,
                window_hashes: Vec::new(),
                bloom_prefix_hex: None,
            })
        }
        MatchMode::Rolling => {
            let hasher = WindowHasher::new(modulus, k);
            let matched = query
                .chunks_exact(k)
                .filter(|chunk| rolling_contains(&hasher, chunk, target))
                .count();
            let window_hashes = hasher
                .window_hashes(target)
                .take(HASH_PREVIEW_LEN)
                .map(|(_, h)| h)
                .collect();
            Ok(MatchReport {
                matched,
                total_chunks,
                window_hashes,
                bloom_prefix_hex: None,
            })
        }
        MatchMode::RollingBatch => {
            let hasher = WindowHasher::new(modulus, k);
            let outcome = batch_match(&hasher, query, target)?;
            Ok(MatchReport {
                matched: outcome.matched,
                total_chunks,
                window_hashes: Vec::new(),
                bloom_prefix_hex: outcome.bloom_prefix_hex,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const MODES: [MatchMode; 3] = [MatchMode::Naive, MatchMode::Rolling, MatchMode::RollingBatch];
    const FOX: &[u8] = b"the quick brown fox jumps over the lazy dog";

    fn hasher(k: usize) -> WindowHasher {
        WindowHasher::new(Modulus::default(), k)
    }

    fn cfg(mode: MatchMode, k: usize) -> MatchConfig {
        MatchConfig {
            chunk_len: k,
            mode,
            ..MatchConfig::default()
        }
    }

    #[test]
    fn single_chunk_found_by_every_mode() {
        let query = b"quick brown fox ";
        for mode in MODES {
            let report = match_documents(&cfg(mode, query.len()), query, FOX).unwrap();
            assert_eq!(report.matched, 1, "{mode:?}");
            assert_eq!(report.total_chunks, 1);
            assert!((report.ratio() - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn absent_chunk_matches_nothing() {
        for mode in MODES {
            let report = match_documents(&cfg(mode, 4), b"aaaa", b"abababab").unwrap();
            assert_eq!(report.matched, 0, "{mode:?}");
            assert_eq!(report.total_chunks, 1);
            assert_eq!(report.ratio(), 0.0);
        }
    }

    #[test]
    fn trailing_partial_chunk_is_dropped() {
        // 35 bytes at k = 10: three whole chunks, five bytes ignored
        let query = b"abcdefghijpqrstuvwxyzabcdefghijrest";
        let target = b"00abcdefghij11zabcdefghi22";
        for mode in MODES {
            let report = match_documents(&cfg(mode, 10), query, target).unwrap();
            assert_eq!(report.total_chunks, 3, "{mode:?}");
            assert_eq!(report.matched, 2, "{mode:?}");
        }
    }

    #[test]
    fn query_shorter_than_chunk_len_yields_zero_outcome() {
        for mode in MODES {
            let report = match_documents(&cfg(mode, 100), b"tiny query", FOX).unwrap();
            assert_eq!(report.matched, 0, "{mode:?}");
            assert_eq!(report.total_chunks, 0);
            assert_eq!(report.ratio(), 0.0);
            assert!(report.bloom_prefix_hex.is_none());
        }
    }

    #[test]
    fn empty_target_matches_nothing() {
        for mode in MODES {
            let report = match_documents(&cfg(mode, 4), b"abcd", b"").unwrap();
            assert_eq!(report.matched, 0, "{mode:?}");
            assert_eq!(report.total_chunks, 1);
        }
    }

    #[test]
    fn batch_counts_target_windows_not_chunks() {
        // one chunk, repeated three times across the target
        let report =
            match_documents(&cfg(MatchMode::RollingBatch, 2), b"ab", b"ababab").unwrap();
        assert_eq!(report.matched, 3);
        assert_eq!(report.total_chunks, 1);
        assert!((report.ratio() - 3.0).abs() < f64::EPSILON);

        for mode in [MatchMode::Naive, MatchMode::Rolling] {
            let report = match_documents(&cfg(mode, 2), b"ab", b"ababab").unwrap();
            assert_eq!(report.matched, 1, "{mode:?}");
        }
    }

    #[test]
    fn duplicate_query_chunks_count_once_in_batch() {
        // three identical chunks, one occurrence in the target: per-chunk
        // modes count three, the batch counts the single window once
        let query = b"ababab";
        let target = b"xxabyy";
        for mode in [MatchMode::Naive, MatchMode::Rolling] {
            let report = match_documents(&cfg(mode, 2), query, target).unwrap();
            assert_eq!(report.matched, 3, "{mode:?}");
        }
        let report = match_documents(&cfg(MatchMode::RollingBatch, 2), query, target).unwrap();
        assert_eq!(report.matched, 1);
    }

    #[test]
    fn rolling_and_naive_agree_on_random_documents() {
        let mut rng = rand::rng();
        let k = 5;
        let h = hasher(k);
        for _ in 0..20 {
            let query: Vec<u8> = (0..200).map(|_| rng.random_range(b'a'..=b'c')).collect();
            let target: Vec<u8> = (0..400).map(|_| rng.random_range(b'a'..=b'c')).collect();
            for chunk in query.chunks_exact(k) {
                assert_eq!(
                    naive_contains(chunk, &target),
                    rolling_contains(&h, chunk, &target),
                );
            }
        }
    }

    #[test]
    fn batch_agrees_with_a_direct_window_scan() {
        let mut rng = rand::rng();
        let k = 4;
        let h = hasher(k);
        for _ in 0..20 {
            let query: Vec<u8> = (0..120).map(|_| rng.random_range(b'a'..=b'c')).collect();
            let target: Vec<u8> = (0..300).map(|_| rng.random_range(b'a'..=b'c')).collect();
            let chunks: Vec<&[u8]> = query.chunks_exact(k).collect();
            let expected = target
                .windows(k)
                .filter(|w| chunks.iter().any(|c| c == w))
                .count();
            let outcome = batch_match(&h, &query, &target).unwrap();
            assert_eq!(outcome.matched, expected);
        }
    }

    #[test]
    fn rolling_mode_reports_leading_window_hashes() {
        let report = match_documents(&cfg(MatchMode::Rolling, 8), b"whatever", FOX).unwrap();
        let h = hasher(8);
        let expected: Vec<u64> = (0..HASH_PREVIEW_LEN).map(|i| h.hash(&FOX[i..i + 8])).collect();
        assert_eq!(report.window_hashes, expected);

        let naive = match_documents(&cfg(MatchMode::Naive, 8), b"whatever", FOX).unwrap();
        assert!(naive.window_hashes.is_empty());
    }

    #[test]
    fn batch_mode_reports_the_filter_prefix() {
        let report = match_documents(&cfg(MatchMode::RollingBatch, 8), FOX, FOX).unwrap();
        // 43 bytes at k = 8 sizes the filter at 48 bits, so six dump bytes
        let prefix = report.bloom_prefix_hex.unwrap();
        assert_eq!(prefix.len(), 12);
        assert!(prefix.bytes().all(|b| b.is_ascii_hexdigit()));

        let rolling = match_documents(&cfg(MatchMode::Rolling, 8), FOX, FOX).unwrap();
        assert!(rolling.bloom_prefix_hex.is_none());
    }

    #[test]
    fn bad_config_is_rejected_before_matching() {
        let err = match_documents(&cfg(MatchMode::Naive, 0), b"abc", b"abc").unwrap_err();
        assert!(matches!(err, MatchError::BadChunkLen));

        let mut c = cfg(MatchMode::Naive, 4);
        c.modulus = 1;
        assert!(matches!(
            match_documents(&c, b"abcd", b"abcd").unwrap_err(),
            MatchError::BadModulus(1)
        ));
        c.modulus = u64::MAX;
        assert!(match_documents(&c, b"abcd", b"abcd").is_err());
    }

    #[test]
    fn batch_match_short_query_skips_the_filter() {
        let outcome = batch_match(&hasher(10), b"short", FOX).unwrap();
        assert_eq!(outcome.matched, 0);
        assert!(outcome.bloom_prefix_hex.is_none());
    }
}
