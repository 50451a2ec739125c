//! Byte-backed Bloom filter keyed by rolling-hash values.

use crate::bits;
use crate::consts::{BLOOM_PROBES, H1_PRIME, H2_PRIME};
use crate::errors::{MatchError, Result};

/// Fixed-probe Bloom filter over `u64` hash values.
///
/// Bits are only ever set; there is no deletion. A query may report a value
/// that was never inserted (false positive) but never misses one that was.
#[derive(Clone, Debug)]
pub struct Bloom {
    size_bits: usize,
    buf: Vec<u8>,
}

impl Bloom {
    /// Allocate a zeroed filter of `size_bits` bits, rounded up to whole bytes.
    pub fn new(size_bits: usize) -> Result<Self> {
        if size_bits == 0 {
            return Err(MatchError::BadFilterSize);
        }
        let bytes = (size_bits + 7) / 8;
        Ok(Self {
            size_bits,
            buf: vec![0u8; bytes],
        })
    }

    #[inline]
    pub fn size_bits(&self) -> usize {
        self.size_bits
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Probe positions for `value`: `(v%P1) + i*(v%P2) + 1 + i*i` folded into
    /// the filter width, one position per probe index.
    #[inline]
    fn probes(&self, value: u64) -> impl Iterator<Item = usize> {
        let h1 = value % H1_PRIME;
        let h2 = value % H2_PRIME;
        let width = self.size_bits as u64;
        (0..BLOOM_PROBES).map(move |i| ((h1 + i * h2 + 1 + i * i) % width) as usize)
    }

    pub fn insert(&mut self, value: u64) {
        for p in self.probes(value) {
            bits::set_bit(&mut self.buf, p);
        }
    }

    /// True only if every probe bit for `value` is set; stops at the first
    /// clear bit.
    pub fn contains(&self, value: u64) -> bool {
        self.probes(value).all(|p| bits::test_bit(&self.buf, p))
    }

    /// Hex of the first `count_bits` bits, clamped to the filter size.
    ///
    /// `count_bits` must be a multiple of 8.
    pub fn dump_prefix(&self, count_bits: usize) -> String {
        assert!(count_bits % 8 == 0, "bit count must be a multiple of 8");
        let bytes = (count_bits / 8).min(self.size_bits / 8);
        hex::encode(&self.buf[..bytes])
    }
}
