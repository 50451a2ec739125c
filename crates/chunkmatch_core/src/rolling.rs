//! Incremental polynomial hashing over sliding byte windows.
//!
//! A window `w` of length `k` hashes to
//!
//! ```text
//! H(w) = (w[0]*256^(k-1) + w[1]*256^(k-2) + ... + w[k-1]) mod m
//! ```
//!
//! Sliding one byte to the right drops the leading term and appends a new
//! trailing byte:
//!
//! ```text
//! H(next) = ((H(prev) - old*256^(k-1)) * 256 + new) mod m
//! ```
//!
//! so every window after the first costs O(1). Equal windows always hash
//! equal; unequal windows may collide, which is why callers confirm any hash
//! hit with a byte comparison before trusting it.

use crate::modulus::Modulus;

/// Hasher for fixed-length windows under one modulus.
#[derive(Debug, Clone, Copy)]
pub struct WindowHasher {
    modulus: Modulus,
    window_len: usize,
    /// `256^(window_len - 1) mod m`, the weight of the byte that leaves.
    lead: u64,
}

impl WindowHasher {
    pub fn new(modulus: Modulus, window_len: usize) -> Self {
        assert!(window_len > 0, "window length must be nonzero");
        let lead = modulus.pow_base256(window_len - 1);
        Self {
            modulus,
            window_len,
            lead,
        }
    }

    #[inline]
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Direct hash of one window; O(len). `window` is expected to hold
    /// exactly `window_len` bytes.
    pub fn hash(&self, window: &[u8]) -> u64 {
        let m = self.modulus;
        let mut h = 0u64;
        for &b in window {
            h = m.add(m.mul(h, 256), m.reduce(u64::from(b)));
        }
        h
    }

    /// Hash of the window one byte to the right of a window hashing to
    /// `prev`, where `old_byte` leaves on the left and `new_byte` enters on
    /// the right.
    #[inline]
    pub fn slide(&self, prev: u64, old_byte: u8, new_byte: u8) -> u64 {
        let m = self.modulus;
        let kept = m.sub(prev, m.mul(self.lead, u64::from(old_byte)));
        m.add(m.mul(kept, 256), m.reduce(u64::from(new_byte)))
    }

    /// Iterate `(offset, hash)` over every window of `buf`, hashing the first
    /// window directly and deriving the rest via [`WindowHasher::slide`].
    /// Empty when `buf` is shorter than the window length.
    pub fn window_hashes<'a>(&'a self, buf: &'a [u8]) -> WindowHashes<'a> {
        let first = if buf.len() >= self.window_len {
            self.hash(&buf[..self.window_len])
        } else {
            0
        };
        WindowHashes {
            hasher: self,
            buf,
            next_off: 0,
            hash: first,
        }
    }
}

/// See [`WindowHasher::window_hashes`].
pub struct WindowHashes<'a> {
    hasher: &'a WindowHasher,
    buf: &'a [u8],
    next_off: usize,
    /// Hash of the window at `next_off`, if one fits.
    hash: u64,
}

impl<'a> Iterator for WindowHashes<'a> {
    type Item = (usize, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.hasher.window_len;
        let off = self.next_off;
        let end = off.checked_add(k)?;
        if end > self.buf.len() {
            return None;
        }
        let out = (off, self.hash);
        if end < self.buf.len() {
            self.hash = self.hasher.slide(self.hash, self.buf[off], self.buf[end]);
        }
        self.next_off = off + 1;
        Some(out)
    }
}
