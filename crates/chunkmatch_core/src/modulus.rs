use crate::consts::DEFAULT_MODULUS;
use crate::errors::{MatchError, Result};

/// Prime modulus for base-256 polynomial hashing, validated at construction.
///
/// The constructor requires `m > 1` and `m * 256` to fit in `u64`; that
/// headroom is what lets `add` and `sub` stay single-branch. `add` and `sub`
/// expect operands already in `[0, m)`; `mul` and `reduce` take anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modulus {
    m: u64,
}

impl Modulus {
    pub fn new(m: u64) -> Result<Self> {
        if m <= 1 || m.checked_mul(256).is_none() {
            return Err(MatchError::BadModulus(m));
        }
        Ok(Self { m })
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.m
    }

    /// `x mod m` for arbitrary `x`.
    #[inline]
    pub fn reduce(self, x: u64) -> u64 {
        x % self.m
    }

    #[inline]
    pub fn add(self, a: u64, b: u64) -> u64 {
        let s = a + b;
        if s >= self.m {
            s - self.m
        } else {
            s
        }
    }

    #[inline]
    pub fn sub(self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            a + self.m - b
        }
    }

    /// `(a * b) mod m`, widened through `u128`.
    #[inline]
    pub fn mul(self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.m as u128) as u64
    }

    /// `256^e mod m` by repeated multiplication; exponents here are window
    /// lengths, never large.
    pub fn pow_base256(self, e: usize) -> u64 {
        let mut acc = self.reduce(1);
        for _ in 0..e {
            acc = self.mul(acc, 256);
        }
        acc
    }
}

impl Default for Modulus {
    fn default() -> Self {
        Self { m: DEFAULT_MODULUS }
    }
}
