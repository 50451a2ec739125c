//! MSB-first bit addressing over byte slices.
//!
//! Bit `p` lives in byte `p / 8` under mask `1 << (7 - p % 8)`, so bit 0 is
//! the high bit of byte 0 and a hex dump of the bytes reads in bit order.

#[inline]
pub fn set_bit(bytes: &mut [u8], p: usize) {
    bytes[p / 8] |= 1u8 << (7 - (p % 8));
}

#[inline]
pub fn test_bit(bytes: &[u8], p: usize) -> bool {
    bytes[p / 8] & (1u8 << (7 - (p % 8))) != 0
}
