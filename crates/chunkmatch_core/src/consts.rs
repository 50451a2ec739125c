// crates/chunkmatch_core/src/consts.rs

/// Default rolling-hash modulus, a prime with `m * 256` still inside `u64`.
pub const DEFAULT_MODULUS: u64 = 5_003_943_032_159_437;

/// Default chunk length in bytes.
pub const DEFAULT_CHUNK_LEN: usize = 100;

/// First Bloom probe prime.
pub const H1_PRIME: u64 = 4_189_793;
/// Second Bloom probe prime.
pub const H2_PRIME: u64 = 3_296_731;
/// Probe bits set and tested per value.
pub const BLOOM_PROBES: u64 = 10;

/// Leading target-window hashes carried in a report.
pub const HASH_PREVIEW_LEN: usize = 5;
/// Leading filter bits dumped into a report.
pub const FILTER_PREVIEW_BITS: usize = 160;

const _: () = {
    assert!(DEFAULT_MODULUS.checked_mul(256).is_some());
    assert!(FILTER_PREVIEW_BITS % 8 == 0);
};
