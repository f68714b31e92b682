//! 128-bit multiply and shift helpers.
//!
//! By default these use native `u128` arithmetic. With the `emulated-u128`
//! feature, the high half of a 64x64-bit product is computed from four 32-bit
//! partial products instead. Both produce identical results.

use table::TableEntry;

/// Returns the high 64 bits of the 128-bit product `a * b`.
#[cfg(not(feature = "emulated-u128"))]
#[inline]
pub fn mul_high_64(a: u64, b: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) >> 64) as u64
}

/// Returns the high 64 bits of the 128-bit product `a * b`.
#[cfg(feature = "emulated-u128")]
#[inline]
pub fn mul_high_64(a: u64, b: u64) -> u64 {
    mul_high_64_emulated(a, b)
}

/// `mul_high_64` built from 32x32->64-bit multiplications only.
#[cfg(any(test, feature = "emulated-u128"))]
fn mul_high_64_emulated(a: u64, b: u64) -> u64 {
    let a_lo = a & 0xffff_ffff;
    let a_hi = a >> 32;
    let b_lo = b & 0xffff_ffff;
    let b_hi = b >> 32;

    let lo_lo = a_lo * b_lo;
    let hi_lo = a_hi * b_lo + (lo_lo >> 32);
    let lo_hi = a_lo * b_hi + (hi_lo & 0xffff_ffff);

    // Neither sum can overflow: (2^32 - 1)^2 + 2 * (2^32 - 1) < 2^64
    a_hi * b_hi + (hi_lo >> 32) + (lo_hi >> 32)
}

/// Returns the full product `a * b` as `(low, high)`.
#[inline]
pub fn umul128(a: u64, b: u64) -> (u64, u64) {
    (a.wrapping_mul(b), mul_high_64(a, b))
}

/// Returns the low 64 bits of `(high:low) >> dist`.
///
/// `dist` must be in `1..64`.
#[inline]
pub fn shift_right_128(low: u64, high: u64, dist: u32) -> u64 {
    debug_assert!(dist > 0 && dist < 64, "shift distance {} out of range", dist);
    (high << (64 - dist)) | (low >> dist)
}

/// Returns `floor(m * mul / 2^shift)` for a 128-bit `mul`.
///
/// `shift` must be in `65..128`, and the result must fit into 64 bits (which
/// is the case for all mantissas and table entries used by the conversion).
/// The sum `high64(m * mul.low) + m * mul.high` is formed first, dropping the
/// low 64 bits of `m * mul.low`, exactly like a full-width computation would.
#[inline]
pub fn mul_shift_64(m: u64, mul: &TableEntry, shift: u32) -> u64 {
    debug_assert!(shift > 64 && shift < 128, "shift {} out of range", shift);

    let b0_high = mul_high_64(m, mul.low);
    let (b2_low, b2_high) = umul128(m, mul.high);

    let sum_low = b0_high.wrapping_add(b2_low);
    let sum_high = b2_high + (sum_low < b0_high) as u64;
    shift_right_128(sum_low, sum_high, shift - 64)
}
