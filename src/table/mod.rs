//! Fixed-point approximations of powers of five.
//!
//! The conversion needs `5^i` and `5^-i` with 125 significant bits. There are
//! two providers with identical results: `FullTable` stores every entry,
//! `SmallTable` stores every 26th entry and reconstructs the rest with a
//! 128-bit multiplication plus a small correction.

mod full;
mod small;

pub use self::full::FullTable;
pub use self::small::SmallTable;

/// Number of significant bits in every table entry.
pub const POW5_BITCOUNT: i32 = 125;

/// Largest index accepted by `Pow5Table::pow5`.
pub const POW5_MAX_INDEX: u32 = 325;

/// Largest index accepted by `Pow5Table::pow5_inv`.
pub const POW5_INV_MAX_INDEX: u32 = 341;

/// An unsigned 128-bit table entry, split into two 64-bit halves.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TableEntry {
    pub low: u64,
    pub high: u64,
}

impl TableEntry {
    pub fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    /// Builds an entry from the `(low, high)` pairs the tables are stored as.
    fn from_pair(pair: (u64, u64)) -> Self {
        Self { low: pair.0, high: pair.1 }
    }

    /// Returns the entry as a native `u128`.
    pub fn to_u128(&self) -> u128 {
        (u128::from(self.high) << 64) | u128::from(self.low)
    }

    /// Adds a small correction to the low word, carrying into the high word.
    fn add_low(self, n: u64) -> Self {
        let low = self.low.wrapping_add(n);
        let high = self.high + (low < n) as u64;
        Self { low, high }
    }
}

/// Source of the power-of-five approximations.
///
/// Both functions are only defined for indices up to `POW5_MAX_INDEX` and
/// `POW5_INV_MAX_INDEX`, respectively. Larger indices are a caller error and
/// only caught by debug assertions.
pub trait Pow5Table {
    /// Returns `5^i`, shifted so that it has exactly `POW5_BITCOUNT` bits.
    fn pow5(i: u32) -> TableEntry;

    /// Returns `floor(2^(pow5_bits(i) - 1 + POW5_BITCOUNT) / 5^i) + 1`.
    fn pow5_inv(i: u32) -> TableEntry;
}

/// The table provider used when none is picked explicitly.
#[cfg(not(feature = "small-table"))]
pub type DefaultTable = FullTable;

/// The table provider used when none is picked explicitly.
#[cfg(feature = "small-table")]
pub type DefaultTable = SmallTable;

/// The powers `5^0` through `5^25`, used by `SmallTable` to scale its split
/// entries.
pub(crate) static POW5_BASE: [u64; 26] = [
    1,
    5,
    25,
    125,
    625,
    3125,
    15625,
    78125,
    390625,
    1953125,
    9765625,
    48828125,
    244140625,
    1220703125,
    6103515625,
    30517578125,
    152587890625,
    762939453125,
    3814697265625,
    19073486328125,
    95367431640625,
    476837158203125,
    2384185791015625,
    11920928955078125,
    59604644775390625,
    298023223876953125,
];

/// Returns the number of bits of `5^e` (`1` for `e == 0`).
///
/// Exact for `e <= 3528`.
pub fn pow5_bits(e: u32) -> u32 {
    debug_assert!(e <= 3528);
    (((e as u64) * 163_391_164_108_059) >> 46) as u32 + 1
}

/// Returns `floor(log10(2^e))`.
///
/// Exact for `e <= 1650`.
pub fn log10_pow2(e: u32) -> u32 {
    debug_assert!(e <= 1650);
    (((e as u64) * 169_464_822_037_455) >> 49) as u32
}

/// Returns `floor(log10(5^e))`.
///
/// Exact for `e <= 2620`.
pub fn log10_pow5(e: u32) -> u32 {
    debug_assert!(e <= 2620);
    (((e as u64) * 196_742_565_691_928) >> 48) as u32
}
