//! The decimal form produced by the conversion: `±mantissa * 10^exponent`.

use std::fmt;

/// Exponent value marking a non-finite `FloatDecimal`.
///
/// No finite `f64` gets anywhere close to this decimal exponent, so it can't
/// clash with the normal encoding.
pub const SPECIAL_EXPONENT: i32 = 0x7fff_ffff;

/// A decimal floating-point number `(-1)^sign * mantissa * 10^exponent`.
///
/// When `exponent` is `SPECIAL_EXPONENT`, the value is not finite: a zero
/// `mantissa` encodes infinity, anything else encodes NaN.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct FloatDecimal {
    /// Decimal digits as an integer (at most 17 digits for `f64`).
    pub mantissa: u64,
    /// Power of ten the mantissa is scaled by.
    pub exponent: i32,
    /// `true` if the value is negative (this includes `-0` and `-inf`).
    pub sign: bool,
}

impl FloatDecimal {
    /// Creates a finite decimal `(-1)^sign * mantissa * 10^exponent`.
    pub fn new(sign: bool, mantissa: u64, exponent: i32) -> Self {
        debug_assert!(exponent != SPECIAL_EXPONENT, "exponent collides with the special marker");
        Self { mantissa, exponent, sign }
    }

    /// Returns a (possibly negative) zero.
    pub fn zero(sign: bool) -> Self {
        Self { mantissa: 0, exponent: 0, sign }
    }

    /// Returns a (possibly negative) infinity.
    pub fn infinity(sign: bool) -> Self {
        Self { mantissa: 0, exponent: SPECIAL_EXPONENT, sign }
    }

    /// Returns a NaN.
    ///
    /// `payload` must be non-zero, otherwise this would be an infinity.
    pub fn nan(sign: bool, payload: u64) -> Self {
        debug_assert!(payload != 0, "NaN without payload");
        Self { mantissa: payload, exponent: SPECIAL_EXPONENT, sign }
    }

    /// Returns `true` for infinities and NaNs.
    pub fn is_special(&self) -> bool {
        self.exponent == SPECIAL_EXPONENT
    }

    pub fn is_nan(&self) -> bool {
        self.is_special() && self.mantissa != 0
    }

    pub fn is_infinite(&self) -> bool {
        self.is_special() && self.mantissa == 0
    }

    /// Returns `true` if `self` is exactly `0` or `-0`.
    pub fn is_zero(&self) -> bool {
        !self.is_special() && self.mantissa == 0
    }

    /// Number of decimal digits in the mantissa (`1` for a zero mantissa).
    pub fn digit_count(&self) -> u32 {
        decimal_length(self.mantissa)
    }
}

impl fmt::Debug for FloatDecimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sign {
            f.write_str("-")?;
        }

        match (self.is_special(), self.mantissa) {
            (true, 0) => f.write_str("inf"),
            (true, payload) => write!(f, "nan({:#x})", payload),
            (false, m) => write!(f, "{}e{}", m, self.exponent),
        }
    }
}

/// Returns the number of decimal digits of `v`.
///
/// Zero has one digit. Values of up to 20 digits are supported, although
/// conversion results never need more than 17.
pub fn decimal_length(v: u64) -> u32 {
    let mut len = 1;
    let mut threshold = 10u64;
    while len < 20 && v >= threshold {
        len += 1;
        // Can't overflow: the loop stops at 10^19.
        threshold = threshold.wrapping_mul(10);
    }
    len
}

/// Returns `10^e`. `e` must be below 20.
pub(crate) fn pow10(e: u32) -> u64 {
    debug_assert!(e < 20, "10^{} doesn't fit in a u64", e);
    let mut p = 1u64;
    for _ in 0..e {
        p *= 10;
    }
    p
}

/// Returns `true` if `v` is `10^k` for some `k > 0`.
pub(crate) fn is_power_of_ten(v: u64) -> bool {
    if v < 10 {
        return false;
    }
    let mut v = v;
    while v % 10 == 0 {
        v /= 10;
    }
    v == 1
}

/// Normalizes a rounded-up mantissa: if it became a power of ten, drop the
/// trailing zero and bump the exponent instead.
pub(crate) fn carry(mantissa: u64, exponent: i32) -> (u64, i32) {
    if is_power_of_ten(mantissa) {
        (mantissa / 10, exponent + 1)
    } else {
        (mantissa, exponent)
    }
}
