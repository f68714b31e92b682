//! Splits IEEE 754 bit patterns into sign, exponent and mantissa, and brings
//! finite values into the `m2 * 2^e2` form the conversion works with.

use ieee754::Ieee754;

/// Field widths of an IEEE 754 binary interchange format.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Format {
    /// Number of explicitly stored mantissa (fraction) bits.
    pub mantissa_bits: u32,
    /// Number of exponent bits.
    pub exponent_bits: u32,
}

impl Format {
    /// binary32 (`f32`).
    pub const F32: Format = Format { mantissa_bits: 23, exponent_bits: 8 };
    /// binary64 (`f64`).
    pub const F64: Format = Format { mantissa_bits: 52, exponent_bits: 11 };

    /// The exponent bias (`127` for `f32`, `1023` for `f64`).
    pub fn bias(&self) -> i32 {
        (1 << (self.exponent_bits - 1)) - 1
    }

    /// The all-ones exponent field used by infinities and NaNs.
    fn special_exponent(&self) -> u32 {
        (1 << self.exponent_bits) - 1
    }
}

/// A float separated by the kind of value it represents.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Classified {
    /// All-zero exponent and mantissa.
    Zero {
        sign: bool,
    },
    /// All-zero exponent, non-zero mantissa. There is no implicit leading 1.
    Subnormal {
        sign: bool,
        mantissa: u64,
    },
    /// Any exponent field that is neither all zeros nor all ones.
    Normal {
        sign: bool,
        /// The biased exponent field as stored in the bits.
        raw_exponent: u32,
        /// The stored fraction, without the implicit leading 1.
        mantissa: u64,
    },
    /// All-ones exponent, zero mantissa.
    Inf {
        sign: bool,
    },
    /// All-ones exponent, non-zero mantissa. Signaling and quiet NaNs are not
    /// distinguished.
    NaN {
        sign: bool,
        payload: u64,
    },
}

/// A finite, non-zero float in the form `(-1)^sign * m2 * 2^e2`.
///
/// `e2` is 2 lower than the "natural" exponent, so that `4 * m2` and its
/// neighbours `4 * m2 + 2` and `4 * m2 - 1 - mm_shift` are exactly the value
/// and the halfway points to the adjacent floats, scaled by `2^e2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Decomposed {
    pub sign: bool,
    pub m2: u64,
    pub e2: i32,
    /// `0` if the lower neighbour is only half as far away as the upper one
    /// (the value is an exact power of two above the smallest normal), `1`
    /// otherwise.
    pub mm_shift: u32,
}

impl Classified {
    /// Classifies a float given its raw fields.
    pub fn from_raw(format: &Format, sign: bool, raw_exponent: u32, mantissa: u64) -> Self {
        debug_assert!(mantissa >> format.mantissa_bits == 0, "mantissa {:#x} too wide", mantissa);

        match raw_exponent {
            0 => match mantissa {
                0 => Classified::Zero { sign },
                _ => Classified::Subnormal { sign, mantissa },
            },
            e if e == format.special_exponent() => match mantissa {
                0 => Classified::Inf { sign },
                payload => Classified::NaN { sign, payload },
            },
            _ => Classified::Normal { sign, raw_exponent, mantissa },
        }
    }

    /// Returns the value of the sign bit.
    pub fn sign(&self) -> bool {
        match *self {
            Classified::Zero { sign } |
            Classified::Subnormal { sign, .. } |
            Classified::Normal { sign, .. } |
            Classified::Inf { sign } |
            Classified::NaN { sign, .. } => sign,
        }
    }

    /// Returns `self` as `m2 * 2^e2`, or `None` if `self` is zero, infinite
    /// or NaN.
    ///
    /// `format` must be the format `self` was classified with.
    pub fn decompose(&self, format: &Format) -> Option<Decomposed> {
        let bias = format.bias();
        let mantissa_bits = format.mantissa_bits as i32;

        let (sign, m2, e2, mm_shift) = match *self {
            Classified::Subnormal { sign, mantissa } => {
                // Subnormals are spaced evenly, including the step to the
                // smallest normal number.
                (sign, mantissa, 1 - bias - mantissa_bits - 2, 1)
            }
            Classified::Normal { sign, raw_exponent, mantissa } => {
                let m2 = (1u64 << format.mantissa_bits) | mantissa;
                let e2 = raw_exponent as i32 - bias - mantissa_bits - 2;
                let mm_shift = (mantissa != 0 || raw_exponent <= 1) as u32;
                (sign, m2, e2, mm_shift)
            }
            Classified::Zero { .. } | Classified::Inf { .. } | Classified::NaN { .. } => {
                return None;
            }
        };

        Some(Decomposed { sign, m2, e2, mm_shift })
    }
}

/// Classifies the `f32` with bit pattern `bits`.
pub fn classify_f32(bits: u32) -> Classified {
    let (sign, raw_exponent, mantissa) = f32::from_bits(bits).decompose_raw();
    Classified::from_raw(&Format::F32, sign, u32::from(raw_exponent), u64::from(mantissa))
}

/// Classifies the `f64` with bit pattern `bits`.
pub fn classify_f64(bits: u64) -> Classified {
    let (sign, raw_exponent, mantissa) = f64::from_bits(bits).decompose_raw();
    Classified::from_raw(&Format::F64, sign, u32::from(raw_exponent), mantissa)
}
