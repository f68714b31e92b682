//! Shortest round-trip decimal selection (Ryu).
//!
//! The algorithm follows Ulf Adams, "Ryū: fast float-to-string conversion"
//! (PLDI 2018). A finite float `m2 * 2^e2` and the halfway points to its
//! neighbours are scaled by a power of ten, giving the decimal candidates
//! `vm < vr < vp`. Digits are then stripped from all three as long as the
//! interval `[vm, vp]` still contains a number with fewer digits.
//!
//! Single precision runs through the same 64-bit kernel as double precision,
//! just with the `f32` field widths.

use classify::{classify_f32, classify_f64, Classified, Decomposed, Format};
use decimal::{self, FloatDecimal};
use mul::mul_shift_64;
use table::{log10_pow2, log10_pow5, pow5_bits, DefaultTable, Pow5Table, POW5_BITCOUNT};

/// Converts the `f64` with bit pattern `bits` to its shortest decimal.
pub fn f64_to_decimal(bits: u64) -> FloatDecimal {
    f64_to_decimal_with::<DefaultTable>(bits)
}

/// Converts the `f32` with bit pattern `bits` to its shortest decimal.
pub fn f32_to_decimal(bits: u32) -> FloatDecimal {
    f32_to_decimal_with::<DefaultTable>(bits)
}

/// Like `f64_to_decimal`, using the power-of-five table provider `T`.
pub fn f64_to_decimal_with<T: Pow5Table>(bits: u64) -> FloatDecimal {
    to_decimal::<T>(classify_f64(bits), &Format::F64)
}

/// Like `f32_to_decimal`, using the power-of-five table provider `T`.
pub fn f32_to_decimal_with<T: Pow5Table>(bits: u32) -> FloatDecimal {
    to_decimal::<T>(classify_f32(bits), &Format::F32)
}

fn to_decimal<T: Pow5Table>(classified: Classified, format: &Format) -> FloatDecimal {
    if let Some(d) = classified.decompose(format) {
        return shortest::<T>(&d);
    }

    match classified {
        Classified::Zero { sign } => FloatDecimal::zero(sign),
        Classified::Inf { sign } => FloatDecimal::infinity(sign),
        Classified::NaN { sign, payload } => FloatDecimal::nan(sign, payload),
        Classified::Subnormal { .. } | Classified::Normal { .. } => {
            unreachable!("finite non-zero value {:?} did not decompose", classified)
        }
    }
}

/// Computes the shortest decimal that lies within the rounding interval of
/// `d`.
pub fn shortest<T: Pow5Table>(d: &Decomposed) -> FloatDecimal {
    let accept_bounds = d.m2 % 2 == 0;
    let interval = Interval::compute::<T>(d, accept_bounds);
    trace!("ryu: m2={} e2={} mm_shift={} -> {:?}", d.m2, d.e2, d.mm_shift, interval);

    let (mantissa, exponent) = interval.shortest(accept_bounds);
    let result = FloatDecimal::new(d.sign, mantissa, exponent);
    trace!("ryu: shortest = {:?}", result);
    result
}

/// The decimal candidates for a float, all scaled by `10^-e10`.
///
/// `vr` is the (truncated) value itself, `vp` and `vm` are the upper and
/// lower halfway points to the neighbouring floats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Interval {
    vr: u64,
    vp: u64,
    vm: u64,
    e10: i32,
    /// All digits below `vr` (dropped by the scaling) are zero.
    vr_is_trailing_zeros: bool,
    /// All digits below `vm` are zero, i.e. `vm` is exact.
    vm_is_trailing_zeros: bool,
}

impl Interval {
    fn compute<T: Pow5Table>(d: &Decomposed, accept_bounds: bool) -> Self {
        let e2 = d.e2;
        let mv = 4 * d.m2;
        let mp = mv + 2;
        let mm = mv - 1 - u64::from(d.mm_shift);

        let mut vr_is_trailing_zeros = false;
        let mut vm_is_trailing_zeros = false;

        if e2 >= 0 {
            // The q - 1 instead of q keeps at least one digit for the
            // rounding decision in the digit removal loop.
            let q = log10_pow2(e2 as u32) - (e2 > 3) as u32;
            let k = POW5_BITCOUNT + pow5_bits(q) as i32 - 1;
            let i = (-e2 + q as i32 + k) as u32;
            let pow5_inv = T::pow5_inv(q);
            let vr = mul_shift_64(mv, &pow5_inv, i);
            let mut vp = mul_shift_64(mp, &pow5_inv, i);
            let vm = mul_shift_64(mm, &pow5_inv, i);

            if q <= 21 {
                // Only one of mp, mv and mm can be a multiple of 5, if any.
                if mv % 5 == 0 {
                    vr_is_trailing_zeros = multiple_of_power_of_5(mv, q);
                } else if accept_bounds {
                    vm_is_trailing_zeros = multiple_of_power_of_5(mm, q);
                } else {
                    vp -= multiple_of_power_of_5(mp, q) as u64;
                }
            }

            Interval { vr, vp, vm, e10: q as i32, vr_is_trailing_zeros, vm_is_trailing_zeros }
        } else {
            let q = log10_pow5(-e2 as u32) - (-e2 > 1) as u32;
            let i = -e2 - q as i32;
            let k = pow5_bits(i as u32) as i32 - POW5_BITCOUNT;
            let j = (q as i32 - k) as u32;
            let pow5 = T::pow5(i as u32);
            let vr = mul_shift_64(mv, &pow5, j);
            let mut vp = mul_shift_64(mp, &pow5, j);
            let vm = mul_shift_64(mm, &pow5, j);

            if q <= 1 {
                // mv = 4 * m2 always has at least two trailing zero bits.
                vr_is_trailing_zeros = true;
                if accept_bounds {
                    // mm has exactly one trailing zero bit iff mm_shift is 1.
                    vm_is_trailing_zeros = d.mm_shift == 1;
                } else {
                    // mp = mv + 2 always has one trailing zero bit.
                    vp -= 1;
                }
            } else if q < 63 {
                vr_is_trailing_zeros = multiple_of_power_of_2(mv, q);
            }

            Interval { vr, vp, vm, e10: q as i32 + e2, vr_is_trailing_zeros, vm_is_trailing_zeros }
        }
    }

    /// Strips digits until `[vm, vp]` no longer contains a shorter number,
    /// then rounds `vr` to the nearest candidate. Returns the decimal mantissa
    /// and exponent.
    fn shortest(self, accept_bounds: bool) -> (u64, i32) {
        let Interval { mut vr, mut vp, mut vm, e10, .. } = self;
        let mut vr_is_trailing_zeros = self.vr_is_trailing_zeros;
        let mut vm_is_trailing_zeros = self.vm_is_trailing_zeros;
        let mut removed = 0i32;
        let mut last_removed_digit = 0u64;

        while vp / 10 > vm / 10 {
            vm_is_trailing_zeros &= vm % 10 == 0;
            vr_is_trailing_zeros &= last_removed_digit == 0;
            last_removed_digit = vr % 10;
            vr /= 10;
            vp /= 10;
            vm /= 10;
            removed += 1;
        }

        if vm_is_trailing_zeros {
            // vm is exact and allowed, so trailing zeros in it can go too.
            while vm % 10 == 0 {
                vr_is_trailing_zeros &= last_removed_digit == 0;
                last_removed_digit = vr % 10;
                vr /= 10;
                vm /= 10;
                removed += 1;
            }
        }

        if vr_is_trailing_zeros && last_removed_digit == 5 && vr % 2 == 0 {
            // Exactly halfway: round to even.
            last_removed_digit = 4;
        }

        // vr is outside the interval if it equals an excluded vm.
        let round_up = (vr == vm && (!accept_bounds || !vm_is_trailing_zeros))
            || last_removed_digit >= 5;
        let exponent = e10 + removed;
        if round_up {
            decimal::carry(vr + 1, exponent)
        } else {
            (vr, exponent)
        }
    }
}

/// Returns the number of times `value` is divisible by 5.
fn pow5_factor(mut value: u64) -> u32 {
    debug_assert!(value != 0);
    let mut count = 0;
    while value % 5 == 0 {
        value /= 5;
        count += 1;
    }
    count
}

/// Returns `true` if `value` is divisible by `5^p`.
fn multiple_of_power_of_5(value: u64, p: u32) -> bool {
    pow5_factor(value) >= p
}

/// Returns `true` if `value` is divisible by `2^p`.
fn multiple_of_power_of_2(value: u64, p: u32) -> bool {
    debug_assert!(p < 64);
    value & ((1u64 << p) - 1) == 0
}

#[cfg(test)]
mod tests {
    extern crate env_logger;

    use super::*;
    use table::{FullTable, SmallTable};
    use std::{f32, f64};

    fn d64(f: f64) -> (u64, i32) {
        let d = f64_to_decimal(f.to_bits());
        (d.mantissa, d.exponent)
    }

    fn d32(f: f32) -> (u64, i32) {
        let d = f32_to_decimal(f.to_bits());
        (d.mantissa, d.exponent)
    }

    #[test]
    fn simple() {
        env_logger::try_init().ok();

        assert_eq!(d64(1.0), (1, 0));
        assert_eq!(d64(0.1), (1, -1));
        assert_eq!(d64(100.0), (1, 2));
        assert_eq!(d64(0.3), (3, -1));
        assert_eq!(d64(123456.789), (123456789, -3));
        assert_eq!(d64(9.99995), (999995, -5));
        assert_eq!(d64(2.675), (2675, -3));
        assert_eq!(d64(1.5e300), (15, 299));
    }

    #[test]
    fn signs() {
        let d = f64_to_decimal((-0.1f64).to_bits());
        assert_eq!(d, FloatDecimal::new(true, 1, -1));
        let d = f64_to_decimal((-0.0f64).to_bits());
        assert_eq!(d, FloatDecimal::zero(true));
        let d = f32_to_decimal((-2.5f32).to_bits());
        assert_eq!(d, FloatDecimal::new(true, 25, -1));
    }

    #[test]
    fn specials() {
        assert!(f64_to_decimal(f64::INFINITY.to_bits()).is_infinite());
        assert!(f64_to_decimal(f64::NEG_INFINITY.to_bits()).sign);
        assert!(f64_to_decimal(f64::NAN.to_bits()).is_nan());
        assert!(f64_to_decimal(0x7ff0_0000_0000_0001).is_nan());
        assert!(f32_to_decimal(0xffc0_0000).is_nan());
        assert!(f32_to_decimal(f32::INFINITY.to_bits()).is_infinite());
    }

    #[test]
    fn extremes() {
        env_logger::try_init().ok();

        // Smallest subnormal and largest finite double.
        assert_eq!(d64(5e-324), (5, -324));
        assert_eq!(d64(f64::MAX), (17976931348623157, 292));
        assert_eq!(d64(f64::MIN_POSITIVE), (22250738585072014, -324));
        // Largest subnormal.
        let d = f64_to_decimal(0x000f_ffff_ffff_ffff);
        assert_eq!((d.mantissa, d.exponent), (2225073858507201, -323));
    }

    #[test]
    fn single_precision() {
        assert_eq!(d32(0.1), (1, -1));
        assert_eq!(d32(0.2), (2, -1));
        assert_eq!(d32(1.0), (1, 0));
        assert_eq!(d32(16777216.0), (16777216, 0));
        assert_eq!(d32(f32::MAX), (34028235, 31));
        assert_eq!(d32(f32::MIN_POSITIVE), (11754944, -45));
        // Smallest subnormal.
        let d = f32_to_decimal(1);
        assert_eq!((d.mantissa, d.exponent), (1, -45));
    }

    /// 731930604835989.25 is exactly representable; both 731930604835989.2
    /// and 731930604835989.3 round-trip, so the even digit wins.
    #[test]
    fn round_to_even_tie() {
        let d = f64_to_decimal(0x4304_cd7e_fd9c_a4aa);
        assert_eq!((d.mantissa, d.exponent), (7319306048359892, -1));
        let d = f64_to_decimal(0x4304_5acc_9bdd_ee3a);
        assert_eq!((d.mantissa, d.exponent), (7161667961317832, -1));
    }

    #[test]
    fn tables_agree() {
        let samples = [
            1, 0x0010_0000_0000_0000, 0x3ff0_0000_0000_0000, 0x3fb9_9999_9999_999a,
            0x4304_cd7e_fd9c_a4aa, 0x7fef_ffff_ffff_ffff, 0x000f_ffff_ffff_ffff,
            0x4415_af1d_78b5_8c40, 0x0000_0000_0000_00ff, 0x54b2_49ad_2594_c37d,
        ];
        for &bits in &samples {
            assert_eq!(
                f64_to_decimal_with::<FullTable>(bits),
                f64_to_decimal_with::<SmallTable>(bits),
                "{:#x}", bits
            );
        }
    }

    fn interval(vr: u64, vp: u64, vm: u64, vr_is_trailing_zeros: bool, vm_is_trailing_zeros: bool) -> Interval {
        Interval { vr, vp, vm, e10: 0, vr_is_trailing_zeros, vm_is_trailing_zeros }
    }

    #[test]
    fn removal_rounds_half_to_even() {
        // 12.5 exactly, both 12 and 13 inside: even wins
        assert_eq!(interval(125, 130, 119, true, false).shortest(true), (12, 1));
        // 13.5 exactly
        assert_eq!(interval(135, 140, 129, true, false).shortest(true), (14, 1));
        // 12.5 plus something non-zero below: round up
        assert_eq!(interval(125, 130, 119, false, false).shortest(true), (13, 1));
    }

    #[test]
    fn removal_lower_bound() {
        // An exact vm may be used when the bounds are accepted...
        assert_eq!(interval(125, 130, 120, true, true).shortest(true), (12, 1));
        // ...but not otherwise.
        assert_eq!(interval(125, 130, 120, true, true).shortest(false), (13, 1));
    }

    #[test]
    fn removal_strips_zeros_of_exact_vm() {
        // vm = 1000 is exact and allowed, vr = 1000 too: everything collapses
        // into a single digit.
        assert_eq!(interval(1000, 1004, 1000, true, true).shortest(true), (1, 3));
    }

    #[test]
    fn divisibility() {
        assert_eq!(pow5_factor(1), 0);
        assert_eq!(pow5_factor(125), 3);
        assert_eq!(pow5_factor(250), 3);
        assert!(multiple_of_power_of_5(3125, 5));
        assert!(!multiple_of_power_of_5(3125, 6));
        assert!(multiple_of_power_of_2(64, 6));
        assert!(!multiple_of_power_of_2(64, 7));
    }
}
