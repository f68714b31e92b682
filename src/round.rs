//! Re-rounding a shortest decimal to a fixed number of fractional digits.
//!
//! Unlike the shortest-decimal selection, which breaks ties towards the even
//! digit, this rounds half up on the decimal digits, as usual for fixed
//! precision output.

use decimal::{self, FloatDecimal};

/// Rounds `d` so that it has at most `precision` digits after the decimal
/// point.
///
/// Special values and zeros are returned unchanged. If all digits are rounded
/// away, the result is a zero with the sign of `d`.
pub fn round_to_precision(d: FloatDecimal, precision: u8) -> FloatDecimal {
    if d.is_special() || d.is_zero() {
        return d;
    }

    // Number of digits below the last one we keep.
    let excess = -i64::from(d.exponent) - i64::from(precision);
    if excess <= 0 {
        return d;
    }

    let exponent = d.exponent + excess as i32;
    let digits = i64::from(d.digit_count());
    if excess > digits {
        // Even the first dropped digit is an implicit leading zero.
        trace!("round: {:?} to {} digits vanishes", d, precision);
        return FloatDecimal::zero(d.sign);
    }

    let mut mantissa = d.mantissa / decimal::pow10(excess as u32 - 1);
    let digit = mantissa % 10;
    mantissa /= 10;

    let (mantissa, exponent) = if digit >= 5 {
        decimal::carry(mantissa + 1, exponent)
    } else {
        (mantissa, exponent)
    };
    trace!("round: {:?} to {} digits -> {}e{} (dropped {})", d, precision, mantissa, exponent, digit);

    if mantissa == 0 {
        FloatDecimal::zero(d.sign)
    } else {
        FloatDecimal::new(d.sign, mantissa, exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(mantissa: u64, exponent: i32, precision: u8) -> (u64, i32) {
        let d = round_to_precision(FloatDecimal::new(false, mantissa, exponent), precision);
        (d.mantissa, d.exponent)
    }

    #[test]
    fn nothing_to_do() {
        assert_eq!(round(1, 2, 2), (1, 2));
        assert_eq!(round(15, -1, 1), (15, -1));
        assert_eq!(round(15, -1, 6), (15, -1));
        assert_eq!(round(17976931348623157, 292, 255), (17976931348623157, 292));
    }

    #[test]
    fn carry_into_new_digit() {
        // 9.99995 -> 10.0
        assert_eq!(round(999995, -5, 1), (10, 0));
        assert_eq!(round(999995, -5, 3), (1000, -2));
        assert_eq!(round(999995, -5, 4), (10000, -3));
        assert_eq!(round(95, -2, 1), (1, 0));
    }

    #[test]
    fn half_up() {
        assert_eq!(round(2675, -3, 2), (268, -2));
        // Not round-half-even.
        assert_eq!(round(125, -3, 2), (13, -2));
        assert_eq!(round(5, -1, 0), (1, 0));
        assert_eq!(round(25, -1, 0), (3, 0));
        assert_eq!(round(1234, -3, 2), (123, -2));
    }

    #[test]
    fn small_values() {
        // 0.0006 -> 0.001
        assert_eq!(round(6, -4, 3), (1, -3));
        // 0.0004 -> 0.000
        assert_eq!(round(4, -4, 3), (0, 0));
        // 0.0009 -> 0.0 (the 9 is two places below the rounding digit)
        assert_eq!(round(9, -4, 1), (0, 0));
        // 5e-324 -> 0
        assert_eq!(round(5, -324, 255), (0, 0));
    }

    #[test]
    fn keeps_sign() {
        let d = round_to_precision(FloatDecimal::new(true, 4, -4), 1);
        assert_eq!(d, FloatDecimal::zero(true));
        let d = round_to_precision(FloatDecimal::new(true, 15, -1), 0);
        assert_eq!(d, FloatDecimal::new(true, 2, 0));
    }

    #[test]
    fn specials_pass_through() {
        let inf = FloatDecimal::infinity(true);
        assert_eq!(round_to_precision(inf, 3), inf);
        let nan = FloatDecimal::nan(false, 1);
        assert_eq!(round_to_precision(nan, 0), nan);
        let zero = FloatDecimal::zero(true);
        assert_eq!(round_to_precision(zero, 2), zero);
    }
}
