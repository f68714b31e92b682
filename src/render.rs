//! Writes a `FloatDecimal` in fixed notation.

use decimal::FloatDecimal;
use format::{Case, FormatSpec, Sign};

/// Size of the output buffer.
///
/// Enough for a sign, the 309 integer digits of `f64::MAX`, a decimal point
/// and 255 fractional digits.
pub const BUFFER_LEN: usize = 1 + 309 + 1 + 255;

static DIGIT_TABLE: &[u8; 200] = b"\
    0001020304050607080910111213141516171819\
    2021222324252627282930313233343536373839\
    4041424344454647484950515253545556575859\
    6061626364656667686970717273747576777879\
    8081828384858687888990919293949596979899";

/// Writes the decimal digits of `v` into `out`, right-aligned.
///
/// `out` must be exactly as long as the number of digits of `v`.
fn write_digits(out: &mut [u8], mut v: u64) {
    let mut end = out.len();
    while v >= 100 {
        let d = (v % 100) as usize * 2;
        v /= 100;
        end -= 2;
        out[end..end + 2].copy_from_slice(&DIGIT_TABLE[d..d + 2]);
    }
    if v >= 10 {
        let d = v as usize * 2;
        end -= 2;
        out[end..end + 2].copy_from_slice(&DIGIT_TABLE[d..d + 2]);
    } else {
        end -= 1;
        out[end] = b'0' + v as u8;
    }
    debug_assert_eq!(end, 0, "digit count mismatch");
}

fn write_zeros(out: &mut [u8]) {
    for b in out {
        *b = b'0';
    }
}

/// Renders `d` into `buf` and returns the number of bytes written.
///
/// With a precision set in `spec`, `d` must already be rounded to at most
/// that many fractional digits (see `round::round_to_precision`); the
/// fraction is then padded with zeros to exactly `precision` digits.
///
/// The sign policy only applies to finite values: infinities render as
/// `inf` or `-inf`, and NaN as `nan`.
///
/// The rendering of `d` must fit into `BUFFER_LEN` bytes, which holds for
/// every value produced by the conversion of an `f32` or `f64`. Hand-built
/// decimals that don't fit are a caller error and only caught by debug
/// assertions. The output is never padded to a field width.
pub fn write_decimal(buf: &mut [u8; BUFFER_LEN], d: FloatDecimal, spec: &FormatSpec) -> usize {
    let mut pos = 0;

    if d.is_special() {
        let text: &[u8] = match (d.is_nan(), d.sign) {
            (true, _) => b"nan",
            (false, false) => b"inf",
            (false, true) => b"-inf",
        };
        buf[..text.len()].copy_from_slice(text);
        pos += text.len();
    } else {
        let sign = match (d.sign, spec.sign) {
            (true, _) => Some(b'-'),
            (false, Sign::Always) => Some(b'+'),
            (false, Sign::Space) => Some(b' '),
            (false, Sign::Auto) => None,
        };
        if let Some(c) = sign {
            buf[pos] = c;
            pos += 1;
        }
        pos = write_finite(buf, pos, d, spec.precision);
    }

    if spec.case == Case::Upper {
        buf[..pos].make_ascii_uppercase();
    }

    pos
}

/// Number of bytes `write_finite` produces for `d`, without the sign.
fn rendered_len(d: FloatDecimal, precision: Option<u8>) -> usize {
    let olen = i64::from(d.digit_count());
    let dp_offset = i64::from(d.exponent) + olen;
    let (len, fraction_len) = if dp_offset <= 0 {
        (2 - dp_offset + olen, olen - dp_offset)
    } else if dp_offset >= olen {
        (dp_offset, 0)
    } else {
        (olen + 1, olen - dp_offset)
    };

    let padding = match precision {
        Some(p) if i64::from(p) > fraction_len => {
            i64::from(p) - fraction_len + (fraction_len == 0) as i64
        }
        _ => 0,
    };
    (len + padding) as usize
}

/// Writes the digits, decimal point and zeros of a finite value at `pos`.
fn write_finite(buf: &mut [u8; BUFFER_LEN], mut pos: usize, d: FloatDecimal, precision: Option<u8>) -> usize {
    let olen = d.digit_count() as usize;
    let dp_offset = d.exponent + olen as i32;
    debug_assert!(
        precision.map_or(true, |p| d.is_zero() || -d.exponent <= i32::from(p)),
        "{:?} has more than {:?} fractional digits", d, precision,
    );
    debug_assert!(
        pos + rendered_len(d, precision) <= BUFFER_LEN,
        "{:?} does not fit into the output buffer", d,
    );

    let fraction_len = if dp_offset <= 0 {
        // 0.000ddd
        let zeros = (-dp_offset) as usize;
        trace!("render: {:?} below one, {} leading zeros", d, zeros);
        buf[pos..pos + 2].copy_from_slice(b"0.");
        pos += 2;
        write_zeros(&mut buf[pos..pos + zeros]);
        pos += zeros;
        write_digits(&mut buf[pos..pos + olen], d.mantissa);
        pos += olen;
        zeros + olen
    } else if dp_offset as usize >= olen {
        // ddd000
        let zeros = dp_offset as usize - olen;
        trace!("render: {:?} is an integer, {} trailing zeros", d, zeros);
        write_digits(&mut buf[pos..pos + olen], d.mantissa);
        pos += olen;
        write_zeros(&mut buf[pos..pos + zeros]);
        pos += zeros;
        0
    } else {
        // ddd.ddd
        let int_len = dp_offset as usize;
        trace!("render: {:?} split after {} digits", d, int_len);
        write_digits(&mut buf[pos + 1..pos + 1 + olen], d.mantissa);
        for i in 0..int_len {
            buf[pos + i] = buf[pos + i + 1];
        }
        buf[pos + int_len] = b'.';
        pos += olen + 1;
        olen - int_len
    };

    if let Some(precision) = precision {
        let precision = usize::from(precision);
        if precision > fraction_len {
            if fraction_len == 0 {
                buf[pos] = b'.';
                pos += 1;
            }
            let zeros = precision - fraction_len;
            write_zeros(&mut buf[pos..pos + zeros]);
            pos += zeros;
        }
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter;
    use std::str;

    fn render(d: FloatDecimal, spec: &FormatSpec) -> String {
        let mut buf = [0; BUFFER_LEN];
        let len = write_decimal(&mut buf, d, spec);
        str::from_utf8(&buf[..len]).unwrap().to_string()
    }

    fn shortest(mantissa: u64, exponent: i32) -> String {
        render(FloatDecimal::new(false, mantissa, exponent), &FormatSpec::default())
    }

    fn fixed(mantissa: u64, exponent: i32, precision: u8) -> String {
        let spec = FormatSpec::default().with_precision(precision);
        render(FloatDecimal::new(false, mantissa, exponent), &spec)
    }

    fn zeros(n: usize) -> String {
        iter::repeat('0').take(n).collect()
    }

    #[test]
    fn digits() {
        let mut buf = [0; 20];
        for &v in &[0u64, 7, 10, 99, 100, 12345, 9_876_543_210, u64::max_value()] {
            let s = v.to_string();
            write_digits(&mut buf[..s.len()], v);
            assert_eq!(&buf[..s.len()], s.as_bytes());
        }
    }

    #[test]
    fn layouts() {
        assert_eq!(shortest(1, 0), "1");
        assert_eq!(shortest(1, -1), "0.1");
        assert_eq!(shortest(1, 2), "100");
        assert_eq!(shortest(3, -1), "0.3");
        assert_eq!(shortest(123456789, -3), "123456.789");
        assert_eq!(shortest(7319306048359892, -1), "731930604835989.2");
        assert_eq!(shortest(12, -4), "0.0012");
        assert_eq!(shortest(15, 299), format!("15{}", zeros(299)));
        assert_eq!(shortest(5, -324), format!("0.{}5", zeros(323)));
    }

    #[test]
    fn zeros_and_signs() {
        let spec = FormatSpec::default();
        assert_eq!(render(FloatDecimal::zero(false), &spec), "0");
        assert_eq!(render(FloatDecimal::zero(true), &spec), "-0");
        assert_eq!(render(FloatDecimal::new(true, 25, -1), &spec), "-2.5");

        let always = FormatSpec::default().with_sign(Sign::Always);
        assert_eq!(render(FloatDecimal::new(false, 1, 0), &always), "+1");
        assert_eq!(render(FloatDecimal::new(true, 1, 0), &always), "-1");
        assert_eq!(render(FloatDecimal::zero(false), &always), "+0");

        let space = FormatSpec::default().with_sign(Sign::Space);
        assert_eq!(render(FloatDecimal::new(false, 1, 0), &space), " 1");
        assert_eq!(render(FloatDecimal::new(true, 1, 0), &space), "-1");
    }

    #[test]
    fn precision_padding() {
        assert_eq!(fixed(10, 0, 1), "10.0");
        assert_eq!(fixed(268, -2, 2), "2.68");
        assert_eq!(fixed(1, 0, 0), "1");
        assert_eq!(fixed(15, -1, 3), "1.500");
        assert_eq!(fixed(1, -3, 3), "0.001");
        assert_eq!(fixed(1, 2, 2), "100.00");

        let spec = FormatSpec::default().with_precision(3);
        assert_eq!(render(FloatDecimal::zero(false), &spec), "0.000");
        assert_eq!(render(FloatDecimal::zero(true), &spec), "-0.000");
    }

    #[test]
    fn specials() {
        let lower = FormatSpec::default();
        let upper = FormatSpec::default().with_case(Case::Upper);
        let always = FormatSpec::default().with_sign(Sign::Always);

        assert_eq!(render(FloatDecimal::infinity(false), &lower), "inf");
        assert_eq!(render(FloatDecimal::infinity(false), &upper), "INF");
        assert_eq!(render(FloatDecimal::infinity(true), &lower), "-inf");
        assert_eq!(render(FloatDecimal::infinity(true), &upper), "-INF");
        // The sign policy only applies to finite values.
        let space = FormatSpec::default().with_sign(Sign::Space);
        assert_eq!(render(FloatDecimal::infinity(false), &always), "inf");
        assert_eq!(render(FloatDecimal::infinity(false), &space), "inf");
        assert_eq!(render(FloatDecimal::infinity(true), &always), "-inf");

        assert_eq!(render(FloatDecimal::nan(false, 1), &lower), "nan");
        assert_eq!(render(FloatDecimal::nan(true, 1), &lower), "nan");
        assert_eq!(render(FloatDecimal::nan(true, 1), &upper), "NAN");
        assert_eq!(render(FloatDecimal::nan(false, 1), &always), "nan");

        // Precision doesn't apply to specials.
        let precise = FormatSpec::default().with_precision(2);
        assert_eq!(render(FloatDecimal::infinity(false), &precise), "inf");
    }

    #[test]
    fn longest_output_fits() {
        let spec = FormatSpec::default().with_precision(255);
        let max = FloatDecimal::new(true, 17976931348623157, 292);
        let s = render(max, &spec);
        assert_eq!(s.len(), BUFFER_LEN);
        assert!(s.starts_with("-17976931348623157"));
        assert!(s.ends_with(&format!(".{}", zeros(255))));
    }

    #[test]
    fn rendered_lengths() {
        for &(mantissa, exponent, precision) in &[
            (1u64, 0i32, None),
            (15, 299, None),
            (5, -324, None),
            (123456789, -3, None),
            (15, -1, Some(3)),
            (1, 2, Some(2)),
            (1, 0, Some(0)),
            (1, -3, Some(3)),
        ] {
            let d = FloatDecimal::new(false, mantissa, exponent);
            let spec = FormatSpec { precision, ..FormatSpec::default() };
            assert_eq!(render(d, &spec).len(), rendered_len(d, precision), "{:?}", d);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not fit")]
    fn oversized_decimal_is_rejected() {
        render(FloatDecimal::new(false, 1, 600), &FormatSpec::default());
    }
}
