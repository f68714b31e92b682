extern crate fltfmt;
#[macro_use] extern crate proptest;

use fltfmt::ryu::{f32_to_decimal, f64_to_decimal};
use fltfmt::{Buffer, FloatDecimal, FormatSpec};

/// Strips trailing zeros, so that the digit count is the number of
/// significant digits.
fn significant(d: FloatDecimal) -> (u64, i32) {
    let (mut m, mut e) = (d.mantissa, d.exponent);
    while m != 0 && m % 10 == 0 {
        m /= 10;
        e += 1;
    }
    (m, e)
}

fn check_f64(bits: u64) {
    let f = f64::from_bits(bits);
    if !f.is_finite() {
        return;
    }

    let mut buf = Buffer::new();
    let s = buf.format(f, &FormatSpec::default());
    let back: f64 = s.parse().unwrap();
    assert_eq!(back.to_bits(), bits, "{:e} ({:#018x}) rendered as {}", f, bits, s);

    // No decimal with one significant digit fewer may round-trip.
    let (m, e) = significant(f64_to_decimal(bits));
    if m >= 10 {
        for &candidate in &[m / 10, m / 10 + 1] {
            let shorter: f64 = format!("{}e{}", candidate, e + 1).parse().unwrap();
            assert_ne!(shorter.abs().to_bits(), f.abs().to_bits(), "{}e{} is shorter than {}", candidate, e + 1, s);
        }
    }
}

fn check_f32(bits: u32) {
    let f = f32::from_bits(bits);
    if !f.is_finite() {
        return;
    }

    let mut buf = Buffer::new();
    let s = buf.format(f, &FormatSpec::default());
    let back: f32 = s.parse().unwrap();
    assert_eq!(back.to_bits(), bits, "{:e} ({:#010x}) rendered as {}", f, bits, s);

    let (m, e) = significant(f32_to_decimal(bits));
    if m >= 10 {
        for &candidate in &[m / 10, m / 10 + 1] {
            let shorter: f32 = format!("{}e{}", candidate, e + 1).parse().unwrap();
            assert_ne!(shorter.abs().to_bits(), f.abs().to_bits(), "{}e{} is shorter than {}", candidate, e + 1, s);
        }
    }
}

proptest! {
    #[test]
    fn f64_shortest_roundtrip(bits: u64) {
        check_f64(bits);
    }
}

proptest! {
    #[test]
    fn f32_shortest_roundtrip(bits: u32) {
        check_f32(bits);
    }
}

proptest! {
    /// Values with "small" exponents, which random bit patterns rarely hit.
    #[test]
    fn f64_moderate_roundtrip(mantissa in 0u64..(1 << 52), exponent in 1000u64..1100) {
        check_f64(exponent << 52 | mantissa);
    }
}

/// Powers of two and their neighbours, across the whole exponent range.
#[test]
fn exponent_boundaries() {
    for exponent in 0..2047u64 {
        for &mantissa in &[0, 1, 2, (1 << 51), (1 << 52) - 2, (1 << 52) - 1] {
            let bits = exponent << 52 | mantissa;
            check_f64(bits);
            check_f64(bits | 1 << 63);
        }
    }

    for exponent in 0..255u32 {
        for &mantissa in &[0, 1, 2, (1 << 22), (1 << 23) - 2, (1 << 23) - 1] {
            let bits = exponent << 23 | mantissa;
            check_f32(bits);
            check_f32(bits | 1 << 31);
        }
    }
}

#[test]
fn all_small_subnormals() {
    for bits in 1..10_000 {
        check_f64(bits);
        check_f32(bits as u32);
    }
}
