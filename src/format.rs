//! Formatting options and the one-call entry points.

use std::fmt;
use std::str;

use decimal::FloatDecimal;
use render::{self, BUFFER_LEN};
use round;
use ryu;

/// Which sign character to put in front of non-negative values.
///
/// Negative values (including `-0` and `-inf`) always get a `-`. The policy
/// only affects finite values, so `inf` and `nan` never get a `+` or a space.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sign {
    /// No sign for non-negative values.
    Auto,
    /// `+` for non-negative values.
    Always,
    /// A space for non-negative values.
    Space,
}

impl Default for Sign {
    fn default() -> Self {
        Sign::Auto
    }
}

/// Letter case of `inf` and `nan`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Case {
    Lower,
    Upper,
}

impl Default for Case {
    fn default() -> Self {
        Case::Lower
    }
}

/// Options controlling how a value is rendered.
///
/// The default renders the shortest round-trip representation with no sign
/// for positive values and lowercase specials.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FormatSpec {
    /// Number of fractional digits. `None` selects the shortest
    /// representation that round-trips.
    pub precision: Option<u8>,
    pub sign: Sign,
    pub case: Case,
}

impl FormatSpec {
    pub fn with_precision(self, precision: u8) -> Self {
        Self { precision: Some(precision), ..self }
    }

    pub fn with_sign(self, sign: Sign) -> Self {
        Self { sign, ..self }
    }

    pub fn with_case(self, case: Case) -> Self {
        Self { case, ..self }
    }
}

/// Binary floating-point types that can be converted to a shortest decimal.
pub trait Float: Copy {
    /// Returns the shortest decimal that parses back to `self`.
    fn to_decimal(self) -> FloatDecimal;
}

macro_rules! impl_float {
    ($t:ty, $convert:path) => {
        impl Float for $t {
            fn to_decimal(self) -> FloatDecimal {
                $convert(self.to_bits())
            }
        }
    };
}

impl_float!(f32, ryu::f32_to_decimal);
impl_float!(f64, ryu::f64_to_decimal);

/// Converts `value` and renders it into `buf` according to `spec`.
///
/// Returns the number of bytes written. The output is ASCII.
pub fn format_to<F: Float>(buf: &mut [u8; BUFFER_LEN], value: F, spec: &FormatSpec) -> usize {
    let mut decimal = value.to_decimal();
    if let Some(precision) = spec.precision {
        decimal = round::round_to_precision(decimal, precision);
    }
    render::write_decimal(buf, decimal, spec)
}

/// A stack buffer large enough for any formatted `f32` or `f64`.
///
/// ```
/// use fltfmt::{Buffer, Case, FormatSpec};
///
/// let mut buf = Buffer::new();
/// assert_eq!(buf.format(2.675f64, &FormatSpec::default().with_precision(2)), "2.68");
/// assert_eq!(buf.format(-1.0f64 / 0.0, &FormatSpec::default().with_case(Case::Upper)), "-INF");
/// ```
pub struct Buffer {
    bytes: [u8; BUFFER_LEN],
}

impl Buffer {
    pub fn new() -> Self {
        Buffer { bytes: [0; BUFFER_LEN] }
    }

    /// Formats `value` into this buffer and returns the text.
    ///
    /// The result borrows from the buffer and is overwritten by the next
    /// call.
    pub fn format<F: Float>(&mut self, value: F, spec: &FormatSpec) -> &str {
        let len = format_to(&mut self.bytes, value, spec);
        match str::from_utf8(&self.bytes[..len]) {
            Ok(s) => s,
            Err(e) => unreachable!("rendered non-ASCII output: {}", e),
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Buffer").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{f32, f64};

    #[test]
    fn builders() {
        let spec = FormatSpec::default()
            .with_precision(3)
            .with_sign(Sign::Space)
            .with_case(Case::Upper);
        assert_eq!(spec, FormatSpec { precision: Some(3), sign: Sign::Space, case: Case::Upper });
        assert_eq!(FormatSpec::default().precision, None);
    }

    #[test]
    fn pipeline() {
        let mut buf = Buffer::new();
        let shortest = FormatSpec::default();

        assert_eq!(buf.format(0.0f64, &shortest), "0");
        assert_eq!(buf.format(-0.0f64, &shortest), "-0");
        assert_eq!(buf.format(1.0f64, &shortest), "1");
        assert_eq!(buf.format(0.1f64, &shortest), "0.1");
        assert_eq!(buf.format(100.0f64, &shortest), "100");
        assert_eq!(buf.format(0.1f32, &shortest), "0.1");
        assert_eq!(buf.format(f32::MAX, &shortest), format!("34028235{}", "0".repeat(31)));
        assert_eq!(buf.format(f64::NAN, &shortest), "nan");
        assert_eq!(buf.format(f32::NEG_INFINITY, &shortest), "-inf");
        assert_eq!(buf.format(f64::INFINITY, &shortest.with_sign(Sign::Always)), "inf");

        assert_eq!(buf.format(9.99995f64, &FormatSpec::default().with_precision(1)), "10.0");
        assert_eq!(buf.format(0.5f64, &FormatSpec::default().with_precision(0)), "1");
        assert_eq!(buf.format(0.0004f64, &FormatSpec::default().with_precision(2)), "0.00");
        assert_eq!(buf.format(-0.0004f64, &FormatSpec::default().with_precision(2)), "-0.00");
        assert_eq!(buf.format(1.0f64, &FormatSpec::default().with_precision(3)), "1.000");
    }

    #[test]
    fn format_to_reports_length() {
        let mut bytes = [0; BUFFER_LEN];
        let len = format_to(&mut bytes, -2.5f32, &FormatSpec::default());
        assert_eq!(&bytes[..len], b"-2.5");

        let spec = FormatSpec::default().with_precision(255);
        let len = format_to(&mut bytes, -f64::MAX, &spec);
        assert_eq!(len, BUFFER_LEN);
    }
}
