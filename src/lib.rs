//! Float to decimal conversion based on the Ryu algorithm.
//!
//! This crate turns the bit pattern of an `f32` or `f64` into the shortest
//! decimal that parses back to the very same bits, and renders it in fixed
//! notation (no exponent). Optionally, the shortest decimal can be re-rounded
//! to a fixed number of fractional digits, like `printf("%.3f")` does.
//!
//! Everything works on stack buffers and never allocates. The power-of-five
//! tables are `static` data and can be shared freely between threads.
//!
//! ```
//! use fltfmt::{Buffer, FormatSpec, Sign};
//!
//! let mut buf = Buffer::new();
//! assert_eq!(buf.format(0.1f64, &FormatSpec::default()), "0.1");
//! assert_eq!(buf.format(0.1f32, &FormatSpec::default()), "0.1");
//! assert_eq!(buf.format(9.99995f64, &FormatSpec::default().with_precision(1)), "10.0");
//! assert_eq!(buf.format(1.0f64, &FormatSpec::default().with_sign(Sign::Always)), "+1");
//! ```
//!
//! # Cargo features
//!
//! * `small-table`: use the compressed power-of-five tables by default. They
//!   are about 10 times smaller, at the cost of a 128-bit multiplication per
//!   table lookup.
//! * `emulated-u128`: compute the high half of 64x64-bit products from four
//!   32-bit partial products instead of native `u128` arithmetic.
//!
//! Both choices produce bit-identical results.

#![doc(html_root_url = "https://docs.rs/fltfmt/0.1.0")]
#![warn(missing_debug_implementations)]

#[macro_use] extern crate log;
extern crate ieee754;

pub mod classify;
pub mod decimal;
mod format;
pub mod mul;
pub mod render;
pub mod round;
pub mod ryu;
pub mod table;

pub use decimal::FloatDecimal;
pub use format::*;
pub use render::BUFFER_LEN;
pub use table::{Pow5Table, FullTable, SmallTable, DefaultTable};
