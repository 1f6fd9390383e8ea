//! Half precision conversion for f32 and f64.
//!
//! This crate converts between [IEEE 754] half precision (binary16: 1 sign
//! bit, 5 exponent bits biased by 15, 10 significand bits) and the native
//! `f32` and `f64` types, bit for bit. Half values are carried as raw `u16`
//! codes.
//!
//! It provides:
//! - [`ToHalf`] and [`FromHalf`] for single values
//! - [`encode_f32`], [`encode_f64`], [`decode_f32`], [`decode_f64`] for buffers
//! - [`encode_f64_bytes`] and [`decode_f64_bytes`] for doubles held in raw
//!   byte buffers
//! - [`HalfCodec`] to establish the host [`capability`] once up front
//!
//! [IEEE 754]: https://en.wikipedia.org/wiki/Half-precision_floating-point_format
//!
//! # Examples
//!
//! ```
//! use halfconv::{FromHalf, ToHalf};
//!
//! assert_eq!(1.0_f32.to_half_bits(), 0x3c00);
//! assert_eq!(f64::from_half_bits(0xc000), -2.0);
//!
//! let mut halves = [0_u16; 3];
//! halfconv::encode_f64(&mut halves, &[0.5, 65504.0, 1.0e6]).unwrap();
//! assert_eq!(halves, [0x3800, 0x7bff, 0x7c00]);
//! ```
//!
//! # Conversion rules
//!
//! Narrowing rounds to nearest using only the first discarded bit, so ties
//! round away from zero. Magnitudes of 65520 and above become ±infinity.
//! Subnormal `f32`/`f64` inputs become ±0. For `f64` only the top 20
//! significand bits take part in rounding.
//!
//! Widening is exact.
//!
//! Every NaN, whatever its sign and payload, narrows to `0xfe00` and widens to
//! the negative quiet NaN of the target type. Signed zero is always kept.
//!
//! # Errors
//!
//! The buffer functions check once per process that the native `f64` is
//! IEEE 754 and report [`Error::UnsupportedFloatFormat`] otherwise. Per-value
//! conversions never fail.

mod batch;
mod convert;
mod error;
mod layout;
mod platform;

pub use batch::{
    decode_f32, decode_f64, decode_f64_bytes, encode_f32, encode_f64, encode_f64_bytes, HalfCodec,
};
pub use error::{Error, Result};
pub use platform::{capability, Capability, WordOrder};

/// Trait for narrowing floating-point numbers to half precision codes.
///
/// # Examples
///
/// ```
/// use halfconv::ToHalf;
///
/// assert_eq!(1.0_f32.to_half_bits(), 0x3c00);
/// assert_eq!((-0.0_f64).to_half_bits(), 0x8000);
/// assert_eq!(f64::INFINITY.to_half_bits(), 0x7c00);
/// assert_eq!(f32::NAN.to_half_bits(), 0xfe00);
/// ```
pub trait ToHalf {
    /// Converts the value to the nearest half precision bit pattern.
    #[must_use]
    fn to_half_bits(self) -> u16;
}

/// Trait for widening half precision codes to floating-point numbers.
///
/// # Examples
///
/// ```
/// use halfconv::FromHalf;
///
/// assert_eq!(f32::from_half_bits(0x3c00), 1.0);
/// assert_eq!(f64::from_half_bits(0x7bff), 65504.0);
/// assert_eq!(f32::from_half_bits(0xfc00), f32::NEG_INFINITY);
/// assert!(f64::from_half_bits(0x7e00).is_nan());
/// ```
pub trait FromHalf: Sized {
    /// Converts a half precision bit pattern to this type. Always exact.
    #[must_use]
    fn from_half_bits(bits: u16) -> Self;
}

impl ToHalf for f32 {
    fn to_half_bits(self) -> u16 {
        convert::f32_to_half(self)
    }
}

impl ToHalf for f64 {
    fn to_half_bits(self) -> u16 {
        convert::f64_to_half(self)
    }
}

impl FromHalf for f32 {
    fn from_half_bits(bits: u16) -> Self {
        convert::half_to_f32(bits)
    }
}

impl FromHalf for f64 {
    fn from_half_bits(bits: u16) -> Self {
        convert::half_to_f64(bits)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL_NAN: u16 = 0xfe00;

    fn is_half_nan(bits: u16) -> bool {
        bits & 0x7c00 == 0x7c00 && bits & 0x03ff != 0
    }

    fn all_halves() -> Vec<u16> {
        (0..=u16::MAX).collect()
    }

    // =========================================================================
    // Exhaustive round trips
    // =========================================================================

    #[test]
    fn test_exhaustive_roundtrip_via_f32() {
        let halves = all_halves();
        let mut singles = vec![0.0_f32; halves.len()];
        decode_f32(&mut singles, &halves).unwrap();
        let mut back = vec![0_u16; halves.len()];
        encode_f32(&mut back, &singles).unwrap();

        let mut nan_count = 0;
        for (&original, &result) in halves.iter().zip(&back) {
            if is_half_nan(original) {
                nan_count += 1;
                assert_eq!(result, CANONICAL_NAN, "{:#06x}", original);
            } else {
                assert_eq!(result, original, "{:#06x} -> {:e} -> {:#06x}", original, f32::from_half_bits(original), result);
            }
        }
        assert_eq!(nan_count, 2046);
    }

    #[test]
    fn test_exhaustive_roundtrip_via_f64() {
        let halves = all_halves();
        let mut doubles = vec![0.0_f64; halves.len()];
        decode_f64(&mut doubles, &halves).unwrap();
        let mut back = vec![0_u16; halves.len()];
        encode_f64(&mut back, &doubles).unwrap();

        for (&original, &result) in halves.iter().zip(&back) {
            let expected = if is_half_nan(original) { CANONICAL_NAN } else { original };
            assert_eq!(result, expected, "{:#06x}", original);
        }
    }

    #[test]
    fn test_exhaustive_f32_and_f64_agree() {
        for half in 0..=u16::MAX {
            let single = f32::from_half_bits(half);
            let double = f64::from_half_bits(half);
            if is_half_nan(half) {
                assert_eq!(single.to_bits(), 0xffc0_0000);
                assert_eq!(double.to_bits(), 0xfff8_0000_0000_0000);
            } else {
                assert_eq!((single as f64).to_bits(), double.to_bits(), "{:#06x}", half);
            }
        }
    }

    #[test]
    fn test_exhaustive_widening_value() {
        // Value of every finite half computed arithmetically
        for half in 0..=u16::MAX {
            let exponent = ((half >> 10) & 0x1f) as i32;
            let significand = (half & 0x3ff) as f64;
            if exponent == 0x1f {
                continue;
            }
            let magnitude = if exponent == 0 {
                significand * 2f64.powi(-24)
            } else {
                (1.0 + significand / 1024.0) * 2f64.powi(exponent - 15)
            };
            let expected = if half & 0x8000 != 0 { -magnitude } else { magnitude };
            assert_eq!(f64::from_half_bits(half), expected, "{:#06x}", half);
        }
    }

    #[test]
    fn test_monotonic_positive_halves() {
        let mut previous = f32::from_half_bits(0);
        for half in 1..0x7c00_u16 {
            let value = f32::from_half_bits(half);
            assert!(value > previous, "{:#06x}", half);
            previous = value;
        }
    }

    // =========================================================================
    // Edge cases
    // =========================================================================

    #[test]
    fn test_signed_zero_every_direction() {
        assert_eq!(0.0_f32.to_half_bits(), 0x0000);
        assert_eq!((-0.0_f32).to_half_bits(), 0x8000);
        assert_eq!(0.0_f64.to_half_bits(), 0x0000);
        assert_eq!((-0.0_f64).to_half_bits(), 0x8000);

        assert_eq!(f32::from_half_bits(0x0000).to_bits(), 0.0_f32.to_bits());
        assert_eq!(f32::from_half_bits(0x8000).to_bits(), (-0.0_f32).to_bits());
        assert_eq!(f64::from_half_bits(0x0000).to_bits(), 0.0_f64.to_bits());
        assert_eq!(f64::from_half_bits(0x8000).to_bits(), (-0.0_f64).to_bits());
    }

    #[test]
    fn test_smallest_subnormal_boundary() {
        let below = 2f32.powi(-25);
        let too_small = 2f32.powi(-26);
        assert_eq!(below.to_half_bits(), 0x0001);
        assert_eq!((-below).to_half_bits(), 0x8001);
        assert_eq!(too_small.to_half_bits(), 0x0000);
        assert_eq!((-too_small).to_half_bits(), 0x8000);

        assert_eq!((below as f64).to_half_bits(), 0x0001);
        assert_eq!((-(too_small as f64)).to_half_bits(), 0x8000);
    }

    #[test]
    fn test_overflow_saturates() {
        let mut halves = [0_u16; 6];
        encode_f32(&mut halves, &[65520.0, -65520.0, 70000.0, -1.0e30, f32::MAX, f32::MIN]).unwrap();
        assert_eq!(halves, [0x7c00, 0xfc00, 0x7c00, 0xfc00, 0x7c00, 0xfc00]);

        encode_f64(&mut halves, &[65520.0, -65520.0, 70000.0, -1.0e30, f64::MAX, f64::MIN]).unwrap();
        assert_eq!(halves, [0x7c00, 0xfc00, 0x7c00, 0xfc00, 0x7c00, 0xfc00]);

        // Largest value that still rounds to a finite half
        let below = f32::from_bits(65520.0_f32.to_bits() - 1);
        assert_eq!(below.to_half_bits(), 0x7bff);
    }

    #[test]
    fn test_nan_payload_not_preserved() {
        let singles = [
            f32::NAN,
            -f32::NAN,
            f32::from_bits(0x7f80_0001),
            f32::from_bits(0xffbf_ffff),
            f32::from_bits(0x7fc1_2345),
        ];
        let mut halves = [0_u16; 5];
        encode_f32(&mut halves, &singles).unwrap();
        assert_eq!(halves, [CANONICAL_NAN; 5]);

        let doubles = [
            f64::NAN,
            -f64::NAN,
            f64::from_bits(0x7ff0_0000_0000_0001),
            f64::from_bits(0xfff7_ffff_ffff_ffff),
            f64::from_bits(0x7ff8_dead_beef_0000),
        ];
        encode_f64(&mut halves, &doubles).unwrap();
        assert_eq!(halves, [CANONICAL_NAN; 5]);
    }

    #[test]
    fn test_scalar_and_batch_agree() {
        let values = [0.1_f32, -123.456, 1.0e-5, 4096.5, 3.0e-7];
        let mut halves = [0_u16; 5];
        encode_f32(&mut halves, &values).unwrap();
        for (value, half) in values.iter().zip(&halves) {
            assert_eq!(value.to_half_bits(), *half);
        }
    }

    #[test]
    fn test_codec_matches_free_functions() {
        let codec = HalfCodec::new().unwrap();
        assert_eq!(Ok(codec.capability()), capability());

        let values = [1.5_f64, -7.25, 1.0e-6];
        let mut a = [0_u16; 3];
        let mut b = [0_u16; 3];
        codec.encode_f64(&mut a, &values);
        encode_f64(&mut b, &values).unwrap();
        assert_eq!(a, b);
    }
}
