//! Scalar narrowing and widening between half precision and the wider formats.
//!
//! Both directions are written once against [`FloatLayout`] and specialised
//! by the thin adapters at the bottom of the file. Wide values travel as raw
//! bits in a `u64` so the same code serves `f32` and `f64`.

use crate::layout::{FloatLayout, DOUBLE, HALF, SINGLE};

/// Narrow the bits of a `src`-format value to a half precision code.
///
/// Rounds to nearest by looking only at the first dropped bit, so ties round
/// away from zero. Source subnormals flush to signed zero and every NaN
/// collapses to [`HALF`]'s canonical NaN.
pub(crate) fn narrow(src: FloatLayout, bits: u64) -> u16 {
    let sign = src.sign(bits) >> (src.sign_shift - HALF.sign_shift);

    if bits & src.magnitude_mask() == 0 {
        return sign as u16;
    }

    let exponent = src.biased_exp(bits);
    let significand = src.significand(bits);

    if exponent == 0 {
        // Wide subnormals are far below the smallest half subnormal
        return sign as u16;
    }

    if exponent == src.max_biased_exp {
        return if significand == 0 {
            (sign | HALF.exp_field_max()) as u16
        } else {
            HALF.canonical_nan() as u16
        };
    }

    let half_exp = exponent - src.exp_bias + HALF.exp_bias;
    let dropped = src.sig_bits - HALF.sig_bits;

    if half_exp >= HALF.max_biased_exp {
        return (sign | HALF.exp_field_max()) as u16;
    }

    if half_exp <= 0 {
        // Half subnormal: shift the full significand (hidden bit restored) so
        // that the exponent field ends up zero.
        let shift = (dropped as i32 + 1 - half_exp) as u32;
        let significand = if shift > src.sig_bits + 1 {
            // Shifted off entirely, round bit included
            0
        } else {
            let full = significand | src.hidden_bit();
            // A carry out of the top lands in the exponent field, which is
            // exactly the smallest normal.
            (full >> shift) + ((full >> (shift - 1)) & 1)
        };
        return (sign | significand) as u16;
    }

    let packed = sign | ((half_exp as u64) << HALF.sig_bits) | (significand >> dropped);
    let round = (significand >> (dropped - 1)) & 1;
    // Carries run through the exponent, up to and including infinity
    (packed + round) as u16
}

/// Widen a half precision code to the bits of a `dst`-format value.
///
/// Exact for every finite code; half subnormals become normal in `dst`.
/// Every NaN becomes `dst`'s canonical NaN.
pub(crate) fn widen(dst: FloatLayout, half: u16) -> u64 {
    let bits = half as u64;
    let sign = HALF.sign(bits) << (dst.sign_shift - HALF.sign_shift);

    if bits & HALF.magnitude_mask() == 0 {
        return sign;
    }

    let exponent = HALF.biased_exp(bits);
    let mut significand = HALF.significand(bits);
    let lift = dst.sig_bits - HALF.sig_bits;

    if exponent == 0 {
        // Normalise: bring the leading one up to the hidden bit position.
        // `steps` counts the shifts beyond the first.
        let steps = significand.leading_zeros() - (u64::BITS - HALF.sig_bits);
        significand = (significand << (steps + 1)) & HALF.sig_mask;
        let exponent = dst.exp_bias - HALF.exp_bias - steps as i32;
        return sign | ((exponent as u64) << dst.sig_bits) | (significand << lift);
    }

    if exponent == HALF.max_biased_exp {
        return if significand == 0 {
            sign | dst.exp_field_max()
        } else {
            dst.canonical_nan()
        };
    }

    let exponent = exponent - HALF.exp_bias + dst.exp_bias;
    sign | ((exponent as u64) << dst.sig_bits) | (significand << lift)
}

pub(crate) fn f32_to_half(value: f32) -> u16 {
    narrow(SINGLE, value.to_bits() as u64)
}

pub(crate) fn f64_to_half(value: f64) -> u16 {
    narrow(DOUBLE, value.to_bits())
}

pub(crate) fn half_to_f32(half: u16) -> f32 {
    f32::from_bits(widen(SINGLE, half) as u32)
}

pub(crate) fn half_to_f64(half: u16) -> f64 {
    f64::from_bits(widen(DOUBLE, half))
}
