#![no_main]

use libfuzzer_sys::fuzz_target;

use halfconv::{FromHalf, ToHalf};

fn is_half_nan(bits: u16) -> bool {
    bits & 0x7c00 == 0x7c00 && bits & 0x03ff != 0
}

fuzz_target!(|data: (f64, f32, u16)| {
    let (f64_val, f32_val, half) = data;

    // Narrowing then widening keeps NaN-ness and, otherwise, the sign
    let widened = f64::from_half_bits(f64_val.to_half_bits());
    assert_eq!(f64_val.is_nan(), widened.is_nan(), "f64 {:e} -> {:e}", f64_val, widened);
    if !f64_val.is_nan() {
        assert_eq!(f64_val.is_sign_negative(), widened.is_sign_negative());
    }

    let widened = f32::from_half_bits(f32_val.to_half_bits());
    assert_eq!(f32_val.is_nan(), widened.is_nan(), "f32 {:e} -> {:e}", f32_val, widened);

    // Both encoders agree on values a single holds exactly
    assert_eq!((f32_val as f64).to_half_bits(), f32_val.to_half_bits());

    // Widening then narrowing is the identity, NaN codes aside
    let expected = if is_half_nan(half) { 0xfe00 } else { half };
    assert_eq!(f32::from_half_bits(half).to_half_bits(), expected, "{:#06x}", half);
    assert_eq!(f64::from_half_bits(half).to_half_bits(), expected, "{:#06x}", half);
});
