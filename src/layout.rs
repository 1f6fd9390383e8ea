//! Bit layouts of the three IEEE 754 binary formats handled by this crate.

/// IEEE 754 binary format parameters for bit manipulation.
///
/// Captures where the sign, exponent and significand live inside a format's
/// bit pattern. Built by a `const fn` so [`HALF`], [`SINGLE`] and [`DOUBLE`]
/// are compile-time constants and the conversion routines can be written once
/// against any pair of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FloatLayout {
    /// Bits in the significand (10, 23 or 52)
    pub sig_bits: u32,
    /// Bit position of the sign bit (bits - 1)
    pub sign_shift: u32,
    /// Mask to extract significand bits
    pub sig_mask: u64,
    /// Mask to extract the exponent field once shifted down
    pub exp_mask: u64,
    /// Exponent field value of infinities and NaNs
    pub max_biased_exp: i32,
    /// Exponent bias for the format
    pub exp_bias: i32,
    /// Bit pattern for quiet NaN (top significand bit)
    pub quiet_nan_tag: u64,
}

impl FloatLayout {
    const fn new(bits: u32, sig_bits: u32) -> Self {
        let exp_bits = bits - sig_bits - 1;
        let exp_mask = (1_u64 << exp_bits) - 1;

        Self {
            sig_bits,
            sign_shift: bits - 1,
            sig_mask: (1_u64 << sig_bits) - 1,
            exp_mask,
            max_biased_exp: exp_mask as i32,
            exp_bias: (1 << (exp_bits - 1)) - 1,
            quiet_nan_tag: 1 << (sig_bits - 1),
        }
    }

    /// Sign bit in place.
    pub const fn sign_bit(&self) -> u64 {
        1 << self.sign_shift
    }

    /// The hidden leading significand bit, just above the stored field.
    pub const fn hidden_bit(&self) -> u64 {
        1 << self.sig_bits
    }

    /// Exponent field with every bit set, in place.
    pub const fn exp_field_max(&self) -> u64 {
        self.exp_mask << self.sig_bits
    }

    /// Every bit except the sign.
    pub const fn magnitude_mask(&self) -> u64 {
        self.sign_bit() - 1
    }

    /// The NaN every conversion into this format produces: sign set, exponent
    /// all ones, only the quiet bit of the significand set.
    pub const fn canonical_nan(&self) -> u64 {
        self.sign_bit() | self.exp_field_max() | self.quiet_nan_tag
    }

    pub const fn biased_exp(&self, bits: u64) -> i32 {
        ((bits >> self.sig_bits) & self.exp_mask) as i32
    }

    pub const fn significand(&self, bits: u64) -> u64 {
        bits & self.sig_mask
    }

    pub const fn sign(&self, bits: u64) -> u64 {
        bits & self.sign_bit()
    }
}

pub(crate) const HALF: FloatLayout = FloatLayout::new(16, 10);
pub(crate) const SINGLE: FloatLayout = FloatLayout::new(32, 23);
pub(crate) const DOUBLE: FloatLayout = FloatLayout::new(64, 52);
