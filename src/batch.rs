//! Buffer conversions.
//!
//! Every function converts element by element, in order, over the common
//! prefix of its source and destination. An empty buffer on either side means
//! there is nothing to convert and the call succeeds without writing.

use log::trace;

use crate::convert::{f32_to_half, f64_to_half, half_to_f32, half_to_f64, narrow, widen};
use crate::error::Result;
use crate::layout::DOUBLE;
use crate::platform::{capability, Capability};

const DOUBLE_BYTES: usize = 8;

/// Converter bound to an established [`Capability`].
///
/// Constructing one runs (or reuses) the capability check up front, so its
/// methods cannot fail. Use it when the check should happen at setup rather
/// than on the first conversion.
///
/// # Examples
///
/// ```
/// use halfconv::HalfCodec;
///
/// let codec = HalfCodec::new().unwrap();
/// let mut halves = [0_u16; 3];
/// codec.encode_f32(&mut halves, &[1.0, -2.0, 65504.0]);
/// assert_eq!(halves, [0x3c00, 0xc000, 0x7bff]);
///
/// let mut singles = [0.0_f32; 3];
/// codec.decode_f32(&mut singles, &halves);
/// assert_eq!(singles, [1.0, -2.0, 65504.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfCodec {
    capability: Capability,
}

impl HalfCodec {
    /// Creates a codec for the host.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFloatFormat`](crate::Error::UnsupportedFloatFormat)
    /// if the native `f64` is not IEEE 754.
    pub fn new() -> Result<Self> {
        Ok(Self::with_capability(capability()?))
    }

    /// Creates a codec for raw double buffers laid out as `capability`
    /// describes, which need not match the host.
    pub const fn with_capability(capability: Capability) -> Self {
        Self { capability }
    }

    pub const fn capability(&self) -> Capability {
        self.capability
    }

    /// Narrows singles to half precision codes.
    pub fn encode_f32(&self, dst: &mut [u16], src: &[f32]) {
        note_length_mismatch("encode_f32", dst.len(), src.len());
        for (out, &value) in dst.iter_mut().zip(src) {
            *out = f32_to_half(value);
        }
    }

    /// Narrows doubles to half precision codes.
    pub fn encode_f64(&self, dst: &mut [u16], src: &[f64]) {
        note_length_mismatch("encode_f64", dst.len(), src.len());
        for (out, &value) in dst.iter_mut().zip(src) {
            *out = f64_to_half(value);
        }
    }

    /// Widens half precision codes to singles.
    pub fn decode_f32(&self, dst: &mut [f32], src: &[u16]) {
        note_length_mismatch("decode_f32", dst.len(), src.len());
        for (out, &half) in dst.iter_mut().zip(src) {
            *out = half_to_f32(half);
        }
    }

    /// Widens half precision codes to doubles.
    pub fn decode_f64(&self, dst: &mut [f64], src: &[u16]) {
        note_length_mismatch("decode_f64", dst.len(), src.len());
        for (out, &half) in dst.iter_mut().zip(src) {
            *out = half_to_f64(half);
        }
    }

    /// Narrows doubles stored as raw bytes, 8 per element.
    ///
    /// The two 32-bit words of each element are taken in this codec's word
    /// order. A trailing partial element is ignored.
    pub fn encode_f64_bytes(&self, dst: &mut [u16], src: &[u8]) {
        let slots = src.chunks_exact(DOUBLE_BYTES);
        note_length_mismatch("encode_f64_bytes", dst.len(), slots.len());
        for (out, slot) in dst.iter_mut().zip(slots) {
            *out = narrow(DOUBLE, self.capability.read_double(slot));
        }
    }

    /// Widens half precision codes into raw double bytes, 8 per element.
    ///
    /// The two 32-bit words of each element are written in this codec's word
    /// order; the low word is always zero. A trailing partial slot is left
    /// untouched.
    pub fn decode_f64_bytes(&self, dst: &mut [u8], src: &[u16]) {
        let slots = dst.chunks_exact_mut(DOUBLE_BYTES);
        note_length_mismatch("decode_f64_bytes", slots.len(), src.len());
        for (slot, &half) in slots.zip(src) {
            self.capability.write_double(slot, widen(DOUBLE, half));
        }
    }
}

fn note_length_mismatch(op: &str, dst: usize, src: usize) {
    if dst != src && dst != 0 && src != 0 {
        trace!("{}: destination holds {} elements, source {}; converting {}", op, dst, src, dst.min(src));
    }
}

/// Narrows `src` singles into `dst` half precision codes.
///
/// # Errors
///
/// [`Error::UnsupportedFloatFormat`](crate::Error::UnsupportedFloatFormat)
/// if the host `f64` is not IEEE 754. Nothing is written in that case.
pub fn encode_f32(dst: &mut [u16], src: &[f32]) -> Result<()> {
    HalfCodec::new()?.encode_f32(dst, src);
    Ok(())
}

/// Narrows `src` doubles into `dst` half precision codes.
///
/// # Errors
///
/// See [`encode_f32`].
pub fn encode_f64(dst: &mut [u16], src: &[f64]) -> Result<()> {
    HalfCodec::new()?.encode_f64(dst, src);
    Ok(())
}

/// Widens `src` half precision codes into `dst` singles.
///
/// # Errors
///
/// See [`encode_f32`].
pub fn decode_f32(dst: &mut [f32], src: &[u16]) -> Result<()> {
    HalfCodec::new()?.decode_f32(dst, src);
    Ok(())
}

/// Widens `src` half precision codes into `dst` doubles.
///
/// # Errors
///
/// See [`encode_f32`].
pub fn decode_f64(dst: &mut [f64], src: &[u16]) -> Result<()> {
    HalfCodec::new()?.decode_f64(dst, src);
    Ok(())
}

/// Narrows native-memory doubles held in `src` bytes into `dst`.
///
/// # Errors
///
/// See [`encode_f32`].
pub fn encode_f64_bytes(dst: &mut [u16], src: &[u8]) -> Result<()> {
    HalfCodec::new()?.encode_f64_bytes(dst, src);
    Ok(())
}

/// Widens `src` into native-memory doubles held in `dst` bytes.
///
/// # Errors
///
/// See [`encode_f32`].
pub fn decode_f64_bytes(dst: &mut [u8], src: &[u16]) -> Result<()> {
    HalfCodec::new()?.decode_f64_bytes(dst, src);
    Ok(())
}
