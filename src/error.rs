/// Errors reported by the batch conversion functions.
///
/// Conversions themselves never fail: every bit pattern of every format maps
/// to a defined result. The only failure is a host whose native `f64` is not
/// laid out as IEEE 754, which is detected once and then reported by every
/// call.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("native floating-point format is not IEEE 754 (bit pattern of 1.0 is {first:#010x}:{second:#010x})")]
    UnsupportedFloatFormat { first: u32, second: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
