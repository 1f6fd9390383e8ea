//! Host floating-point capability check.
//!
//! The batch functions that take raw double buffers need to know which of
//! the two 32-bit words of a native `f64` holds the sign and exponent. The
//! check also rejects hosts whose `f64` is not IEEE 754 at all. It runs once
//! per process; the outcome, failure included, is cached.

use std::sync::OnceLock;

use log::{debug, error};

use crate::error::{Error, Result};

/// The high word of 1.0 in IEEE 754 double precision. The low word is zero.
const ONE_HIGH_WORD: u32 = 0x3ff0_0000;

/// Memory order of the two 32-bit words of a native `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordOrder {
    /// The word holding sign and exponent comes first (big-endian hosts).
    HighFirst,
    /// The word holding the low significand bits comes first (little-endian hosts).
    LowFirst,
}

/// Immutable description of the host's double precision layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability {
    word_order: WordOrder,
}

static CAPABILITY: OnceLock<Result<Capability>> = OnceLock::new();

/// Returns the host capability, probing it on first use.
///
/// Safe to call from any number of threads; the probe runs exactly once.
///
/// # Errors
///
/// [`Error::UnsupportedFloatFormat`] if the native `f64` is not IEEE 754. The
/// same error is returned on every later call.
pub fn capability() -> Result<Capability> {
    *CAPABILITY.get_or_init(Capability::probe)
}

impl Capability {
    /// A capability with a known word order, for buffers whose layout the
    /// caller already knows.
    pub const fn new(word_order: WordOrder) -> Self {
        Self { word_order }
    }

    pub const fn word_order(&self) -> WordOrder {
        self.word_order
    }

    pub const fn high_half_first(&self) -> bool {
        matches!(self.word_order, WordOrder::HighFirst)
    }

    fn probe() -> Result<Self> {
        let result = Self::from_one_bytes(1.0_f64.to_ne_bytes());
        match &result {
            Ok(capability) => debug!("native f64 is IEEE 754, word order {:?}", capability.word_order),
            Err(err) => error!("{}", err),
        }
        result
    }

    /// Classify the in-memory bytes of the double 1.0.
    fn from_one_bytes(bytes: [u8; 8]) -> Result<Self> {
        let first = read_word(&bytes[..4]);
        let second = read_word(&bytes[4..]);

        match (first, second) {
            (ONE_HIGH_WORD, 0) => Ok(Self::new(WordOrder::HighFirst)),
            (0, ONE_HIGH_WORD) => Ok(Self::new(WordOrder::LowFirst)),
            _ => Err(Error::UnsupportedFloatFormat { first, second }),
        }
    }

    /// Read the bits of one double from an 8-byte slot.
    pub(crate) fn read_double(&self, slot: &[u8]) -> u64 {
        let first = read_word(&slot[..4]) as u64;
        let second = read_word(&slot[4..8]) as u64;
        match self.word_order {
            WordOrder::HighFirst => (first << 32) | second,
            WordOrder::LowFirst => (second << 32) | first,
        }
    }

    /// Write the bits of one double into an 8-byte slot.
    pub(crate) fn write_double(&self, slot: &mut [u8], bits: u64) {
        let high = (bits >> 32) as u32;
        let low = bits as u32;
        let (first, second) = match self.word_order {
            WordOrder::HighFirst => (high, low),
            WordOrder::LowFirst => (low, high),
        };
        slot[..4].copy_from_slice(&first.to_ne_bytes());
        slot[4..8].copy_from_slice(&second.to_ne_bytes());
    }
}

fn read_word(bytes: &[u8]) -> u32 {
    let mut word = [0_u8; 4];
    word.copy_from_slice(&bytes[..4]);
    u32::from_ne_bytes(word)
}
