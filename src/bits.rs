//! Conversion between a byte and eight boolean flags.
//!
//! Index 0 maps to the most significant bit, index 7 to the least significant.

use crate::*;

/// Packs eight flags into a byte. `bits[0]` becomes bit 7.
///
/// # Example
/// ```rust
/// use schema_codec::bits::pack;
///
/// assert_eq!(pack([true, false, false, false, false, false, false, true]), 0b1000_0001);
/// ```
pub fn pack(bits: [bool; 8]) -> u8 {
    let mut byte = 0u8;
    for (i, &set) in bits.iter().enumerate() {
        if set {
            byte |= 1 << (7 - i);
        }
    }
    byte
}

/// Unpacks a byte into eight flags. Bit 7 becomes `bits[0]`.
pub fn unpack(byte: u8) -> [bool; 8] {
    let mut bits = [false; 8];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = byte & (1 << (7 - i)) != 0;
    }
    bits
}

/// Unpacks a wider integer, failing with `BitRange` unless it is in `0..=255`.
pub fn try_unpack(value: i64) -> Result<[bool; 8]> {
    u8::try_from(value)
        .map(unpack)
        .map_err(|_| CodecError::BitRange(value))
}

/// Eight flags stored as a single `u8` through [`pack`]/[`unpack`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags(pub [bool; 8]);

impl From<u8> for Flags {
    fn from(byte: u8) -> Self {
        Flags(unpack(byte))
    }
}

impl From<Flags> for u8 {
    fn from(flags: Flags) -> Self {
        pack(flags.0)
    }
}

impl Typed for Flags {
    fn schema() -> Schema {
        Schema::u8()
    }

    fn to_value(&self) -> Value {
        Value::U8(pack(self.0))
    }

    fn from_value(value: Value) -> Result<Self> {
        u8::from_value(value).map(Flags::from)
    }
}
