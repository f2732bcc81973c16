//! # schema-codec
//!
//! A compositional binary serialization library driven entirely by schemas.
//!
//! - Primitive codecs for fixed-width integers and floats, always little-endian
//! - Structural codecs (tuple, list, union, string, buffer) that nest to any depth
//! - `size`, `encode` and `decode` stay consistent for every schema tree
//! - A `Typed` mapping (and derive macro) between Rust types and schemas
//! - Feature-gated support for optional dependencies
//!
//! ## Wire format
//!
//! | Schema            | Layout                                   |
//! |-------------------|------------------------------------------|
//! | integer / float   | raw N-byte little-endian representation  |
//! | tuple             | child encodings back-to-back, no framing |
//! | list              | `[u32 count][element]...`                |
//! | string (dynamic)  | `[u32 byte_len][UTF-8 bytes]`            |
//! | string (fixed N)  | `[N UTF-8 bytes]`                        |
//! | buffer            | `[u32 byte_len][raw bytes]`              |
//! | union             | `[u8 tag][chosen alternative]`           |
//!
//! No type tags are written apart from the union discriminant: the schema is the
//! only source of truth about the layout.
//!
//! ## Example
//!
//! ```rust
//! use schema_codec::{decode, encode, Schema, Value};
//!
//! let schema = Schema::tuple(vec![
//!     Schema::u8(),
//!     Schema::list(Schema::u16()),
//!     Schema::string(),
//! ]);
//! let value = Value::Tuple(vec![
//!     Value::U8(7),
//!     Value::List(vec![Value::U16(1), Value::U16(2)]),
//!     Value::from("hi"),
//! ]);
//!
//! let buf = encode(&schema, &value).unwrap();
//! assert_eq!(buf.len(), 1 + (4 + 2 * 2) + (4 + 2));
//! assert_eq!(decode(&schema, &buf).unwrap(), value);
//! ```
//!
//! ## Feature Flags
//!
//! - `derive` (default): Re-exports `#[derive(Typed)]`.
//! - `chrono`: `DateTime<Utc>`, `NaiveDate` and `NaiveTime`.
//! - `uuid`: `uuid::Uuid`.
//! - `ulid`: `ulid::Ulid`.
//! - `rust_decimal`: `rust_decimal::Decimal`.
//! - `bigdecimal`: `bigdecimal::BigDecimal`.
//! - `indexmap`: `IndexMap` and `IndexSet`.
//! - `ahash`: `ahash::AHashMap`.
//! - `smol_str`: `smol_str::SmolStr`.
//! - `serde_json`: `serde_json::Value` (stored as JSON text).
//! - `tracing`: Emits `tracing` events from the top-level entry points.

pub mod bits;
pub mod core;
mod features;
mod typed;

pub use crate::core::{Blob, List, Primitive, Schema, Text, Tuple, Union, Value};
pub use crate::typed::{next_element, tuple_elements, union_parts, unexpected, Typed};
use bytes::{Bytes, BytesMut};
#[cfg(feature = "derive")]
pub use schema_codec_derive::Typed;

macro_rules! trace_op {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

/// Passes `result` through, reporting failures when `tracing` is enabled.
#[inline]
fn observe<T>(result: Result<T>, _op: &'static str) -> Result<T> {
    #[cfg(feature = "tracing")]
    {
        if let Err(err) = &result {
            tracing::debug!(error = %err, op = _op, "codec operation failed");
        }
    }
    result
}

/// Errors that can occur during sizing, encoding or decoding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// A fixed-length string was given a value with a different UTF-8 byte length.
    #[error("Fixed string length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// A union tag does not name one of the alternatives.
    #[error("Unknown union tag {tag} (union has {alternatives} alternatives)")]
    UnknownTag { tag: u8, alternatives: usize },
    /// Bit unpacking was given something that is not a byte.
    #[error("Input must be a uint8 number (0-255), got {0}")]
    BitRange(i64),
    /// A read or write would run past the end of the buffer.
    #[error("Out of bounds: {len} bytes at offset {offset} exceeds buffer of {buffer_len} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },
    /// The value does not have the shape the schema expects.
    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A tuple value has a different number of elements than the tuple schema.
    #[error("Tuple arity mismatch: expected {expected} elements, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    /// A length does not fit the 4-byte length prefix.
    #[error("Length {0} does not fit in a u32 prefix")]
    LengthOverflow(usize),
    /// A union has more alternatives than a one-byte tag can address.
    #[error("Union has {0} alternatives, at most 256 are addressable")]
    TooManyAlternatives(usize),
    /// A string payload is not valid UTF-8.
    #[error("Invalid UTF-8 in string payload")]
    InvalidUtf8,
    /// A decoded value could not be mapped onto a Rust type.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// The capability every schema node provides.
///
/// All state needed by an operation lives in its arguments; implementors are
/// immutable and can be shared freely across threads.
pub trait Codec {
    /// Exact number of bytes `value` occupies when encoded with this schema.
    fn size(&self, value: &Value) -> Result<usize>;

    /// Writes `value` into `buf` starting at `offset`, returning the number of
    /// bytes written (always `self.size(value)`).
    ///
    /// A node validates its value before writing any of its own bytes. Callers
    /// that need the whole tree validated up front call `size` first, which
    /// performs every check `encode` does apart from bounds.
    fn encode(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize>;

    /// Reads a value starting at `offset`, returning it together with the
    /// number of bytes consumed.
    fn decode_at(&self, buf: &[u8], offset: usize) -> Result<(Value, usize)>;

    /// Reads a value starting at `offset`.
    fn decode(&self, buf: &[u8], offset: usize) -> Result<Value> {
        self.decode_at(buf, offset).map(|(value, _)| value)
    }
}

/// Computes the encoded size of `value` under `schema`.
pub fn size(schema: &Schema, value: &Value) -> Result<usize> {
    schema.size(value)
}

/// Encodes `value` into a freshly allocated buffer of exactly `size(schema, value)` bytes.
///
/// # Example
/// ```rust
/// use schema_codec::{encode, Schema, Value};
///
/// let buf = encode(&Schema::u8(), &Value::U8(100)).unwrap();
/// assert_eq!(&buf[..], &[0x64]);
/// ```
pub fn encode(schema: &Schema, value: &Value) -> Result<Bytes> {
    let result = (|| -> Result<Bytes> {
        let len = schema.size(value)?;
        let mut writer = BytesMut::zeroed(len);
        schema.encode(&mut writer, 0, value)?;
        trace_op!(kind = schema.kind(), bytes = len, "encoded value");
        Ok(writer.freeze())
    })();
    observe(result, "encode")
}

/// Encodes `value` into a caller-supplied buffer at `offset`, returning the
/// number of bytes written.
pub fn encode_into(
    schema: &Schema,
    value: &Value,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    let mut write = || -> Result<usize> {
        let len = schema.size(value)?;
        crate::core::check_bounds(buf.len(), offset, len)?;
        schema.encode(buf, offset, value)?;
        trace_op!(kind = schema.kind(), offset, bytes = len, "encoded value into buffer");
        Ok(len)
    };
    observe(write(), "encode_into")
}

/// Decodes a value from the start of `buf`.
///
/// Bytes after the decoded value are ignored.
///
/// The length of `buf` bounds the work done, with one exception: a list of
/// zero-width elements (such as `tuple([])`) produces as many values as its
/// count prefix announces.
///
/// # Example
/// ```rust
/// use schema_codec::{decode, Schema, Value};
///
/// let value = decode(&Schema::u8(), &[0x64]).unwrap();
/// assert_eq!(value, Value::U8(100));
/// ```
pub fn decode(schema: &Schema, buf: &[u8]) -> Result<Value> {
    let result = schema.decode_at(buf, 0).map(|(value, _consumed)| {
        trace_op!(kind = schema.kind(), bytes = _consumed, "decoded value");
        value
    });
    observe(result, "decode")
}

/// Encodes a Rust value through its `Typed` schema.
///
/// # Example
/// ```rust
/// use schema_codec::{from_bytes, to_bytes};
///
/// let value = (42u32, "hello".to_string(), vec![1u16, 2, 3]);
/// let buf = to_bytes(&value).unwrap();
/// let decoded: (u32, String, Vec<u16>) = from_bytes(&buf).unwrap();
/// assert_eq!(value, decoded);
/// ```
pub fn to_bytes<T: Typed>(value: &T) -> Result<Bytes> {
    encode(&T::schema(), &value.to_value())
}

/// Decodes a Rust value through its `Typed` schema.
pub fn from_bytes<T: Typed>(buf: &[u8]) -> Result<T> {
    T::from_value(decode(&T::schema(), buf)?)
}
