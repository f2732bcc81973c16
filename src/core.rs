//! Schema nodes and the values they describe.
//!
//! A schema tree is plain data: build it once, then use it for any number of
//! `size`/`encode`/`decode` calls. Every node implements [`Codec`], and
//! [`Schema`] dispatches to the node it wraps.
//!
//! - All multi-byte numbers are little-endian.
//! - Lengths and element counts are `u32` prefixes.
//! - The union discriminant is a single byte.

use crate::*;

/// Width of the `u32` prefix in front of lists, dynamic strings and buffers.
pub const LENGTH_PREFIX: usize = 4;
/// Width of the union discriminant.
pub const TAG_WIDTH: usize = 1;
/// Number of alternatives a one-byte discriminant can address.
pub const MAX_ALTERNATIVES: usize = 256;

// --- Value ---
/// A decoded (or to-be-encoded) value.
///
/// Each variant corresponds to one schema kind. Composite variants nest.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Buffer(Bytes),
    Tuple(Vec<Value>),
    List(Vec<Value>),
    Union { tag: u8, value: Box<Value> },
}

impl Value {
    /// Builds a union value selecting alternative `tag`.
    pub fn union(tag: u8, value: impl Into<Value>) -> Self {
        Value::Union {
            tag,
            value: Box::new(value.into()),
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::I8(_) => "i8",
            Value::U8(_) => "u8",
            Value::I16(_) => "i16",
            Value::U16(_) => "u16",
            Value::I32(_) => "i32",
            Value::U32(_) => "u32",
            Value::I64(_) => "i64",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Str(_) => "string",
            Value::Buffer(_) => "buffer",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Union { .. } => "union",
        }
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )+
    };
}

impl_value_from!(
    i8 => I8, u8 => U8, i16 => I16, u16 => U16, i32 => I32,
    u32 => U32, i64 => I64, u64 => U64, f32 => F32, f64 => F64,
    String => Str, Bytes => Buffer,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Buffer(Bytes::from(v))
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Buffer(Bytes::copy_from_slice(v))
    }
}

#[inline]
fn mismatch(expected: &'static str, found: &Value) -> CodecError {
    CodecError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

// --- Bounds-checked buffer access ---
/// Fails with `OutOfBounds` unless `len` bytes starting at `offset` fit in a
/// buffer of `buffer_len` bytes.
#[inline]
pub(crate) fn check_bounds(buffer_len: usize, offset: usize, len: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= buffer_len => Ok(()),
        _ => Err(CodecError::OutOfBounds {
            offset,
            len,
            buffer_len,
        }),
    }
}

#[inline]
fn read_slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    check_bounds(buf.len(), offset, len)?;
    Ok(&buf[offset..offset + len])
}

#[inline]
fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(read_slice(buf, offset, N)?);
    Ok(bytes)
}

#[inline]
fn write_slice(buf: &mut [u8], offset: usize, bytes: &[u8]) -> Result<()> {
    check_bounds(buf.len(), offset, bytes.len())?;
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    Ok(())
}

/// Converts a length to its `u32` prefix.
#[inline]
fn prefix_of(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CodecError::LengthOverflow(len))
}

/// Writes a `u32` in little-endian format at `offset`.
///
/// This is the length/count prefix used by lists, strings and buffers.
pub fn write_u32_le(buf: &mut [u8], offset: usize, value: u32) -> Result<()> {
    write_slice(buf, offset, &value.to_le_bytes())
}

/// Reads a little-endian `u32` at `offset`.
pub fn read_u32_le(buf: &[u8], offset: usize) -> Result<u32> {
    Ok(u32::from_le_bytes(read_array(buf, offset)?))
}

/// Writes a length prefix followed by `payload`, returning the bytes written.
fn write_prefixed(buf: &mut [u8], offset: usize, payload: &[u8]) -> Result<usize> {
    let len = prefix_of(payload.len())?;
    check_bounds(buf.len(), offset, LENGTH_PREFIX + payload.len())?;
    write_u32_le(buf, offset, len)?;
    write_slice(buf, offset + LENGTH_PREFIX, payload)?;
    Ok(LENGTH_PREFIX + payload.len())
}

/// Reads a length prefix and the payload it announces.
fn read_prefixed(buf: &[u8], offset: usize) -> Result<&[u8]> {
    let len = read_u32_le(buf, offset)? as usize;
    read_slice(buf, offset + LENGTH_PREFIX, len)
}

// --- Primitive ---
/// Fixed-width numeric schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl Primitive {
    /// Encoded width in bytes; independent of the value.
    pub const fn width(self) -> usize {
        match self {
            Primitive::I8 | Primitive::U8 => 1,
            Primitive::I16 | Primitive::U16 => 2,
            Primitive::I32 | Primitive::U32 | Primitive::F32 => 4,
            Primitive::I64 | Primitive::U64 | Primitive::F64 => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Primitive::I8 => "i8",
            Primitive::U8 => "u8",
            Primitive::I16 => "i16",
            Primitive::U16 => "u16",
            Primitive::I32 => "i32",
            Primitive::U32 => "u32",
            Primitive::I64 => "i64",
            Primitive::U64 => "u64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
        }
    }
}

/// Converts any numeric value to `$ty` with `as` semantics (wraparound for
/// integers, saturation for float to integer), returning early on non-numbers.
macro_rules! cast_numeric {
    ($value:expr, $ty:ty, $expected:expr) => {
        match $value {
            Value::I8(v) => *v as $ty,
            Value::U8(v) => *v as $ty,
            Value::I16(v) => *v as $ty,
            Value::U16(v) => *v as $ty,
            Value::I32(v) => *v as $ty,
            Value::U32(v) => *v as $ty,
            Value::I64(v) => *v as $ty,
            Value::U64(v) => *v as $ty,
            Value::F32(v) => *v as $ty,
            Value::F64(v) => *v as $ty,
            other => return Err(mismatch($expected, other)),
        }
    };
}

fn is_numeric(value: &Value) -> bool {
    matches!(
        value,
        Value::I8(_)
            | Value::U8(_)
            | Value::I16(_)
            | Value::U16(_)
            | Value::I32(_)
            | Value::U32(_)
            | Value::I64(_)
            | Value::U64(_)
            | Value::F32(_)
            | Value::F64(_)
    )
}

/// Any numeric value is accepted and converted to the schema's width; the
/// result always decodes as the schema's own variant.
impl Codec for Primitive {
    fn size(&self, value: &Value) -> Result<usize> {
        if !is_numeric(value) {
            return Err(mismatch(self.name(), value));
        }
        Ok(self.width())
    }

    fn encode(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize> {
        let name = self.name();
        match self {
            Primitive::I8 => write_slice(buf, offset, &cast_numeric!(value, i8, name).to_le_bytes()),
            Primitive::U8 => write_slice(buf, offset, &cast_numeric!(value, u8, name).to_le_bytes()),
            Primitive::I16 => {
                write_slice(buf, offset, &cast_numeric!(value, i16, name).to_le_bytes())
            }
            Primitive::U16 => {
                write_slice(buf, offset, &cast_numeric!(value, u16, name).to_le_bytes())
            }
            Primitive::I32 => {
                write_slice(buf, offset, &cast_numeric!(value, i32, name).to_le_bytes())
            }
            Primitive::U32 => {
                write_slice(buf, offset, &cast_numeric!(value, u32, name).to_le_bytes())
            }
            Primitive::I64 => {
                write_slice(buf, offset, &cast_numeric!(value, i64, name).to_le_bytes())
            }
            Primitive::U64 => {
                write_slice(buf, offset, &cast_numeric!(value, u64, name).to_le_bytes())
            }
            Primitive::F32 => {
                write_slice(buf, offset, &cast_numeric!(value, f32, name).to_le_bytes())
            }
            Primitive::F64 => {
                write_slice(buf, offset, &cast_numeric!(value, f64, name).to_le_bytes())
            }
        }?;
        Ok(self.width())
    }

    fn decode_at(&self, buf: &[u8], offset: usize) -> Result<(Value, usize)> {
        let value = match self {
            Primitive::I8 => Value::I8(i8::from_le_bytes(read_array(buf, offset)?)),
            Primitive::U8 => Value::U8(u8::from_le_bytes(read_array(buf, offset)?)),
            Primitive::I16 => Value::I16(i16::from_le_bytes(read_array(buf, offset)?)),
            Primitive::U16 => Value::U16(u16::from_le_bytes(read_array(buf, offset)?)),
            Primitive::I32 => Value::I32(i32::from_le_bytes(read_array(buf, offset)?)),
            Primitive::U32 => Value::U32(u32::from_le_bytes(read_array(buf, offset)?)),
            Primitive::I64 => Value::I64(i64::from_le_bytes(read_array(buf, offset)?)),
            Primitive::U64 => Value::U64(u64::from_le_bytes(read_array(buf, offset)?)),
            Primitive::F32 => Value::F32(f32::from_le_bytes(read_array(buf, offset)?)),
            Primitive::F64 => Value::F64(f64::from_le_bytes(read_array(buf, offset)?)),
        };
        Ok((value, self.width()))
    }
}

// --- Text ---
/// UTF-8 string schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    /// `[u32 byte_len][UTF-8 bytes]`
    Dynamic,
    /// Exactly `n` UTF-8 bytes with no prefix.
    Fixed(usize),
}

impl Text {
    fn expect_str<'a>(&self, value: &'a Value) -> Result<&'a str> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(mismatch("string", other)),
        }
    }

    fn check_fixed(&self, s: &str) -> Result<()> {
        match self {
            Text::Fixed(n) if s.len() != *n => Err(CodecError::LengthMismatch {
                expected: *n,
                actual: s.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// Malformed UTF-8 is rejected with `InvalidUtf8` rather than replaced.
impl Codec for Text {
    fn size(&self, value: &Value) -> Result<usize> {
        let s = self.expect_str(value)?;
        self.check_fixed(s)?;
        match self {
            Text::Dynamic => {
                prefix_of(s.len())?;
                Ok(LENGTH_PREFIX + s.len())
            }
            Text::Fixed(n) => Ok(*n),
        }
    }

    fn encode(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize> {
        let s = self.expect_str(value)?;
        self.check_fixed(s)?;
        match self {
            Text::Dynamic => write_prefixed(buf, offset, s.as_bytes()),
            Text::Fixed(n) => {
                write_slice(buf, offset, s.as_bytes())?;
                Ok(*n)
            }
        }
    }

    fn decode_at(&self, buf: &[u8], offset: usize) -> Result<(Value, usize)> {
        let (bytes, consumed) = match self {
            Text::Dynamic => {
                let bytes = read_prefixed(buf, offset)?;
                (bytes, LENGTH_PREFIX + bytes.len())
            }
            Text::Fixed(n) => (read_slice(buf, offset, *n)?, *n),
        };
        let s = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
        Ok((Value::Str(s.to_string()), consumed))
    }
}

// --- Blob ---
/// Opaque length-prefixed byte sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Blob;

impl Codec for Blob {
    fn size(&self, value: &Value) -> Result<usize> {
        match value {
            Value::Buffer(b) => {
                prefix_of(b.len())?;
                Ok(LENGTH_PREFIX + b.len())
            }
            other => Err(mismatch("buffer", other)),
        }
    }

    fn encode(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize> {
        match value {
            Value::Buffer(b) => write_prefixed(buf, offset, b),
            other => Err(mismatch("buffer", other)),
        }
    }

    fn decode_at(&self, buf: &[u8], offset: usize) -> Result<(Value, usize)> {
        let bytes = read_prefixed(buf, offset)?;
        Ok((
            Value::Buffer(Bytes::copy_from_slice(bytes)),
            LENGTH_PREFIX + bytes.len(),
        ))
    }
}

// --- Tuple ---
/// Fixed-arity heterogeneous sequence, encoded positionally with no framing.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    elements: Vec<Schema>,
}

impl Tuple {
    pub fn new(elements: Vec<Schema>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[Schema] {
        &self.elements
    }

    fn expect_values<'a>(&self, value: &'a Value) -> Result<&'a [Value]> {
        let values = match value {
            Value::Tuple(values) => values,
            other => return Err(mismatch("tuple", other)),
        };
        if values.len() != self.elements.len() {
            return Err(CodecError::ArityMismatch {
                expected: self.elements.len(),
                actual: values.len(),
            });
        }
        Ok(values)
    }
}

impl Codec for Tuple {
    fn size(&self, value: &Value) -> Result<usize> {
        let values = self.expect_values(value)?;
        self.elements
            .iter()
            .zip(values)
            .try_fold(0usize, |acc, (schema, v)| -> Result<usize> {
                Ok(acc + schema.size(v)?)
            })
    }

    fn encode(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize> {
        let values = self.expect_values(value)?;
        let mut cursor = offset;
        for (schema, v) in self.elements.iter().zip(values) {
            cursor += schema.encode(buf, cursor, v)?;
        }
        Ok(cursor - offset)
    }

    fn decode_at(&self, buf: &[u8], offset: usize) -> Result<(Value, usize)> {
        let mut values = Vec::with_capacity(self.elements.len());
        let mut cursor = offset;
        for schema in &self.elements {
            let (v, consumed) = schema.decode_at(buf, cursor)?;
            values.push(v);
            cursor += consumed;
        }
        Ok((Value::Tuple(values), cursor - offset))
    }
}

// --- List ---
/// Dynamic-length homogeneous sequence: `[u32 count][element]...`.
///
/// Elements may differ in size (nested lists, unions, strings), so the cursor
/// always advances by what each element actually occupied.
///
/// Decoding allocates no more than the input can hold, except for elements
/// that occupy zero bytes (`tuple([])`, `fixed_string(0)`): their count comes
/// from the prefix alone, so a 4-byte input can announce `u32::MAX` of them.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element: Box<Schema>,
}

impl List {
    pub fn new(element: Schema) -> Self {
        Self {
            element: Box::new(element),
        }
    }

    pub fn element(&self) -> &Schema {
        &self.element
    }

    fn expect_values<'a>(&self, value: &'a Value) -> Result<&'a [Value]> {
        match value {
            Value::List(values) => Ok(values),
            other => Err(mismatch("list", other)),
        }
    }
}

impl Codec for List {
    fn size(&self, value: &Value) -> Result<usize> {
        let values = self.expect_values(value)?;
        prefix_of(values.len())?;
        values
            .iter()
            .try_fold(LENGTH_PREFIX, |acc, v| -> Result<usize> {
                Ok(acc + self.element.size(v)?)
            })
    }

    fn encode(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize> {
        let values = self.expect_values(value)?;
        write_u32_le(buf, offset, prefix_of(values.len())?)?;
        let mut cursor = offset + LENGTH_PREFIX;
        for v in values {
            cursor += self.element.encode(buf, cursor, v)?;
        }
        Ok(cursor - offset)
    }

    fn decode_at(&self, buf: &[u8], offset: usize) -> Result<(Value, usize)> {
        let count = read_u32_le(buf, offset)? as usize;
        let mut cursor = offset + LENGTH_PREFIX;
        // A corrupt count must not drive the allocation.
        let remaining = buf.len().saturating_sub(cursor);
        let capacity = count.min(remaining / self.element.min_size().max(1));
        let mut values = Vec::with_capacity(capacity);
        for _ in 0..count {
            let (v, consumed) = self.element.decode_at(buf, cursor)?;
            values.push(v);
            cursor += consumed;
        }
        Ok((Value::List(values), cursor - offset))
    }
}

// --- Union ---
/// Tagged choice among alternatives: `[u8 tag][alternative encoding]`.
///
/// The alternative is picked per value from the tag, never at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    alternatives: Vec<Schema>,
}

impl Union {
    pub fn new(alternatives: Vec<Schema>) -> Self {
        Self { alternatives }
    }

    pub fn alternatives(&self) -> &[Schema] {
        &self.alternatives
    }

    /// Resolves `tag` to its alternative.
    pub fn alternative(&self, tag: u8) -> Result<&Schema> {
        if self.alternatives.len() > MAX_ALTERNATIVES {
            return Err(CodecError::TooManyAlternatives(self.alternatives.len()));
        }
        self.alternatives
            .get(tag as usize)
            .ok_or(CodecError::UnknownTag {
                tag,
                alternatives: self.alternatives.len(),
            })
    }

    fn expect_union<'a>(&self, value: &'a Value) -> Result<(u8, &'a Value, &Schema)> {
        match value {
            Value::Union { tag, value } => Ok((*tag, value.as_ref(), self.alternative(*tag)?)),
            other => Err(mismatch("union", other)),
        }
    }
}

impl Codec for Union {
    fn size(&self, value: &Value) -> Result<usize> {
        let (_, inner, schema) = self.expect_union(value)?;
        Ok(TAG_WIDTH + schema.size(inner)?)
    }

    fn encode(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize> {
        let (tag, inner, schema) = self.expect_union(value)?;
        write_slice(buf, offset, &[tag])?;
        Ok(TAG_WIDTH + schema.encode(buf, offset + TAG_WIDTH, inner)?)
    }

    fn decode_at(&self, buf: &[u8], offset: usize) -> Result<(Value, usize)> {
        let [tag] = read_array::<1>(buf, offset)?;
        let schema = self.alternative(tag)?;
        let (inner, consumed) = schema.decode_at(buf, offset + TAG_WIDTH)?;
        Ok((Value::union(tag, inner), TAG_WIDTH + consumed))
    }
}

// --- Schema ---
/// Any schema node. The set of kinds is closed; composition happens by
/// nesting `Schema` values inside tuples, lists and unions.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Primitive(Primitive),
    Text(Text),
    Blob(Blob),
    Tuple(Tuple),
    List(List),
    Union(Union),
}

impl Schema {
    pub fn i8() -> Self {
        Schema::Primitive(Primitive::I8)
    }
    pub fn u8() -> Self {
        Schema::Primitive(Primitive::U8)
    }
    pub fn i16() -> Self {
        Schema::Primitive(Primitive::I16)
    }
    pub fn u16() -> Self {
        Schema::Primitive(Primitive::U16)
    }
    pub fn i32() -> Self {
        Schema::Primitive(Primitive::I32)
    }
    pub fn u32() -> Self {
        Schema::Primitive(Primitive::U32)
    }
    pub fn i64() -> Self {
        Schema::Primitive(Primitive::I64)
    }
    pub fn u64() -> Self {
        Schema::Primitive(Primitive::U64)
    }
    pub fn f32() -> Self {
        Schema::Primitive(Primitive::F32)
    }
    pub fn f64() -> Self {
        Schema::Primitive(Primitive::F64)
    }

    /// Length-prefixed UTF-8 string.
    pub fn string() -> Self {
        Schema::Text(Text::Dynamic)
    }

    /// UTF-8 string of exactly `len` bytes, stored without a prefix.
    pub fn fixed_string(len: usize) -> Self {
        Schema::Text(Text::Fixed(len))
    }

    /// Length-prefixed opaque bytes.
    pub fn buffer() -> Self {
        Schema::Blob(Blob)
    }

    pub fn tuple(elements: Vec<Schema>) -> Self {
        Schema::Tuple(Tuple::new(elements))
    }

    pub fn list(element: Schema) -> Self {
        Schema::List(List::new(element))
    }

    /// Tagged union; tag `i` selects `alternatives[i]`.
    ///
    /// Only the first 256 alternatives are addressable; a union with more is
    /// rejected when it is used.
    pub fn union(alternatives: Vec<Schema>) -> Self {
        Schema::Union(Union::new(alternatives))
    }

    /// Short name of the schema kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Primitive(p) => p.name(),
            Schema::Text(Text::Dynamic) => "string",
            Schema::Text(Text::Fixed(_)) => "fixed string",
            Schema::Blob(_) => "buffer",
            Schema::Tuple(_) => "tuple",
            Schema::List(_) => "list",
            Schema::Union(_) => "union",
        }
    }

    /// The fewest bytes any value of this schema can occupy, saturating at
    /// `usize::MAX`.
    pub fn min_size(&self) -> usize {
        match self {
            Schema::Primitive(p) => p.width(),
            Schema::Text(Text::Dynamic) | Schema::Blob(_) | Schema::List(_) => LENGTH_PREFIX,
            Schema::Text(Text::Fixed(n)) => *n,
            Schema::Tuple(t) => t
                .elements
                .iter()
                .map(Schema::min_size)
                .fold(0, usize::saturating_add),
            Schema::Union(u) => TAG_WIDTH.saturating_add(
                u.alternatives
                    .iter()
                    .map(Schema::min_size)
                    .min()
                    .unwrap_or(0),
            ),
        }
    }
}

impl Codec for Schema {
    fn size(&self, value: &Value) -> Result<usize> {
        match self {
            Schema::Primitive(s) => s.size(value),
            Schema::Text(s) => s.size(value),
            Schema::Blob(s) => s.size(value),
            Schema::Tuple(s) => s.size(value),
            Schema::List(s) => s.size(value),
            Schema::Union(s) => s.size(value),
        }
    }

    fn encode(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize> {
        match self {
            Schema::Primitive(s) => s.encode(buf, offset, value),
            Schema::Text(s) => s.encode(buf, offset, value),
            Schema::Blob(s) => s.encode(buf, offset, value),
            Schema::Tuple(s) => s.encode(buf, offset, value),
            Schema::List(s) => s.encode(buf, offset, value),
            Schema::Union(s) => s.encode(buf, offset, value),
        }
    }

    fn decode_at(&self, buf: &[u8], offset: usize) -> Result<(Value, usize)> {
        match self {
            Schema::Primitive(s) => s.decode_at(buf, offset),
            Schema::Text(s) => s.decode_at(buf, offset),
            Schema::Blob(s) => s.decode_at(buf, offset),
            Schema::Tuple(s) => s.decode_at(buf, offset),
            Schema::List(s) => s.decode_at(buf, offset),
            Schema::Union(s) => s.decode_at(buf, offset),
        }
    }
}
