use crate::*;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Maps a Rust type onto a schema and converts between the type and [`Value`].
///
/// Implement this trait for your type to use it with [`to_bytes`] and
/// [`from_bytes`]. Most users should use `#[derive(Typed)]` instead of a
/// manual implementation.
///
/// # Errors
/// `from_value` returns an error when the value does not have the shape
/// `schema()` describes.
pub trait Typed: Sized {
    /// The schema values of this type are encoded with.
    fn schema() -> Schema;

    /// Converts `self` into a value matching `Self::schema()`.
    fn to_value(&self) -> Value;

    /// Rebuilds `Self` from a value decoded with `Self::schema()`.
    fn from_value(value: Value) -> Result<Self>;
}

/// Error for a value whose variant is not the one `T::schema()` produces.
pub fn unexpected<T>(expected: &'static str, found: &Value) -> Result<T> {
    Err(CodecError::TypeMismatch {
        expected,
        found: found.kind(),
    })
}

/// Takes the elements out of a tuple value, checking its arity.
///
/// This is used by tuple implementations and by `#[derive(Typed)]`.
pub fn tuple_elements(value: Value, expected: usize) -> Result<std::vec::IntoIter<Value>> {
    match value {
        Value::Tuple(values) if values.len() == expected => Ok(values.into_iter()),
        Value::Tuple(values) => Err(CodecError::ArityMismatch {
            expected,
            actual: values.len(),
        }),
        other => unexpected("tuple", &other),
    }
}

/// Takes the tag and inner value out of a union value.
///
/// This is used by `Option` and by `#[derive(Typed)]` on enums.
pub fn union_parts(value: Value) -> Result<(u8, Value)> {
    match value {
        Value::Union { tag, value } => Ok((tag, *value)),
        other => unexpected("union", &other),
    }
}

/// Takes the next element of a tuple; only fails if arity was not checked.
pub fn next_element(elements: &mut std::vec::IntoIter<Value>) -> Result<Value> {
    elements
        .next()
        .ok_or_else(|| CodecError::Decode("tuple ended early".to_string()))
}

// --- Primitives ---
macro_rules! impl_typed_primitive {
    ($($ty:ty => $variant:ident, $ctor:ident;)+) => {
        $(
            impl Typed for $ty {
                fn schema() -> Schema {
                    Schema::$ctor()
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => unexpected(stringify!($ty), &other),
                    }
                }
            }
        )+
    };
}

impl_typed_primitive! {
    i8 => I8, i8;
    u8 => U8, u8;
    i16 => I16, i16;
    u16 => U16, u16;
    i32 => I32, i32;
    u32 => U32, u32;
    i64 => I64, i64;
    u64 => U64, u64;
    f32 => F32, f32;
    f64 => F64, f64;
}

// --- bool ---
/// Stored as a `u8`. 0 is `false`; any non-zero byte is `true`.
impl Typed for bool {
    fn schema() -> Schema {
        Schema::u8()
    }

    fn to_value(&self) -> Value {
        Value::U8(*self as u8)
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(u8::from_value(value)? != 0)
    }
}

// --- char ---
/// Stored as its `u32` scalar value.
impl Typed for char {
    fn schema() -> Schema {
        Schema::u32()
    }

    fn to_value(&self) -> Value {
        Value::U32(*self as u32)
    }

    fn from_value(value: Value) -> Result<Self> {
        let scalar = u32::from_value(value)?;
        char::from_u32(scalar)
            .ok_or_else(|| CodecError::Decode(format!("Invalid char scalar value: {}", scalar)))
    }
}

// --- String ---
impl Typed for String {
    fn schema() -> Schema {
        Schema::string()
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => unexpected("string", &other),
        }
    }
}

// --- Bytes ---
impl Typed for Bytes {
    fn schema() -> Schema {
        Schema::buffer()
    }

    fn to_value(&self) -> Value {
        Value::Buffer(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Buffer(b) => Ok(b),
            other => unexpected("buffer", &other),
        }
    }
}

// --- Box<T> ---
impl<T: Typed> Typed for Box<T> {
    fn schema() -> Schema {
        T::schema()
    }

    fn to_value(&self) -> Value {
        self.as_ref().to_value()
    }

    fn from_value(value: Value) -> Result<Self> {
        T::from_value(value).map(Box::new)
    }
}

// --- Vec<T> ---
/// A list of `T`. `Vec<u8>` has the same wire layout as a buffer.
impl<T: Typed> Typed for Vec<T> {
    fn schema() -> Schema {
        Schema::list(T::schema())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Typed::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(values) => values.into_iter().map(T::from_value).collect(),
            other => unexpected("list", &other),
        }
    }
}

// --- Option<T> ---
/// A union of `[(), T]`: tag 0 is `None`, tag 1 is `Some`.
impl<T: Typed> Typed for Option<T> {
    fn schema() -> Schema {
        Schema::union(vec![Schema::tuple(vec![]), T::schema()])
    }

    fn to_value(&self) -> Value {
        match self {
            None => Value::union(0, Value::Tuple(vec![])),
            Some(v) => Value::union(1, v.to_value()),
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match union_parts(value)? {
            (0, inner) => {
                tuple_elements(inner, 0)?;
                Ok(None)
            }
            (1, inner) => T::from_value(inner).map(Some),
            (tag, _) => Err(CodecError::UnknownTag {
                tag,
                alternatives: 2,
            }),
        }
    }
}

// --- Maps ---
/// A list of `(key, value)` tuples.
impl<K, V, S> Typed for HashMap<K, V, S>
where
    K: Typed + Eq + Hash,
    V: Typed,
    S: BuildHasher + Default,
{
    fn schema() -> Schema {
        Schema::list(Schema::tuple(vec![K::schema(), V::schema()]))
    }

    fn to_value(&self) -> Value {
        Value::List(
            self.iter()
                .map(|(k, v)| Value::Tuple(vec![k.to_value(), v.to_value()]))
                .collect(),
        )
    }

    fn from_value(value: Value) -> Result<Self> {
        <Vec<(K, V)>>::from_value(value).map(|pairs| pairs.into_iter().collect())
    }
}

/// A list of `(key, value)` tuples in key order.
impl<K: Typed + Ord, V: Typed> Typed for BTreeMap<K, V> {
    fn schema() -> Schema {
        Schema::list(Schema::tuple(vec![K::schema(), V::schema()]))
    }

    fn to_value(&self) -> Value {
        Value::List(
            self.iter()
                .map(|(k, v)| Value::Tuple(vec![k.to_value(), v.to_value()]))
                .collect(),
        )
    }

    fn from_value(value: Value) -> Result<Self> {
        <Vec<(K, V)>>::from_value(value).map(|pairs| pairs.into_iter().collect())
    }
}

// --- Tuple ---
/// Implements `Typed` for tuples up to 12 elements.
///
/// Each tuple maps onto a tuple schema of its element schemas.
macro_rules! impl_tuple {
    ($($T:ident : $idx:tt),*) => {
        impl<$($T: Typed),*> Typed for ($($T,)*) {
            fn schema() -> Schema {
                Schema::tuple(vec![$($T::schema()),*])
            }

            fn to_value(&self) -> Value {
                Value::Tuple(vec![$(self.$idx.to_value()),*])
            }

            #[allow(unused_mut, unused_variables)]
            fn from_value(value: Value) -> Result<Self> {
                let mut elements = tuple_elements(value, count_args!($($T),*))?;
                Ok(($(
                    $T::from_value(next_element(&mut elements)?)?,
                )*))
            }
        }
    };
}

macro_rules! count_args {
    () => { 0 };
    ($head:ident $(, $tail:ident)*) => { 1 + count_args!($($tail),*) };
}

// Generate tuple implementations for 0 to 12 elements
impl_tuple!();
impl_tuple!(T0: 0);
impl_tuple!(T0: 0, T1: 1);
impl_tuple!(T0: 0, T1: 1, T2: 2);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9, T10: 10);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9, T10: 10, T11: 11);
