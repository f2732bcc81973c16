#[cfg(feature = "ahash")]
use ahash::AHashMap;
#[cfg(feature = "bigdecimal")]
use bigdecimal::BigDecimal;
#[cfg(feature = "chrono")]
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
#[cfg(feature = "indexmap")]
use indexmap::{IndexMap, IndexSet};
#[cfg(feature = "rust_decimal")]
use rust_decimal::Decimal;
#[cfg(feature = "smol_str")]
use smol_str::SmolStr;
#[cfg(feature = "ulid")]
use ulid::Ulid;
#[cfg(feature = "uuid")]
use uuid::Uuid;

#[allow(unused_imports)]
use crate::*;

/// Schema shared by the 128-bit identifiers: `[u64 high, u64 low]`.
#[cfg(any(feature = "uuid", feature = "ulid"))]
fn u128_schema() -> Schema {
    Schema::tuple(vec![Schema::u64(), Schema::u64()])
}

#[cfg(any(feature = "uuid", feature = "ulid"))]
fn u128_to_value(v: u128) -> Value {
    Value::Tuple(vec![Value::U64((v >> 64) as u64), Value::U64(v as u64)])
}

#[cfg(any(feature = "uuid", feature = "ulid"))]
fn u128_from_value(value: Value) -> Result<u128> {
    let mut elements = tuple_elements(value, 2)?;
    let high = u64::from_value(next_element(&mut elements)?)?;
    let low = u64::from_value(next_element(&mut elements)?)?;
    Ok(((high as u128) << 64) | low as u128)
}

// --- IndexSet ---
/// A list of the set's elements in insertion order.
#[cfg(feature = "indexmap")]
impl<T: Typed + Eq + std::hash::Hash> Typed for IndexSet<T> {
    fn schema() -> Schema {
        Schema::list(T::schema())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Typed::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        let vec: Vec<T> = Vec::from_value(value)?;
        Ok(vec.into_iter().collect())
    }
}

// --- IndexMap ---
/// A list of `(key, value)` tuples in insertion order.
#[cfg(feature = "indexmap")]
impl<K: Typed + Eq + std::hash::Hash, V: Typed> Typed for IndexMap<K, V> {
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
        let pairs: Vec<(K, V)> = Vec::from_value(value)?;
        Ok(pairs.into_iter().collect())
    }
}

// --- AHashMap ---
#[cfg(feature = "ahash")]
impl<K: Typed + Eq + std::hash::Hash, V: Typed> Typed for AHashMap<K, V> {
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
        let pairs: Vec<(K, V)> = Vec::from_value(value)?;
        Ok(pairs.into_iter().collect())
    }
}

// --- DateTime<Utc> ---
/// Seconds and nanoseconds since the Unix epoch: `[i64 secs, u32 nanos]`.
#[cfg(feature = "chrono")]
impl Typed for DateTime<Utc> {
    fn schema() -> Schema {
        Schema::tuple(vec![Schema::i64(), Schema::u32()])
    }

    fn to_value(&self) -> Value {
        Value::Tuple(vec![
            Value::I64(self.timestamp()),
            Value::U32(self.timestamp_subsec_nanos()),
        ])
    }

    fn from_value(value: Value) -> Result<Self> {
        let mut elements = tuple_elements(value, 2)?;
        let timestamp_seconds = i64::from_value(next_element(&mut elements)?)?;
        let timestamp_nanos = u32::from_value(next_element(&mut elements)?)?;
        DateTime::from_timestamp(timestamp_seconds, timestamp_nanos).ok_or_else(|| {
            CodecError::Decode(format!(
                "Invalid timestamp: {} seconds, {} nanos",
                timestamp_seconds, timestamp_nanos
            ))
        })
    }
}

// --- NaiveDate ---
/// Days since 0001-01-01 (day 1), as an `i32`.
#[cfg(feature = "chrono")]
impl Typed for NaiveDate {
    fn schema() -> Schema {
        Schema::i32()
    }

    fn to_value(&self) -> Value {
        use chrono::Datelike;
        Value::I32(self.num_days_from_ce())
    }

    fn from_value(value: Value) -> Result<Self> {
        let days = i32::from_value(value)?;
        NaiveDate::from_num_days_from_ce_opt(days)
            .ok_or_else(|| CodecError::Decode(format!("Invalid days from CE: {}", days)))
    }
}

// --- NaiveTime ---
/// Seconds from midnight and nanoseconds: `[u32 secs, u32 nanos]`.
#[cfg(feature = "chrono")]
impl Typed for NaiveTime {
    fn schema() -> Schema {
        Schema::tuple(vec![Schema::u32(), Schema::u32()])
    }

    fn to_value(&self) -> Value {
        Value::Tuple(vec![
            Value::U32(self.num_seconds_from_midnight()),
            Value::U32(self.nanosecond()),
        ])
    }

    fn from_value(value: Value) -> Result<Self> {
        let mut elements = tuple_elements(value, 2)?;
        let seconds_from_midnight = u32::from_value(next_element(&mut elements)?)?;
        let nanoseconds = u32::from_value(next_element(&mut elements)?)?;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds_from_midnight, nanoseconds)
            .ok_or_else(|| {
                CodecError::Decode(format!(
                    "Invalid seconds from midnight: {}, nanoseconds: {}",
                    seconds_from_midnight, nanoseconds
                ))
            })
    }
}

// --- Decimal ---
/// The 16-byte serialized form of the decimal, as a buffer.
#[cfg(feature = "rust_decimal")]
impl Typed for Decimal {
    fn schema() -> Schema {
        Schema::buffer()
    }

    fn to_value(&self) -> Value {
        Value::Buffer(Bytes::copy_from_slice(&self.serialize()))
    }

    fn from_value(value: Value) -> Result<Self> {
        let bytes = Bytes::from_value(value)?;
        let raw = <[u8; 16]>::try_from(&bytes[..]).map_err(|_| {
            CodecError::Decode(format!("Decimal needs 16 bytes, got {}", bytes.len()))
        })?;
        Ok(Decimal::deserialize(raw))
    }
}

// --- BigDecimal ---
/// The canonical decimal text, as a dynamic string.
#[cfg(feature = "bigdecimal")]
impl Typed for BigDecimal {
    fn schema() -> Schema {
        Schema::string()
    }

    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }

    fn from_value(value: Value) -> Result<Self> {
        use std::str::FromStr;
        let text = String::from_value(value)?;
        BigDecimal::from_str(&text)
            .map_err(|e| CodecError::Decode(format!("Invalid BigDecimal '{}': {}", text, e)))
    }
}

// --- UUID ---
#[cfg(feature = "uuid")]
impl Typed for Uuid {
    fn schema() -> Schema {
        u128_schema()
    }

    fn to_value(&self) -> Value {
        u128_to_value(self.as_u128())
    }

    fn from_value(value: Value) -> Result<Self> {
        u128_from_value(value).map(Uuid::from_u128)
    }
}

// --- ULID ---
/// Same layout as `Uuid`, so the two are interchangeable on the wire.
#[cfg(feature = "ulid")]
impl Typed for Ulid {
    fn schema() -> Schema {
        u128_schema()
    }

    fn to_value(&self) -> Value {
        u128_to_value(self.0)
    }

    fn from_value(value: Value) -> Result<Self> {
        u128_from_value(value).map(Ulid)
    }
}

// --- SmolStr ---
#[cfg(feature = "smol_str")]
impl Typed for SmolStr {
    fn schema() -> Schema {
        Schema::string()
    }

    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }

    fn from_value(value: Value) -> Result<Self> {
        String::from_value(value).map(SmolStr::from)
    }
}

// --- serde_json::Value ---
/// Stored as its JSON text in a dynamic string.
#[cfg(feature = "serde_json")]
impl Typed for serde_json::Value {
    fn schema() -> Schema {
        Schema::string()
    }

    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }

    fn from_value(value: Value) -> Result<Self> {
        let text = String::from_value(value)?;
        serde_json::from_str(&text).map_err(|e| CodecError::Decode(format!("Invalid JSON: {}", e)))
    }
}
