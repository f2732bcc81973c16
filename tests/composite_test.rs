use schema_codec::{decode, encode, encode_into, size, Codec, CodecError, Schema, Value};

fn u8s(values: &[u8]) -> Vec<Value> {
    values.iter().copied().map(Value::U8).collect()
}

#[test]
fn test_tuple_of_primitives() {
    let schema = Schema::tuple(vec![
        Schema::i8(),
        Schema::u8(),
        Schema::i16(),
        Schema::u16(),
        Schema::i32(),
        Schema::u32(),
        Schema::i64(),
        Schema::u64(),
    ]);
    let value = Value::Tuple(vec![
        Value::I8(-5),
        Value::U8(9),
        Value::I16(-8),
        Value::U16(10),
        Value::I32(-800),
        Value::U32(1000),
        Value::I64(-100_000),
        Value::U64(100_000),
    ]);
    let buf = encode(&schema, &value).unwrap();
    assert_eq!(buf.len(), 30);

    // Positional, no framing.
    assert_eq!(buf[0] as i8, -5);
    assert_eq!(buf[1], 9);
    assert_eq!(i16::from_le_bytes([buf[2], buf[3]]), -8);
    assert_eq!(u16::from_le_bytes([buf[4], buf[5]]), 10);
    assert_eq!(i32::from_le_bytes(buf[6..10].try_into().unwrap()), -800);
    assert_eq!(u32::from_le_bytes(buf[10..14].try_into().unwrap()), 1000);
    assert_eq!(i64::from_le_bytes(buf[14..22].try_into().unwrap()), -100_000);
    assert_eq!(u64::from_le_bytes(buf[22..30].try_into().unwrap()), 100_000);

    assert_eq!(decode(&schema, &buf).unwrap(), value);
}

#[test]
fn test_nested_tuple() {
    let schema = Schema::tuple(vec![
        Schema::u8(),
        Schema::tuple(vec![
            Schema::u8(),
            Schema::tuple(vec![Schema::u8(), Schema::u16(), Schema::u32(), Schema::u8()]),
        ]),
        Schema::u8(),
    ]);
    let value = Value::Tuple(vec![
        Value::U8(5),
        Value::Tuple(vec![
            Value::U8(9),
            Value::Tuple(vec![
                Value::U8(100),
                Value::U16(101),
                Value::U32(102),
                Value::U8(103),
            ]),
        ]),
        Value::U8(8),
    ]);
    assert_eq!(size(&schema, &value).unwrap(), 11);

    let buf = encode(&schema, &value).unwrap();
    assert_eq!(
        &buf[..],
        &[5, 9, 100, 101, 0, 102, 0, 0, 0, 103, 8]
    );
    assert_eq!(decode(&schema, &buf).unwrap(), value);
}

#[test]
fn test_empty_tuple() {
    let schema = Schema::tuple(vec![]);
    let value = Value::Tuple(vec![]);
    assert_eq!(size(&schema, &value).unwrap(), 0);
    let buf = encode(&schema, &value).unwrap();
    assert!(buf.is_empty());
    assert_eq!(decode(&schema, &buf).unwrap(), value);
}

#[test]
fn test_tuple_arity_mismatch() {
    let schema = Schema::tuple(vec![Schema::u8(), Schema::u8()]);
    let err = encode(&schema, &Value::Tuple(u8s(&[1, 2, 3]))).unwrap_err();
    assert_eq!(
        err,
        CodecError::ArityMismatch {
            expected: 2,
            actual: 3
        }
    );
    assert!(size(&schema, &Value::Tuple(u8s(&[1]))).is_err());
    assert!(matches!(
        size(&schema, &Value::List(u8s(&[1, 2]))),
        Err(CodecError::TypeMismatch { .. })
    ));
}

#[test]
fn test_list_of_u8() {
    let schema = Schema::list(Schema::u8());
    let value = Value::List(u8s(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));
    assert_eq!(size(&schema, &value).unwrap(), 14);

    let buf = encode(&schema, &value).unwrap();
    assert_eq!(&buf[..4], &10u32.to_le_bytes());
    assert_eq!(&buf[4..], &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(decode(&schema, &buf).unwrap(), value);
}

#[test]
fn test_list_of_u16() {
    let schema = Schema::list(Schema::u16());
    let value = Value::List((1..=10).map(Value::U16).collect());
    assert_eq!(size(&schema, &value).unwrap(), 24);

    let buf = encode(&schema, &value).unwrap();
    assert_eq!(&buf[..4], &10u32.to_le_bytes());
    for (i, chunk) in buf[4..].chunks(2).enumerate() {
        assert_eq!(u16::from_le_bytes([chunk[0], chunk[1]]), i as u16 + 1);
    }
    assert_eq!(decode(&schema, &buf).unwrap(), value);
}

#[test]
fn test_list_of_wide_numbers() {
    let schema = Schema::list(Schema::i64());
    let value = Value::List((0..10).map(|i| Value::I64(-1_000_000_000_000 * i)).collect());
    assert_eq!(size(&schema, &value).unwrap(), 84);
    let buf = encode(&schema, &value).unwrap();
    assert_eq!(
        i64::from_le_bytes(buf[4 + 8 * 9..4 + 8 * 10].try_into().unwrap()),
        -9_000_000_000_000
    );
    assert_eq!(decode(&schema, &buf).unwrap(), value);

    let schema = Schema::list(Schema::f64());
    let value = Value::List((0..10).map(|i| Value::F64(i as f64 * 0.5)).collect());
    assert_eq!(size(&schema, &value).unwrap(), 84);
    let buf = encode(&schema, &value).unwrap();
    assert_eq!(decode(&schema, &buf).unwrap(), value);
}

#[test]
fn test_empty_list() {
    let schema = Schema::list(Schema::u64());
    let value = Value::List(vec![]);
    let buf = encode(&schema, &value).unwrap();
    assert_eq!(&buf[..], &[0, 0, 0, 0]);
    assert_eq!(decode(&schema, &buf).unwrap(), value);
}

#[test]
fn test_list_of_tuples() {
    let schema = Schema::list(Schema::tuple(vec![Schema::u8(), Schema::u8()]));
    let value = Value::List(vec![
        Value::Tuple(u8s(&[1, 1])),
        Value::Tuple(u8s(&[2, 2])),
        Value::Tuple(u8s(&[3, 3])),
    ]);
    assert_eq!(size(&schema, &value).unwrap(), 10);

    let buf = encode(&schema, &value).unwrap();
    assert_eq!(&buf[..], &[3, 0, 0, 0, 1, 1, 2, 2, 3, 3]);
    assert_eq!(decode(&schema, &buf).unwrap(), value);
}

#[test]
fn test_tuple_containing_list() {
    let schema = Schema::tuple(vec![Schema::u8(), Schema::list(Schema::u8()), Schema::u8()]);
    let value = Value::Tuple(vec![
        Value::U8(100),
        Value::List(u8s(&[1, 3])),
        Value::U8(200),
    ]);
    assert_eq!(size(&schema, &value).unwrap(), 8);

    let buf = encode(&schema, &value).unwrap();
    assert_eq!(buf[0], 100);
    assert_eq!(&buf[1..5], &2u32.to_le_bytes());
    assert_eq!(&buf[5..7], &[1, 3]);
    assert_eq!(buf[7], 200);
    assert_eq!(decode(&schema, &buf).unwrap(), value);
}

#[test]
fn test_list_of_variable_size_elements() {
    let schema = Schema::list(Schema::list(Schema::string()));
    let value = Value::List(vec![
        Value::List(vec![]),
        Value::List(vec![Value::from("a"), Value::from("bcd")]),
        Value::List(vec![Value::from("")]),
    ]);
    // 4 + (4) + (4 + 5 + 7) + (4 + 4)
    assert_eq!(size(&schema, &value).unwrap(), 32);
    let buf = encode(&schema, &value).unwrap();
    assert_eq!(buf.len(), 32);
    assert_eq!(decode(&schema, &buf).unwrap(), value);
}

#[test]
fn test_size_table() {
    let cases = vec![
        (Schema::tuple(vec![]), Value::Tuple(vec![]), 0),
        (Schema::tuple(vec![Schema::u8()]), Value::Tuple(u8s(&[1])), 1),
        (
            Schema::tuple(vec![Schema::u8(), Schema::u16()]),
            Value::Tuple(vec![Value::U8(1), Value::U16(1)]),
            3,
        ),
        (
            Schema::tuple(vec![Schema::u8(), Schema::list(Schema::u8())]),
            Value::Tuple(vec![Value::U8(1), Value::List(u8s(&[1]))]),
            6,
        ),
        (Schema::list(Schema::u8()), Value::List(vec![]), 4),
        (Schema::list(Schema::u8()), Value::List(u8s(&[1])), 5),
        (
            Schema::list(Schema::u16()),
            Value::List(vec![Value::U16(1), Value::U16(1)]),
            8,
        ),
        (
            Schema::list(Schema::tuple(vec![Schema::u8(), Schema::u8()])),
            Value::List(vec![Value::Tuple(u8s(&[1, 1]))]),
            6,
        ),
    ];

    for (schema, value, expected) in cases {
        assert_eq!(size(&schema, &value).unwrap(), expected, "{:?}", schema);
        assert_eq!(encode(&schema, &value).unwrap().len(), expected);
    }
}

#[test]
fn test_encode_into_at_offset() {
    let schema = Schema::tuple(vec![Schema::u16(), Schema::string()]);
    let value = Value::Tuple(vec![Value::U16(0xBEEF), Value::from("ok")]);
    let mut buf = vec![0u8; 16];

    let written = encode_into(&schema, &value, &mut buf, 3).unwrap();
    assert_eq!(written, 8);
    assert_eq!(&buf[..3], &[0, 0, 0]);
    assert_eq!(&buf[3..11], &[0xEF, 0xBE, 2, 0, 0, 0, b'o', b'k']);
    assert_eq!(schema.decode(&buf, 3).unwrap(), value);

    let (decoded, consumed) = schema.decode_at(&buf, 3).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(consumed, written);
}

#[test]
fn test_encode_into_short_buffer() {
    let schema = Schema::list(Schema::u32());
    let value = Value::List(vec![Value::U32(1), Value::U32(2)]);
    let mut buf = [0x11u8; 10];
    let err = encode_into(&schema, &value, &mut buf, 0).unwrap_err();
    assert_eq!(
        err,
        CodecError::OutOfBounds {
            offset: 0,
            len: 12,
            buffer_len: 10
        }
    );
    // Rejected before anything is written.
    assert_eq!(buf, [0x11u8; 10]);
}

#[test]
fn test_deep_nesting() {
    let mut schema = Schema::u8();
    let mut value = Value::U8(42);
    for _ in 0..32 {
        schema = Schema::list(Schema::tuple(vec![schema]));
        value = Value::List(vec![Value::Tuple(vec![value])]);
    }
    let buf = encode(&schema, &value).unwrap();
    assert_eq!(buf.len(), 32 * 4 + 1);
    assert_eq!(decode(&schema, &buf).unwrap(), value);
}
