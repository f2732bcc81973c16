use schema_codec::bits::{pack, try_unpack, unpack, Flags};
use schema_codec::{from_bytes, to_bytes, CodecError};

#[test]
fn test_bit_patterns() {
    let all = [true; 8];
    assert_eq!(pack(all), 255);
    assert_eq!(unpack(255), all);

    let none = [false; 8];
    assert_eq!(pack(none), 0);
    assert_eq!(unpack(0), none);

    let patterns = [
        [true, false, true, false, true, false, true, false],
        [false, true, false, true, false, true, false, true],
        [false, false, false, false, true, true, true, true],
        [true, true, true, true, false, false, false, false],
    ];
    let expected = [0b1010_1010, 0b0101_0101, 0b0000_1111, 0b1111_0000];
    for (bits, byte) in patterns.iter().zip(expected) {
        assert_eq!(pack(*bits), byte);
        assert_eq!(unpack(byte), *bits);
    }
}

#[test]
fn test_first_flag_is_most_significant() {
    let mut bits = [false; 8];
    bits[0] = true;
    assert_eq!(pack(bits), 0x80);

    let mut bits = [false; 8];
    bits[7] = true;
    assert_eq!(pack(bits), 0x01);
}

#[test]
fn test_every_byte_round_trips() {
    for byte in 0..=u8::MAX {
        assert_eq!(pack(unpack(byte)), byte);
    }
}

#[test]
fn test_try_unpack_range() {
    assert_eq!(try_unpack(0).unwrap(), [false; 8]);
    assert_eq!(try_unpack(255).unwrap(), [true; 8]);
    assert_eq!(try_unpack(256).unwrap_err(), CodecError::BitRange(256));
    assert_eq!(try_unpack(-1).unwrap_err(), CodecError::BitRange(-1));
}

#[test]
fn test_flags_typed() {
    let flags = Flags([true, false, false, true, false, false, false, true]);
    let buf = to_bytes(&flags).unwrap();
    assert_eq!(&buf[..], &[0b1001_0001]);

    let decoded: Flags = from_bytes(&buf).unwrap();
    assert_eq!(decoded, flags);
    assert_eq!(u8::from(decoded), 0b1001_0001);
    assert_eq!(Flags::from(0b1001_0001), flags);
}
