use broadside::codec::{decode, encode};
use broadside::{Coordinate, Frame, FrameError, ShotMessage};
use proptest::prelude::*;

fn c(x: u8, y: u8) -> Coordinate {
    Coordinate::new(x, y).unwrap()
}

#[test]
fn hit_result_packs_into_two_bytes() {
    let msg = ShotMessage::result(c(5, 9), true);
    let frame = encode(&msg);
    assert_eq!(frame.as_bytes(), &[0x59, 0x80]);
    assert_eq!(decode(&[0x59, 0x80]).unwrap(), msg);
}

#[test]
fn request_leaves_hit_and_padding_clear() {
    let frame = ShotMessage::request(c(15, 0)).encode();
    assert_eq!(frame.as_bytes(), &[0xf0, 0x00]);
}

#[test]
fn padding_bits_are_ignored_on_decode() {
    let msg = decode(&[0x34, 0x7f]).unwrap();
    assert_eq!(msg, ShotMessage::result(c(3, 4), false));
    let msg = decode(&[0x34, 0xff]).unwrap();
    assert_eq!(msg, ShotMessage::result(c(3, 4), true));
}

#[test]
fn short_input_is_malformed() {
    assert_eq!(decode(&[]), Err(FrameError::Malformed { len: 0 }));
    assert_eq!(decode(&[0x12]), Err(FrameError::Malformed { len: 1 }));
}

#[test]
fn trailing_bytes_are_ignored() {
    let msg = decode(&[0x21, 0x80, 0xde, 0xad]).unwrap();
    assert_eq!(msg, ShotMessage::result(c(2, 1), true));
}

#[test]
fn coordinates_must_fit_four_bits() {
    assert!(Coordinate::new(15, 15).is_ok());
    assert!(Coordinate::new(16, 0).is_err());
    assert!(Coordinate::new(0, 16).is_err());
}

#[test]
fn coordinate_display_uses_column_letter() {
    assert_eq!(c(0, 4).to_string(), "A4");
    assert_eq!(c(9, 0).to_string(), "J0");
    assert_eq!(format!("{:?}", Frame::from_bytes([0x59, 0x80])), "Frame(0x59 0x80)");
}

proptest! {
    #[test]
    fn any_message_survives_the_wire(x in 0u8..16, y in 0u8..16, hit in any::<bool>()) {
        let msg = ShotMessage::result(Coordinate::new(x, y).unwrap(), hit);
        let frame = encode(&msg);
        prop_assert_eq!(frame.as_bytes()[1] & 0x7f, 0);
        prop_assert_eq!(decode(frame.as_ref()).unwrap(), msg);
    }

    #[test]
    fn any_two_bytes_decode(a in any::<u8>(), b in any::<u8>()) {
        let msg = decode(&[a, b]).unwrap();
        prop_assert_eq!(msg.coordinate.x(), a >> 4);
        prop_assert_eq!(msg.coordinate.y(), a & 0x0f);
        prop_assert_eq!(msg.hit, b & 0x80 != 0);
    }
}
