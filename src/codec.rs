//! Coordinates and the fixed two-byte shot frame.
//!
//! ```text
//! bit:   15 14 13 12 | 11 10 9 8 | 7   | 6 5 4 3 2 1 0
//! field:     X        |     Y     | Hit | padding (= 0)
//! ```
//!
//! The same frame carries a shot request and the result echoed back for it;
//! which one a frame is depends on the receiver's turn phase. The codec does
//! no range checking beyond the 4-bit limit; grid bounds belong to the board.

use core::fmt;

use crate::common::{CoordinateError, FrameError};
use crate::config::COORD_LIMIT;

/// Length of every frame on the wire.
pub const FRAME_LEN: usize = 2;

const HIT_BIT: u8 = 0x80;

/// A grid cell. Both components fit in four bits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Coordinate {
    x: u8,
    y: u8,
}

impl Coordinate {
    pub fn new(x: u8, y: u8) -> Result<Self, CoordinateError> {
        if x >= COORD_LIMIT || y >= COORD_LIMIT {
            return Err(CoordinateError::OutOfRange { x, y });
        }
        Ok(Self { x, y })
    }

    /// Column.
    pub const fn x(&self) -> u8 {
        self.x
    }

    /// Row.
    pub const fn y(&self) -> u8 {
        self.y
    }

    fn from_byte(byte: u8) -> Self {
        Self {
            x: byte >> 4,
            y: byte & 0x0f,
        }
    }

    fn to_byte(self) -> u8 {
        (self.x << 4) | self.y
    }
}

/// Column letter followed by row number, e.g. `A4` for (0, 4).
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.x) as char, self.y)
    }
}

/// A shot request, or the result echoed back for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotMessage {
    pub coordinate: Coordinate,
    pub hit: bool,
}

impl ShotMessage {
    /// Request to fire at `coordinate`; the hit bit stays clear.
    pub fn request(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            hit: false,
        }
    }

    pub fn result(coordinate: Coordinate, hit: bool) -> Self {
        Self { coordinate, hit }
    }

    pub fn encode(&self) -> Frame {
        encode(self)
    }
}

/// Exactly one protocol message.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Frame(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// A full frame always decodes; padding bits are ignored.
    pub fn decode(&self) -> ShotMessage {
        ShotMessage {
            coordinate: Coordinate::from_byte(self.0[0]),
            hit: self.0[1] & HIT_BIT != 0,
        }
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({:#04x} {:#04x})", self.0[0], self.0[1])
    }
}

/// Pack a message into its frame; padding bits are always zero.
pub fn encode(msg: &ShotMessage) -> Frame {
    let flags = if msg.hit { HIT_BIT } else { 0 };
    Frame([msg.coordinate.to_byte(), flags])
}

/// Unpack the first two bytes of `bytes`. Trailing bytes are ignored.
pub fn decode(bytes: &[u8]) -> Result<ShotMessage, FrameError> {
    match bytes {
        [first, second, ..] => Ok(Frame([*first, *second]).decode()),
        _ => Err(FrameError::Malformed { len: bytes.len() }),
    }
}
