//! Common types: shot outcomes and the errors raised by the codec and boards.

use crate::bitboard::BitBoardError;
use core::fmt;

/// Verdict of an incoming shot against our own board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum ShotOutcome {
    /// Shot landed on open water.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot hit the last intact cell of a ship.
    Sunk,
    /// Cell was already shot at; nothing changed.
    AlreadyTaken,
}

impl ShotOutcome {
    /// Value of the hit bit sent back to the shooter.
    pub fn is_hit(self) -> bool {
        matches!(self, ShotOutcome::Hit | ShotOutcome::Sunk)
    }
}

/// A coordinate component does not fit in four bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    OutOfRange { x: u8, y: u8 },
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::OutOfRange { x, y } => {
                write!(f, "coordinate ({}, {}) does not fit in 4 bits", x, y)
            }
        }
    }
}

/// Errors decoding a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Fewer than two bytes were available.
    Malformed { len: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Malformed { len } => {
                write!(f, "malformed frame: got {} byte(s), need 2", len)
            }
        }
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Requested grid is empty or larger than the storage allows.
    GridTooLarge { size: u8 },
    /// Coordinate lies outside the configured grid.
    OutOfBounds { x: u8, y: u8 },
    /// Ship placement overlaps another ship.
    Overlap { x: u8, y: u8 },
    /// Ship endpoints are neither on one row nor on one column.
    Diagonal,
    /// Ship endpoints span the wrong number of cells.
    WrongLength { expected: usize, actual: usize },
    /// Random placement gave up.
    NoPlacement,
    /// The opponent cell was already targeted.
    DuplicateTarget { x: u8, y: u8 },
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        let narrow = |v: usize| u8::try_from(v).unwrap_or(u8::MAX);
        match err {
            BitBoardError::SizeTooLarge { n, .. } => BoardError::GridTooLarge { size: narrow(n) },
            BitBoardError::IndexOutOfBounds { x, y } => BoardError::OutOfBounds {
                x: narrow(x),
                y: narrow(y),
            },
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::GridTooLarge { size } => write!(f, "Unsupported grid size {}", size),
            BoardError::OutOfBounds { x, y } => write!(f, "({}, {}) is outside the grid", x, y),
            BoardError::Overlap { x, y } => write!(f, "({}, {}) is already occupied", x, y),
            BoardError::Diagonal => write!(f, "Ships cannot be diagonal"),
            BoardError::WrongLength { expected, actual } => {
                write!(f, "Ship must be exactly {} fields long, got {}", expected, actual)
            }
            BoardError::NoPlacement => write!(f, "Unable to place ship"),
            BoardError::DuplicateTarget { x, y } => write!(f, "({}, {}) was already targeted", x, y),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoordinateError {}
#[cfg(feature = "std")]
impl std::error::Error for FrameError {}
#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
