//! Ship classes and ship layouts.

use alloc::vec::Vec;
use core::fmt;

use crate::codec::Coordinate;
use crate::common::BoardError;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
}

impl ShipClass {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Index of a ship within the board that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(pub usize);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A ship layout: its class, the ordered cells it covers and how many of
/// those cells are still intact.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    class: ShipClass,
    cells: Vec<Coordinate>,
    remaining: usize,
}

impl Ship {
    /// Lay out a ship starting at `origin` and extending right or down.
    pub fn new(
        class: ShipClass,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<Self, BoardError> {
        let mut cells = Vec::with_capacity(class.length());
        for i in 0..class.length() {
            let step = i as u8;
            let (x, y) = match orientation {
                Orientation::Horizontal => (origin.x().saturating_add(step), origin.y()),
                Orientation::Vertical => (origin.x(), origin.y().saturating_add(step)),
            };
            let cell = Coordinate::new(x, y).map_err(|_| BoardError::OutOfBounds { x, y })?;
            cells.push(cell);
        }
        Ok(Self::from_cells(class, cells))
    }

    /// Lay out a ship between two end cells, in either order.
    pub fn between(class: ShipClass, a: Coordinate, b: Coordinate) -> Result<Self, BoardError> {
        if a.x() != b.x() && a.y() != b.y() {
            return Err(BoardError::Diagonal);
        }
        let span = a.x().abs_diff(b.x()).max(a.y().abs_diff(b.y())) as usize + 1;
        if span != class.length() {
            return Err(BoardError::WrongLength {
                expected: class.length(),
                actual: span,
            });
        }
        let origin = a.min(b);
        let orientation = if a.y() == b.y() && a.x() != b.x() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        Self::new(class, origin, orientation)
    }

    fn from_cells(class: ShipClass, cells: Vec<Coordinate>) -> Self {
        let remaining = cells.len();
        Self {
            class,
            cells,
            remaining,
        }
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn length(&self) -> usize {
        self.cells.len()
    }

    /// Cells in order from the origin.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub fn occupies(&self, cell: Coordinate) -> bool {
        self.cells.contains(&cell)
    }

    /// Intact cells left.
    pub fn remaining_hits(&self) -> usize {
        self.remaining
    }

    pub fn is_destroyed(&self) -> bool {
        self.remaining == 0
    }

    /// The board calls this once per newly hit cell.
    pub(crate) fn register_hit(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", cells: {:?}, remaining: {} }}",
            self.class.name(),
            self.cells,
            self.remaining,
        )
    }
}
