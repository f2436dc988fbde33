//! Own-fleet board and the shadow board of what we know about the opponent.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::codec::Coordinate;
use crate::common::{BoardError, ShotOutcome};
use crate::config::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
use crate::ship::{Orientation, Ship, ShipClass, ShipId};

/// Bitboard wide enough for the largest supported grid.
pub type Grid = BitBoard<u128, { MAX_GRID_SIZE as usize }>;

/// State of one cell of our own board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum CellState {
    Empty,
    Ship,
    Hit,
    Miss,
    /// Hit cell of a ship that has been destroyed.
    Sunk,
}

/// What we have learned about one opponent cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum ShadowCell {
    Unknown,
    Hit,
    Miss,
}

fn check_size(size: u8) -> Result<u8, BoardError> {
    if size == 0 || size > MAX_GRID_SIZE {
        return Err(BoardError::GridTooLarge { size });
    }
    Ok(size)
}

fn in_grid(size: u8, cell: Coordinate) -> Result<(usize, usize), BoardError> {
    if cell.x() >= size || cell.y() >= size {
        return Err(BoardError::OutOfBounds {
            x: cell.x(),
            y: cell.y(),
        });
    }
    Ok((cell.x() as usize, cell.y() as usize))
}

/// Our own board: ship placements plus every shot the opponent fired at it.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    ships: Vec<Ship>,
    occupied: Grid,
    hits: Grid,
    misses: Grid,
}

impl Board {
    /// Empty board of the default size.
    pub fn new() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            ships: Vec::new(),
            occupied: Grid::new(),
            hits: Grid::new(),
            misses: Grid::new(),
        }
    }

    /// Empty `size`×`size` board; `size` must be in `1..=MAX_GRID_SIZE`.
    pub fn with_size(size: u8) -> Result<Self, BoardError> {
        Ok(Self {
            size: check_size(size)?,
            ..Self::new()
        })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn contains(&self, cell: Coordinate) -> bool {
        in_grid(self.size, cell).is_ok()
    }

    /// Record a ship. Nothing changes if any of its cells is off the grid or
    /// already taken.
    pub fn place(&mut self, ship: Ship) -> Result<ShipId, BoardError> {
        let mut mask = Grid::new();
        for &cell in ship.cells() {
            let (x, y) = in_grid(self.size, cell)?;
            if self.occupied.get(x, y)? || mask.get(x, y)? {
                return Err(BoardError::Overlap {
                    x: cell.x(),
                    y: cell.y(),
                });
            }
            mask.set(x, y)?;
        }
        self.occupied |= mask;
        let id = ShipId(self.ships.len());
        self.ships.push(ship);
        Ok(id)
    }

    /// Apply an opponent shot. Replaying a shot returns `AlreadyTaken` and
    /// leaves the board untouched.
    pub fn receive_shot(&mut self, cell: Coordinate) -> Result<ShotOutcome, BoardError> {
        let (x, y) = in_grid(self.size, cell)?;
        if self.hits.get(x, y)? || self.misses.get(x, y)? {
            return Ok(ShotOutcome::AlreadyTaken);
        }
        match self.ships.iter_mut().find(|ship| ship.occupies(cell)) {
            Some(ship) => {
                self.hits.set(x, y)?;
                ship.register_hit();
                if ship.is_destroyed() {
                    Ok(ShotOutcome::Sunk)
                } else {
                    Ok(ShotOutcome::Hit)
                }
            }
            None => {
                self.misses.set(x, y)?;
                Ok(ShotOutcome::Miss)
            }
        }
    }

    /// `true` once every placed ship is destroyed.
    pub fn is_fleet_destroyed(&self) -> bool {
        self.ships.iter().all(Ship::is_destroyed)
    }

    /// State of `cell`; cells off the grid read as `Empty`.
    pub fn cell(&self, cell: Coordinate) -> CellState {
        let Ok((x, y)) = in_grid(self.size, cell) else {
            return CellState::Empty;
        };
        if self.misses.get(x, y).unwrap_or(false) {
            return CellState::Miss;
        }
        match self.ship_at(cell) {
            Some((_, ship)) if self.hits.get(x, y).unwrap_or(false) => {
                if ship.is_destroyed() {
                    CellState::Sunk
                } else {
                    CellState::Hit
                }
            }
            Some(_) => CellState::Ship,
            None => CellState::Empty,
        }
    }

    /// The ship covering `cell`, if any.
    pub fn ship_at(&self, cell: Coordinate) -> Option<(ShipId, &Ship)> {
        self.ships
            .iter()
            .enumerate()
            .find(|(_, ship)| ship.occupies(cell))
            .map(|(i, ship)| (ShipId(i), ship))
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Number of cells covered by ships.
    pub fn fleet_cells(&self) -> usize {
        self.occupied.count_ones()
    }

    pub fn hits(&self) -> Grid {
        self.hits
    }

    /// A random ship of `class` that fits the grid without overlap.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        class: ShipClass,
    ) -> Result<Ship, BoardError> {
        let len = class.length();
        let size = self.size as usize;
        if len == 0 || len > size {
            return Err(BoardError::NoPlacement);
        }
        for _ in 0..100 {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => (size - len, size - 1),
                Orientation::Vertical => (size - 1, size - len),
            };
            let x = rng.random_range(0..=max_x) as u8;
            let y = rng.random_range(0..=max_y) as u8;
            let origin = Coordinate::new(x, y).map_err(|_| BoardError::OutOfBounds { x, y })?;
            let ship = Ship::new(class, origin, orientation)?;
            let free = ship.cells().iter().all(|c| {
                self.occupied
                    .get(c.x() as usize, c.y() as usize)
                    .map(|taken| !taken)
                    .unwrap_or(false)
            });
            if free {
                return Ok(ship);
            }
        }
        Err(BoardError::NoPlacement)
    }

    /// Place every class of `fleet` at random.
    pub fn place_fleet_randomly<R: Rng>(
        &mut self,
        rng: &mut R,
        fleet: &[ShipClass],
    ) -> Result<(), BoardError> {
        for &class in fleet {
            let ship = self.random_placement(rng, class)?;
            self.place(ship)?;
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board {{\n  size: {},\n  occupied: {:?},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.size, self.occupied, self.hits, self.misses, self.ships
        )
    }
}

/// Our record of the opponent's board. Holds only hit/miss results; ship
/// identity is never transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowBoard {
    size: u8,
    hits: Grid,
    misses: Grid,
}

impl ShadowBoard {
    pub fn new() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            hits: Grid::new(),
            misses: Grid::new(),
        }
    }

    pub fn with_size(size: u8) -> Result<Self, BoardError> {
        Ok(Self {
            size: check_size(size)?,
            ..Self::new()
        })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn contains(&self, cell: Coordinate) -> bool {
        in_grid(self.size, cell).is_ok()
    }

    pub fn is_targeted(&self, cell: Coordinate) -> bool {
        self.cell(cell) != ShadowCell::Unknown
    }

    /// Record the result for a cell we fired at.
    pub fn record(&mut self, cell: Coordinate, hit: bool) -> Result<(), BoardError> {
        let (x, y) = in_grid(self.size, cell)?;
        if self.hits.get(x, y)? || self.misses.get(x, y)? {
            return Err(BoardError::DuplicateTarget {
                x: cell.x(),
                y: cell.y(),
            });
        }
        if hit {
            self.hits.set(x, y)?;
        } else {
            self.misses.set(x, y)?;
        }
        Ok(())
    }

    pub fn cell(&self, cell: Coordinate) -> ShadowCell {
        let Ok((x, y)) = in_grid(self.size, cell) else {
            return ShadowCell::Unknown;
        };
        if self.hits.get(x, y).unwrap_or(false) {
            ShadowCell::Hit
        } else if self.misses.get(x, y).unwrap_or(false) {
            ShadowCell::Miss
        } else {
            ShadowCell::Unknown
        }
    }

    pub fn hit_count(&self) -> usize {
        self.hits.count_ones()
    }

    pub fn miss_count(&self) -> usize {
        self.misses.count_ones()
    }

    pub fn hits(&self) -> Grid {
        self.hits
    }

    pub fn misses(&self) -> Grid {
        self.misses
    }

    /// Cells not fired at yet, row by row.
    pub fn untargeted(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.size)
            .flat_map(move |y| (0..self.size).map(move |x| (x, y)))
            .filter_map(|(x, y)| Coordinate::new(x, y).ok())
            .filter(move |c| !self.is_targeted(*c))
    }
}

impl Default for ShadowBoard {
    fn default() -> Self {
        Self::new()
    }
}
