//! Match configuration: grid limits, fleet presets and connection role.

use core::time::Duration;

use crate::ship::ShipClass;
use crate::turn::TurnOwner;

/// Largest playable grid; boards are stored in 128-bit bitboards.
pub const MAX_GRID_SIZE: u8 = 10;
pub const DEFAULT_GRID_SIZE: u8 = 10;
/// Exclusive upper bound of a coordinate component on the wire (4 bits).
pub const COORD_LIMIT: u8 = 16;
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(120);
/// Read timeout when a person is at the keyboard; placing a fleet by hand
/// and thinking over shots can take minutes.
pub const HUMAN_READ_TIMEOUT: Duration = Duration::from_secs(30 * 60);

pub const STANDARD_FLEET: [ShipClass; 5] = [
    ShipClass::new("Carrier", 5),
    ShipClass::new("Battleship", 4),
    ShipClass::new("Cruiser", 3),
    ShipClass::new("Submarine", 3),
    ShipClass::new("Destroyer", 2),
];

pub const SKIRMISH_FLEET: [ShipClass; 2] = [
    ShipClass::new("Battleship", 5),
    ShipClass::new("Submarine", 2),
];

/// Fleet composition. There is no game-over frame, so both peers must agree
/// on the preset: a peer wins once it has scored one hit per fleet cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum FleetPreset {
    /// Carrier, Battleship, two Cruiser-sized ships and a Destroyer (17 cells).
    #[default]
    Standard,
    /// One Battleship and one Submarine (7 cells).
    Skirmish,
}

impl FleetPreset {
    pub fn classes(self) -> &'static [ShipClass] {
        match self {
            FleetPreset::Standard => &STANDARD_FLEET,
            FleetPreset::Skirmish => &SKIRMISH_FLEET,
        }
    }

    /// Total ship cells a player has to hit to win.
    pub fn total_cells(self) -> usize {
        self.classes().iter().map(ShipClass::length).sum()
    }
}

/// Which side of the connection setup this peer played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Listened and accepted the connection. Moves first.
    Acceptor,
    /// Dialed the acceptor.
    Initiator,
}

impl Role {
    pub fn first_turn(self) -> TurnOwner {
        match self {
            Role::Acceptor => TurnOwner::Local,
            Role::Initiator => TurnOwner::Remote,
        }
    }
}

/// Settings for one match, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub grid_size: u8,
    pub fleet: FleetPreset,
    pub role: Role,
    /// `None` waits for the opponent forever.
    pub read_timeout: Option<Duration>,
}

impl MatchConfig {
    pub fn new(role: Role) -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            fleet: FleetPreset::default(),
            role,
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
        }
    }

    pub fn with_grid_size(mut self, grid_size: u8) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_fleet(mut self, fleet: FleetPreset) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }
}
