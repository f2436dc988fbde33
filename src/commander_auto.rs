use alloc::vec::Vec;
use rand::rngs::SmallRng;

use crate::{
    board::Board,
    codec::Coordinate,
    common::BoardError,
    config::FleetPreset,
    ship::ShipClass,
    targeting,
    turn::MatchState,
};

use crate::commander::Commander;

/// Computer commander: random placement, probability-based targeting.
pub struct AutoCommander {
    lengths: Vec<usize>,
}

impl AutoCommander {
    /// `fleet` must be the preset the opponent plays with.
    pub fn new(fleet: FleetPreset) -> Self {
        Self {
            lengths: fleet.classes().iter().map(ShipClass::length).collect(),
        }
    }
}

impl Commander for AutoCommander {
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &[ShipClass],
    ) -> Result<(), BoardError> {
        board.place_fleet_randomly(rng, fleet)
    }

    fn select_target(&mut self, rng: &mut SmallRng, state: &MatchState) -> Coordinate {
        targeting::choose_target(state.shadow(), &self.lengths, rng).unwrap_or_default()
    }
}
