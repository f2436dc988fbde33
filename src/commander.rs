use rand::rngs::SmallRng;

use crate::{
    board::Board,
    codec::Coordinate,
    common::{BoardError, ShotOutcome},
    ship::ShipClass,
    turn::{MatchResult, MatchState, TurnError},
};

/// The collaborator that places the fleet, picks targets and is told what
/// happened. Implemented by the terminal player and the automatic one.
pub trait Commander: Send {
    /// Place every class of `fleet` onto `board`.
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &[ShipClass],
    ) -> Result<(), BoardError>;

    /// Choose the next cell to fire at.
    fn select_target(&mut self, rng: &mut SmallRng, state: &MatchState) -> Coordinate;

    /// The last target was refused locally; `select_target` is asked again.
    fn on_target_rejected(&mut self, _target: Coordinate, _reason: &TurnError) {}

    /// Called after every state transition.
    fn on_state_changed(&mut self, _state: &MatchState) {}

    /// Result of our own shot.
    fn on_shot_resolved(&mut self, _target: Coordinate, _hit: bool) {}

    /// An opponent shot was applied to our board.
    fn on_incoming_shot(&mut self, _target: Coordinate, _outcome: ShotOutcome) {}

    fn on_match_over(&mut self, _result: MatchResult, _state: &MatchState) {}
}
