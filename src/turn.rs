//! Turn state machine.
//!
//! The machine never touches the network: it turns a chosen target into an
//! outgoing frame and folds incoming frames into the boards, and the caller
//! moves the frames. One peer owns the turn at a time:
//!
//! ```text
//!  AwaitingLocalMove --submit_local_target--> ShotSentAwaitingResult
//!          ^                                          |
//!          |                                     apply_result
//!     apply_shot                                      v
//!          +---------------------------- ShotReceivedAwaitingReply
//! ```
//!
//! `MatchOver` is reached from `apply_result` (Win), `apply_shot` (Loss) or
//! `abort` (Aborted). A frame that cannot be applied also aborts the match.

use alloc::vec::Vec;
use core::fmt;

use crate::board::{Board, ShadowBoard};
use crate::codec::{self, Coordinate, Frame, ShotMessage};
use crate::common::{BoardError, FrameError, ShotOutcome};
use crate::config::FleetPreset;
use crate::ship::Ship;

/// Which peer may fire next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum TurnOwner {
    Local,
    Remote,
}

impl TurnOwner {
    pub fn other(self) -> Self {
        match self {
            TurnOwner::Local => TurnOwner::Remote,
            TurnOwner::Remote => TurnOwner::Local,
        }
    }
}

/// Final result of a match, from the local player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum MatchResult {
    Win,
    Loss,
    /// The transport failed or the peer broke the protocol.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Our turn; waiting for the commander to pick a target.
    AwaitingLocalMove,
    /// Request sent; the next frame is the result for `target`.
    ShotSentAwaitingResult { target: Coordinate },
    /// Opponent's turn; the next frame is their request.
    ShotReceivedAwaitingReply,
    MatchOver(MatchResult),
}

/// Errors raised by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// The operation does not apply in the current phase.
    WrongPhase(Phase),
    /// The target was already fired at.
    DuplicateTarget(Coordinate),
    /// The target lies outside the grid.
    OutOfBounds(Coordinate),
    /// The result frame does not echo the pending target.
    UnexpectedCoordinate {
        expected: Coordinate,
        actual: Coordinate,
    },
    Frame(FrameError),
    Board(BoardError),
    /// The placed ships do not match the agreed fleet.
    FleetMismatch { expected: usize, actual: usize },
    /// The board does not have the agreed grid size.
    GridMismatch { expected: u8, actual: u8 },
}

impl TurnError {
    /// Local input errors: nothing was sent and the commander may retry.
    pub fn is_rejected_target(&self) -> bool {
        matches!(self, TurnError::DuplicateTarget(_) | TurnError::OutOfBounds(_))
    }
}

impl From<FrameError> for TurnError {
    fn from(err: FrameError) -> Self {
        TurnError::Frame(err)
    }
}

impl From<BoardError> for TurnError {
    fn from(err: BoardError) -> Self {
        TurnError::Board(err)
    }
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::WrongPhase(phase) => write!(f, "not allowed in phase {:?}", phase),
            TurnError::DuplicateTarget(c) => write!(f, "{} was already targeted", c),
            TurnError::OutOfBounds(c) => write!(f, "{} is outside the grid", c),
            TurnError::UnexpectedCoordinate { expected, actual } => {
                write!(f, "result for {} while waiting on {}", actual, expected)
            }
            TurnError::Frame(e) => write!(f, "{}", e),
            TurnError::Board(e) => write!(f, "{}", e),
            TurnError::FleetMismatch { expected, actual } => write!(
                f,
                "fleet does not match the agreed preset ({} cells expected, {} placed)",
                expected, actual
            ),
            TurnError::GridMismatch { expected, actual } => {
                write!(f, "board is {0}x{0}, match uses {1}x{1}", actual, expected)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TurnError {}

/// Everything one peer knows about the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    board: Board,
    shadow: ShadowBoard,
    turn: TurnOwner,
    phase: Phase,
}

impl MatchState {
    /// Our fleet and the opponent's shots against it.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Our shots against the opponent.
    pub fn shadow(&self) -> &ShadowBoard {
        &self.shadow
    }

    pub fn turn(&self) -> TurnOwner {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<MatchResult> {
        match self.phase {
            Phase::MatchOver(result) => Some(result),
            _ => None,
        }
    }
}

/// Outcome of applying a result frame for our own shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultReport {
    pub target: Coordinate,
    pub hit: bool,
    /// Set when this result ended the match.
    pub result: Option<MatchResult>,
}

/// Outcome of applying an opponent request; `frame` must be sent back even
/// when the match just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReply {
    pub frame: Frame,
    pub target: Coordinate,
    pub outcome: ShotOutcome,
    pub result: Option<MatchResult>,
}

pub struct TurnMachine {
    state: MatchState,
    fleet_cells: usize,
    exchanges: usize,
}

impl TurnMachine {
    /// Start a match with a fully placed `board`. `first` owns the opening
    /// turn; the connection acceptor conventionally moves first.
    pub fn new(board: Board, fleet: FleetPreset, first: TurnOwner) -> Result<Self, TurnError> {
        let mut expected: Vec<usize> = fleet.classes().iter().map(|c| c.length()).collect();
        let mut placed: Vec<usize> = board.ships().iter().map(Ship::length).collect();
        expected.sort_unstable();
        placed.sort_unstable();
        if expected != placed {
            return Err(TurnError::FleetMismatch {
                expected: fleet.total_cells(),
                actual: board.fleet_cells(),
            });
        }
        let shadow = ShadowBoard::with_size(board.size())?;
        let phase = match first {
            TurnOwner::Local => Phase::AwaitingLocalMove,
            TurnOwner::Remote => Phase::ShotReceivedAwaitingReply,
        };
        Ok(Self {
            state: MatchState {
                board,
                shadow,
                turn: first,
                phase,
            },
            fleet_cells: fleet.total_cells(),
            exchanges: 0,
        })
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn turn(&self) -> TurnOwner {
        self.state.turn
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.state.result()
    }

    /// Completed request/result exchanges in either direction.
    pub fn exchanges(&self) -> usize {
        self.exchanges
    }

    /// Fire at `target`. On error nothing changes and nothing should be sent.
    pub fn submit_local_target(&mut self, target: Coordinate) -> Result<Frame, TurnError> {
        if self.state.phase != Phase::AwaitingLocalMove {
            return Err(TurnError::WrongPhase(self.state.phase));
        }
        if !self.state.shadow.contains(target) {
            return Err(TurnError::OutOfBounds(target));
        }
        if self.state.shadow.is_targeted(target) {
            return Err(TurnError::DuplicateTarget(target));
        }
        self.state.phase = Phase::ShotSentAwaitingResult { target };
        Ok(ShotMessage::request(target).encode())
    }

    /// Apply the opponent's verdict on our pending shot.
    pub fn apply_result(&mut self, bytes: &[u8]) -> Result<ResultReport, TurnError> {
        let Phase::ShotSentAwaitingResult { target } = self.state.phase else {
            return Err(TurnError::WrongPhase(self.state.phase));
        };
        let msg = self.fail_on_error(codec::decode(bytes).map_err(TurnError::from))?;
        if msg.coordinate != target {
            return self.fail_on_error(Err(TurnError::UnexpectedCoordinate {
                expected: target,
                actual: msg.coordinate,
            }));
        }
        let recorded = self.state.shadow.record(target, msg.hit).map_err(TurnError::from);
        self.fail_on_error(recorded)?;
        self.exchanges += 1;

        let result = if self.state.shadow.hit_count() >= self.fleet_cells {
            self.state.phase = Phase::MatchOver(MatchResult::Win);
            Some(MatchResult::Win)
        } else {
            self.state.turn = TurnOwner::Remote;
            self.state.phase = Phase::ShotReceivedAwaitingReply;
            None
        };
        Ok(ResultReport {
            target,
            hit: msg.hit,
            result,
        })
    }

    /// Apply an opponent request to our board and build the reply frame.
    pub fn apply_shot(&mut self, bytes: &[u8]) -> Result<ShotReply, TurnError> {
        if self.state.phase != Phase::ShotReceivedAwaitingReply {
            return Err(TurnError::WrongPhase(self.state.phase));
        }
        let msg = self.fail_on_error(codec::decode(bytes).map_err(TurnError::from))?;
        let target = msg.coordinate;
        let outcome = self.state.board.receive_shot(target).map_err(TurnError::from);
        let outcome = self.fail_on_error(outcome)?;
        self.exchanges += 1;

        let frame = ShotMessage::result(target, outcome.is_hit()).encode();
        let result = if self.state.board.is_fleet_destroyed() {
            self.state.phase = Phase::MatchOver(MatchResult::Loss);
            Some(MatchResult::Loss)
        } else {
            self.state.turn = TurnOwner::Local;
            self.state.phase = Phase::AwaitingLocalMove;
            None
        };
        Ok(ShotReply {
            frame,
            target,
            outcome,
            result,
        })
    }

    /// End the match as `Aborted` unless it already has a result.
    pub fn abort(&mut self) -> MatchResult {
        match self.state.phase {
            Phase::MatchOver(result) => result,
            _ => {
                self.state.phase = Phase::MatchOver(MatchResult::Aborted);
                MatchResult::Aborted
            }
        }
    }

    fn fail_on_error<T>(&mut self, res: Result<T, TurnError>) -> Result<T, TurnError> {
        if res.is_err() {
            self.abort();
        }
        res
    }
}
