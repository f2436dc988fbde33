#![cfg(feature = "std")]

use std::io::{self, BufRead, BufReader, Write};

use rand::rngs::SmallRng;

use crate::{
    board::{Board, ShadowBoard},
    codec::Coordinate,
    common::{BoardError, ShotOutcome},
    config::FleetPreset,
    input::{parse_placement, parse_target},
    render::render_boards,
    ship::{Ship, ShipClass},
    targeting,
    turn::{MatchResult, MatchState, Phase, TurnError},
};

use crate::commander::Commander;

/// Terminal commander. Reads placements and targets line by line and prints
/// both boards before each of our turns.
///
/// End of input counts as an empty line, so placement falls back to random
/// and targeting to the suggested cell.
pub struct CliCommander {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
    lengths: Vec<usize>,
    color: bool,
}

impl CliCommander {
    /// Talk to the terminal on stdin and stdout.
    pub fn new(fleet: FleetPreset, color: bool) -> Self {
        Self::with_io(
            fleet,
            color,
            Box::new(BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        )
    }

    pub fn with_io(
        fleet: FleetPreset,
        color: bool,
        input: Box<dyn BufRead + Send>,
        output: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            input,
            output,
            lengths: fleet.classes().iter().map(ShipClass::length).collect(),
            color,
        }
    }

    /// Trimmed next line; `None` on end of input or a read error.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn prompt(&mut self, text: &str) {
        let _ = write!(self.output, "{}: ", text);
        let _ = self.output.flush();
    }

    fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }

    fn warn(&mut self, text: &str) {
        if self.color {
            self.say(&format!("\x1b[31m{}\x1b[0m", text));
        } else {
            self.say(text);
        }
    }

    fn show(&mut self, board: &Board, shadow: &ShadowBoard) {
        let text = render_boards(board, shadow, self.color);
        let _ = write!(self.output, "\n{}", text);
    }
}

impl Commander for CliCommander {
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &[ShipClass],
    ) -> Result<(), BoardError> {
        let empty = ShadowBoard::with_size(board.size())?;
        for &class in fleet {
            loop {
                self.show(board, &empty);
                self.prompt(&format!(
                    "Place your {} (length: {}) formatted as XX - YY (e.g. A1-A5), enter for random",
                    class.name(),
                    class.length()
                ));
                let line = self.read_line().unwrap_or_default();
                if line.is_empty() {
                    let ship = board.random_placement(rng, class)?;
                    board.place(ship)?;
                    break;
                }
                let placed = match parse_placement(&line, board.size()) {
                    Ok((a, b)) => Ship::between(class, a, b)
                        .and_then(|ship| board.place(ship))
                        .map_err(|e| e.to_string()),
                    Err(e) => Err(e.to_string()),
                };
                match placed {
                    Ok(_) => break,
                    Err(e) => self.warn(&e),
                }
            }
        }
        self.show(board, &empty);
        Ok(())
    }

    fn select_target(&mut self, rng: &mut SmallRng, state: &MatchState) -> Coordinate {
        let shadow = state.shadow();
        let suggestion = targeting::choose_target(shadow, &self.lengths, rng).unwrap_or_default();
        loop {
            self.prompt(&format!("Shoot (Format XY, e.g. A4) [{}]", suggestion));
            let line = match self.read_line() {
                Some(line) => line,
                None => return suggestion,
            };
            if line.is_empty() {
                return suggestion;
            }
            match parse_target(&line, shadow.size()) {
                Ok(target) => return target,
                Err(e) => self.warn(&e.to_string()),
            }
        }
    }

    fn on_target_rejected(&mut self, target: Coordinate, reason: &TurnError) {
        self.warn(&format!("Cannot shoot at {}: {}", target, reason));
    }

    fn on_state_changed(&mut self, state: &MatchState) {
        match state.phase() {
            Phase::AwaitingLocalMove => self.show(state.board(), state.shadow()),
            Phase::ShotReceivedAwaitingReply => self.say("Waiting for opponent's move..."),
            _ => {}
        }
    }

    fn on_shot_resolved(&mut self, target: Coordinate, hit: bool) {
        self.say(&format!("{}: {}", target, if hit { "Hit!" } else { "Miss." }));
    }

    fn on_incoming_shot(&mut self, target: Coordinate, outcome: ShotOutcome) {
        let what = match outcome {
            ShotOutcome::Miss => "miss",
            ShotOutcome::Hit => "hit",
            ShotOutcome::Sunk => "ship sunk",
            ShotOutcome::AlreadyTaken => "already shot there",
        };
        self.say(&format!("Opponent fired at {}: {}", target, what));
    }

    fn on_match_over(&mut self, result: MatchResult, state: &MatchState) {
        self.show(state.board(), state.shadow());
        match result {
            MatchResult::Win => self.say("You won!"),
            MatchResult::Loss => self.say("You lost!"),
            MatchResult::Aborted => self.warn("The match was aborted."),
        }
        let _ = self.output.flush();
    }
}
