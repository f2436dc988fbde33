#![cfg(feature = "std")]

use rand::rngs::SmallRng;
use serde::Serialize;

use crate::{
    board::Board,
    codec::{Coordinate, Frame},
    commander::Commander,
    config::MatchConfig,
    transport::{timeout::ReadTimeout, Transport},
    turn::{MatchResult, MatchState, Phase, TurnError, TurnMachine},
};

/// How many refused targets a commander gets before the node picks for it.
const MAX_TARGET_ATTEMPTS: usize = 64;

/// Drives one side of a match: asks the commander for targets, moves frames
/// over the transport and feeds them to the turn machine.
pub struct PeerNode {
    commander: Box<dyn Commander>,
    machine: TurnMachine,
    transport: Box<dyn Transport>,
    shots_fired: usize,
}

/// End-of-match figures for one peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub result: Option<MatchResult>,
    pub shots_fired: usize,
    pub hits: usize,
    pub misses: usize,
    pub exchanges: usize,
}

impl PeerNode {
    /// `board` must already carry the agreed fleet. When the config sets a
    /// read timeout the transport is wrapped in [`ReadTimeout`].
    pub fn new(
        config: &MatchConfig,
        board: Board,
        commander: Box<dyn Commander>,
        transport: Box<dyn Transport>,
    ) -> Result<Self, TurnError> {
        if board.size() != config.grid_size {
            return Err(TurnError::GridMismatch {
                expected: config.grid_size,
                actual: board.size(),
            });
        }
        let machine = TurnMachine::new(board, config.fleet, config.role.first_turn())?;
        let transport: Box<dyn Transport> = match config.read_timeout {
            Some(limit) => Box::new(ReadTimeout::new(transport, limit)),
            None => transport,
        };
        Ok(Self {
            commander,
            machine,
            transport,
            shots_fired: 0,
        })
    }

    /// Let `commander` place the configured fleet on a fresh board, then
    /// build the node.
    pub fn prepare(
        config: &MatchConfig,
        mut commander: Box<dyn Commander>,
        transport: Box<dyn Transport>,
        rng: &mut SmallRng,
    ) -> Result<Self, TurnError> {
        let mut board = Board::with_size(config.grid_size)?;
        commander.place_fleet(rng, &mut board, config.fleet.classes())?;
        Self::new(config, board, commander, transport)
    }

    /// Play until the match is over. Transport failures and protocol
    /// violations end the match as [`MatchResult::Aborted`]; the transport is
    /// closed either way.
    pub async fn run(&mut self, rng: &mut SmallRng) -> MatchResult {
        self.commander.on_state_changed(self.machine.state());
        let result = loop {
            let step = match self.machine.phase() {
                Phase::AwaitingLocalMove => self.fire(rng).await,
                Phase::ShotSentAwaitingResult { target } => self.await_result(target).await,
                Phase::ShotReceivedAwaitingReply => self.answer().await,
                Phase::MatchOver(result) => break result,
            };
            if let Err(e) = step {
                log::warn!("match aborted: {:#}", e);
                self.machine.abort();
            }
            self.commander.on_state_changed(self.machine.state());
        };

        match result {
            MatchResult::Win => log::info!("all enemy ships destroyed after {} shots", self.shots_fired),
            MatchResult::Loss => log::info!("fleet destroyed"),
            MatchResult::Aborted => log::info!("match aborted after {} exchanges", self.machine.exchanges()),
        }
        if let Err(e) = self.transport.close().await {
            log::debug!("closing transport failed: {:#}", e);
        }
        self.commander.on_match_over(result, self.machine.state());
        result
    }

    async fn fire(&mut self, rng: &mut SmallRng) -> anyhow::Result<()> {
        let frame = self.pick_target(rng)?;
        self.transport.send(frame).await?;
        self.shots_fired += 1;
        Ok(())
    }

    fn pick_target(&mut self, rng: &mut SmallRng) -> Result<Frame, TurnError> {
        let mut last_err = None;
        for _ in 0..MAX_TARGET_ATTEMPTS {
            let target = self.commander.select_target(rng, self.machine.state());
            match self.machine.submit_local_target(target) {
                Ok(frame) => {
                    log::debug!("firing at {}", target);
                    return Ok(frame);
                }
                Err(e) if e.is_rejected_target() => {
                    log::debug!("target {} refused: {}", target, e);
                    self.commander.on_target_rejected(target, &e);
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        let fallback = self.machine.state().shadow().untargeted().next();
        match (fallback, last_err) {
            (Some(target), _) => {
                log::warn!("commander kept choosing invalid targets, firing at {}", target);
                self.machine.submit_local_target(target)
            }
            (None, Some(e)) => Err(e),
            (None, None) => Err(TurnError::WrongPhase(self.machine.phase())),
        }
    }

    async fn await_result(&mut self, target: Coordinate) -> anyhow::Result<()> {
        let frame = self.transport.recv().await?;
        let report = self.machine.apply_result(frame.as_bytes())?;
        log::info!(
            "shot at {} {}",
            target,
            if report.hit { "hit" } else { "missed" }
        );
        self.commander.on_shot_resolved(report.target, report.hit);
        Ok(())
    }

    async fn answer(&mut self) -> anyhow::Result<()> {
        let frame = self.transport.recv().await?;
        let reply = self.machine.apply_shot(frame.as_bytes())?;
        log::info!("opponent fired at {}: {:?}", reply.target, reply.outcome);
        self.commander.on_incoming_shot(reply.target, reply.outcome);
        self.transport.send(reply.frame).await?;
        Ok(())
    }

    pub fn state(&self) -> &MatchState {
        self.machine.state()
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.machine.result()
    }

    pub fn shots_fired(&self) -> usize {
        self.shots_fired
    }

    pub fn exchanges(&self) -> usize {
        self.machine.exchanges()
    }

    pub fn summary(&self) -> MatchSummary {
        let shadow = self.machine.state().shadow();
        MatchSummary {
            result: self.machine.result(),
            shots_fired: self.shots_fired,
            hits: shadow.hit_count(),
            misses: shadow.miss_count(),
            exchanges: self.machine.exchanges(),
        }
    }
}
