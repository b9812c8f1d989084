//! The outer match loop.
//!
//! ## Lifecycle
//!
//! A `MatchEngine` starts `InProgress` with the first hand-out already dealt.
//! Each [`play_round`](MatchEngine::play_round) re-deals first if every
//! hand is empty, then resolves one round. After the round the engine checks
//! whether the match is over:
//!
//! - someone reached the loss threshold, and either the termination policy
//!   is `Immediate` or the current hand-out is finished
//! - the hand-out limit was reached and the last hand-out is finished
//!
//! A finished match has a frozen [`FinalReport`]. Any error moves the
//! engine to `Aborted`: the error is returned once, every later call returns
//! [`EngineError::MatchAborted`] and no report is ever produced.

use im::Vector;
use log::{error, info};

use super::score::{EndReason, FinalReport, ScoreBook};
use super::state::MatchState;
use crate::core::{EngineError, GameRng, MatchConfig, PlayerId, PlayerMap, TerminationPolicy};
use crate::rules::{RoundOutcome, RoundResolver};
use crate::strategy::{BotKind, Strategy};

/// A named player and the strategy deciding for it.
pub struct Seat {
    pub name: String,
    pub strategy: Box<dyn Strategy>,
}

impl Seat {
    pub fn new(name: impl Into<String>, strategy: impl Strategy + 'static) -> Self {
        Self {
            name: name.into(),
            strategy: Box::new(strategy),
        }
    }

    /// A bot seat named after its kind.
    pub fn bot(kind: BotKind, rng: GameRng) -> Self {
        Self {
            name: kind.name().to_string(),
            strategy: kind.build(rng),
        }
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seat").field("name", &self.name).finish_non_exhaustive()
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// Where the match stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPhase {
    InProgress,
    Finished(EndReason),
    Aborted,
}

/// Drives a match from the first deal to the final report.
pub struct MatchEngine {
    config: MatchConfig,
    state: MatchState,
    strategies: PlayerMap<Box<dyn Strategy>>,
    resolver: RoundResolver,
    rng: GameRng,
    phase: MatchPhase,
    history: Vector<RoundOutcome>,
    report: Option<FinalReport>,
}

impl MatchEngine {
    /// Validate the configuration, seat the players and deal.
    pub fn new(config: MatchConfig, seats: Vec<Seat>) -> Result<Self, EngineError> {
        config.validate()?;
        Self::check_seats(&config, seats.len())?;

        let mut rng = GameRng::new(config.seed).for_context("deal");
        let (names, strategies): (Vec<String>, Vec<Box<dyn Strategy>>) =
            seats.into_iter().map(|s| (s.name, s.strategy)).unzip();
        let state = MatchState::new(names, config.hand_size, &mut rng)?;

        info!(
            "match started: {} players, threshold {}, seed {}",
            config.players, config.loss_threshold, config.seed
        );
        Ok(Self::assemble(config, state, strategies, rng))
    }

    /// A match between bots. Each bot gets its own random stream derived
    /// from the match seed and its seat.
    pub fn with_bots(config: MatchConfig, lineup: &[BotKind]) -> Result<Self, EngineError> {
        let base = GameRng::new(config.seed);
        let seats = lineup
            .iter()
            .enumerate()
            .map(|(i, &kind)| Seat::bot(kind, base.for_context(&format!("seat-{}", i))))
            .collect();
        Self::new(config, seats)
    }

    /// Continue from a prepared position instead of a fresh deal.
    ///
    /// `config.players` must match the position; later hand-outs are dealt
    /// from the configured seed.
    pub fn from_state(
        config: MatchConfig,
        state: MatchState,
        strategies: Vec<Box<dyn Strategy>>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Self::check_seats(&config, state.player_count())?;
        Self::check_seats(&config, strategies.len())?;

        let rng = GameRng::new(config.seed).for_context("deal");
        Ok(Self::assemble(config, state, strategies, rng))
    }

    fn check_seats(config: &MatchConfig, seats: usize) -> Result<(), EngineError> {
        if seats != config.players {
            return Err(EngineError::InvalidConfig(format!(
                "configured for {} players but {} seats given",
                config.players, seats
            )));
        }
        Ok(())
    }

    fn assemble(
        config: MatchConfig,
        state: MatchState,
        strategies: Vec<Box<dyn Strategy>>,
        rng: GameRng,
    ) -> Self {
        Self {
            resolver: RoundResolver::new(config.fault_policy),
            config,
            state,
            strategies: PlayerMap::from_vec(strategies),
            rng,
            phase: MatchPhase::InProgress,
            history: Vector::new(),
            report: None,
        }
    }

    // =========================================================================
    // Playing
    // =========================================================================

    /// Play one round, dealing a new hand-out first if needed.
    pub fn play_round(&mut self) -> Result<RoundOutcome, EngineError> {
        match self.phase {
            MatchPhase::InProgress => {}
            MatchPhase::Finished(_) => return Err(EngineError::MatchOver),
            MatchPhase::Aborted => return Err(EngineError::MatchAborted),
        }

        match self.step() {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                error!("match aborted in round {}: {}", self.state.rounds_played() + 1, err);
                self.phase = MatchPhase::Aborted;
                Err(err)
            }
        }
    }

    /// Play rounds until the current hand-out is exhausted or the match ends.
    pub fn play_hand_out(&mut self) -> Result<Vec<RoundOutcome>, EngineError> {
        let mut rounds = Vec::with_capacity(self.config.hand_size);
        loop {
            rounds.push(self.play_round()?);
            if self.is_over() || self.state.hands_exhausted() {
                return Ok(rounds);
            }
        }
    }

    /// Play to the end and return the final report.
    pub fn run(&mut self) -> Result<FinalReport, EngineError> {
        while !self.is_over() {
            self.play_round()?;
        }
        self.final_report().cloned()
    }

    fn step(&mut self) -> Result<RoundOutcome, EngineError> {
        if self.state.hands_exhausted() {
            self.state.redeal(self.config.hand_size, &mut self.rng)?;
            info!("hand-out {} dealt", self.state.hand_outs());
        }

        let outcome = self.resolver.resolve(&mut self.state, &mut self.strategies)?;
        self.history.push_back(outcome.clone());

        if let Some(reason) = self.end_reason() {
            let report = FinalReport::freeze(&self.state, reason);
            info!(
                "match finished after {} rounds: {:?}, winners {:?}",
                report.rounds, reason, report.winners
            );
            self.report = Some(report);
            self.phase = MatchPhase::Finished(reason);
        }
        Ok(outcome)
    }

    fn end_reason(&self) -> Option<EndReason> {
        let (player, penalty) = self.state.worst_player();
        let hand_out_done = self.state.hands_exhausted();

        if penalty >= self.config.loss_threshold {
            let freeze = match self.config.termination {
                TerminationPolicy::Immediate => true,
                TerminationPolicy::FinishHandOut => hand_out_done,
            };
            if freeze {
                return Some(EndReason::ThresholdReached { player, penalty });
            }
        } else if hand_out_done && self.state.hand_outs() >= self.config.max_hand_outs {
            return Some(EndReason::HandOutLimit);
        }
        None
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// True once the match has finished or aborted.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase != MatchPhase::InProgress
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Live standings, during or after the match. Refused after an abort,
    /// when the totals no longer describe a playable match.
    pub fn score_book(&self) -> Result<ScoreBook<'_>, EngineError> {
        if self.phase == MatchPhase::Aborted {
            return Err(EngineError::MatchAborted);
        }
        Ok(ScoreBook::new(&self.state))
    }

    /// The frozen result. Fails while the match is running or after an abort.
    pub fn final_report(&self) -> Result<&FinalReport, EngineError> {
        match (self.phase, &self.report) {
            (MatchPhase::Aborted, _) => Err(EngineError::MatchAborted),
            (MatchPhase::Finished(_), Some(report)) => Ok(report),
            _ => Err(EngineError::NotFinished),
        }
    }

    /// Every round played so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<RoundOutcome> {
        &self.history
    }

    /// Name of a seat.
    #[must_use]
    pub fn name(&self, player: PlayerId) -> &str {
        self.state.player(player).name()
    }
}
