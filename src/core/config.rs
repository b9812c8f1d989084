//! Match configuration.
//!
//! `MatchConfig::default()` is the classic game: 66 points loses, 10 cards
//! per hand. Builder methods adjust individual settings.

use serde::{Deserialize, Serialize};

use super::deck::Deck;
use super::error::EngineError;
use crate::board::ROW_COUNT;

/// What the engine does when a strategy returns an illegal choice.
///
/// The policy is fixed for the whole match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultPolicy {
    /// End the match with an error naming the player.
    #[default]
    Abort,
    /// Substitute a deterministic choice: the lowest card in hand, or the
    /// row with the fewest penalty points (lowest index on ties).
    Fallback,
}

/// When scores freeze after a player reaches the loss threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationPolicy {
    /// Play out the current hand-out, then freeze.
    #[default]
    FinishHandOut,
    /// Freeze at the end of the round in which the threshold was reached.
    Immediate,
}

/// Match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of players (at least 2).
    pub players: usize,

    /// A player whose penalty total reaches this value ends the match.
    pub loss_threshold: u32,

    /// Cards dealt to each player per hand-out (also the number of rounds
    /// in a hand-out).
    pub hand_size: usize,

    /// Seed for deck shuffles and random strategies.
    pub seed: u64,

    /// Handling of illegal strategy choices.
    pub fault_policy: FaultPolicy,

    /// When scores freeze once the threshold is reached.
    pub termination: TerminationPolicy,

    /// Upper bound on hand-outs. A match that has not reached the threshold
    /// by then ends anyway.
    pub max_hand_outs: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            players: 4,
            loss_threshold: 66,
            hand_size: 10,
            seed: 42,
            fault_policy: FaultPolicy::Abort,
            termination: TerminationPolicy::FinishHandOut,
            max_hand_outs: 10_000,
        }
    }
}

impl MatchConfig {
    /// Classic rules for the given number of players.
    #[must_use]
    pub fn new(players: usize) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_loss_threshold(mut self, threshold: u32) -> Self {
        self.loss_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }

    #[must_use]
    pub fn with_termination(mut self, termination: TerminationPolicy) -> Self {
        self.termination = termination;
        self
    }

    #[must_use]
    pub fn with_max_hand_outs(mut self, max: u32) -> Self {
        self.max_hand_outs = max;
        self
    }

    /// Cards consumed by one hand-out: every hand plus the row seeds.
    #[must_use]
    pub fn cards_per_hand_out(&self) -> usize {
        self.players.saturating_mul(self.hand_size).saturating_add(ROW_COUNT)
    }

    /// Largest player count the deck supports at this hand size.
    #[must_use]
    pub fn max_players(&self) -> usize {
        if self.hand_size == 0 {
            return 0;
        }
        (Deck::SIZE - ROW_COUNT) / self.hand_size
    }

    /// Check that a match can be played with this configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.players < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "at least 2 players required, got {}",
                self.players
            )));
        }
        if self.hand_size == 0 {
            return Err(EngineError::InvalidConfig("hand size must be positive".into()));
        }
        if self.loss_threshold == 0 {
            return Err(EngineError::InvalidConfig("loss threshold must be positive".into()));
        }
        if self.max_hand_outs == 0 {
            return Err(EngineError::InvalidConfig("at least one hand-out required".into()));
        }
        if self.players > u8::MAX as usize || self.cards_per_hand_out() > Deck::SIZE {
            return Err(EngineError::InvalidConfig(format!(
                "{} players with {} cards each need {} cards, the deck has {}",
                self.players,
                self.hand_size,
                self.cards_per_hand_out(),
                Deck::SIZE
            )));
        }
        Ok(())
    }
}
