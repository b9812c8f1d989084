//! Scores: live standings and the frozen end-of-match report.

use serde::{Deserialize, Serialize};

use super::state::{MatchState, PlayerState};
use crate::core::PlayerId;

/// One line of the standings table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based competition rank: equal totals share a rank and the next rank
    /// is skipped (1, 1, 3).
    pub rank: usize,
    pub player: PlayerId,
    pub name: String,
    pub penalty: u32,
    pub faults: u32,
}

/// Read-only view over the players of a match.
#[derive(Clone, Copy, Debug)]
pub struct ScoreBook<'a> {
    state: &'a MatchState,
}

impl<'a> ScoreBook<'a> {
    #[must_use]
    pub fn new(state: &'a MatchState) -> Self {
        Self { state }
    }

    /// Players ordered best first (lowest penalty), seat order on ties.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let mut seats: Vec<(PlayerId, &PlayerState)> = self.state.players().iter().collect();
        seats.sort_by_key(|&(id, p)| (p.penalty(), id));

        let mut standings: Vec<Standing> = Vec::with_capacity(seats.len());
        for (position, (player, state)) in seats.into_iter().enumerate() {
            let rank = match standings.last() {
                Some(prev) if prev.penalty == state.penalty() => prev.rank,
                _ => position + 1,
            };
            standings.push(Standing {
                rank,
                player,
                name: state.name().to_string(),
                penalty: state.penalty(),
                faults: state.faults(),
            });
        }
        standings
    }

    /// Every player sharing the lowest total.
    #[must_use]
    pub fn leaders(&self) -> Vec<PlayerId> {
        let best = self.state.players().values().map(PlayerState::penalty).min();
        self.state
            .players()
            .iter()
            .filter(|(_, p)| Some(p.penalty()) == best)
            .map(|(id, _)| id)
            .collect()
    }

    #[must_use]
    pub fn penalty(&self, player: PlayerId) -> u32 {
        self.state.player(player).penalty()
    }

    #[must_use]
    pub fn total_penalty(&self) -> u32 {
        self.state.total_penalty()
    }
}

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// A player reached the loss threshold. Names the first seat holding the
    /// highest total when scores froze.
    ThresholdReached { player: PlayerId, penalty: u32 },
    /// The hand-out limit was hit before anyone reached the threshold.
    HandOutLimit,
}

/// Frozen result of a finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    pub standings: Vec<Standing>,
    pub winners: Vec<PlayerId>,
    pub end_reason: EndReason,
    pub hand_outs: u32,
    pub rounds: u32,
}

impl FinalReport {
    pub(crate) fn freeze(state: &MatchState, end_reason: EndReason) -> Self {
        let book = ScoreBook::new(state);
        Self {
            standings: book.standings(),
            winners: book.leaders(),
            end_reason,
            hand_outs: state.hand_outs(),
            rounds: state.rounds_played(),
        }
    }

    /// Final penalty total of a player.
    #[must_use]
    pub fn penalty(&self, player: PlayerId) -> Option<u32> {
        self.standings.iter().find(|s| s.player == player).map(|s| s.penalty)
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners.contains(&player)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

impl std::fmt::Display for FinalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end_reason {
            EndReason::ThresholdReached { player, penalty } => writeln!(
                f,
                "Match over after {} rounds ({} hand-outs): {} reached {} points",
                self.rounds, self.hand_outs, player, penalty
            )?,
            EndReason::HandOutLimit => writeln!(
                f,
                "Match stopped at the hand-out limit after {} rounds",
                self.rounds
            )?,
        }
        for s in &self.standings {
            writeln!(f, "{:>3}. {:<16} {:>4}", s.rank, s.name, s.penalty)?;
        }
        Ok(())
    }
}
