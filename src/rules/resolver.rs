//! Round resolution.
//!
//! A round has two phases:
//!
//! 1. **Choice**: every player picks a card from their own hand, seeing only
//!    the board as it stood at the start of the round. Chosen cards leave the
//!    hand as soon as they are collected and are revealed to no one until all
//!    players have chosen.
//! 2. **Placement**: the revealed cards are sorted ascending and placed one at
//!    a time. Each placement sees the board left by the previous one, so a
//!    lower card can change the row a higher card lands on.
//!
//! Placement of a card:
//! - below every row head: its owner picks a row, takes its cards as
//!   penalty, and the card starts that row
//! - otherwise it joins the row with the largest head below it; if that row
//!   already holds five cards, the owner takes them and the card starts it

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::board::{BoardView, Landing, RowIndex};
use crate::core::{total_penalty, Card, EngineError, FaultPolicy, PlayerId, PlayerMap};
use crate::engine::MatchState;
use crate::strategy::Strategy;

/// How a played card ended up on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Joined the row and became its head.
    Appended { row: RowIndex },
    /// Was the sixth card: the owner took the row.
    Overflow {
        row: RowIndex,
        taken: Vec<Card>,
        penalty: u32,
    },
    /// Was below every head: the owner chose a row and took it.
    BelowAllHeads {
        row: RowIndex,
        taken: Vec<Card>,
        penalty: u32,
    },
}

impl Placement {
    /// The row the card went to.
    #[must_use]
    pub fn row(&self) -> RowIndex {
        match self {
            Placement::Appended { row }
            | Placement::Overflow { row, .. }
            | Placement::BelowAllHeads { row, .. } => *row,
        }
    }

    /// Penalty points the owner took with this card.
    #[must_use]
    pub fn penalty(&self) -> u32 {
        match self {
            Placement::Appended { .. } => 0,
            Placement::Overflow { penalty, .. } | Placement::BelowAllHeads { penalty, .. } => *penalty,
        }
    }

    /// Whether the owner picked up a row.
    #[must_use]
    pub fn is_pickup(&self) -> bool {
        !matches!(self, Placement::Appended { .. })
    }
}

/// One card played in a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub player: PlayerId,
    pub card: Card,
    pub placement: Placement,
}

/// Result of one round, plays in resolution order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Hand-out the round belongs to (1-based).
    pub hand_out: u32,
    /// Round within the hand-out (1-based).
    pub round: usize,
    /// Plays in ascending card order.
    pub plays: Vec<PlayRecord>,
}

impl RoundOutcome {
    /// Penalty points a player took this round.
    #[must_use]
    pub fn penalty_for(&self, player: PlayerId) -> u32 {
        self.plays
            .iter()
            .filter(|p| p.player == player)
            .map(|p| p.placement.penalty())
            .sum()
    }

    /// Penalty points taken by anyone this round.
    #[must_use]
    pub fn total_penalty(&self) -> u32 {
        self.plays.iter().map(|p| p.placement.penalty()).sum()
    }

    /// The card a player played this round.
    #[must_use]
    pub fn card_of(&self, player: PlayerId) -> Option<Card> {
        self.plays.iter().find(|p| p.player == player).map(|p| p.card)
    }
}

/// Resolves single rounds against a match state.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundResolver {
    fault_policy: FaultPolicy,
}

impl RoundResolver {
    #[must_use]
    pub fn new(fault_policy: FaultPolicy) -> Self {
        Self { fault_policy }
    }

    /// Play one round: collect a card from every player, then place them in
    /// ascending order.
    ///
    /// `strategies` must have one entry per seat of `state`. On error the
    /// state is left mid-round and must not be scored.
    pub fn resolve<S: Strategy>(
        &self,
        state: &mut MatchState,
        strategies: &mut PlayerMap<S>,
    ) -> Result<RoundOutcome, EngineError> {
        debug_assert_eq!(state.player_count(), strategies.player_count());
        let round = state.round_in_hand_out() + 1;
        let hand_out = state.hand_outs();

        let mut plays = self.collect_choices(state, strategies, round)?;
        plays.sort_unstable_by_key(|&(_, card)| card);
        if let Some(pair) = plays.windows(2).find(|w| w[0].1 == w[1].1) {
            return Err(EngineError::DuplicateCard(pair[0].1));
        }

        // Strictly sequential: every placement sees the board left by the
        // previous one.
        let records = plays
            .into_iter()
            .try_fold(Vec::with_capacity(state.player_count()), |mut log, (player, card)| {
                let placement = self.place(state, strategies, player, card, round)?;
                debug!("{} plays {}: {:?}", player, card, placement);
                log.push(PlayRecord {
                    player,
                    card,
                    placement,
                });
                Ok::<_, EngineError>(log)
            })?;

        state.finish_round();
        Ok(RoundOutcome {
            hand_out,
            round,
            plays: records,
        })
    }

    /// Choice phase. Every player sees the same start-of-round board.
    fn collect_choices<S: Strategy>(
        &self,
        state: &mut MatchState,
        strategies: &mut PlayerMap<S>,
        round: usize,
    ) -> Result<Vec<(PlayerId, Card)>, EngineError> {
        let player_count = state.player_count();
        let (board, players) = state.parts_mut();
        let view = BoardView::new(board, round, player_count);

        let mut chosen = Vec::with_capacity(player_count);
        for player in PlayerId::all(player_count) {
            let seat = &mut players[player];
            let hand = seat.hand();
            let fallback = hand.lowest().ok_or(EngineError::EmptyHand(player))?;

            let card = strategies[player]
                .choose_card(hand, &view)
                .map_err(|source| EngineError::Strategy { player, source })?;
            let card = if hand.contains(card) {
                card
            } else {
                match self.fault_policy {
                    FaultPolicy::Abort => return Err(EngineError::InvalidCard { player, card }),
                    FaultPolicy::Fallback => {
                        warn!("{} chose {} which is not in hand, playing {}", player, card, fallback);
                        seat.record_fault();
                        fallback
                    }
                }
            };

            seat.hand_mut().remove(card);
            chosen.push((player, card));
        }
        Ok(chosen)
    }

    /// Placement of a single card.
    fn place<S: Strategy>(
        &self,
        state: &mut MatchState,
        strategies: &mut PlayerMap<S>,
        player: PlayerId,
        card: Card,
        round: usize,
    ) -> Result<Placement, EngineError> {
        let player_count = state.player_count();
        let (board, players) = state.parts_mut();

        let placement = match board.place(card)? {
            Some(Landing::Appended(row)) => Placement::Appended { row },
            Some(Landing::Overflow(row, taken)) => Placement::Overflow {
                row,
                penalty: total_penalty(&taken),
                taken: taken.to_vec(),
            },
            None => {
                let view = BoardView::new(board, round, player_count);
                let seat = &mut players[player];
                let choice = strategies[player]
                    .choose_row(seat.hand(), &view, card)
                    .map_err(|source| EngineError::Strategy { player, source })?;
                let row = if choice.is_valid() {
                    choice
                } else {
                    match self.fault_policy {
                        FaultPolicy::Abort => {
                            return Err(EngineError::InvalidRow {
                                player,
                                row: choice.0,
                            })
                        }
                        FaultPolicy::Fallback => {
                            let cheapest = board.cheapest_row();
                            warn!("{} chose row index {}, taking {}", player, choice.0, cheapest);
                            seat.record_fault();
                            cheapest
                        }
                    }
                };
                let taken = board.take_row(row, card).ok_or(EngineError::InvalidRow {
                    player,
                    row: row.0,
                })?;
                Placement::BelowAllHeads {
                    row,
                    penalty: total_penalty(&taken),
                    taken: taken.to_vec(),
                }
            }
        };

        players[player].add_penalty(placement.penalty());
        Ok(placement)
    }
}
