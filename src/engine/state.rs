//! Match state: players, board, remaining deck, round counters.
//!
//! A `MatchState` is owned by one [`MatchEngine`](super::MatchEngine) and
//! lent mutably to the round resolver for the duration of a round. Nothing
//! else keeps a handle to it between rounds, so independent matches never
//! share mutable state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Board, ROW_COUNT};
use crate::core::{Card, Deck, EngineError, GameRng, Hand, PlayerId, PlayerMap};

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    name: String,
    hand: Hand,
    penalty: u32,
    faults: u32,
}

impl PlayerState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::default(),
            penalty: 0,
            faults: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Penalty points collected this match. Never decreases.
    #[must_use]
    pub fn penalty(&self) -> u32 {
        self.penalty
    }

    /// Illegal choices replaced under the fallback policy.
    #[must_use]
    pub fn faults(&self) -> u32 {
        self.faults
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub(crate) fn add_penalty(&mut self, points: u32) {
        self.penalty += points;
    }

    pub(crate) fn record_fault(&mut self) {
        self.faults += 1;
    }
}

/// Everything that changes during a match.
#[derive(Clone, Debug)]
pub struct MatchState {
    players: PlayerMap<PlayerState>,
    board: Board,
    deck: Deck,
    hand_outs: u32,
    round_in_hand_out: usize,
    rounds_played: u32,
}

/// A freshly shuffled deal: hands, seeded board, and what is left over.
fn deal(player_count: usize, hand_size: usize, rng: &mut GameRng) -> Result<(Vec<Hand>, Board, Deck), EngineError> {
    let mut deck = Deck::fresh(rng);
    let hands = (0..player_count)
        .map(|_| deck.draw(hand_size).map(Hand::new))
        .collect::<Result<Vec<_>, _>>()?;
    let seeds = deck.draw(ROW_COUNT)?;
    let board = Board::seed([seeds[0], seeds[1], seeds[2], seeds[3]]);
    Ok((hands, board, deck))
}

impl MatchState {
    /// Seat the named players and deal the first hand-out.
    pub fn new(
        names: impl IntoIterator<Item = String>,
        hand_size: usize,
        rng: &mut GameRng,
    ) -> Result<Self, EngineError> {
        let mut players = PlayerMap::from_vec(names.into_iter().map(PlayerState::new).collect());
        let (hands, board, deck) = deal(players.player_count(), hand_size, rng)?;
        for ((_, player), hand) in players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        Ok(Self {
            players,
            board,
            deck,
            hand_outs: 1,
            round_in_hand_out: 0,
            rounds_played: 0,
        })
    }

    /// Set up an arbitrary position: the given hands and board, no penalties.
    ///
    /// The deck holds every card not in play. Fails if a card appears twice.
    pub fn from_position(
        names: impl IntoIterator<Item = String>,
        hands: Vec<Hand>,
        board: Board,
    ) -> Result<Self, EngineError> {
        let names: Vec<String> = names.into_iter().collect();
        if names.len() != hands.len() {
            return Err(EngineError::InvalidConfig(format!(
                "{} players but {} hands",
                names.len(),
                hands.len()
            )));
        }

        let mut in_play = FxHashSet::default();
        let on_board = board.rows().iter().flat_map(|r| r.cards().iter().copied());
        let held = hands.iter().flat_map(|h| h.iter());
        for card in on_board.chain(held) {
            if !in_play.insert(card) {
                return Err(EngineError::DuplicateCard(card));
            }
        }

        let players = names
            .into_iter()
            .zip(hands)
            .map(|(name, hand)| PlayerState {
                hand,
                ..PlayerState::new(name)
            })
            .collect();
        Ok(Self {
            players: PlayerMap::from_vec(players),
            board,
            deck: Deck::without(&in_play),
            hand_outs: 1,
            round_in_hand_out: 0,
            rounds_played: 0,
        })
    }

    /// Start a new hand-out: fresh shuffled deck, new hands, new board.
    /// Penalty totals carry over.
    pub fn redeal(&mut self, hand_size: usize, rng: &mut GameRng) -> Result<(), EngineError> {
        let (hands, board, deck) = deal(self.players.player_count(), hand_size, rng)?;
        for ((_, player), hand) in self.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        self.board = board;
        self.deck = deck;
        self.hand_outs += 1;
        self.round_in_hand_out = 0;
        Ok(())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cards not dealt in the current hand-out.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Hand-outs dealt so far, including the current one.
    #[must_use]
    pub fn hand_outs(&self) -> u32 {
        self.hand_outs
    }

    /// Rounds completed in the current hand-out.
    #[must_use]
    pub fn round_in_hand_out(&self) -> usize {
        self.round_in_hand_out
    }

    /// Rounds completed over the whole match.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// True when every hand is empty and a new hand-out is needed.
    #[must_use]
    pub fn hands_exhausted(&self) -> bool {
        self.players.values().all(|p| p.hand.is_empty())
    }

    /// Highest penalty total and the first seat holding it.
    #[must_use]
    pub fn worst_player(&self) -> (PlayerId, u32) {
        self.players
            .iter()
            .map(|(id, p)| (id, p.penalty))
            .fold((PlayerId::new(0), 0), |worst, (id, penalty)| {
                if penalty > worst.1 {
                    (id, penalty)
                } else {
                    worst
                }
            })
    }

    /// Sum of all players' penalty totals.
    #[must_use]
    pub fn total_penalty(&self) -> u32 {
        self.players.values().map(PlayerState::penalty).sum()
    }

    /// Whether a card is held by anyone or lies on the board.
    #[must_use]
    pub fn in_play(&self, card: Card) -> bool {
        self.board.contains(card) || self.players.values().any(|p| p.hand.contains(card))
    }

    /// Split borrow for the resolver: the board and the players.
    pub(crate) fn parts_mut(&mut self) -> (&mut Board, &mut PlayerMap<PlayerState>) {
        (&mut self.board, &mut self.players)
    }

    pub(crate) fn finish_round(&mut self) {
        self.round_in_hand_out += 1;
        self.rounds_played += 1;
    }
}
