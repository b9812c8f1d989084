//! The 104-card pool and dealing.

use rustc_hash::FxHashSet;

use super::card::Card;
use super::error::EngineError;
use super::rng::GameRng;

/// A consumable deck. Cards are drawn from the end of the sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Number of cards in a full deck.
    pub const SIZE: usize = Card::MAX as usize;

    /// All 104 cards in ascending order (top of deck = 104).
    #[must_use]
    pub fn ordered() -> Self {
        Self {
            cards: Card::all().collect(),
        }
    }

    /// All 104 cards after a uniform shuffle.
    #[must_use]
    pub fn fresh(rng: &mut GameRng) -> Self {
        let mut deck = Self::ordered();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// The ordered deck minus the given cards.
    #[must_use]
    pub fn without(excluded: &FxHashSet<Card>) -> Self {
        Self {
            cards: Card::all().filter(|c| !excluded.contains(c)).collect(),
        }
    }

    /// Cards left to deal.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Remove and return `n` cards from the top.
    ///
    /// Fails without touching the deck if fewer than `n` remain.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if n > self.cards.len() {
            return Err(EngineError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let at = self.cards.len() - n;
        let mut drawn = self.cards.split_off(at);
        drawn.reverse();
        Ok(drawn)
    }

    /// Remove and return the top card.
    pub fn draw_one(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::InsufficientCards {
            requested: 1,
            remaining: 0,
        })
    }
}
