//! A player's hand.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;

/// The cards held by one player, kept sorted ascending.
///
/// Classic hands hold 10 cards; `SmallVec` keeps those inline.
/// Deserialized hands go through [`Hand::new`], so they come back sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "HandRepr")]
pub struct Hand {
    cards: SmallVec<[Card; 10]>,
}

#[derive(Deserialize)]
struct HandRepr {
    cards: Vec<Card>,
}

impl From<HandRepr> for Hand {
    fn from(repr: HandRepr) -> Self {
        Hand::new(repr.cards)
    }
}

impl Hand {
    /// Create a hand from any set of cards.
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: SmallVec<[Card; 10]> = cards.into_iter().collect();
        cards.sort_unstable();
        cards.dedup();
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    /// Remove a card. Returns false if it was not held.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.binary_search(&card) {
            Ok(pos) => {
                self.cards.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// The lowest card held.
    #[must_use]
    pub fn lowest(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// The highest card held.
    #[must_use]
    pub fn highest(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Cards in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Total penalty of the cards held.
    #[must_use]
    pub fn total_penalty(&self) -> u32 {
        super::card::total_penalty(&self.cards)
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand::new(iter)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let numbers: Vec<String> = self.cards.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", numbers.join(", "))
    }
}
