//! A single row of the board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{total_penalty, Card, EngineError};

/// Cards a row can hold; the next card placed on a full row takes it.
pub const ROW_CAPACITY: usize = 5;

/// Cards taken from a row in one pickup.
pub type Taken = SmallVec<[Card; ROW_CAPACITY]>;

/// One row of placed cards.
///
/// Never empty, strictly increasing, at most [`Row::CAPACITY`] cards.
/// The last card is the row head. Deserialization checks the same
/// invariants as [`Row::from_cards`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RowRepr")]
pub struct Row {
    cards: SmallVec<[Card; ROW_CAPACITY]>,
}

#[derive(Deserialize)]
struct RowRepr {
    cards: Vec<Card>,
}

impl TryFrom<RowRepr> for Row {
    type Error = EngineError;

    fn try_from(repr: RowRepr) -> Result<Self, Self::Error> {
        Row::from_cards(&repr.cards)
    }
}

impl Row {
    pub const CAPACITY: usize = ROW_CAPACITY;

    /// A row holding only `card`.
    #[must_use]
    pub fn start(card: Card) -> Self {
        let mut cards = SmallVec::new();
        cards.push(card);
        Self { cards }
    }

    /// Build a row from existing cards, checking the row invariants.
    pub fn from_cards(cards: &[Card]) -> Result<Self, EngineError> {
        let (&first, rest) = cards
            .split_first()
            .ok_or_else(|| EngineError::InvalidConfig("a row cannot be empty".into()))?;
        if cards.len() > Self::CAPACITY {
            return Err(EngineError::InvalidConfig(format!(
                "a row holds at most {} cards, got {}",
                Self::CAPACITY,
                cards.len()
            )));
        }
        let mut row = Self::start(first);
        for &card in rest {
            row.push(card)?;
        }
        Ok(row)
    }

    /// The highest, most recently placed card.
    #[must_use]
    pub fn head(&self) -> Card {
        self.cards[self.cards.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a row in play; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// True when the next card placed here triggers a pickup.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= Self::CAPACITY
    }

    /// Cards in placement order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Sum of the penalties of every card in the row.
    #[must_use]
    pub fn penalty(&self) -> u32 {
        total_penalty(&self.cards)
    }

    /// Append above the head. The caller handles full rows.
    pub(crate) fn push(&mut self, card: Card) -> Result<(), EngineError> {
        let head = self.head();
        if card <= head {
            return Err(EngineError::RowOrder { card, head });
        }
        debug_assert!(!self.is_full(), "push onto a full row");
        self.cards.push(card);
        Ok(())
    }

    /// Empty the row, leaving `card` as its only card. Returns the removed cards.
    pub(crate) fn reset(&mut self, card: Card) -> Taken {
        std::mem::replace(&mut self.cards, Self::start(card).cards)
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<String> = self.cards.iter().map(|c| format!("{:>3}", c)).collect();
        write!(f, "{}", cells.join(" "))
    }
}
