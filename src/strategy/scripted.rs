//! Strategy that replays a fixed list of choices.

use std::collections::VecDeque;

use super::Strategy;
use crate::board::{BoardView, RowIndex};
use crate::core::{Card, Hand, StrategyError};

/// Plays queued cards and rows in order.
///
/// When the card queue runs dry it plays the lowest card in hand; when the
/// row queue runs dry it takes the cheapest row. Queued values are returned
/// as-is, even if illegal, which makes this the tool for exercising fault
/// handling.
#[derive(Clone, Debug, Default)]
pub struct ScriptedStrategy {
    cards: VecDeque<Card>,
    rows: VecDeque<RowIndex>,
}

impl ScriptedStrategy {
    pub fn new(cards: impl IntoIterator<Item = Card>, rows: impl IntoIterator<Item = RowIndex>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            rows: rows.into_iter().collect(),
        }
    }

    /// Only cards; rows fall back to the cheapest.
    pub fn cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self::new(cards, [])
    }

    /// Choices not yet consumed: `(cards, rows)`.
    #[must_use]
    pub fn pending(&self) -> (usize, usize) {
        (self.cards.len(), self.rows.len())
    }
}

impl Strategy for ScriptedStrategy {
    fn choose_card(&mut self, hand: &Hand, _board: &BoardView<'_>) -> Result<Card, StrategyError> {
        match self.cards.pop_front().or_else(|| hand.lowest()) {
            Some(card) => Ok(card),
            None => Err(StrategyError::InputClosed),
        }
    }

    fn choose_row(
        &mut self,
        _hand: &Hand,
        board: &BoardView<'_>,
        _card: Card,
    ) -> Result<RowIndex, StrategyError> {
        Ok(self
            .rows
            .pop_front()
            .unwrap_or_else(|| board.board().cheapest_row()))
    }
}
