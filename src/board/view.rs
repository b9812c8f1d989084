//! Read-only board snapshot handed to strategies.

use im::Vector;

use super::board::{Board, RowIndex, ROW_COUNT};
use super::row::Row;
use crate::core::Card;

/// What a strategy may see of the table while deciding.
///
/// Borrows the board immutably, so nothing a strategy does through a view
/// can change rows, heads, or hands.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    board: &'a Board,
    round: usize,
    player_count: usize,
}

impl<'a> BoardView<'a> {
    /// A view of `board` during `round` (1-based within the hand-out) of a
    /// match with `player_count` players.
    #[must_use]
    pub fn new(board: &'a Board, round: usize, player_count: usize) -> Self {
        Self {
            board,
            round,
            player_count,
        }
    }

    /// The underlying board, read-only.
    #[must_use]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    #[must_use]
    pub fn rows(&self) -> &'a [Row; ROW_COUNT] {
        self.board.rows()
    }

    #[must_use]
    pub fn row(&self, index: RowIndex) -> Option<&'a Row> {
        self.board.row(index)
    }

    #[must_use]
    pub fn heads(&self) -> [Card; ROW_COUNT] {
        self.board.heads()
    }

    #[must_use]
    pub fn row_penalties(&self) -> [u32; ROW_COUNT] {
        self.board.row_penalties()
    }

    /// See [`Board::target_row`].
    #[must_use]
    pub fn target_row(&self, card: Card) -> Option<RowIndex> {
        self.board.target_row(card)
    }

    /// Cards already removed from the board this hand-out.
    #[must_use]
    pub fn history(&self) -> &'a Vector<Card> {
        self.board.discarded()
    }

    /// Round number within the current hand-out, starting at 1.
    #[must_use]
    pub fn round(&self) -> usize {
        self.round
    }

    /// Number of players in the match.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }
}
