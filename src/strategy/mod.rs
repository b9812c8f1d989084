//! Player strategies: the contract every player honours, and the players
//! that ship with the engine.
//!
//! ## The contract
//!
//! A strategy answers two questions:
//! - `choose_card`: which card of my hand do I play this round?
//! - `choose_row`: my card is lower than every row head, which row do I take?
//!
//! The engine guarantees `choose_row` is only asked in that exact situation.
//! Strategies see the board through a [`BoardView`], which borrows it
//! immutably, and their own hand by shared reference. They never see the
//! cards other players picked this round.
//!
//! Returning a card that is not in the hand, or a row index outside `0..4`,
//! is a player fault handled according to the match's
//! [`FaultPolicy`](crate::core::FaultPolicy). Returning `Err` ends the match.
//!
//! ## Shipped players
//!
//! - `ScriptedStrategy`: replays fixed choices
//! - `RandomBot`, `AscendingBot`, `DescendingBot`, `SmallestGapBot`,
//!   `ShortestRowBot`, `CostBot`: automated heuristics, see [`BotKind`]
//! - `TerminalStrategy`: a human typing at a prompt

pub mod bots;
pub mod scripted;
pub mod terminal;

pub use bots::{AscendingBot, BotKind, CostBot, DescendingBot, RandomBot, ShortestRowBot, SmallestGapBot};
pub use scripted::ScriptedStrategy;
pub use terminal::{LineSource, TerminalStrategy};

use crate::board::{BoardView, RowIndex};
use crate::core::{Card, Hand, StrategyError};

/// Decision-making capability of one player.
///
/// `Send` so whole matches can be moved to worker threads.
pub trait Strategy: Send {
    /// Pick the card to play this round. Must be a member of `hand`.
    fn choose_card(&mut self, hand: &Hand, board: &BoardView<'_>) -> Result<Card, StrategyError>;

    /// Pick the row to take because `card` is lower than every row head.
    /// Must be in `0..4`.
    fn choose_row(
        &mut self,
        hand: &Hand,
        board: &BoardView<'_>,
        card: Card,
    ) -> Result<RowIndex, StrategyError>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn choose_card(&mut self, hand: &Hand, board: &BoardView<'_>) -> Result<Card, StrategyError> {
        (**self).choose_card(hand, board)
    }

    fn choose_row(
        &mut self,
        hand: &Hand,
        board: &BoardView<'_>,
        card: Card,
    ) -> Result<RowIndex, StrategyError> {
        (**self).choose_row(hand, board, card)
    }
}
