//! # take5
//!
//! A rules engine for the card game Take 5 (6 nimmt!) and a framework for
//! pitting player strategies against each other.
//!
//! ## Rules in brief
//!
//! 104 cards numbered 1 to 104, each worth 1 to 7 penalty points. Four rows
//! on the table start with one card each. Every round all players pick a card
//! at the same time; the cards are then placed in ascending order, each one
//! on the row whose head is the largest number below it. The player who puts
//! the sixth card on a row, or whose card is below every head, takes a row
//! and its points. Whoever reaches the loss threshold ends the match; the
//! lowest total wins.
//!
//! ## Design
//!
//! - **One owner per match**: a [`MatchEngine`] owns its [`MatchState`] and
//!   lends it to the [`RoundResolver`] one round at a time. Matches share
//!   nothing, so any number can run side by side.
//! - **Sequential placement**: a round is a fold over the sorted plays; each
//!   placement sees the board the previous one left.
//! - **One extension point**: players implement [`Strategy`]. Bots, scripted
//!   replays and the terminal player all go through it.
//!
//! ## Modules
//!
//! - `core`: cards, deck, hands, players, RNG, configuration, errors
//! - `board`: rows, the board and the read-only view strategies receive
//! - `strategy`: the `Strategy` trait and the shipped players
//! - `rules`: resolution of a single round
//! - `engine`: match loop, scoring, tournaments

pub mod board;
pub mod core;
pub mod engine;
pub mod rules;
pub mod strategy;

pub use crate::core::{
    Card, Deck, EngineError, FaultPolicy, GameRng, Hand, MatchConfig, PlayerId, PlayerMap, StrategyError,
    TerminationPolicy,
};

pub use crate::board::{Board, BoardView, Landing, Row, RowIndex, ROW_CAPACITY, ROW_COUNT};

pub use crate::strategy::{BotKind, CostBot, LineSource, ScriptedStrategy, Strategy, TerminalStrategy};

pub use crate::rules::{Placement, PlayRecord, RoundOutcome, RoundResolver};

pub use crate::engine::{
    EndReason, FinalReport, MatchEngine, MatchPhase, MatchState, PlayerState, ScoreBook, Seat, Standing, Tournament,
    TournamentStats,
};
