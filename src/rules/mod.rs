//! Rules of a single round.
//!
//! `RoundResolver` takes a mutable [`MatchState`](crate::engine::MatchState)
//! for the duration of one round, asks every player for a card, places the
//! cards in ascending order and hands control back with a [`RoundOutcome`]
//! describing what happened. It keeps no state between rounds.

pub mod resolver;

pub use resolver::{Placement, PlayRecord, RoundOutcome, RoundResolver};
