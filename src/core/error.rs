//! Engine and strategy errors.
//!
//! Every error here is fatal for the match it occurs in: the engine stops,
//! enters the aborted phase and reports the offending player and condition.
//! The only recoverable faults are invalid choices under
//! [`FaultPolicy::Fallback`](crate::core::FaultPolicy), which never surface
//! as errors.

use thiserror::Error;

use super::card::Card;
use super::player::PlayerId;

/// Errors raised by a strategy implementation itself.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Reading or writing the strategy's I/O channel failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The input stream ended before a choice was made.
    #[error("input closed before a choice was made")]
    InputClosed,
}

/// Errors raised by the rules engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A player was asked for a card with an empty hand.
    #[error("{0} has no cards left to play")]
    EmptyHand(PlayerId),

    /// A number outside `1..=104` was used as a card.
    #[error("card number {0} is outside 1..=104")]
    CardOutOfRange(u8),

    /// A strategy returned a card that is not in its hand.
    #[error("{player} chose card {card}, which is not in their hand")]
    InvalidCard { player: PlayerId, card: Card },

    /// A strategy returned a row index outside `0..4`.
    #[error("{player} chose row index {row}, expected 0..=3")]
    InvalidRow { player: PlayerId, row: u8 },

    /// More cards were requested than the deck holds.
    #[error("requested {requested} cards but only {remaining} remain in the deck")]
    InsufficientCards { requested: usize, remaining: usize },

    /// The same card number showed up twice in play.
    #[error("card {0} appeared twice in play")]
    DuplicateCard(Card),

    /// A card was appended to a row whose head is not lower.
    #[error("card {card} cannot follow row head {head}")]
    RowOrder { card: Card, head: Card },

    /// A strategy failed while making a choice.
    #[error("{player} failed to choose: {source}")]
    Strategy {
        player: PlayerId,
        #[source]
        source: StrategyError,
    },

    /// The match configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The match has already finished.
    #[error("the match is already over")]
    MatchOver,

    /// The match was aborted by an earlier fatal error.
    #[error("the match was aborted by an earlier error")]
    MatchAborted,

    /// A final report was requested before the match finished.
    #[error("the match has not finished")]
    NotFinished,
}

impl EngineError {
    /// The player responsible for this error, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            EngineError::InvalidCard { player, .. }
            | EngineError::InvalidRow { player, .. }
            | EngineError::Strategy { player, .. } => Some(*player),
            EngineError::EmptyHand(player) => Some(*player),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_player() {
        let err = EngineError::InvalidRow {
            player: PlayerId::new(2),
            row: 7,
        };
        assert_eq!(err.player(), Some(PlayerId::new(2)));
        assert_eq!(err.to_string(), "Player 2 chose row index 7, expected 0..=3");

        let err = EngineError::InsufficientCards {
            requested: 10,
            remaining: 4,
        };
        assert_eq!(err.player(), None);
    }

    #[test]
    fn test_strategy_error_source() {
        let err = EngineError::Strategy {
            player: PlayerId::new(0),
            source: StrategyError::InputClosed,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("input closed"));
    }
}
