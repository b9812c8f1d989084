//! Core game types: cards, deck, hands, players, RNG, configuration, errors.

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod hand;
pub mod player;
pub mod rng;

pub use card::{total_penalty, Card};
pub use config::{FaultPolicy, MatchConfig, TerminationPolicy};
pub use deck::Deck;
pub use error::{EngineError, StrategyError};
pub use hand::Hand;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
