//! Match orchestration.
//!
//! - `state`: the mutable state of one match
//! - `match_engine`: the round loop, hand-outs and termination
//! - `score`: standings and the final report
//! - `tournament`: many independent bot matches

pub mod match_engine;
pub mod score;
pub mod state;
pub mod tournament;

pub use match_engine::{MatchEngine, MatchPhase, Seat};
pub use score::{EndReason, FinalReport, ScoreBook, Standing};
pub use state::{MatchState, PlayerState};
pub use tournament::{Tournament, TournamentStats};
