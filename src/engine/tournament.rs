//! Batch play between a fixed lineup of bots.

use log::info;
use serde::{Deserialize, Serialize};

use super::match_engine::MatchEngine;
use super::score::FinalReport;
use crate::core::{EngineError, MatchConfig, PlayerId};
use crate::strategy::BotKind;

/// Aggregated results over many games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentStats {
    /// Games played.
    pub games: u32,

    /// Penalty points per seat, summed over all games.
    pub total_penalty: Vec<u64>,

    /// Games won per seat. A shared win counts for every tied winner.
    pub wins: Vec<u32>,
}

impl TournamentStats {
    pub fn new(seats: usize) -> Self {
        Self {
            games: 0,
            total_penalty: vec![0; seats],
            wins: vec![0; seats],
        }
    }

    /// Fold one finished game into the totals.
    pub fn record(&mut self, report: &FinalReport) {
        self.games += 1;
        for standing in &report.standings {
            self.total_penalty[standing.player.index()] += u64::from(standing.penalty);
        }
        for winner in &report.winners {
            self.wins[winner.index()] += 1;
        }
    }

    /// Average penalty per game for a seat.
    #[must_use]
    pub fn mean_penalty(&self, player: PlayerId) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_penalty[player.index()] as f64 / f64::from(self.games)
        }
    }

    /// Fraction of games a seat won.
    #[must_use]
    pub fn win_rate(&self, player: PlayerId) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.wins[player.index()]) / f64::from(self.games)
        }
    }
}

/// Runs independent games with the same lineup and base configuration.
///
/// Game `i` uses seed `config.seed + i`, so a tournament is reproducible and
/// any single game can be replayed on its own.
#[derive(Clone, Debug)]
pub struct Tournament {
    config: MatchConfig,
    lineup: Vec<BotKind>,
}

impl Tournament {
    /// The player count of `config` is taken from the lineup.
    pub fn new(config: MatchConfig, lineup: Vec<BotKind>) -> Result<Self, EngineError> {
        let config = MatchConfig {
            players: lineup.len(),
            ..config
        };
        config.validate()?;
        Ok(Self { config, lineup })
    }

    #[must_use]
    pub fn lineup(&self) -> &[BotKind] {
        &self.lineup
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play `games` full matches.
    pub fn run_matches(&self, games: u32) -> Result<TournamentStats, EngineError> {
        self.run(games, self.config.clone())
    }

    /// Play `games` single hand-outs, each scored on its own.
    pub fn run_hand_outs(&self, games: u32) -> Result<TournamentStats, EngineError> {
        let config = self
            .config
            .clone()
            .with_loss_threshold(u32::MAX)
            .with_max_hand_outs(1);
        self.run(games, config)
    }

    fn run(&self, games: u32, config: MatchConfig) -> Result<TournamentStats, EngineError> {
        let mut stats = TournamentStats::new(self.lineup.len());
        for i in 0..games {
            let seed = config.seed.wrapping_add(u64::from(i));
            let report = MatchEngine::with_bots(config.clone().with_seed(seed), &self.lineup)?.run()?;
            stats.record(&report);
        }
        info!("tournament finished: {} games, wins {:?}", stats.games, stats.wins);
        Ok(stats)
    }
}
