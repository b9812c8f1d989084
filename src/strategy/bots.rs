//! Automated players.
//!
//! Every bot takes the row with the fewest penalty points when forced to
//! pick one (lowest index on ties); they differ only in card choice.

use serde::{Deserialize, Serialize};

use super::Strategy;
use crate::board::{BoardView, RowIndex, ROW_CAPACITY};
use crate::core::{Card, GameRng, Hand, StrategyError};

fn cheapest_row(board: &BoardView<'_>) -> Result<RowIndex, StrategyError> {
    Ok(board.board().cheapest_row())
}

fn lowest(hand: &Hand) -> Result<Card, StrategyError> {
    hand.lowest().ok_or(StrategyError::InputClosed)
}

/// Distance from a card down to the head it would land on, and that row.
/// `None` if the card is lower than every head in `heads`.
fn gap_to(heads: impl Iterator<Item = (RowIndex, Card)>, card: Card) -> Option<(u8, RowIndex)> {
    heads
        .filter(|&(_, head)| head < card)
        .max_by_key(|&(_, head)| head)
        .map(|(row, head)| (card.number() - head.number(), row))
}

// =============================================================================
// Simple bots
// =============================================================================

/// Plays a uniformly random card.
#[derive(Clone, Debug)]
pub struct RandomBot {
    rng: GameRng,
}

impl RandomBot {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Strategy for RandomBot {
    fn choose_card(&mut self, hand: &Hand, _board: &BoardView<'_>) -> Result<Card, StrategyError> {
        self.rng
            .choose(hand.as_slice())
            .copied()
            .ok_or(StrategyError::InputClosed)
    }

    fn choose_row(&mut self, _hand: &Hand, board: &BoardView<'_>, _card: Card) -> Result<RowIndex, StrategyError> {
        cheapest_row(board)
    }
}

/// Always plays its lowest card.
#[derive(Clone, Copy, Debug, Default)]
pub struct AscendingBot;

impl Strategy for AscendingBot {
    fn choose_card(&mut self, hand: &Hand, _board: &BoardView<'_>) -> Result<Card, StrategyError> {
        lowest(hand)
    }

    fn choose_row(&mut self, _hand: &Hand, board: &BoardView<'_>, _card: Card) -> Result<RowIndex, StrategyError> {
        cheapest_row(board)
    }
}

/// Always plays its highest card.
#[derive(Clone, Copy, Debug, Default)]
pub struct DescendingBot;

impl Strategy for DescendingBot {
    fn choose_card(&mut self, hand: &Hand, _board: &BoardView<'_>) -> Result<Card, StrategyError> {
        hand.highest().ok_or(StrategyError::InputClosed)
    }

    fn choose_row(&mut self, _hand: &Hand, board: &BoardView<'_>, _card: Card) -> Result<RowIndex, StrategyError> {
        cheapest_row(board)
    }
}

// =============================================================================
// Board-aware bots
// =============================================================================

/// Plays the card closest above the head of a row that is not yet full.
///
/// Cards that would land below every such head are never preferred; if no
/// card fits anywhere it plays its lowest card.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmallestGapBot;

impl Strategy for SmallestGapBot {
    fn choose_card(&mut self, hand: &Hand, board: &BoardView<'_>) -> Result<Card, StrategyError> {
        let open_heads = || {
            RowIndex::all()
                .zip(board.rows().iter())
                .filter(|(_, row)| !row.is_full())
                .map(|(index, row)| (index, row.head()))
        };

        let mut best: Option<(u8, Card)> = None;
        for card in hand.iter() {
            let Some((gap, _)) = gap_to(open_heads(), card) else {
                continue;
            };
            if best.map_or(true, |(best_gap, _)| gap < best_gap) {
                best = Some((gap, card));
            }
        }
        best.map(|(_, card)| Ok(card)).unwrap_or_else(|| lowest(hand))
    }

    fn choose_row(&mut self, _hand: &Hand, board: &BoardView<'_>, _card: Card) -> Result<RowIndex, StrategyError> {
        cheapest_row(board)
    }
}

/// Plays onto the shortest row it can reach, smallest gap breaking ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortestRowBot;

impl Strategy for ShortestRowBot {
    fn choose_card(&mut self, hand: &Hand, board: &BoardView<'_>) -> Result<Card, StrategyError> {
        let heads = || RowIndex::all().zip(board.heads());

        let mut best: Option<(usize, u8, Card)> = None;
        for card in hand.iter() {
            let Some((gap, row)) = gap_to(heads(), card) else {
                continue;
            };
            let length = board.row(row).map_or(ROW_CAPACITY, |r| r.len());
            if best.map_or(true, |(best_len, best_gap, _)| (length, gap) < (best_len, best_gap)) {
                best = Some((length, gap, card));
            }
        }
        best.map(|(_, _, card)| Ok(card)).unwrap_or_else(|| lowest(hand))
    }

    fn choose_row(&mut self, _hand: &Hand, board: &BoardView<'_>, _card: Card) -> Result<RowIndex, StrategyError> {
        cheapest_row(board)
    }
}

/// Plays the card with the lowest estimated cost.
///
/// The cost of a card is the penalty of the row it lands on times a rough
/// chance of being the one to take that row:
/// - the card is below every head: cost is the cheapest row's penalty
/// - the row is full: chance 1
/// - fewer players than free slots, or the card directly follows the head:
///   chance 0
/// - otherwise `(1 - free / players) * (1 - exp(-alpha * (gap - 1)))`
#[derive(Clone, Copy, Debug)]
pub struct CostBot {
    alpha: f64,
}

impl Default for CostBot {
    fn default() -> Self {
        Self { alpha: 0.3 }
    }
}

impl CostBot {
    /// A cost bot with a custom gap decay.
    #[must_use]
    pub fn with_alpha(alpha: f64) -> Self {
        Self { alpha }
    }

    /// Estimated penalty for playing `card` now.
    #[must_use]
    pub fn cost(&self, board: &BoardView<'_>, card: Card) -> f64 {
        let penalties = board.row_penalties();
        let Some((gap, row)) = gap_to(RowIndex::all().zip(board.heads()), card) else {
            return penalties.iter().copied().min().unwrap_or(0) as f64;
        };

        let length = board.row(row).map_or(ROW_CAPACITY, |r| r.len());
        let free = ROW_CAPACITY.saturating_sub(length);
        let players = board.player_count();
        let chance = if free == 0 {
            1.0
        } else if players <= free || gap == 1 {
            0.0
        } else {
            let space_chance = 1.0 - free as f64 / players as f64;
            let gap_chance = 1.0 - (-self.alpha * (f64::from(gap) - 1.0)).exp();
            space_chance * gap_chance
        };
        f64::from(penalties[row.index()]) * chance
    }
}

impl Strategy for CostBot {
    fn choose_card(&mut self, hand: &Hand, board: &BoardView<'_>) -> Result<Card, StrategyError> {
        let mut best: Option<(f64, Card)> = None;
        for card in hand.iter() {
            let cost = self.cost(board, card);
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, card));
            }
        }
        best.map(|(_, card)| card).ok_or(StrategyError::InputClosed)
    }

    fn choose_row(&mut self, _hand: &Hand, board: &BoardView<'_>, _card: Card) -> Result<RowIndex, StrategyError> {
        cheapest_row(board)
    }
}

// =============================================================================
// Factory
// =============================================================================

/// The automated players by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotKind {
    Random,
    Ascending,
    Descending,
    SmallestGap,
    ShortestRow,
    Cost,
}

impl BotKind {
    /// Every bot, in declaration order.
    pub const ALL: [BotKind; 6] = [
        BotKind::Random,
        BotKind::Ascending,
        BotKind::Descending,
        BotKind::SmallestGap,
        BotKind::ShortestRow,
        BotKind::Cost,
    ];

    /// Command-line name of the bot.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BotKind::Random => "random",
            BotKind::Ascending => "ascending",
            BotKind::Descending => "descending",
            BotKind::SmallestGap => "smallest-gap",
            BotKind::ShortestRow => "shortest-row",
            BotKind::Cost => "cost",
        }
    }

    /// Build the bot. Only the random bot consumes `rng`.
    #[must_use]
    pub fn build(self, rng: GameRng) -> Box<dyn Strategy> {
        match self {
            BotKind::Random => Box::new(RandomBot::new(rng)),
            BotKind::Ascending => Box::new(AscendingBot),
            BotKind::Descending => Box::new(DescendingBot),
            BotKind::SmallestGap => Box::new(SmallestGapBot),
            BotKind::ShortestRow => Box::new(ShortestRowBot),
            BotKind::Cost => Box::new(CostBot::default()),
        }
    }
}

impl std::fmt::Display for BotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        BotKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = BotKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown bot '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn card(n: u8) -> Card {
        Card::new(n).unwrap()
    }

    fn hand(numbers: &[u8]) -> Hand {
        numbers.iter().map(|&n| card(n)).collect()
    }

    fn board(rows: [&[u8]; 4]) -> Board {
        let rows: Vec<Vec<Card>> = rows
            .iter()
            .map(|r| r.iter().map(|&n| card(n)).collect())
            .collect();
        let slices: Vec<&[Card]> = rows.iter().map(Vec::as_slice).collect();
        Board::from_rows(&slices).unwrap()
    }

    #[test]
    fn test_ascending_and_descending() {
        let b = board([&[10], &[20], &[30], &[40]]);
        let view = BoardView::new(&b, 1, 4);
        let h = hand(&[33, 4, 91]);

        assert_eq!(AscendingBot.choose_card(&h, &view).unwrap(), card(4));
        assert_eq!(DescendingBot.choose_card(&h, &view).unwrap(), card(91));
    }

    #[test]
    fn test_random_bot_plays_from_hand() {
        let b = board([&[10], &[20], &[30], &[40]]);
        let view = BoardView::new(&b, 1, 4);
        let h = hand(&[3, 14, 15, 92]);
        let mut bot = RandomBot::new(GameRng::new(3));

        for _ in 0..20 {
            assert!(h.contains(bot.choose_card(&h, &view).unwrap()));
        }
    }

    #[test]
    fn test_smallest_gap_skips_full_rows() {
        // Row 0 is full, so 46 would overflow it; 22 sits 2 above head 20.
        let b = board([&[5, 15, 25, 35, 45], &[20], &[60], &[80]]);
        let view = BoardView::new(&b, 1, 4);
        let h = hand(&[3, 22, 46]);

        assert_eq!(SmallestGapBot.choose_card(&h, &view).unwrap(), card(22));
    }

    #[test]
    fn test_smallest_gap_falls_back_to_lowest() {
        let b = board([&[50], &[60], &[70], &[80]]);
        let view = BoardView::new(&b, 1, 4);
        assert_eq!(SmallestGapBot.choose_card(&hand(&[9, 3]), &view).unwrap(), card(3));
    }

    #[test]
    fn test_shortest_row_prefers_short_row() {
        // 24 lands on row 0 (length 3, gap 1); 41 lands on row 1 (length 1, gap 1).
        let b = board([&[10, 20, 23], &[40], &[60], &[80]]);
        let view = BoardView::new(&b, 1, 4);
        assert_eq!(ShortestRowBot.choose_card(&hand(&[24, 41]), &view).unwrap(), card(41));
    }

    #[test]
    fn test_cost_bot_avoids_full_row() {
        // 46 overflows row 0 (10 points); 61 follows 60 directly (cost 0).
        let b = board([&[5, 15, 25, 35, 45], &[60], &[70], &[80]]);
        let view = BoardView::new(&b, 1, 4);
        let mut bot = CostBot::default();

        assert_eq!(bot.cost(&view, card(46)), 10.0);
        assert_eq!(bot.cost(&view, card(61)), 0.0);
        assert_eq!(bot.choose_card(&hand(&[46, 61]), &view).unwrap(), card(61));
    }

    #[test]
    fn test_alpha_scales_gap_cost() {
        // 30 lands on row 0 with a gap of 20 and three free slots.
        let b = board([&[5, 10], &[55], &[70], &[80]]);
        let view = BoardView::new(&b, 1, 6);
        let default = CostBot::default().cost(&view, card(30));
        let steep = CostBot::with_alpha(2.0).cost(&view, card(30));
        let flat = CostBot::with_alpha(0.0).cost(&view, card(30));

        assert!(steep > default && default > 0.0);
        assert_eq!(flat, 0.0);
    }

    #[test]
    fn test_cost_below_all_heads_is_cheapest_row() {
        let b = board([&[55], &[60], &[70], &[80]]);
        let view = BoardView::new(&b, 1, 4);
        assert_eq!(CostBot::default().cost(&view, card(2)), 3.0);
    }

    #[test]
    fn test_bots_take_cheapest_row() {
        let b = board([&[55], &[11], &[10], &[1, 2]]);
        let view = BoardView::new(&b, 1, 4);
        let h = hand(&[7]);
        for kind in BotKind::ALL {
            let mut bot = kind.build(GameRng::new(1));
            assert_eq!(bot.choose_row(&h, &view, card(7)).unwrap(), RowIndex(3), "{}", kind);
        }
    }

    #[test]
    fn test_bot_kind_parse() {
        assert_eq!("cost".parse::<BotKind>().unwrap(), BotKind::Cost);
        assert_eq!("Smallest_Gap".parse::<BotKind>().unwrap(), BotKind::SmallestGap);
        assert!("clever".parse::<BotKind>().is_err());
        for kind in BotKind::ALL {
            assert_eq!(kind.to_string().parse::<BotKind>().unwrap(), kind);
        }
    }
}
