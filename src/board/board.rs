//! The four rows in the middle of the table.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::row::{Row, Taken};
use crate::core::{total_penalty, Card, EngineError};

/// Number of rows on the board.
pub const ROW_COUNT: usize = 4;

/// Index of a board row, 0-based.
///
/// The raw value is public so strategies can return anything; the engine
/// checks the range before using it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowIndex(pub u8);

impl RowIndex {
    /// A checked row index, `None` outside `0..4`.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < ROW_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        (self.0 as usize) < ROW_COUNT
    }

    /// All four row indices.
    pub fn all() -> impl Iterator<Item = RowIndex> {
        (0..ROW_COUNT as u8).map(RowIndex)
    }
}

impl std::fmt::Display for RowIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}", self.0 + 1)
    }
}

/// Where a card went when it fit above some row head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Landing {
    /// Appended to the row; it is the new head.
    Appended(RowIndex),
    /// The row was full: its cards were taken and the card starts it anew.
    Overflow(RowIndex, Taken),
}

/// Four rows plus the cards removed from them during the current hand-out.
///
/// Deserialized boards are checked like [`Board::from_rows`]; a discarded
/// card may not also lie in a row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    rows: [Row; ROW_COUNT],
    discarded: Vector<Card>,
}

#[derive(Deserialize)]
struct BoardRepr {
    rows: [Row; ROW_COUNT],
    discarded: Vector<Card>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = EngineError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let on_rows = repr.rows.iter().flat_map(|r| r.cards().iter());
        check_unique(on_rows.chain(repr.discarded.iter()))?;
        Ok(Self {
            rows: repr.rows,
            discarded: repr.discarded,
        })
    }
}

fn check_unique<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Result<(), EngineError> {
    let mut seen = FxHashSet::default();
    for &card in cards {
        if !seen.insert(card) {
            return Err(EngineError::DuplicateCard(card));
        }
    }
    Ok(())
}

impl Board {
    /// A fresh board with one card per row.
    #[must_use]
    pub fn seed(cards: [Card; ROW_COUNT]) -> Self {
        Self {
            rows: cards.map(Row::start),
            discarded: Vector::new(),
        }
    }

    /// Build a board from explicit rows, checking every invariant:
    /// exactly four rows, each valid, no card on two rows.
    pub fn from_rows(rows: &[&[Card]]) -> Result<Self, EngineError> {
        if rows.len() != ROW_COUNT {
            return Err(EngineError::InvalidConfig(format!(
                "a board has {} rows, got {}",
                ROW_COUNT,
                rows.len()
            )));
        }
        check_unique(rows.iter().flat_map(|r| r.iter()))?;
        let built = [
            Row::from_cards(rows[0])?,
            Row::from_cards(rows[1])?,
            Row::from_cards(rows[2])?,
            Row::from_cards(rows[3])?,
        ];
        Ok(Self {
            rows: built,
            discarded: Vector::new(),
        })
    }

    #[must_use]
    pub fn rows(&self) -> &[Row; ROW_COUNT] {
        &self.rows
    }

    /// A row by index, `None` if the index is out of range.
    #[must_use]
    pub fn row(&self, index: RowIndex) -> Option<&Row> {
        self.rows.get(index.index())
    }

    /// Current head of every row.
    #[must_use]
    pub fn heads(&self) -> [Card; ROW_COUNT] {
        [
            self.rows[0].head(),
            self.rows[1].head(),
            self.rows[2].head(),
            self.rows[3].head(),
        ]
    }

    /// Penalty points lying in each row.
    #[must_use]
    pub fn row_penalties(&self) -> [u32; ROW_COUNT] {
        [
            self.rows[0].penalty(),
            self.rows[1].penalty(),
            self.rows[2].penalty(),
            self.rows[3].penalty(),
        ]
    }

    /// Total penalty points on the board.
    #[must_use]
    pub fn penalty_on_board(&self) -> u32 {
        self.rows.iter().map(Row::penalty).sum()
    }

    /// Row with the fewest penalty points, lowest index on ties.
    #[must_use]
    pub fn cheapest_row(&self) -> RowIndex {
        RowIndex::all()
            .min_by_key(|r| (self.rows[r.index()].penalty(), r.index()))
            .unwrap_or(RowIndex(0))
    }

    /// The row a card would join: the one whose head is the largest head
    /// below the card. `None` if the card is lower than every head.
    #[must_use]
    pub fn target_row(&self, card: Card) -> Option<RowIndex> {
        RowIndex::all()
            .filter(|r| self.rows[r.index()].head() < card)
            .max_by_key(|r| self.rows[r.index()].head())
    }

    /// Whether the card is lower than every row head.
    #[must_use]
    pub fn is_below_all_heads(&self, card: Card) -> bool {
        self.target_row(card).is_none()
    }

    /// Whether the card lies anywhere on the board.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.rows.iter().any(|r| r.cards().contains(&card))
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    /// Cards removed by pickups since the board was seeded, in removal order.
    #[must_use]
    pub fn discarded(&self) -> &Vector<Card> {
        &self.discarded
    }

    /// Penalty points removed by pickups since the board was seeded.
    #[must_use]
    pub fn discarded_penalty(&self) -> u32 {
        total_penalty(self.discarded.iter())
    }

    /// Place a card above the nearest lower head.
    ///
    /// Returns `None` and leaves the board untouched if the card is lower
    /// than every head; the owner must then pick a row with [`Board::take_row`].
    pub fn place(&mut self, card: Card) -> Result<Option<Landing>, EngineError> {
        let Some(target) = self.target_row(card) else {
            return Ok(None);
        };
        let row = &mut self.rows[target.index()];
        if row.is_full() {
            let taken = row.reset(card);
            self.discarded.extend(taken.iter().copied());
            Ok(Some(Landing::Overflow(target, taken)))
        } else {
            row.push(card)?;
            Ok(Some(Landing::Appended(target)))
        }
    }

    /// Take every card of a row, leaving `card` as its only card.
    ///
    /// Returns `None` for an out-of-range index.
    pub fn take_row(&mut self, index: RowIndex, card: Card) -> Option<Taken> {
        let row = self.rows.get_mut(index.index())?;
        let taken = row.reset(card);
        self.discarded.extend(taken.iter().copied());
        Some(taken)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}
