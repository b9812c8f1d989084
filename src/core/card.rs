//! Cards and their penalty ("bull") points.
//!
//! A Take 5 deck has exactly one card for every number in `1..=104`.
//! The penalty of a card is fully determined by its number:
//!
//! | Number                  | Penalty |
//! |-------------------------|---------|
//! | 55                      | 7       |
//! | other multiples of 11   | 5       |
//! | multiples of 10         | 3       |
//! | other multiples of 5    | 2       |
//! | everything else         | 1       |

use serde::{Deserialize, Serialize};

/// A single card. Immutable, ordered by number.
///
/// ```
/// use take5::core::Card;
///
/// let card = Card::new(55).unwrap();
/// assert_eq!(card.number(), 55);
/// assert_eq!(card.penalty(), 7);
/// assert!(Card::new(0).is_none());
/// assert!(Card::new(105).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Lowest card number.
    pub const MIN: u8 = 1;

    /// Highest card number.
    pub const MAX: u8 = 104;

    /// Create a card, or `None` if the number is outside `1..=104`.
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if number >= Self::MIN && number <= Self::MAX {
            Some(Self(number))
        } else {
            None
        }
    }

    /// The card number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Penalty points carried by this card.
    #[must_use]
    pub const fn penalty(self) -> u32 {
        let n = self.0;
        if n % 55 == 0 {
            7
        } else if n % 11 == 0 {
            5
        } else if n % 10 == 0 {
            3
        } else if n % 5 == 0 {
            2
        } else {
            1
        }
    }

    /// Iterate over every card of a full deck, in ascending order.
    pub fn all() -> impl Iterator<Item = Card> {
        (Self::MIN..=Self::MAX).map(Card)
    }
}

impl TryFrom<u8> for Card {
    type Error = crate::core::EngineError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Card::new(number).ok_or(crate::core::EngineError::CardOutOfRange(number))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sum of the penalties of a set of cards.
pub fn total_penalty<'a>(cards: impl IntoIterator<Item = &'a Card>) -> u32 {
    cards.into_iter().map(|c| c.penalty()).sum()
}
