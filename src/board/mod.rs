//! The table: four rows of placed cards and the read-only view strategies get.
//!
//! ## Key Types
//!
//! - `Row`: strictly increasing run of at most five cards
//! - `Board`: exactly four rows plus the pickup history of the hand-out
//! - `RowIndex`: unchecked row index as returned by strategies
//! - `BoardView`: borrowed snapshot passed into every strategy call

#[allow(clippy::module_inception)]
pub mod board;
pub mod row;
pub mod view;

pub use board::{Board, Landing, RowIndex, ROW_COUNT};
pub use row::{Row, Taken, ROW_CAPACITY};
pub use view::BoardView;
