//! Manual play at a text prompt.
//!
//! Answers come from a [`LineSource`]. `Stdin` is one: every handle reads
//! through the process-wide buffer, so several human seats can share the
//! same terminal.

use std::io::{self, BufRead, BufReader, Cursor, Read, Stdin, Stdout, Write};
use std::sync::{Arc, Mutex};

use super::Strategy;
use crate::board::{BoardView, RowIndex, ROW_COUNT};
use crate::core::{Card, Hand, StrategyError};

/// A line-oriented input a terminal player reads answers from.
pub trait LineSource: Send {
    /// Append one line to `buf`, returning the bytes read; 0 means the input
    /// is closed.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineSource for Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]> + Send> LineSource for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

impl<R: Read + Send> LineSource for BufReader<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// One source handed to several players; each line goes to whoever asks next.
impl<S: LineSource> LineSource for Arc<Mutex<S>> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        let mut source = self
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "input source poisoned"))?;
        source.read_line(buf)
    }
}

/// A human player answering prompts on a line source and a writer.
///
/// Input that does not parse, or names a card outside the hand, is
/// re-prompted. Rows are entered as `1..=4`.
pub struct TerminalStrategy<R, W> {
    name: String,
    input: R,
    output: W,
}

impl TerminalStrategy<Stdin, Stdout> {
    /// A player on the process's standard input and output.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, std::io::stdin(), std::io::stdout())
    }
}

impl<R: LineSource, W: Write> TerminalStrategy<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    /// Consume the strategy, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, text: &str) -> Result<String, StrategyError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(StrategyError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: LineSource, W: Write + Send> Strategy for TerminalStrategy<R, W> {
    fn choose_card(&mut self, hand: &Hand, board: &BoardView<'_>) -> Result<Card, StrategyError> {
        writeln!(self.output, "\n{}", board.board())?;
        writeln!(self.output, "Player '{}' has to choose a card to play", self.name)?;
        writeln!(self.output, "Hand: {}", hand)?;
        loop {
            let answer = self.prompt("Card to play: ")?;
            let card = answer.parse::<u8>().ok().and_then(Card::new);
            match card {
                Some(card) if hand.contains(card) => return Ok(card),
                _ => writeln!(self.output, "'{}' is not a card in your hand", answer)?,
            }
        }
    }

    fn choose_row(
        &mut self,
        _hand: &Hand,
        board: &BoardView<'_>,
        card: Card,
    ) -> Result<RowIndex, StrategyError> {
        writeln!(
            self.output,
            "Player '{}' has to choose a row to receive ({} is below every row)",
            self.name, card
        )?;
        writeln!(self.output, "Points per row: {:?}", board.row_penalties())?;
        loop {
            let answer = self.prompt("Row to take (1, 2, 3, 4): ")?;
            match answer.parse::<u8>() {
                Ok(n) if (1..=ROW_COUNT as u8).contains(&n) => return Ok(RowIndex(n - 1)),
                _ => writeln!(self.output, "'{}' is not a row", answer)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use std::io::Cursor;

    fn card(n: u8) -> Card {
        Card::new(n).unwrap()
    }

    #[test]
    fn test_reprompts_until_card_in_hand() {
        let board = Board::seed([card(10), card(20), card(30), card(40)]);
        let view = BoardView::new(&board, 1, 2);
        let hand = Hand::new([card(12), card(77)]);

        let input = Cursor::new("abc\n13\n77\n");
        let mut player = TerminalStrategy::new("ann", input, Vec::new());
        assert_eq!(player.choose_card(&hand, &view).unwrap(), card(77));

        let text = String::from_utf8(player.into_output()).unwrap();
        assert!(text.contains("Hand: [12, 77]"));
        assert_eq!(text.matches("Card to play: ").count(), 3);
    }

    #[test]
    fn test_row_is_one_based() {
        let board = Board::seed([card(10), card(20), card(30), card(40)]);
        let view = BoardView::new(&board, 1, 2);

        let input = Cursor::new("0\n5\n2\n");
        let mut player = TerminalStrategy::new("bo", input, Vec::new());
        let row = player.choose_row(&Hand::default(), &view, card(3)).unwrap();
        assert_eq!(row, RowIndex(1));
    }

    #[test]
    fn test_closed_input() {
        let board = Board::seed([card(10), card(20), card(30), card(40)]);
        let view = BoardView::new(&board, 1, 2);
        let mut player = TerminalStrategy::new("cy", Cursor::new(""), Vec::new());

        let err = player.choose_card(&Hand::new([card(1)]), &view).unwrap_err();
        assert!(matches!(err, StrategyError::InputClosed));
    }

    #[test]
    fn test_players_share_one_source() {
        let board = Board::seed([card(10), card(20), card(30), card(40)]);
        let view = BoardView::new(&board, 1, 2);
        let input = Arc::new(Mutex::new(Cursor::new("12\n77\n")));

        let mut ann = TerminalStrategy::new("ann", input.clone(), Vec::new());
        let mut bo = TerminalStrategy::new("bo", input, Vec::new());
        assert_eq!(ann.choose_card(&Hand::new([card(12), card(50)]), &view).unwrap(), card(12));
        assert_eq!(bo.choose_card(&Hand::new([card(77)]), &view).unwrap(), card(77));

        let err = ann.choose_card(&Hand::new([card(50)]), &view).unwrap_err();
        assert!(matches!(err, StrategyError::InputClosed));
    }
}
