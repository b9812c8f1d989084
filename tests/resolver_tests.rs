//! Round resolution tests.
//!
//! Each test sets up an explicit position, scripts the players' choices and
//! checks the board and penalties after one round.

use std::io::Cursor;

use take5::core::total_penalty;
use take5::{
    Board, BoardView, Card, EngineError, FaultPolicy, Hand, MatchState, Placement, PlayerId, PlayerMap, RoundResolver,
    RowIndex, ScriptedStrategy, Strategy, StrategyError, TerminalStrategy,
};

fn card(n: u8) -> Card {
    Card::new(n).unwrap()
}

fn cards(numbers: &[u8]) -> Vec<Card> {
    numbers.iter().map(|&n| card(n)).collect()
}

fn position(hands: &[&[u8]], rows: [&[u8]; 4]) -> MatchState {
    let rows: Vec<Vec<Card>> = rows.iter().map(|r| cards(r)).collect();
    let slices: Vec<&[Card]> = rows.iter().map(Vec::as_slice).collect();
    let board = Board::from_rows(&slices).unwrap();
    let hands: Vec<Hand> = hands.iter().map(|h| Hand::new(cards(h))).collect();
    let names = (0..hands.len()).map(|i| format!("p{}", i));
    MatchState::from_position(names, hands, board).unwrap()
}

fn row_numbers(state: &MatchState, row: usize) -> Vec<u8> {
    state.board().rows()[row].cards().iter().map(|c| c.number()).collect()
}

/// Records what it was shown, then defers to a script.
#[derive(Default)]
struct Spy {
    script: ScriptedStrategy,
    boards_seen: Vec<Board>,
    row_requests: Vec<Card>,
}

impl Spy {
    fn new(cards: &[u8], rows: &[u8]) -> Self {
        Self {
            script: ScriptedStrategy::new(
                cards.iter().map(|&n| card(n)),
                rows.iter().map(|&r| RowIndex(r)),
            ),
            ..Self::default()
        }
    }
}

impl Strategy for Spy {
    fn choose_card(&mut self, hand: &Hand, board: &BoardView<'_>) -> Result<Card, StrategyError> {
        self.boards_seen.push(board.board().clone());
        self.script.choose_card(hand, board)
    }

    fn choose_row(&mut self, hand: &Hand, board: &BoardView<'_>, card: Card) -> Result<RowIndex, StrategyError> {
        self.row_requests.push(card);
        self.script.choose_row(hand, board, card)
    }
}

/// Card below every head: the owner picks a row and takes its points.
#[test]
fn test_below_all_heads_takes_chosen_row() {
    let mut state = position(&[&[2], &[90]], [&[1, 3], &[35], &[50], &[75]]);
    let mut players = PlayerMap::from_vec(vec![Spy::new(&[2], &[0]), Spy::new(&[90], &[])]);

    let outcome = RoundResolver::default().resolve(&mut state, &mut players).unwrap();

    assert_eq!(players[PlayerId::new(0)].row_requests, vec![card(2)]);
    assert!(players[PlayerId::new(1)].row_requests.is_empty());
    assert_eq!(state.player(PlayerId::new(0)).penalty(), 2);
    assert_eq!(row_numbers(&state, 0), vec![2]);
    assert_eq!(row_numbers(&state, 3), vec![75, 90]);
    assert_eq!(
        outcome.plays[0].placement,
        Placement::BelowAllHeads {
            row: RowIndex(0),
            taken: cards(&[1, 3]),
            penalty: 2
        }
    );
}

/// A card joins the row with the largest head below it.
#[test]
fn test_nearest_lower_head() {
    let mut state = position(&[&[25], &[99]], [&[10], &[20], &[30], &[40]]);
    let mut players = PlayerMap::new(2, |_| ScriptedStrategy::default());

    let outcome = RoundResolver::default().resolve(&mut state, &mut players).unwrap();

    assert_eq!(row_numbers(&state, 1), vec![20, 25]);
    assert_eq!(state.board().heads()[1], card(25));
    assert_eq!(outcome.plays[0].placement, Placement::Appended { row: RowIndex(1) });
    assert_eq!(state.total_penalty(), 0);
}

/// The sixth card takes the five and starts the row over.
#[test]
fn test_sixth_card_takes_row() {
    let mut state = position(&[&[46], &[99]], [&[5, 15, 25, 35, 45], &[50], &[60], &[70]]);
    let mut players = PlayerMap::new(2, |_| ScriptedStrategy::default());

    let outcome = RoundResolver::default().resolve(&mut state, &mut players).unwrap();

    assert_eq!(state.player(PlayerId::new(0)).penalty(), 10);
    assert_eq!(row_numbers(&state, 0), vec![46]);
    assert_eq!(outcome.penalty_for(PlayerId::new(0)), 10);
    assert!(outcome.plays[0].placement.is_pickup());
    assert_eq!(state.board().discarded().len(), 5);
}

/// A lower card's pickup changes where a higher card lands.
#[test]
fn test_placements_are_sequential() {
    let mut state = position(&[&[45], &[5]], [&[10], &[20], &[30], &[40]]);
    let mut players = PlayerMap::from_vec(vec![Spy::new(&[45], &[]), Spy::new(&[5], &[3])]);

    let outcome = RoundResolver::default().resolve(&mut state, &mut players).unwrap();

    let order: Vec<u8> = outcome.plays.iter().map(|p| p.card.number()).collect();
    assert_eq!(order, vec![5, 45]);
    assert_eq!(row_numbers(&state, 3), vec![5]);
    assert_eq!(row_numbers(&state, 2), vec![30, 45]);
    assert_eq!(state.player(PlayerId::new(1)).penalty(), 3);
}

/// Two cards in one round: the first fills the row, the second overflows it.
#[test]
fn test_fill_then_overflow_in_one_round() {
    let mut state = position(&[&[6], &[5]], [&[1, 2, 3, 4], &[50], &[60], &[70]]);
    let mut players = PlayerMap::new(2, |_| ScriptedStrategy::default());

    RoundResolver::default().resolve(&mut state, &mut players).unwrap();

    assert_eq!(state.player(PlayerId::new(1)).penalty(), 0);
    assert_eq!(state.player(PlayerId::new(0)).penalty(), 6);
    assert_eq!(row_numbers(&state, 0), vec![6]);
}

/// Everyone chooses against the start-of-round board and the board is not
/// changed while choices are collected.
#[test]
fn test_choices_see_round_start_board() {
    let mut state = position(&[&[11, 80], &[12, 81], &[13, 82]], [&[10], &[20], &[30], &[40]]);
    let before = state.board().clone();
    let mut players = PlayerMap::from_vec(vec![Spy::new(&[11], &[]), Spy::new(&[12], &[]), Spy::new(&[13], &[])]);

    RoundResolver::default().resolve(&mut state, &mut players).unwrap();

    for (_, spy) in players.iter() {
        assert_eq!(spy.boards_seen, vec![before.clone()]);
    }
    assert_eq!(row_numbers(&state, 0), vec![10, 11, 12, 13]);
    for (_, player) in state.players().iter() {
        assert_eq!(player.hand().len(), 1);
    }
}

/// Points taken plus points left on the board equal points placed.
#[test]
fn test_round_conserves_penalty() {
    let mut state = position(&[&[55, 3], &[46, 7], &[2, 9]], [&[5, 15, 25, 35, 45], &[50], &[60], &[70]]);
    let on_board = state.board().penalty_on_board();
    let mut players = PlayerMap::new(3, |_| ScriptedStrategy::default());

    let outcome = RoundResolver::default().resolve(&mut state, &mut players).unwrap();

    let played = total_penalty(outcome.plays.iter().map(|p| &p.card));
    assert_eq!(
        state.total_penalty() + state.board().penalty_on_board(),
        on_board + played
    );
}

#[test]
fn test_invalid_row_aborts() {
    let mut state = position(&[&[2], &[90]], [&[10], &[20], &[30], &[40]]);
    let mut players = PlayerMap::from_vec(vec![
        ScriptedStrategy::new([card(2)], [RowIndex(7)]),
        ScriptedStrategy::default(),
    ]);

    let err = RoundResolver::new(FaultPolicy::Abort)
        .resolve(&mut state, &mut players)
        .unwrap_err();
    assert_eq!(err.player(), Some(PlayerId::new(0)));
    assert!(matches!(err, EngineError::InvalidRow { row: 7, .. }));
}

#[test]
fn test_invalid_row_fallback_takes_cheapest() {
    let mut state = position(&[&[2], &[90]], [&[10, 55], &[20], &[30, 33], &[40]]);
    let mut players = PlayerMap::from_vec(vec![
        ScriptedStrategy::new([card(2)], [RowIndex(7)]),
        ScriptedStrategy::default(),
    ]);

    let outcome = RoundResolver::new(FaultPolicy::Fallback)
        .resolve(&mut state, &mut players)
        .unwrap();

    assert_eq!(outcome.plays[0].placement.row(), RowIndex(1));
    assert_eq!(state.player(PlayerId::new(0)).faults(), 1);
    assert_eq!(state.player(PlayerId::new(0)).penalty(), 3);
}

/// A failing strategy ends the round even under the fallback policy.
#[test]
fn test_strategy_failure_is_fatal() {
    let mut state = position(&[&[2], &[90]], [&[10], &[20], &[30], &[40]]);
    let mut players: PlayerMap<Box<dyn Strategy>> = PlayerMap::from_vec(vec![
        Box::new(ScriptedStrategy::default()),
        Box::new(TerminalStrategy::new("eve", Cursor::new(""), Vec::new())),
    ]);

    let err = RoundResolver::new(FaultPolicy::Fallback)
        .resolve(&mut state, &mut players)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Strategy {
            source: StrategyError::InputClosed,
            ..
        }
    ));
    assert_eq!(err.player(), Some(PlayerId::new(1)));
}
