//! Match flow tests.
//!
//! Full matches between bots: termination policies, hand-outs, aborts and
//! reproducibility.

use take5::{
    Board, BoardView, BotKind, Card, EndReason, EngineError, FaultPolicy, Hand, MatchConfig, MatchEngine, MatchPhase,
    MatchState, PlayerId, RowIndex, Seat, Strategy, StrategyError, TerminationPolicy, ROW_CAPACITY,
};

const LINEUP: [BotKind; 4] = [BotKind::Random, BotKind::Cost, BotKind::SmallestGap, BotKind::Descending];

/// Always plays a card from the board, which is never in its hand.
struct BoardThief;

impl Strategy for BoardThief {
    fn choose_card(&mut self, _hand: &Hand, board: &BoardView<'_>) -> Result<Card, StrategyError> {
        Ok(board.heads()[0])
    }

    fn choose_row(&mut self, _hand: &Hand, _board: &BoardView<'_>, _card: Card) -> Result<RowIndex, StrategyError> {
        Ok(RowIndex(0))
    }
}

fn thief_match(policy: FaultPolicy) -> MatchEngine {
    let config = MatchConfig::new(3).with_fault_policy(policy).with_seed(5);
    let seats = vec![
        Seat::new("thief", BoardThief),
        Seat::bot(BotKind::Ascending, take5::GameRng::new(1)),
        Seat::bot(BotKind::Cost, take5::GameRng::new(2)),
    ];
    MatchEngine::new(config, seats).unwrap()
}

fn assert_rows_valid(board: &Board) {
    for row in board.rows() {
        assert!(!row.is_empty());
        assert!(row.len() <= ROW_CAPACITY);
        assert!(row.cards().windows(2).all(|w| w[0] < w[1]));
    }
}

/// Test that a seed fully determines a match.
#[test]
fn test_same_seed_same_match() {
    let config = MatchConfig::new(4).with_seed(1234);

    let mut a = MatchEngine::with_bots(config.clone(), &LINEUP).unwrap();
    let mut b = MatchEngine::with_bots(config, &LINEUP).unwrap();
    let report_a = a.run().unwrap();
    let report_b = b.run().unwrap();

    assert_eq!(report_a, report_b);
    assert_eq!(a.history(), b.history());
}

/// Test the default policy: the hand-out in which the threshold is reached
/// is played to the end.
#[test]
fn test_finish_hand_out_policy() {
    let config = MatchConfig::new(4).with_seed(9);
    let mut engine = MatchEngine::with_bots(config, &LINEUP).unwrap();
    let report = engine.run().unwrap();

    let EndReason::ThresholdReached { player, penalty } = report.end_reason else {
        panic!("expected the threshold to be reached, got {:?}", report.end_reason);
    };
    assert!(penalty >= 66);
    assert_eq!(report.penalty(player), Some(penalty));
    assert_eq!(report.rounds % 10, 0);
    assert!(engine.state().hands_exhausted());
    assert_eq!(engine.phase(), MatchPhase::Finished(report.end_reason));
    assert_eq!(engine.history().len() as u32, report.rounds);
}

/// Test that the immediate policy stops at the first round reaching the
/// threshold.
#[test]
fn test_immediate_policy() {
    let config = MatchConfig::new(4)
        .with_seed(9)
        .with_loss_threshold(15)
        .with_termination(TerminationPolicy::Immediate);
    let mut engine = MatchEngine::with_bots(config, &LINEUP).unwrap();
    let report = engine.run().unwrap();

    let mut totals = [0u32; 4];
    let rounds: Vec<_> = engine.history().iter().cloned().collect();
    let (last, earlier) = rounds.split_last().unwrap();
    for outcome in earlier {
        for seat in PlayerId::all(4) {
            totals[seat.index()] += outcome.penalty_for(seat);
        }
        assert!(totals.iter().all(|&t| t < 15));
    }
    for seat in PlayerId::all(4) {
        totals[seat.index()] += last.penalty_for(seat);
        assert_eq!(report.penalty(seat), Some(totals[seat.index()]));
    }
    assert!(totals.iter().any(|&t| t >= 15));
}

/// Test that winners hold the lowest total and the loser the highest.
#[test]
fn test_report_winners() {
    let mut engine = MatchEngine::with_bots(MatchConfig::new(4).with_seed(77), &LINEUP).unwrap();
    let report = engine.run().unwrap();

    let best = report.standings.iter().map(|s| s.penalty).min().unwrap();
    assert!(!report.winners.is_empty());
    for winner in &report.winners {
        assert_eq!(report.penalty(*winner), Some(best));
    }
    assert_eq!(report.standings[0].rank, 1);
    assert!(report.standings.windows(2).all(|w| w[0].penalty <= w[1].penalty));
}

/// Test that points are neither created nor lost within a hand-out.
#[test]
fn test_hand_out_conserves_penalty() {
    let config = MatchConfig::new(5).with_loss_threshold(u32::MAX).with_max_hand_outs(1);
    let mut engine = MatchEngine::with_bots(config, &[BotKind::Random; 5]).unwrap();

    let dealt: u32 = engine
        .state()
        .players()
        .values()
        .map(|p| p.hand().total_penalty())
        .sum::<u32>()
        + engine.state().board().penalty_on_board();

    let report = engine.run().unwrap();
    assert_eq!(report.end_reason, EndReason::HandOutLimit);

    let state = engine.state();
    assert_eq!(state.total_penalty() + state.board().penalty_on_board(), dealt);
    assert_eq!(state.board().discarded_penalty(), state.total_penalty());
}

/// Test that the board stays valid after every round of a match.
#[test]
fn test_row_invariant_holds_every_round() {
    let mut engine = MatchEngine::with_bots(MatchConfig::new(4).with_seed(3), &LINEUP).unwrap();
    while !engine.is_over() {
        let outcome = engine.play_round().unwrap();
        assert_eq!(outcome.plays.len(), 4);
        assert!(outcome.plays.windows(2).all(|w| w[0].card < w[1].card));
        assert_rows_valid(engine.state().board());

        let book = engine.score_book().unwrap();
        assert_eq!(book.total_penalty(), engine.state().total_penalty());
        assert_eq!(book.standings().len(), 4);
    }
    let report = engine.final_report().unwrap();
    assert_eq!(engine.score_book().unwrap().standings(), report.standings);
}

/// Test that a new hand-out is dealt when hands run out.
#[test]
fn test_redeal_between_hand_outs() {
    let config = MatchConfig::new(2).with_loss_threshold(1000).with_hand_size(4);
    let mut engine = MatchEngine::with_bots(config, &[BotKind::Cost, BotKind::Ascending]).unwrap();

    assert_eq!(engine.play_hand_out().unwrap().len(), 4);
    let carried = engine.state().total_penalty();
    let rounds = engine.play_hand_out().unwrap();

    assert_eq!(rounds[0].hand_out, 2);
    assert_eq!(rounds[0].round, 1);
    assert_eq!(engine.state().hand_outs(), 2);
    assert!(engine.state().total_penalty() >= carried);
    assert_eq!(engine.state().rounds_played(), 8);
}

/// Test that an illegal card aborts the match under the default policy.
#[test]
fn test_abort_policy() {
    let mut engine = thief_match(FaultPolicy::Abort);

    let err = engine.run().unwrap_err();
    assert!(matches!(err, EngineError::InvalidCard { .. }));
    assert_eq!(err.player(), Some(PlayerId::new(0)));
    assert_eq!(engine.phase(), MatchPhase::Aborted);
    assert!(matches!(engine.final_report(), Err(EngineError::MatchAborted)));
    assert!(matches!(engine.score_book(), Err(EngineError::MatchAborted)));
    assert!(matches!(engine.play_round(), Err(EngineError::MatchAborted)));
}

/// Test that the fallback policy substitutes the lowest card every time.
#[test]
fn test_fallback_policy() {
    let mut engine = thief_match(FaultPolicy::Fallback);
    let report = engine.run().unwrap();

    assert_eq!(report.standings.iter().find(|s| s.name == "thief").unwrap().faults, report.rounds);
    for outcome in engine.history().iter() {
        assert!(outcome.card_of(PlayerId::new(0)).is_some());
    }
}

/// Test starting from a prepared position.
#[test]
fn test_from_state() {
    let c = |n| Card::new(n).unwrap();
    let board = Board::seed([c(10), c(20), c(30), c(40)]);
    let state = MatchState::from_position(
        ["a".to_string(), "b".to_string()],
        vec![Hand::new([c(5)]), Hand::new([c(41)])],
        board,
    )
    .unwrap();
    let strategies: Vec<Box<dyn Strategy>> = vec![
        BotKind::Ascending.build(take5::GameRng::new(0)),
        BotKind::Ascending.build(take5::GameRng::new(0)),
    ];
    let config = MatchConfig::new(2).with_loss_threshold(3).with_termination(TerminationPolicy::Immediate);
    let mut engine = MatchEngine::from_state(config, state, strategies).unwrap();

    let report = engine.run().unwrap();
    assert_eq!(report.rounds, 1);
    assert_eq!(
        report.end_reason,
        EndReason::ThresholdReached {
            player: PlayerId::new(0),
            penalty: 3
        }
    );
    assert_eq!(engine.name(PlayerId::new(1)), "b");
}

/// Test that independent matches can run on separate threads.
#[test]
fn test_matches_run_in_parallel() {
    let reports: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4u64)
            .map(|seed| {
                scope.spawn(move || {
                    let config = MatchConfig::new(4).with_seed(seed);
                    MatchEngine::with_bots(config, &LINEUP).unwrap().run().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (seed, report) in reports.iter().enumerate() {
        let config = MatchConfig::new(4).with_seed(seed as u64);
        let again = MatchEngine::with_bots(config, &LINEUP).unwrap().run().unwrap();
        assert_eq!(report, &again);
    }
}
