//! Integration tests for the move choosers and the background search task

use sight_engine::{
    Board, CancelToken, Color, GameState, MinimaxSearcher, Move, PieceKind, RandomSearcher,
    SearchContext, SearchEvent, SearchTask, Searcher, Setup, Square,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn position(turn: Color, pieces: &[(Color, PieceKind, &str)]) -> Board {
    let mut setup = Setup::empty();
    for &(color, kind, name) in pieces {
        setup.place(color, kind, sq(name)).unwrap();
    }
    setup.set_turn(turn);
    setup.finalize().unwrap()
}

fn back_rank() -> Board {
    position(
        Color::Black,
        &[
            (Color::White, PieceKind::King, "h1"),
            (Color::White, PieceKind::Pawn, "g2"),
            (Color::White, PieceKind::Pawn, "h2"),
            (Color::Black, PieceKind::King, "g8"),
            (Color::Black, PieceKind::Rook, "a8"),
        ],
    )
}

#[test]
fn test_minimax_finds_mate_in_one() {
    let mut board = back_rank();
    let mut searcher = MinimaxSearcher::with_seed(2, 7);
    let choice = searcher.choose(&mut board, &SearchContext::new());
    assert_eq!(choice, Some(Move::new(sq("a8"), sq("a1"))));
}

#[test]
fn test_minimax_takes_hanging_queen() {
    let mut board = position(
        Color::White,
        &[
            (Color::White, PieceKind::King, "e1"),
            (Color::White, PieceKind::Rook, "d1"),
            (Color::Black, PieceKind::King, "h8"),
            (Color::Black, PieceKind::Queen, "d5"),
        ],
    );
    let mut searcher = MinimaxSearcher::with_seed(2, 11);
    let choice = searcher.choose(&mut board, &SearchContext::new());
    assert_eq!(choice, Some(Move::new(sq("d1"), sq("d5"))));
}

#[test]
fn test_search_leaves_board_unchanged() {
    //! Every move tried during the search is undone again

    let mut board = Board::new();
    board.move_piece(Move::new(sq("e2"), sq("e4"))).unwrap();
    let before = board.snapshot();
    let mut searcher = MinimaxSearcher::with_seed(2, 3);
    let choice = searcher.choose(&mut board, &SearchContext::new()).unwrap();
    assert_eq!(board.snapshot(), before);
    assert_eq!(board.history_position(), 1);
    assert!(board.is_legal(choice.from, choice.to));
}

#[test]
fn test_no_move_when_game_over() {
    let mut board = back_rank();
    board.move_piece(Move::new(sq("a8"), sq("a1"))).unwrap();
    assert_eq!(board.state(), GameState::BlackWins);
    let ctx = SearchContext::new();
    assert_eq!(RandomSearcher::with_seed(1).choose(&mut board, &ctx), None);
    assert_eq!(MinimaxSearcher::with_seed(1, 1).choose(&mut board, &ctx), None);
}

#[test]
fn test_cancelled_context_returns_nothing() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let ctx = SearchContext::new().with_cancel(cancel);
    let mut board = Board::new();
    assert_eq!(MinimaxSearcher::with_seed(3, 5).choose(&mut board, &ctx), None);
    assert_eq!(RandomSearcher::with_seed(5).choose(&mut board, &ctx), None);
}

#[test]
fn test_task_reports_progress_then_finishes() {
    //! Progress climbs monotonically to 100 and the last event carries the choice

    let board = Board::new();
    let task = SearchTask::spawn(&board, MinimaxSearcher::with_seed(2, 9));

    let mut percents = Vec::new();
    let finished = loop {
        match task.progress().recv().unwrap() {
            SearchEvent::Progress(percent) => percents.push(percent),
            SearchEvent::Finished(choice) => break choice,
        }
    };
    let joined = task.join();

    assert_eq!(finished, joined);
    let choice = joined.unwrap();
    assert!(board.is_legal(choice.from, choice.to));
    assert_eq!(percents.last(), Some(&100));
    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_task_can_be_cancelled() {
    let board = Board::new();
    let task = SearchTask::spawn(&board, MinimaxSearcher::with_seed(4, 13));
    task.cancel();
    assert_eq!(task.join(), None);
}

#[test]
fn test_random_self_play_through_tasks() {
    //! Background choices are always legal on the caller's board

    let mut board = Board::new();
    for seed in 0..60 {
        if board.is_game_over() {
            break;
        }
        let task = SearchTask::spawn(&board, RandomSearcher::with_seed(seed));
        let choice = task.join().unwrap();
        board.move_piece(choice).unwrap();
    }
    board.validate_integrity();
    assert_eq!(board.history_len(), board.export_moves().len());
}
