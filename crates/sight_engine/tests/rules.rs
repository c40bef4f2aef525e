//! Integration tests for move legality and game-state detection
//!
//! Positions are either reached from the opening with real moves or built with `Setup`, then
//! checked through the public query surface only.

use sight_engine::{
    BitSet, Board, CastleRights, ChessEngineError, Color, GameState, Move, MoveKind, PieceKind,
    Setup, Square,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

fn squares(names: &[&str]) -> BitSet {
    names.iter().map(|name| sq(name)).collect()
}

fn play(moves: &[(&str, &str)]) -> Board {
    let mut board = Board::new();
    for &(from, to) in moves {
        board.move_piece(mv(from, to)).unwrap();
    }
    board
}

fn position(turn: Color, pieces: &[(Color, PieceKind, &str)]) -> Board {
    let mut setup = Setup::empty();
    for &(color, kind, name) in pieces {
        setup.place(color, kind, sq(name)).unwrap();
    }
    setup.set_turn(turn);
    setup.finalize().unwrap()
}

use Color::{Black, White};
use PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};

#[test]
fn test_opening_has_twenty_moves() {
    //! 16 pawn moves and 4 knight moves for White in the opening position

    let board = Board::new();
    let moves = board.all_legal_moves();
    assert_eq!(moves.len(), 20);
    let knight_moves = moves
        .iter()
        .filter(|m| board.piece_at(m.from).map(|p| p.kind) == Some(Knight))
        .count();
    assert_eq!(knight_moves, 4);
    assert!(board.legal_destinations(Black).count_ones() > 0);
}

#[test]
fn test_fools_mate() {
    //! The fastest possible checkmate ends the game for White

    let mut board = play(&[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")]);
    assert_eq!(board.state(), GameState::BlackWins);
    assert!(board.is_game_over());
    assert!(board.all_legal_moves().is_empty());
    assert!(board.movers().is_empty());
    assert_eq!(
        board.move_piece(mv("a2", "a3")),
        Err(ChessEngineError::GameOver {
            state: GameState::BlackWins
        })
    );
    board.validate_integrity();
}

#[test]
fn test_back_rank_mate() {
    //! A rook on the first rank mates a king boxed in by its own pawns

    let mut board = position(
        Black,
        &[
            (White, King, "h1"),
            (White, Pawn, "g2"),
            (White, Pawn, "h2"),
            (Black, King, "g8"),
            (Black, Rook, "a8"),
        ],
    );
    assert_eq!(board.state(), GameState::Play);
    board.move_piece(mv("a8", "a1")).unwrap();
    assert_eq!(board.state(), GameState::BlackWins);
}

#[test]
fn test_stalemate_without_moves() {
    //! The side to move has no legal move and is not in check

    let mut board = position(
        White,
        &[
            (White, King, "e1"),
            (White, Queen, "d7"),
            (Black, King, "a8"),
        ],
    );
    board.move_piece(mv("d7", "c7")).unwrap();
    assert_eq!(board.state(), GameState::Stalemate);
    assert!(board.legal_moves_from(sq("a8")).is_empty());
}

#[test]
fn test_stalemate_with_only_kings() {
    //! Capturing the last other piece leaves a drawn two-king board

    let mut board = position(
        White,
        &[
            (White, King, "e4"),
            (Black, King, "e8"),
            (Black, Knight, "d5"),
        ],
    );
    assert_eq!(board.move_piece(mv("e4", "d5")), Ok(MoveKind::Capture));
    assert_eq!(board.state(), GameState::Stalemate);
}

#[test]
fn test_single_check_restriction() {
    //! Only blocking or capturing the checking rook is allowed for other pieces

    let board = position(
        White,
        &[
            (White, King, "e1"),
            (White, Bishop, "b5"),
            (Black, King, "h8"),
            (Black, Rook, "e8"),
        ],
    );
    assert_eq!(board.state(), GameState::WhiteInCheck);
    assert_eq!(
        board.check_restriction(),
        squares(&["e2", "e3", "e4", "e5", "e6", "e7", "e8"])
    );
    assert_eq!(board.legal_moves_from(sq("b5")), squares(&["e2", "e8"]));
    assert!(!board.legal_moves_from(sq("e1")).contains(sq("e2")));
}

#[test]
fn test_double_check_leaves_only_king_moves() {
    //! Two attackers clear the restriction entirely

    let board = position(
        White,
        &[
            (White, King, "e1"),
            (White, Queen, "a3"),
            (Black, King, "h8"),
            (Black, Rook, "e8"),
            (Black, Knight, "d3"),
        ],
    );
    assert_eq!(board.state(), GameState::WhiteInCheck);
    assert!(board.check_restriction().is_empty());
    assert!(board.legal_moves_from(sq("a3")).is_empty());
    assert_eq!(
        board.legal_moves_from(sq("e1")),
        squares(&["d1", "d2", "f1"])
    );
}

#[test]
fn test_pinned_pieces() {
    //! A pinned rook stays on the pin line; a pinned knight cannot move

    let rook = position(
        White,
        &[
            (White, King, "e1"),
            (White, Rook, "e4"),
            (Black, King, "a8"),
            (Black, Rook, "e8"),
        ],
    );
    assert_eq!(
        rook.legal_moves_from(sq("e4")),
        squares(&["e2", "e3", "e5", "e6", "e7", "e8"])
    );

    let knight = position(
        White,
        &[
            (White, King, "e1"),
            (White, Knight, "e4"),
            (Black, King, "a8"),
            (Black, Rook, "e8"),
        ],
    );
    assert!(knight.legal_moves_from(sq("e4")).is_empty());
    assert_eq!(knight.attacks_from(sq("e4")).count_ones(), 8);

    let diagonal = position(
        White,
        &[
            (White, King, "a1"),
            (White, Bishop, "c3"),
            (Black, King, "h1"),
            (Black, Queen, "f6"),
        ],
    );
    assert_eq!(
        diagonal.legal_moves_from(sq("c3")),
        squares(&["b2", "d4", "e5", "f6"])
    );
}

#[test]
fn test_king_cannot_retreat_along_checking_ray() {
    //! The square behind the king on the rook's line is still attacked

    let board = position(
        White,
        &[
            (White, King, "d4"),
            (Black, King, "h8"),
            (Black, Rook, "a4"),
        ],
    );
    assert_eq!(
        board.legal_moves_from(sq("d4")),
        squares(&["c3", "c5", "d3", "d5", "e3", "e5"])
    );
}

#[test]
fn test_promotion_requires_kind() {
    //! Reaching the last rank needs Queen, Rook, Bishop or Knight; undo brings the pawn back

    let mut board = position(
        White,
        &[
            (White, King, "e1"),
            (White, Pawn, "b7"),
            (Black, King, "h5"),
        ],
    );
    let before = board.snapshot();
    assert_eq!(
        board.move_piece(mv("b7", "b8")),
        Err(ChessEngineError::InvalidPromotion { kind: None })
    );
    assert_eq!(
        board.move_piece(Move::with_promotion(sq("b7"), sq("b8"), King)),
        Err(ChessEngineError::InvalidPromotion { kind: Some(King) })
    );
    assert_eq!(board.snapshot(), before);

    let kind = board
        .move_piece(Move::with_promotion(sq("b7"), sq("b8"), Queen))
        .unwrap();
    assert_eq!(kind, MoveKind::PromoteTo(Queen));
    let queen = board.piece_at(sq("b8")).unwrap();
    assert_eq!(queen.kind, Queen);
    assert_eq!(queen.slot_kind, Pawn);
    assert!(queen.was_pawn);
    assert!(board.attacks_from(sq("b8")).contains(sq("b1")));
    assert!(board.attacks_from(sq("b8")).contains(sq("h8")));
    assert_eq!(board.white_value(), 9);

    board.undo().unwrap();
    let pawn = board.piece_at(sq("b7")).unwrap();
    assert_eq!(pawn.kind, Pawn);
    assert!(!pawn.was_pawn);
    assert_eq!(board.piece_at(sq("b8")), None);
    assert_eq!(board.white_value(), 1);
    assert_eq!(board.snapshot(), before);
}

#[test]
fn test_en_passant_lasts_one_ply() {
    //! The passed-over square is a capture for exactly the reply to the double push

    let board = play(&[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);
    assert_eq!(board.en_passant(), Some(sq("d6")));
    assert!(board.legal_moves_from(sq("e5")).contains(sq("d6")));

    let mut captured = board.clone();
    assert_eq!(
        captured.move_piece(mv("e5", "d6")),
        Ok(MoveKind::EnPassant)
    );
    assert_eq!(captured.piece_at(sq("d5")), None);
    assert_eq!(captured.piece_at(sq("d6")).map(|p| p.color), Some(White));
    assert_eq!(captured.white_value(), 1);
    captured.undo().unwrap();
    assert_eq!(captured.piece_at(sq("d5")).map(|p| p.kind), Some(Pawn));
    assert_eq!(captured.snapshot(), board.snapshot());

    let mut waited = board.clone();
    waited.move_piece(mv("h2", "h3")).unwrap();
    assert_eq!(waited.en_passant(), None);
    waited.move_piece(mv("h7", "h6")).unwrap();
    let moves = waited.legal_moves_from(sq("e5"));
    assert!(moves.contains(sq("e6")));
    assert!(!moves.contains(sq("d6")));
}

#[test]
fn test_en_passant_cannot_expose_king_on_rank() {
    //! Both pawns leaving the king's rank would open it to the rook

    let exposed = [
        (White, King, "a5"),
        (White, Pawn, "b5"),
        (Black, King, "e8"),
        (Black, Pawn, "c7"),
        (Black, Rook, "h5"),
    ];
    let mut board = position(Black, &exposed);
    board.move_piece(mv("c7", "c5")).unwrap();
    assert_eq!(board.en_passant(), Some(sq("c6")));
    assert_eq!(board.legal_moves_from(sq("b5")), squares(&["b6"]));

    let mut safe = exposed;
    safe[4] = (Black, Rook, "h6");
    let mut board = position(Black, &safe);
    board.move_piece(mv("c7", "c5")).unwrap();
    assert_eq!(board.legal_moves_from(sq("b5")), squares(&["b6", "c6"]));
}

#[test]
fn test_en_passant_answers_pawn_check() {
    //! Capturing the checking pawn en passant is a legal way out of check

    let mut board = position(
        Black,
        &[
            (White, King, "d4"),
            (White, Pawn, "f5"),
            (Black, King, "e8"),
            (Black, Pawn, "e7"),
        ],
    );
    board.move_piece(mv("e7", "e5")).unwrap();
    assert_eq!(board.state(), GameState::WhiteInCheck);
    assert_eq!(board.check_restriction(), squares(&["e5"]));
    assert_eq!(board.legal_moves_from(sq("f5")), squares(&["e6"]));
    assert_eq!(board.move_piece(mv("f5", "e6")), Ok(MoveKind::EnPassant));
    assert_eq!(board.state(), GameState::Play);
}

fn castling_position(extra: &[(Color, PieceKind, &str)]) -> Board {
    let mut setup = Setup::empty();
    for &(color, kind, name) in [
        (White, King, "e1"),
        (White, Rook, "a1"),
        (White, Rook, "h1"),
        (Black, King, "e8"),
    ]
    .iter()
    .chain(extra)
    {
        setup.place(color, kind, sq(name)).unwrap();
    }
    setup.set_castle_rights(CastleRights::ALL);
    setup.finalize().unwrap()
}

fn castles(board: &Board) -> (bool, bool) {
    let king = board.legal_moves_from(sq("e1"));
    (king.contains(sq("g1")), king.contains(sq("c1")))
}

#[test]
fn test_castling_available() {
    //! Both castles are legal with clear, unattacked paths

    let mut board = castling_position(&[]);
    assert_eq!(castles(&board), (true, true));

    assert_eq!(board.move_piece(mv("e1", "g1")), Ok(MoveKind::Castle));
    assert_eq!(board.piece_at(sq("f1")).map(|p| p.kind), Some(Rook));
    assert_eq!(board.piece_at(sq("g1")).map(|p| p.kind), Some(King));
    assert_eq!(board.piece_at(sq("h1")), None);
    assert!(!board.castle_rights().allows(White, true));
    assert!(!board.castle_rights().allows(White, false));

    board.undo().unwrap();
    assert_eq!(board.piece_at(sq("h1")).map(|p| p.kind), Some(Rook));
    assert_eq!(board.piece_at(sq("e1")).map(|p| p.kind), Some(King));
    assert_eq!(castles(&board), (true, true));
    board.validate_integrity();
}

#[test]
fn test_castling_blocked_by_piece() {
    let board = castling_position(&[(White, Knight, "g1"), (White, Knight, "b1")]);
    assert_eq!(castles(&board), (false, false));
}

#[test]
fn test_castling_through_or_into_attack() {
    //! An attacked transit or landing square blocks that side only

    let transit = castling_position(&[(Black, Rook, "f8")]);
    assert_eq!(castles(&transit), (false, true));

    let landing = castling_position(&[(Black, Rook, "c8")]);
    assert_eq!(castles(&landing), (true, false));

    let in_check = castling_position(&[(Black, Bishop, "b4")]);
    assert_eq!(in_check.state(), GameState::WhiteInCheck);
    assert_eq!(castles(&in_check), (false, false));
}

#[test]
fn test_castling_rights_lost_by_moving() {
    //! Moving the king or a rook away and back still forfeits the right

    let mut king = castling_position(&[]);
    for (from, to) in [("e1", "f1"), ("e8", "d8"), ("f1", "e1"), ("d8", "e8")] {
        king.move_piece(mv(from, to)).unwrap();
    }
    assert_eq!(castles(&king), (false, false));

    let mut rook = castling_position(&[]);
    for (from, to) in [("h1", "h2"), ("e8", "d8"), ("h2", "h1"), ("d8", "e8")] {
        rook.move_piece(mv(from, to)).unwrap();
    }
    assert_eq!(castles(&rook), (false, true));
}

#[test]
fn test_rejected_moves_leave_board_untouched() {
    let mut board = Board::new();
    let before = board.snapshot();
    assert_eq!(
        board.move_piece(mv("e4", "e5")),
        Err(ChessEngineError::EmptySquare { square: sq("e4") })
    );
    assert_eq!(
        board.move_piece(mv("e7", "e5")),
        Err(ChessEngineError::WrongTurn {
            square: sq("e7"),
            found: Black,
            expected: White
        })
    );
    assert_eq!(
        board.move_piece(mv("e2", "e2")),
        Err(ChessEngineError::SameSquare { square: sq("e2") })
    );
    assert_eq!(
        board.move_piece(mv("e2", "e5")),
        Err(ChessEngineError::IllegalMove {
            from: sq("e2"),
            to: sq("e5")
        })
    );
    assert!(!board.is_legal(sq("b1"), sq("d2")));
    assert_eq!(board.snapshot(), before);
    assert_eq!(board.history_len(), 0);
}

#[test]
fn test_fifty_move_rule() {
    //! The fiftieth quiet ply draws the game

    let mut setup = Setup::empty();
    setup.place(White, King, sq("e1")).unwrap();
    setup.place(White, Knight, sq("b1")).unwrap();
    setup.place(Black, King, sq("e8")).unwrap();
    setup.place(Black, Knight, sq("b8")).unwrap();
    setup.set_fifty_move_counter(48);
    let mut board = setup.finalize().unwrap();

    board.move_piece(mv("b1", "c3")).unwrap();
    assert_eq!(board.fifty_move_counter(), 49);
    assert_eq!(board.state(), GameState::Play);
    board.move_piece(mv("b8", "c6")).unwrap();
    assert_eq!(board.fifty_move_counter(), 50);
    assert_eq!(board.state(), GameState::Stalemate);

    board.undo().unwrap();
    assert_eq!(board.state(), GameState::Play);
    assert_eq!(board.fifty_move_counter(), 49);
}

#[test]
fn test_material_value_follows_side_to_move() {
    let board = play(&[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);
    assert_eq!(board.white_value(), 1);
    assert_eq!(board.turn(), Black);
    assert_eq!(board.value(), -1);
    assert_eq!(board.fifty_move_counter(), 0);
}
