// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use chess_rules::{Color, GameResult, GameResultReason, IllegalMove, Piece, PieceKind, Position};
use chess_rules::{Move, State, StateChanger};

fn p(row: i32, col: i32) -> Position {
    Position::new(row, col).unwrap()
}

fn mv(fr: i32, fc: i32, tr: i32, tc: i32) -> Move {
    Move::quiet(p(fr, fc), p(tr, tc))
}

fn piece(color: Color, kind: PieceKind) -> Option<Piece> {
    Some(Piece::new(kind, color))
}

fn pawn(color: Color) -> Option<Piece> {
    piece(color, PieceKind::Pawn)
}

// White pawn on (4,5) next to a black pawn that just double-stepped to (4,6).
fn white_en_passant_setup() -> State {
    let mut state = State::new();
    state.set_piece(p(1, 5), None);
    state.set_piece(p(4, 5), pawn(Color::White));
    state.set_piece(p(6, 0), None);
    state.set_piece(p(5, 0), pawn(Color::Black));
    state.set_piece(p(6, 6), None);
    state.set_piece(p(4, 6), pawn(Color::Black));
    state.set_en_passant_position(Some(p(4, 6)));
    state
}

// Black pawn on (3,1) between white pawns on (3,0) and (3,2); the (3,0) pawn
// just double-stepped.
fn black_en_passant_setup() -> State {
    let mut state = State::new();
    state.set_turn(Color::Black);
    state.set_piece(p(1, 0), None);
    state.set_piece(p(3, 0), pawn(Color::White));
    state.set_piece(p(6, 1), None);
    state.set_piece(p(3, 1), pawn(Color::Black));
    state.set_piece(p(1, 2), None);
    state.set_piece(p(3, 2), pawn(Color::White));
    state.set_en_passant_position(Some(p(3, 0)));
    state
}

#[test]
fn start_has_no_en_passant_target() {
    assert_eq!(None, State::new().en_passant_position());
}

#[test]
fn pawn_single_step() {
    let changer = StateChanger::new();
    let mut state = State::new();
    let mut expected = state.clone();
    expected.set_turn(Color::Black);
    expected.set_piece(p(1, 0), None);
    expected.set_piece(p(2, 0), pawn(Color::White));

    changer.make_move(&mut state, mv(1, 0, 2, 0)).unwrap();
    assert_eq!(expected, state);
}

#[test]
fn pawn_double_step_sets_en_passant() {
    let changer = StateChanger::new();
    let mut state = State::new();
    let mut expected = state.clone();
    expected.set_turn(Color::Black);
    expected.set_piece(p(1, 0), None);
    expected.set_piece(p(3, 0), pawn(Color::White));
    expected.set_en_passant_position(Some(p(3, 0)));

    changer.make_move(&mut state, mv(1, 0, 3, 0)).unwrap();
    assert_eq!(expected, state);
}

#[test]
fn black_double_step_sets_en_passant() {
    let changer = StateChanger::new();
    let mut state = State::new();
    state.set_turn(Color::Black);
    state.set_piece(p(1, 5), None);
    state.set_piece(p(2, 5), pawn(Color::White));

    changer.make_move(&mut state, mv(6, 6, 4, 6)).unwrap();
    assert_eq!(Some(p(4, 6)), state.en_passant_position());
    assert_eq!(Color::White, state.turn());
}

#[test]
fn white_captures_en_passant() {
    let changer = StateChanger::new();
    let mut state = white_en_passant_setup();
    let mut expected = state.clone();
    expected.set_turn(Color::Black);
    expected.set_piece(p(4, 5), None);
    expected.set_piece(p(5, 6), pawn(Color::White));
    expected.set_piece(p(4, 6), None);
    expected.set_en_passant_position(None);

    changer.make_move(&mut state, mv(4, 5, 5, 6)).unwrap();
    assert_eq!(expected, state);
}

#[test]
fn en_passant_expires_after_one_move() {
    let changer = StateChanger::new();
    let mut state = white_en_passant_setup();
    changer.make_move(&mut state, mv(1, 7, 2, 7)).unwrap();
    assert_eq!(None, state.en_passant_position());
    changer.make_move(&mut state, mv(6, 7, 5, 7)).unwrap();

    // the black pawn is still there, but the window has closed.
    assert_eq!(
        Err(IllegalMove::NotAPossibleMove),
        changer.make_move(&mut state, mv(4, 5, 5, 6))
    );
}

#[test]
fn black_captures_en_passant() {
    let changer = StateChanger::new();
    let mut state = black_en_passant_setup();
    let mut expected = state.clone();
    expected.set_turn(Color::White);
    expected.set_piece(p(3, 0), None);
    expected.set_piece(p(3, 1), None);
    expected.set_piece(p(2, 0), pawn(Color::Black));
    expected.set_en_passant_position(None);

    changer.make_move(&mut state, mv(3, 1, 2, 0)).unwrap();
    assert_eq!(expected, state);
}

#[test]
fn en_passant_requires_target() {
    let changer = StateChanger::new();
    let mut state = black_en_passant_setup();
    state.set_en_passant_position(None);
    assert_eq!(
        Err(IllegalMove::NotAPossibleMove),
        changer.make_move(&mut state, mv(3, 1, 2, 0))
    );
}

#[test]
fn en_passant_only_against_target_pawn() {
    let changer = StateChanger::new();
    let mut state = black_en_passant_setup();
    let before = state.clone();
    assert_eq!(
        Err(IllegalMove::NotAPossibleMove),
        changer.make_move(&mut state, mv(3, 1, 2, 2))
    );
    assert_eq!(before, state);
}

#[test]
fn straight_push_ignores_en_passant_target() {
    let changer = StateChanger::new();
    let mut state = black_en_passant_setup();
    let mut expected = state.clone();
    expected.set_turn(Color::White);
    expected.set_piece(p(3, 1), None);
    expected.set_piece(p(2, 1), pawn(Color::Black));
    expected.set_en_passant_position(None);

    changer.make_move(&mut state, mv(3, 1, 2, 1)).unwrap();
    assert_eq!(expected, state);
}

#[test]
fn pawn_cannot_move_diagonally_onto_empty_square() {
    let changer = StateChanger::new();
    let mut state = State::new();
    assert_eq!(
        Err(IllegalMove::NotAPossibleMove),
        changer.make_move(&mut state, mv(1, 3, 2, 4))
    );
}

#[test]
fn pawn_captures_diagonally() {
    let changer = StateChanger::new();
    let mut state = State::new();
    state.set_piece(p(2, 4), pawn(Color::Black));
    state.set_halfmove_clock(12);

    changer.make_move(&mut state, mv(1, 3, 2, 4)).unwrap();
    assert_eq!(pawn(Color::White), state.piece_at(p(2, 4)));
    assert_eq!(0, state.halfmove_clock());
}

#[test]
fn pawn_double_step_only_from_home_row() {
    let changer = StateChanger::new();
    let mut state = State::new();
    state.set_piece(p(1, 2), None);
    state.set_piece(p(2, 2), pawn(Color::White));
    assert_eq!(
        Err(IllegalMove::NotAPossibleMove),
        changer.make_move(&mut state, mv(2, 2, 4, 2))
    );

    changer.make_move(&mut state, mv(2, 2, 3, 2)).unwrap();
    assert_eq!(None, state.en_passant_position());
}

#[test]
fn rook_mate_on_back_rank() {
    let changer = StateChanger::new();
    let mut state = State::empty();
    state.set_piece(p(4, 0), pawn(Color::Black));
    state.set_piece(p(4, 1), pawn(Color::White));
    state.set_piece(p(0, 3), piece(Color::White, PieceKind::King));
    state.set_piece(p(7, 3), piece(Color::Black, PieceKind::King));
    state.set_piece(p(6, 1), piece(Color::White, PieceKind::Rook));
    state.set_piece(p(6, 5), piece(Color::White, PieceKind::Queen));
    state.set_en_passant_position(Some(p(4, 0)));

    let mut expected = state.clone();
    expected.set_turn(Color::Black);
    expected.set_piece(p(6, 1), None);
    expected.set_piece(p(7, 1), piece(Color::White, PieceKind::Rook));
    expected.set_en_passant_position(None);
    expected.set_halfmove_clock(1);
    expected.set_game_result(Some(GameResult::checkmate(Color::White)));

    changer.make_move(&mut state, mv(6, 1, 7, 1)).unwrap();
    assert_eq!(expected, state);

    // nothing moves after the game is decided.
    assert_eq!(
        Err(IllegalMove::GameOver),
        changer.make_move(&mut state, mv(7, 3, 6, 3))
    );
}

#[test]
fn fools_mate() {
    let changer = StateChanger::new();
    let mut state = State::new();
    for &mov in &[mv(1, 5, 2, 5), mv(6, 4, 4, 4), mv(1, 6, 3, 6), mv(7, 3, 3, 7)] {
        changer.make_move(&mut state, mov).unwrap();
    }

    assert!(state.is_check(Color::White));
    assert_eq!(Some(GameResult::checkmate(Color::Black)), state.game_result());
}

#[test]
fn stalemate() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("7k/5Q2/5K2/8/8/8/8/8 w - - 0 1").unwrap();
    changer.make_move(&mut state, mv(5, 5, 5, 6)).unwrap();
    assert_eq!(
        Some(GameResult::draw(GameResultReason::Stalemate)),
        state.game_result()
    );
}

#[test]
fn fifty_move_rule() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("8/7k/6R1/5K2/1r3B2/8/8/8 w - - 99 121").unwrap();
    changer.make_move(&mut state, mv(5, 6, 4, 6)).unwrap();
    assert_eq!(100, state.halfmove_clock());
    assert_eq!(
        Some(GameResult::draw(GameResultReason::FiftyMoveRule)),
        state.game_result()
    );
}

#[test]
fn fifty_move_rule_beats_checkmate() {
    let changer = StateChanger::new();
    // Ra1-a8 is mate, but it is also the hundredth quiet half-move.
    let mut state = State::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 99 80").unwrap();
    changer.make_move(&mut state, mv(0, 0, 7, 0)).unwrap();
    assert!(state.is_check(Color::Black));
    assert_eq!(
        Some(GameResult::draw(GameResultReason::FiftyMoveRule)),
        state.game_result()
    );
}

#[test]
fn quiet_moves_tick_the_clock() {
    let changer = StateChanger::new();
    let mut state = State::new();
    changer.make_move(&mut state, mv(0, 6, 2, 5)).unwrap();
    changer.make_move(&mut state, mv(7, 6, 5, 5)).unwrap();
    assert_eq!(2, state.halfmove_clock());
    changer.make_move(&mut state, mv(1, 4, 3, 4)).unwrap();
    assert_eq!(0, state.halfmove_clock());
}

#[test]
fn promotion() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("1r5k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();

    // a pawn reaching the last row has to name its promotion.
    assert_eq!(
        Err(IllegalMove::NotAPossibleMove),
        changer.make_move(&mut state, mv(6, 0, 7, 0))
    );
    assert_eq!(
        Err(IllegalMove::InvalidPromotion),
        changer.make_move(&mut state, Move::promotion(p(6, 0), p(7, 0), PieceKind::King))
    );

    changer
        .make_move(&mut state, Move::promotion(p(6, 0), p(7, 1), PieceKind::Knight))
        .unwrap();
    assert_eq!(piece(Color::White, PieceKind::Knight), state.piece_at(p(7, 1)));
    assert_eq!(None, state.piece_at(p(6, 0)));
}

#[test]
fn promotion_only_for_pawns() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("7k/R7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    assert_eq!(
        Err(IllegalMove::InvalidPromotion),
        changer.make_move(&mut state, Move::promotion(p(6, 0), p(7, 0), PieceKind::Queen))
    );
}

#[test]
fn castling_kingside() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 1").unwrap();
    changer.make_move(&mut state, mv(0, 4, 0, 6)).unwrap();

    assert_eq!(piece(Color::White, PieceKind::King), state.piece_at(p(0, 6)));
    assert_eq!(piece(Color::White, PieceKind::Rook), state.piece_at(p(0, 5)));
    assert_eq!(None, state.piece_at(p(0, 7)));
    assert_eq!(None, state.piece_at(p(0, 4)));
    assert!(!state.can_castle_kingside(Color::White));
    assert!(!state.can_castle_queenside(Color::White));
    assert!(state.can_castle_kingside(Color::Black));
    assert_eq!(4, state.halfmove_clock());
}

#[test]
fn castling_queenside() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
    changer.make_move(&mut state, mv(7, 4, 7, 2)).unwrap();

    assert_eq!(piece(Color::Black, PieceKind::King), state.piece_at(p(7, 2)));
    assert_eq!(piece(Color::Black, PieceKind::Rook), state.piece_at(p(7, 3)));
    assert_eq!(None, state.piece_at(p(7, 0)));
    assert!(!state.can_castle_queenside(Color::Black));
    assert!(!state.can_castle_kingside(Color::Black));
}

#[test]
fn castling_through_check() {
    let changer = StateChanger::new();
    // the f-file rook covers the transit square.
    let mut state = State::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1").unwrap();
    let before = state.clone();
    assert_eq!(
        Err(IllegalMove::CastlingThroughCheck),
        changer.make_move(&mut state, mv(0, 4, 0, 6))
    );
    assert_eq!(before, state);

    // queenside is still fine.
    changer.make_move(&mut state, mv(0, 4, 0, 2)).unwrap();
}

#[test]
fn castling_out_of_check() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").unwrap();
    assert_eq!(
        Err(IllegalMove::CastlingThroughCheck),
        changer.make_move(&mut state, mv(0, 4, 0, 6))
    );
    assert_eq!(
        Err(IllegalMove::CastlingThroughCheck),
        changer.make_move(&mut state, mv(0, 4, 0, 2))
    );
}

#[test]
fn castling_into_check() {
    let changer = StateChanger::new();
    // only the destination is attacked.
    let mut state = State::from_fen("4k3/8/8/8/8/8/6r1/R3K2R w KQ - 0 1").unwrap();
    assert_eq!(
        Err(IllegalMove::NotAPossibleMove),
        changer.make_move(&mut state, mv(0, 4, 0, 6))
    );
}

#[test]
fn castling_blocked() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1").unwrap();
    assert_eq!(
        Err(IllegalMove::NotAPossibleMove),
        changer.make_move(&mut state, mv(0, 4, 0, 2))
    );
}

#[test]
fn rook_move_forfeits_its_side() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    changer.make_move(&mut state, mv(0, 7, 1, 7)).unwrap();
    assert!(!state.can_castle_kingside(Color::White));
    assert!(state.can_castle_queenside(Color::White));

    // moving back does not restore the right.
    changer.make_move(&mut state, mv(7, 0, 6, 0)).unwrap();
    assert!(!state.can_castle_queenside(Color::Black));
    changer.make_move(&mut state, mv(1, 7, 0, 7)).unwrap();
    assert!(!state.can_castle_kingside(Color::White));
}

#[test]
fn capturing_a_corner_rook_forfeits_its_side() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    changer.make_move(&mut state, mv(0, 7, 7, 7)).unwrap();
    assert!(!state.can_castle_kingside(Color::Black));
    assert!(state.can_castle_queenside(Color::Black));
    assert!(!state.can_castle_kingside(Color::White));
    assert_eq!(0, state.halfmove_clock());
}

#[test]
fn cannot_leave_king_in_check() {
    let changer = StateChanger::new();
    let mut state = State::from_fen("4k3/8/8/8/8/8/4r3/4K2R w K - 0 1").unwrap();
    let before = state.clone();
    assert_eq!(
        Err(IllegalMove::NotAPossibleMove),
        changer.make_move(&mut state, mv(0, 7, 1, 7))
    );
    assert_eq!(before, state);

    // taking the checker is fine.
    changer.make_move(&mut state, mv(0, 4, 1, 4)).unwrap();
}
