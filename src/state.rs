// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::bitboard::Bitboard;
use crate::moves::Move;
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, File, Piece, PieceKind, Position, Rank};
use crate::types::{FILES, PIECE_KINDS, RANKS};

/// Why a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameResultReason {
    Checkmate,
    FiftyMoveRule,
    /// Never produced by the move applier; it exists so that results recorded
    /// elsewhere can still be represented and serialized.
    ThreefoldRepetitionRule,
    Stalemate,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameResult {
    winner: Option<Color>,
    reason: GameResultReason,
}

impl GameResult {
    pub fn new(winner: Option<Color>, reason: GameResultReason) -> GameResult {
        GameResult { winner, reason }
    }

    pub fn checkmate(winner: Color) -> GameResult {
        GameResult::new(Some(winner), GameResultReason::Checkmate)
    }

    pub fn draw(reason: GameResultReason) -> GameResult {
        GameResult::new(None, reason)
    }

    /// The winning color, or `None` for a draw.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn reason(&self) -> GameResultReason {
        self.reason
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self.reason {
            GameResultReason::Checkmate => "checkmate",
            GameResultReason::FiftyMoveRule => "fifty-move rule",
            GameResultReason::ThreefoldRepetitionRule => "threefold repetition",
            GameResultReason::Stalemate => "stalemate",
        };

        match self.winner {
            Some(Color::White) => write!(f, "white wins by {}", reason),
            Some(Color::Black) => write!(f, "black wins by {}", reason),
            None => write!(f, "draw by {}", reason),
        }
    }
}

/// The complete state of a game: the board, the side to move, castling
/// rights, the en-passant target, the half-move clock and the result once the
/// game is over.
///
/// A `State` has a single owner and is only ever advanced by the move
/// applier. `snapshot` produces a fully independent copy for speculative
/// evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    boards_by_piece: [Bitboard; 12],
    boards_by_color: [Bitboard; 2],
    en_passant_position: Option<Position>,
    halfmove_clock: u32,
    turn: Color,
    castle_status: CastleStatus,
    game_result: Option<GameResult>,
}

//
// Construction
//

impl State {
    /// The standard initial position: White to move, all castling rights, no
    /// en-passant target, a zero clock and no result.
    pub fn new() -> State {
        let back_row = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut state = State::empty();
        for (&file, &kind) in FILES.iter().zip(back_row.iter()) {
            state.set_piece(
                Position::of(Rank::One, file),
                Some(Piece::new(kind, Color::White)),
            );
            state.set_piece(
                Position::of(Rank::Two, file),
                Some(Piece::new(PieceKind::Pawn, Color::White)),
            );
            state.set_piece(
                Position::of(Rank::Seven, file),
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
            );
            state.set_piece(
                Position::of(Rank::Eight, file),
                Some(Piece::new(kind, Color::Black)),
            );
        }

        state.castle_status = CastleStatus::WHITE | CastleStatus::BLACK;
        state
    }

    /// A board with no pieces, White to move and no castling rights.
    pub const fn empty() -> State {
        State {
            boards_by_piece: [Bitboard::none(); 12],
            boards_by_color: [Bitboard::none(); 2],
            en_passant_position: None,
            halfmove_clock: 0,
            turn: Color::White,
            castle_status: CastleStatus::NONE,
            game_result: None,
        }
    }

    /// A deep, independent copy of this state. Nothing done to the snapshot is
    /// visible through `self`.
    pub fn snapshot(&self) -> State {
        self.clone()
    }
}

impl Default for State {
    fn default() -> Self {
        State::new()
    }
}

//
// Board state getters
//

impl State {
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn en_passant_position(&self) -> Option<Position> {
        self.en_passant_position
    }

    /// Number of half-moves since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn game_result(&self) -> Option<GameResult> {
        self.game_result
    }

    pub fn is_game_over(&self) -> bool {
        self.game_result.is_some()
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::queenside(color))
    }

    pub fn pieces(&self, color: Color) -> Bitboard {
        self.boards_by_color[color.as_index()]
    }

    pub fn occupancy(&self) -> Bitboard {
        self.pieces(Color::White) | self.pieces(Color::Black)
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.boards_by_piece[board_index(color, kind)]
    }

    pub fn kings(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::King)
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.kings(color).first()
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        let color = if self.boards_by_color[Color::White.as_index()].test(pos) {
            Color::White
        } else if self.boards_by_color[Color::Black.as_index()].test(pos) {
            Color::Black
        } else {
            return None;
        };

        PIECE_KINDS
            .iter()
            .find(|&&kind| self.pieces_of_kind(color, kind).test(pos))
            .map(|&kind| Piece::new(kind, color))
    }
}

//
// Board state setters. These exist to build positions; playing a game goes
// through the move applier.
//

impl State {
    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    /// Places `piece` on `pos`, replacing whatever stood there. `None` clears
    /// the square.
    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        if let Some(existing) = self.piece_at(pos) {
            self.boards_by_color[existing.color.as_index()].unset(pos);
            self.boards_by_piece[board_index(existing.color, existing.kind)].unset(pos);
        }

        if let Some(piece) = piece {
            self.boards_by_color[piece.color.as_index()].set(pos);
            self.boards_by_piece[board_index(piece.color, piece.kind)].set(pos);
        }
    }

    pub fn set_castle_kingside(&mut self, color: Color, allowed: bool) {
        self.castle_status
            .set(CastleStatus::kingside(color), allowed);
    }

    pub fn set_castle_queenside(&mut self, color: Color, allowed: bool) {
        self.castle_status
            .set(CastleStatus::queenside(color), allowed);
    }

    pub fn set_castle_status(&mut self, status: CastleStatus) {
        self.castle_status = status;
    }

    pub fn set_en_passant_position(&mut self, pos: Option<Position>) {
        self.en_passant_position = pos;
    }

    pub fn set_halfmove_clock(&mut self, clock: u32) {
        self.halfmove_clock = clock;
    }

    pub fn set_game_result(&mut self, result: Option<GameResult>) {
        self.game_result = result;
    }
}

//
// Board analysis
//

impl State {
    /// The set of squares holding a piece of color `attacker` that attacks
    /// `target` on the current board.
    pub fn squares_attacking(&self, attacker: Color, target: Position) -> Bitboard {
        let occupancy = self.occupancy();
        let mut attacks = Bitboard::none();
        for pos in self.pieces(attacker) {
            if let Some(piece) = self.piece_at(pos) {
                if piece.attacks(pos, occupancy).test(target) {
                    attacks.set(pos);
                }
            }
        }

        attacks
    }

    pub fn is_attacked(&self, target: Position, attacker: Color) -> bool {
        !self.squares_attacking(attacker, target).empty()
    }

    /// Whether `color`'s king is attacked by any enemy piece.
    pub fn is_check(&self, color: Color) -> bool {
        self.kings(color)
            .iter()
            .any(|king| self.is_attacked(king, color.toggle()))
    }
}

//
// Move application
//

impl State {
    /// Moves pieces, updates castling rights, the en-passant target and the
    /// half-move clock, and hands the turn to the other side. The move must
    /// already be known to be legal; nothing is validated and the game result
    /// is left alone.
    pub(crate) fn apply_unchecked(&mut self, mov: Move) {
        let moving_piece = match self.piece_at(mov.from()) {
            Some(piece) => piece,
            None => {
                debug_assert!(false, "invalid move {}: no piece at source", mov);
                return;
            }
        };

        let color = moving_piece.color;
        let mut captured = self.piece_at(mov.to());

        // A rook taken on its home corner takes its side's castling right
        // with it, even though that rook never moved.
        if let Some(victim) = captured {
            if victim.kind == PieceKind::Rook {
                if mov.to() == kingside_rook(victim.color) {
                    self.set_castle_kingside(victim.color, false);
                } else if mov.to() == queenside_rook(victim.color) {
                    self.set_castle_queenside(victim.color, false);
                }
            }
        }

        match moving_piece.kind {
            PieceKind::Pawn => {
                if let Some(ep) = self.en_passant_position {
                    let is_en_passant = captured.is_none()
                        && ep.row() == mov.from().row()
                        && ep.col() == mov.to().col()
                        && self.piece_at(ep).map(|p| p.color) == Some(color.toggle());
                    if is_en_passant {
                        captured = self.piece_at(ep);
                        self.set_piece(ep, None);
                    }
                }

                let is_double_step =
                    mov.from().row() == color.pawn_row() && mov.row_distance() == 2;
                self.en_passant_position = if is_double_step {
                    Some(mov.to())
                } else {
                    None
                };
            }
            PieceKind::King => {
                if mov.col_distance() == 2 {
                    // Castling. The rook jumps to the square the king passed
                    // over.
                    let row = mov.from().row();
                    let (rook_from, rook_to) = if mov.to().col() > mov.from().col() {
                        (kingside_rook(color), Position::of(Rank::from_index(row as usize), File::F))
                    } else {
                        (queenside_rook(color), Position::of(Rank::from_index(row as usize), File::D))
                    };

                    let rook = self.piece_at(rook_from);
                    self.set_piece(rook_from, None);
                    self.set_piece(rook_to, rook);
                }

                self.castle_status &= !CastleStatus::both(color);
                self.en_passant_position = None;
            }
            PieceKind::Rook => {
                if mov.from() == kingside_rook(color) {
                    self.set_castle_kingside(color, false);
                } else if mov.from() == queenside_rook(color) {
                    self.set_castle_queenside(color, false);
                }

                self.en_passant_position = None;
            }
            _ => self.en_passant_position = None,
        }

        let placed = match mov.promotion_piece() {
            Some(kind) => Piece::new(kind, color),
            None => moving_piece,
        };

        self.set_piece(mov.from(), None);
        self.set_piece(mov.to(), Some(placed));

        if moving_piece.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.turn = self.turn.toggle();
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Position::of(rank, file)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

//
// Helper functions
//

fn board_index(color: Color, kind: PieceKind) -> usize {
    let offset = match color {
        Color::White => 0,
        Color::Black => 6,
    };
    offset + kind.as_index()
}

/// The square the king stands on before it has moved.
pub fn king_home(color: Color) -> Position {
    Position::of(Rank::from_index(color.home_row() as usize), File::E)
}

pub fn kingside_rook(color: Color) -> Position {
    Position::of(Rank::from_index(color.home_row() as usize), File::H)
}

pub fn queenside_rook(color: Color) -> Position {
    Position::of(Rank::from_index(color.home_row() as usize), File::A)
}
