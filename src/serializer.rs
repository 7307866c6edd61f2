// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The compact text encoding of a `State` used for game history and save
//! files. Six fields joined by `-`:
//!
//! 1. `W` or `B`, the side to move.
//! 2. 128 characters, two per square in row-major order starting at `(0,0)`:
//!    a color letter and a kind letter (`Q K N B R P`), or `__` when empty.
//! 3. Four `T`/`F` flags: white king side, black king side, white queen side,
//!    black queen side.
//! 4. `NULL`, or `[rc]` naming the en-passant target.
//! 5. `[NULL]`, or `[wr]` where `w` is the winner (`W`, `B` or `_` for a draw)
//!    and `r` the reason: 1 checkmate, 2 fifty-move rule, 3 threefold
//!    repetition, 4 stalemate.
//! 6. The half-move clock in decimal.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};

use crate::state::{GameResult, GameResultReason, State};
use crate::types::{Color, Piece, PieceKind, Position};

/// Possible errors that can arise when decoding a serialized `State`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateParseError {
    WrongFieldCount(usize),
    InvalidTurn(String),
    InvalidBoardLength(usize),
    InvalidPiece(String),
    InvalidCastle(String),
    InvalidEnPassant(String),
    InvalidResult(String),
    InvalidClock(String),
}

impl fmt::Display for StateParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateParseError::WrongFieldCount(n) => write!(f, "expected 6 fields, found {}", n),
            StateParseError::InvalidTurn(s) => write!(f, "invalid turn {:?}", s),
            StateParseError::InvalidBoardLength(n) => {
                write!(f, "board must be 128 characters, found {}", n)
            }
            StateParseError::InvalidPiece(s) => write!(f, "invalid piece {:?}", s),
            StateParseError::InvalidCastle(s) => write!(f, "invalid castling flags {:?}", s),
            StateParseError::InvalidEnPassant(s) => write!(f, "invalid en-passant field {:?}", s),
            StateParseError::InvalidResult(s) => write!(f, "invalid game result {:?}", s),
            StateParseError::InvalidClock(s) => write!(f, "invalid half-move clock {:?}", s),
        }
    }
}

impl Error for StateParseError {}

fn color_letter(color: Color) -> char {
    match color {
        Color::White => 'W',
        Color::Black => 'B',
    }
}

fn kind_letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::Queen => 'Q',
        PieceKind::King => 'K',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Rook => 'R',
        PieceKind::Pawn => 'P',
    }
}

fn reason_digit(reason: GameResultReason) -> char {
    match reason {
        GameResultReason::Checkmate => '1',
        GameResultReason::FiftyMoveRule => '2',
        GameResultReason::ThreefoldRepetitionRule => '3',
        GameResultReason::Stalemate => '4',
    }
}

fn flag(value: bool) -> char {
    if value {
        'T'
    } else {
        'F'
    }
}

pub fn serialize_state(state: &State) -> String {
    let mut buf = String::with_capacity(160);
    buf.push(color_letter(state.turn()));
    buf.push('-');
    for pos in Position::all() {
        match state.piece_at(pos) {
            Some(piece) => {
                buf.push(color_letter(piece.color));
                buf.push(kind_letter(piece.kind));
            }
            None => buf.push_str("__"),
        }
    }

    buf.push('-');
    buf.push(flag(state.can_castle_kingside(Color::White)));
    buf.push(flag(state.can_castle_kingside(Color::Black)));
    buf.push(flag(state.can_castle_queenside(Color::White)));
    buf.push(flag(state.can_castle_queenside(Color::Black)));
    buf.push('-');

    // Writing into a String cannot fail.
    match state.en_passant_position() {
        Some(pos) => {
            let _ = write!(&mut buf, "[{}{}]", pos.row(), pos.col());
        }
        None => buf.push_str("NULL"),
    }

    buf.push('-');
    match state.game_result() {
        Some(result) => {
            buf.push('[');
            buf.push(result.winner().map_or('_', color_letter));
            buf.push(reason_digit(result.reason()));
            buf.push(']');
        }
        None => buf.push_str("[NULL]"),
    }

    let _ = write!(&mut buf, "-{}", state.halfmove_clock());
    buf
}

/// Decodes a serialized state, falling back to the initial position when the
/// input is malformed.
pub fn deserialize_state(input: &str) -> State {
    match try_deserialize_state(input) {
        Ok(state) => state,
        Err(err) => {
            warn!("could not decode state ({}), starting a new game", err);
            State::new()
        }
    }
}

pub fn try_deserialize_state(input: &str) -> Result<State, StateParseError> {
    let fields: Vec<&str> = input.trim().split('-').collect();
    if fields.len() != 6 {
        return Err(StateParseError::WrongFieldCount(fields.len()));
    }

    let mut state = State::empty();
    let turn = parse_color(fields[0])
        .ok_or_else(|| StateParseError::InvalidTurn(fields[0].to_owned()))?;
    state.set_turn(turn);

    let board: Vec<char> = fields[1].chars().collect();
    if board.len() != 128 {
        return Err(StateParseError::InvalidBoardLength(board.len()));
    }

    for (pos, cell) in Position::all().zip(board.chunks(2)) {
        state.set_piece(pos, parse_piece(cell[0], cell[1])?);
    }

    let castle: Vec<char> = fields[2].chars().collect();
    let flags = castle
        .iter()
        .map(|&c| match c {
            'T' => Some(true),
            'F' => Some(false),
            _ => None,
        })
        .collect::<Option<Vec<bool>>>()
        .filter(|flags| flags.len() == 4)
        .ok_or_else(|| StateParseError::InvalidCastle(fields[2].to_owned()))?;
    state.set_castle_kingside(Color::White, flags[0]);
    state.set_castle_kingside(Color::Black, flags[1]);
    state.set_castle_queenside(Color::White, flags[2]);
    state.set_castle_queenside(Color::Black, flags[3]);

    state.set_en_passant_position(parse_en_passant(fields[3])?);
    state.set_game_result(parse_result(fields[4])?);

    state.set_halfmove_clock(parse_clock(fields[5])?);
    Ok(state)
}

// Plain decimal digits with no sign and no leading zero, the only form
// `serialize_state` writes.
fn parse_clock(s: &str) -> Result<u32, StateParseError> {
    let invalid = || StateParseError::InvalidClock(s.to_owned());
    let canonical = !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s == "0" || !s.starts_with('0'));
    if !canonical {
        return Err(invalid());
    }

    s.parse::<u32>().map_err(|_| invalid())
}

fn parse_color(s: &str) -> Option<Color> {
    match s {
        "W" => Some(Color::White),
        "B" => Some(Color::Black),
        _ => None,
    }
}

fn parse_piece(color: char, kind: char) -> Result<Option<Piece>, StateParseError> {
    if color == '_' && kind == '_' {
        return Ok(None);
    }

    let invalid = || StateParseError::InvalidPiece(format!("{}{}", color, kind));
    let color = match color {
        'W' => Color::White,
        'B' => Color::Black,
        _ => return Err(invalid()),
    };

    // Kind letters are FEN's upper-case piece letters.
    if !kind.is_ascii_uppercase() {
        return Err(invalid());
    }

    let kind = Piece::try_from(kind).map_err(|_| invalid())?.kind;
    Ok(Some(Piece::new(kind, color)))
}

fn parse_en_passant(s: &str) -> Result<Option<Position>, StateParseError> {
    if s == "NULL" {
        return Ok(None);
    }

    let invalid = || StateParseError::InvalidEnPassant(s.to_owned());
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != 4 || chars[0] != '[' || chars[3] != ']' {
        return Err(invalid());
    }

    let row = chars[1].to_digit(10).ok_or_else(invalid)?;
    let col = chars[2].to_digit(10).ok_or_else(invalid)?;
    Position::new(row as i32, col as i32)
        .map(Some)
        .map_err(|_| invalid())
}

fn parse_result(s: &str) -> Result<Option<GameResult>, StateParseError> {
    if s == "[NULL]" {
        return Ok(None);
    }

    let invalid = || StateParseError::InvalidResult(s.to_owned());
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != 4 || chars[0] != '[' || chars[3] != ']' {
        return Err(invalid());
    }

    let winner = match chars[1] {
        'W' => Some(Color::White),
        'B' => Some(Color::Black),
        '_' => None,
        _ => return Err(invalid()),
    };

    let reason = match chars[2] {
        '1' => GameResultReason::Checkmate,
        '2' => GameResultReason::FiftyMoveRule,
        '3' => GameResultReason::ThreefoldRepetitionRule,
        '4' => GameResultReason::Stalemate,
        _ => return Err(invalid()),
    };

    Ok(Some(GameResult::new(winner, reason)))
}
