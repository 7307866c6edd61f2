// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Forsyth-Edwards Notation for `State`s.
//!
//! FEN names the square a double-stepping pawn skipped over as the en-passant
//! field, while a `State` remembers the square the pawn landed on. The two are
//! translated here. FEN has no notion of a finished game, and the full-move
//! number is read but discarded; it is always written as `1`.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};

use crate::state::State;
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, File, Piece, Position, Rank, FILES, RANKS};

/// Possible errors that can arise when parsing a FEN string into a `State`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character {:?}", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            FenParseError::InvalidDigit => write!(f, "empty-square count must be 1 through 8"),
            FenParseError::FileDoesNotSumToEight => write!(f, "rank does not have eight files"),
            FenParseError::UnknownPiece => write!(f, "unknown piece letter"),
            FenParseError::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            FenParseError::InvalidCastle => write!(f, "invalid castling field"),
            FenParseError::InvalidEnPassant => write!(f, "invalid en-passant field"),
            FenParseError::EmptyHalfmove => write!(f, "missing halfmove clock"),
            FenParseError::InvalidHalfmove => write!(f, "invalid halfmove clock"),
            FenParseError::EmptyFullmove => write!(f, "missing fullmove number"),
            FenParseError::InvalidFullmove => write!(f, "invalid fullmove number"),
        }
    }
}

impl Error for FenParseError {}

impl State {
    /// Parses a FEN string. The en-passant field must name a square on the
    /// third or sixth rank, right behind a pawn of the side that just moved.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<State, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat<'a>(iter: &mut Stream<'a>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn advance<'a>(iter: &mut Stream<'a>) -> Result<(), FenParseError> {
            let _ = iter.next();
            Ok(())
        }

        fn peek<'a>(iter: &mut Stream<'a>) -> Result<char, FenParseError> {
            if let Some(c) = iter.peek() {
                Ok(*c)
            } else {
                Err(FenParseError::UnexpectedEnd)
            }
        }

        fn eat_side_to_move<'a>(iter: &mut Stream<'a>) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            advance(iter)?;
            Ok(side)
        }

        fn eat_castle_status<'a>(iter: &mut Stream<'a>) -> Result<CastleStatus, FenParseError> {
            if peek(iter)? == '-' {
                advance(iter)?;
                return Ok(CastleStatus::NONE);
            }

            let mut status = CastleStatus::NONE;
            for _ in 0..4 {
                match peek(iter)? {
                    'K' => status |= CastleStatus::WHITE_KINGSIDE,
                    'k' => status |= CastleStatus::BLACK_KINGSIDE,
                    'Q' => status |= CastleStatus::WHITE_QUEENSIDE,
                    'q' => status |= CastleStatus::BLACK_QUEENSIDE,
                    ' ' => break,
                    _ => return Err(FenParseError::InvalidCastle),
                }

                advance(iter)?;
            }

            Ok(status)
        }

        fn eat_en_passant<'a>(iter: &mut Stream<'a>) -> Result<Option<Position>, FenParseError> {
            let c = peek(iter)?;
            if c == '-' {
                advance(iter)?;
                return Ok(None);
            }

            let file = File::try_from(c).map_err(|_| FenParseError::InvalidEnPassant)?;
            advance(iter)?;
            let rank = Rank::try_from(peek(iter)?).map_err(|_| FenParseError::InvalidEnPassant)?;
            advance(iter)?;
            Ok(Some(Position::of(rank, file)))
        }

        fn eat_number<'a>(iter: &mut Stream<'a>) -> Option<String> {
            let mut buf = String::new();
            while let Some(&c) = iter.peek() {
                if !c.is_digit(10) {
                    break;
                }

                buf.push(c);
                iter.next();
            }

            if buf.is_empty() {
                None
            } else {
                Some(buf)
            }
        }

        let mut state = State::empty();
        let iter = &mut fen.as_ref().chars().peekable();
        for &rank in RANKS.iter().rev() {
            let mut file = File::A as usize;
            while file <= File::H as usize {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(FenParseError::InvalidDigit);
                    }

                    let value = c as usize - 48;
                    file += value;
                    if file > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    advance(iter)?;
                    continue;
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                state.set_piece(Position::of(rank, File::from_index(file)), Some(piece));
                advance(iter)?;
                file += 1;
            }

            if rank != Rank::One {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        let side_to_move = eat_side_to_move(iter)?;
        state.set_turn(side_to_move);
        eat(iter, ' ')?;
        state.set_castle_status(eat_castle_status(iter)?);
        eat(iter, ' ')?;
        if let Some(skipped) = eat_en_passant(iter)? {
            let mover = side_to_move.toggle();
            let landed = skipped
                .offset(mover.pawn_direction(), 0)
                .filter(|_| skipped.row() as i32 == mover.pawn_row() as i32 + mover.pawn_direction())
                .ok_or(FenParseError::InvalidEnPassant)?;
            state.set_en_passant_position(Some(landed));
        }

        eat(iter, ' ')?;
        let halfmove = eat_number(iter).ok_or(FenParseError::EmptyHalfmove)?;
        let halfmove = halfmove
            .parse::<u32>()
            .map_err(|_| FenParseError::InvalidHalfmove)?;
        state.set_halfmove_clock(halfmove);

        // The full-move number is optional in practice; validate it if present.
        if iter.peek().is_some() {
            eat(iter, ' ')?;
            let fullmove = eat_number(iter).ok_or(FenParseError::EmptyFullmove)?;
            fullmove
                .parse::<u32>()
                .map_err(|_| FenParseError::InvalidFullmove)?;
        }

        Ok(state)
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Position::of(rank, file)) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }
                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        match self.turn() {
            Color::White => buf.push('w'),
            Color::Black => buf.push('b'),
        }
        buf.push(' ');
        let castle_len = buf.len();
        if self.can_castle_kingside(Color::White) {
            buf.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            buf.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            buf.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            buf.push('q');
        }
        if buf.len() == castle_len {
            buf.push('-');
        }
        buf.push(' ');

        let skipped = self.en_passant_position().and_then(|landed| {
            let mover = self.turn().toggle();
            landed.offset(-mover.pawn_direction(), 0)
        });
        if let Some(skipped) = skipped {
            // String formatting into a String cannot fail.
            let _ = write!(&mut buf, "{}{}", skipped.file(), skipped.rank());
        } else {
            buf.push('-');
        }

        let _ = write!(&mut buf, " {} 1", self.halfmove_clock());
        buf
    }
}
