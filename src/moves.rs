// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of a `Move`: a source square, a
//! destination square, and the kind a pawn promotes to when it reaches the
//! far rank. Castling is a king move of two columns and en passant is a pawn
//! capture onto an empty square; neither needs extra encoding because the
//! `State` a move is applied to disambiguates it.
//!
//! Moves print as `(fr,fc)->(tr,tc)`, followed by ` (promoting to KIND)` for
//! promotions, and parse back from the same text.
use arrayvec::ArrayVec;
use regex::Regex;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::types::{PieceKind, Position};

/// Fixed-capacity buffer for the candidate moves of a single piece. A queen in
/// the middle of an empty board has 27 targets, the most of any piece.
pub type MoveVec = ArrayVec<[Move; 32]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    from: Position,
    to: Position,
    promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Position, to: Position, promotion: Option<PieceKind>) -> Move {
        Move {
            from,
            to,
            promotion,
        }
    }

    /// A move without promotion.
    pub fn quiet(from: Position, to: Position) -> Move {
        Move::new(from, to, None)
    }

    pub fn promotion(from: Position, to: Position, kind: PieceKind) -> Move {
        Move::new(from, to, Some(kind))
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    pub fn promotion_piece(&self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    pub fn row_distance(&self) -> u8 {
        (self.from.row() as i32 - self.to.row() as i32).abs() as u8
    }

    pub fn col_distance(&self) -> u8 {
        (self.from.col() as i32 - self.to.col() as i32).abs() as u8
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, " (promoting to {})", kind.name())?;
        }

        Ok(())
    }
}

/// Possible errors that can arise when parsing a move from its text form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    Malformed(String),
    OffBoard(String),
    UnknownPieceKind(String),
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveParseError::Malformed(s) => write!(f, "malformed move: {:?}", s),
            MoveParseError::OffBoard(s) => write!(f, "move leaves the board: {:?}", s),
            MoveParseError::UnknownPieceKind(s) => write!(f, "unknown piece kind: {:?}", s),
        }
    }
}

impl Error for MoveParseError {}

lazy_static! {
    static ref MOVE_REGEX: Regex = Regex::new(
        r"^\s*\((-?\d+),(-?\d+)\)->\((-?\d+),(-?\d+)\)(?:\s+\(promoting to ([A-Z]+)\))?\s*$"
    )
    .unwrap();
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, MoveParseError> {
        let caps = MOVE_REGEX
            .captures(s)
            .ok_or_else(|| MoveParseError::Malformed(s.to_owned()))?;

        let mut coords = [0i32; 4];
        for (i, coord) in coords.iter_mut().enumerate() {
            *coord = caps[i + 1]
                .parse()
                .map_err(|_| MoveParseError::Malformed(s.to_owned()))?;
        }

        let from = Position::new(coords[0], coords[1])
            .map_err(|_| MoveParseError::OffBoard(s.to_owned()))?;
        let to = Position::new(coords[2], coords[3])
            .map_err(|_| MoveParseError::OffBoard(s.to_owned()))?;
        let promotion = match caps.get(5) {
            Some(name) => Some(
                PieceKind::from_name(name.as_str())
                    .ok_or_else(|| MoveParseError::UnknownPieceKind(name.as_str().to_owned()))?,
            ),
            None => None,
        };

        Ok(Move::new(from, to, promotion))
    }
}
