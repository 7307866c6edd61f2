// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Display, Write};

use crate::attacks;
use crate::bitboard::Bitboard;

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// Raised when a coordinate is constructed outside of the 8x8 board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidArgument {
    PositionOutOfRange { row: i32, col: i32 },
}

impl Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidArgument::PositionOutOfRange { row, col } => {
                write!(f, "position ({},{}) is not on the board", row, col)
            }
        }
    }
}

impl Error for InvalidArgument {}

/// A square on the board, addressed by row and column. Row 0 is White's home
/// rank and column 0 is the a-file, so `(row, col)` and `(rank, file)` name the
/// same square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Result<Position, InvalidArgument> {
        if row < 0 || row > 7 || col < 0 || col > 7 {
            return Err(InvalidArgument::PositionOutOfRange { row, col });
        }

        Ok(Position {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn of(rank: Rank, file: File) -> Position {
        Position {
            row: rank.as_index() as u8,
            col: file.as_index() as u8,
        }
    }

    pub fn from_index(idx: usize) -> Position {
        debug_assert!(idx < 64);
        Position {
            row: (idx >> 3) as u8,
            col: (idx & 7) as u8,
        }
    }

    /// Iterates over all 64 squares in row-major order, starting at `(0,0)`.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..64).map(Position::from_index)
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    pub const fn index(self) -> usize {
        (self.row as usize) * 8 + self.col as usize
    }

    pub fn rank(self) -> Rank {
        Rank::from_index(self.row as usize)
    }

    pub fn file(self) -> File {
        File::from_index(self.col as usize)
    }

    /// The square `dr` rows and `dc` columns away, if it is still on the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Position> {
        Position::new(self.row as i32 + dr, self.col as i32 + dc).ok()
    }

    pub fn towards(self, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.as_vector();
        self.offset(dr, dc)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Rank::One => '1',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            '1' => Rank::One,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static RANKS: [Rank; 8] = [
    Rank::One,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            File::A => 'a',
            File::B => 'b',
            File::C => 'c',
            File::D => 'd',
            File::E => 'e',
            File::F => 'f',
            File::G => 'g',
            File::H => 'h',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for File {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            'a' => File::A,
            'b' => File::B,
            'c' => File::C,
            'd' => File::D,
            'e' => File::E,
            'f' => File::F,
            'g' => File::G,
            'h' => File::H,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The row holding this color's king and rooks at the start of the game.
    pub fn home_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// The row this color's pawns start on, and the only row they may
    /// double-step from.
    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// The farthest row for this color's pawns, where they must promote.
    pub fn promotion_row(self) -> u8 {
        self.toggle().home_row()
    }

    /// Row delta of a single pawn step.
    pub fn pawn_direction(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::White => 'w',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Upper-case name of the kind, as it appears in move notation.
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "PAWN",
            PieceKind::Knight => "KNIGHT",
            PieceKind::Bishop => "BISHOP",
            PieceKind::Rook => "ROOK",
            PieceKind::Queen => "QUEEN",
            PieceKind::King => "KING",
        }
    }

    pub fn from_name(name: &str) -> Option<PieceKind> {
        PIECE_KINDS.iter().cloned().find(|kind| kind.name() == name)
    }

    pub fn is_promotion_target(self) -> bool {
        match self {
            PieceKind::Pawn | PieceKind::King => false,
            _ => true,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// The kinds a pawn may promote to, in the order moves are emitted.
pub static PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// (row, col) delta of one step in this direction. North is toward
    /// Black's side of the board.
    pub fn as_vector(self) -> (i32, i32) {
        match self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }
}

pub static DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

bitflags! {
    pub struct CastleStatus: u8 {
        const NONE = 0;
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE =0b0000_0010;
        const WHITE = Self::WHITE_KINGSIDE.bits | Self::WHITE_QUEENSIDE.bits;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
        const BLACK = Self::BLACK_KINGSIDE.bits | Self::BLACK_QUEENSIDE.bits;
    }
}

impl CastleStatus {
    pub fn kingside(color: Color) -> CastleStatus {
        match color {
            Color::White => CastleStatus::WHITE_KINGSIDE,
            Color::Black => CastleStatus::BLACK_KINGSIDE,
        }
    }

    pub fn queenside(color: Color) -> CastleStatus {
        match color {
            Color::White => CastleStatus::WHITE_QUEENSIDE,
            Color::Black => CastleStatus::BLACK_QUEENSIDE,
        }
    }

    pub fn both(color: Color) -> CastleStatus {
        match color {
            Color::White => CastleStatus::WHITE,
            Color::Black => CastleStatus::BLACK,
        }
    }
}

/// A piece has no identity beyond its kind and color; two white pawns are the
/// same value, told apart only by the square they stand on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    pub fn attacks(&self, pos: Position, occupancy: Bitboard) -> Bitboard {
        match self.kind {
            PieceKind::Pawn => attacks::pawn_attacks(pos, self.color),
            PieceKind::Knight => attacks::knight_attacks(pos),
            PieceKind::Bishop => attacks::bishop_attacks(pos, occupancy),
            PieceKind::Rook => attacks::rook_attacks(pos, occupancy),
            PieceKind::Queen => attacks::queen_attacks(pos, occupancy),
            PieceKind::King => attacks::king_attacks(pos),
        }
    }
}

// FEN piece letters: upper case for White, lower case for Black.
impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };
        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = String::new();
        write!(&mut buf, "{}", self.kind)?;
        match self.color {
            Color::White => f.write_str(&buf.to_ascii_uppercase()),
            Color::Black => f.write_str(&buf),
        }
    }
}
