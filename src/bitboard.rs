// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions of the `Bitboard` type, which is conceptually a set of
//! positions on the chess board. The `State` keeps one bitboard per piece and
//! per color, and the attack tables in `attacks` answer geometry questions as
//! bitboards.
//!
//! A bitboard is a single 64-bit integer and it behaves like a set, using
//! bitwise operations for the normal set operations. Bit `row * 8 + col`
//! stands for the position `(row, col)`.
use std::default::Default;
use std::fmt;
use std::iter::Iterator;
use std::ops;

use crate::types::{self, Position};

/// A set of positions, one bit per square.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Bitboard {
    bits: u64,
}

impl Default for Bitboard {
    fn default() -> Bitboard {
        Bitboard::none()
    }
}

impl Bitboard {
    /// Constructs a new bitboard from the given bits.
    pub const fn from_bits(bits: u64) -> Bitboard {
        Bitboard { bits }
    }

    /// Constructs a new bitboard with all bits set to one, representing
    /// a complete set.
    pub const fn all() -> Bitboard {
        Bitboard::from_bits(0xFFFF_FFFF_FFFF_FFFF)
    }

    /// Constructs a new bitboard with all bits zeroed, representing
    /// the empty set.
    pub const fn none() -> Bitboard {
        Bitboard::from_bits(0)
    }

    /// Tests whether or not a position is a member of this bitboard.
    pub const fn test(self, pos: Position) -> bool {
        (self.bits & (1u64 << pos.index())) != 0
    }

    /// Adds a position to this bitboard.
    pub fn set(&mut self, pos: Position) {
        self.bits |= 1u64 << pos.index();
    }

    /// Removes a position from this bitboard.
    pub fn unset(&mut self, pos: Position) {
        self.bits &= !(1u64 << pos.index());
    }

    pub const fn and(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits & other.bits)
    }

    pub const fn or(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits | other.bits)
    }

    pub const fn xor(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits ^ other.bits)
    }

    /// Produces an iterator over the positions contained in this bitboard,
    /// in row-major order.
    pub fn iter(self) -> BitboardIterator {
        BitboardIterator::new(self.bits)
    }

    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Retrieves the number of positions in this set.
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    pub const fn empty(self) -> bool {
        self.bits == 0
    }

    /// Retrieves the lowest position in this set, if any.
    pub fn first(self) -> Option<Position> {
        self.into_iter().next()
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Bitboard").field(&self.bits).finish()
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in types::RANKS.iter().rev() {
            for &file in &types::FILES {
                if self.test(Position::of(rank, file)) {
                    write!(f, " 1 ")?
                } else {
                    write!(f, " . ")?
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &types::FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in &types::FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Bitboard;

    fn bitand(self, rhs: Bitboard) -> Bitboard {
        self.and(rhs)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Bitboard) {
        *self = self.and(rhs);
    }
}

impl ops::BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(self, rhs: Bitboard) -> Bitboard {
        self.or(rhs)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Bitboard) {
        *self = self.or(rhs);
    }
}

impl ops::BitXor for Bitboard {
    type Output = Bitboard;

    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        self.xor(rhs)
    }
}

impl ops::Not for Bitboard {
    type Output = Bitboard;

    fn not(self) -> Bitboard {
        Bitboard::from_bits(!self.bits)
    }
}

/// BitboardIterator is an iterator over positions that are set in a
/// given bitboard.
pub struct BitboardIterator {
    bits: u64,
}

impl BitboardIterator {
    fn new(bits: u64) -> BitboardIterator {
        BitboardIterator { bits }
    }
}

impl Iterator for BitboardIterator {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.bits == 0 {
            return None;
        }

        let next = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Some(Position::from_index(next as usize))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for Bitboard {
    type Item = Position;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> BitboardIterator {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn smoke_test() {
        let mut board = Bitboard::default();
        assert!(!board.test(p(0, 0)));

        board.set(p(0, 0));
        assert!(board.test(p(0, 0)));
    }

    #[test]
    fn union_and_intersection() {
        let mut one = Bitboard::default();
        let mut two = Bitboard::default();
        one.set(p(1, 0));
        one.set(p(1, 1));
        two.set(p(1, 0));
        two.set(p(1, 2));

        let both = one & two;
        assert!(both.test(p(1, 0)));
        assert!(!both.test(p(1, 1)));

        let either = one | two;
        assert_eq!(3, either.count());
    }

    #[test]
    fn enumerating_is_row_major() {
        let mut board = Bitboard::default();
        board.set(p(6, 2));
        board.set(p(1, 7));

        let positions: Vec<_> = board.iter().collect();
        assert_eq!(vec![p(1, 7), p(6, 2)], positions);
        assert_eq!(Some(p(1, 7)), board.first());
    }

    #[test]
    fn unset() {
        let mut board = Bitboard::none();
        board.set(p(1, 7));
        board.unset(p(1, 7));
        assert!(board.empty());
    }
}
