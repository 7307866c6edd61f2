// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Precomputed attack sets. Every function here answers "which squares does a
//! piece of this kind standing on `pos` attack", given the board occupancy for
//! the sliding pieces. None of them look at piece colors beyond pawn
//! direction; excluding friendly targets is the caller's job.
use crate::bitboard::Bitboard;
use crate::types::{Color, Direction, Position, TableIndex, COLORS, DIRECTIONS};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

struct KingTable {
    table: [Bitboard; 64],
}

impl KingTable {
    pub fn new() -> KingTable {
        let mut kt = KingTable {
            table: [Bitboard::none(); 64],
        };

        for pos in Position::all() {
            let mut board = Bitboard::none();
            for &dir in DIRECTIONS.iter() {
                if let Some(target) = pos.towards(dir) {
                    board.set(target);
                }
            }

            kt.table[pos.index()] = board;
        }

        kt
    }

    pub fn attacks(&self, pos: Position) -> Bitboard {
        self.table[pos.index()]
    }
}

struct PawnTable {
    table: [[Bitboard; 2]; 64],
}

impl PawnTable {
    pub fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[Bitboard::none(); 2]; 64],
        };

        for pos in Position::all() {
            for &color in COLORS.iter() {
                if pos.row() == color.promotion_row() {
                    // A pawn never stands on its promotion row, so it attacks
                    // nothing from there.
                    continue;
                }

                let mut board = Bitboard::none();
                let forward = color.pawn_direction();
                for &side in &[-1, 1] {
                    if let Some(target) = pos.offset(forward, side) {
                        board.set(target);
                    }
                }

                pt.table[pos.index()][color.as_index()] = board;
            }
        }

        pt
    }

    pub fn attacks(&self, pos: Position, color: Color) -> Bitboard {
        self.table[pos.index()][color.as_index()]
    }
}

struct KnightTable {
    table: [Bitboard; 64],
}

impl KnightTable {
    pub fn new() -> KnightTable {
        let mut kt = KnightTable {
            table: [Bitboard::none(); 64],
        };

        for pos in Position::all() {
            let mut board = Bitboard::none();
            for &(dr, dc) in KNIGHT_OFFSETS.iter() {
                if let Some(target) = pos.offset(dr, dc) {
                    board.set(target);
                }
            }

            kt.table[pos.index()] = board;
        }

        kt
    }

    pub fn attacks(&self, pos: Position) -> Bitboard {
        self.table[pos.index()]
    }
}

// Indexed by square, then direction. The 65th row is left empty so that "no
// blocker" (bit index 64) looks up an empty ray.
struct RayTable {
    table: [[Bitboard; 8]; 65],
}

impl RayTable {
    pub fn new() -> RayTable {
        let mut rt = RayTable {
            table: [[Bitboard::none(); 8]; 65],
        };

        for pos in Position::all() {
            for &dir in DIRECTIONS.iter() {
                let mut entry = Bitboard::none();
                let mut cursor = pos.towards(dir);
                while let Some(next) = cursor {
                    entry.set(next);
                    cursor = next.towards(dir);
                }

                rt.table[pos.index()][dir.as_index()] = entry;
            }
        }

        rt
    }

    pub fn attacks(&self, idx: usize, dir: Direction) -> Bitboard {
        self.table[idx][dir.as_index()]
    }
}

lazy_static! {
    static ref KING_TABLE: KingTable = KingTable::new();
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
    static ref KNIGHT_TABLE: KnightTable = KnightTable::new();
    static ref RAY_TABLE: RayTable = RayTable::new();
}

// Rays whose bit indices grow away from the origin: the nearest blocker is the
// lowest set bit.
fn positive_ray_attacks(pos: Position, occupancy: Bitboard, dir: Direction) -> Bitboard {
    let attacks = RAY_TABLE.attacks(pos.index(), dir);
    let blocker = attacks.and(occupancy).bits();
    let blocking_square = blocker.trailing_zeros() as usize;
    let blocking_ray = RAY_TABLE.attacks(blocking_square, dir);
    attacks.xor(blocking_ray)
}

// Rays whose bit indices shrink away from the origin: the nearest blocker is
// the highest set bit.
fn negative_ray_attacks(pos: Position, occupancy: Bitboard, dir: Direction) -> Bitboard {
    let attacks = RAY_TABLE.attacks(pos.index(), dir);
    let blocker = attacks.and(occupancy).bits();
    let blocking_square = (64 - blocker.leading_zeros()).checked_sub(1).unwrap_or(64) as usize;
    let blocking_ray = RAY_TABLE.attacks(blocking_square, dir);
    attacks.xor(blocking_ray)
}

fn diagonal_attacks(pos: Position, occupancy: Bitboard) -> Bitboard {
    positive_ray_attacks(pos, occupancy, Direction::NorthWest)
        | negative_ray_attacks(pos, occupancy, Direction::SouthEast)
}

fn antidiagonal_attacks(pos: Position, occupancy: Bitboard) -> Bitboard {
    positive_ray_attacks(pos, occupancy, Direction::NorthEast)
        | negative_ray_attacks(pos, occupancy, Direction::SouthWest)
}

fn file_attacks(pos: Position, occupancy: Bitboard) -> Bitboard {
    positive_ray_attacks(pos, occupancy, Direction::North)
        | negative_ray_attacks(pos, occupancy, Direction::South)
}

fn rank_attacks(pos: Position, occupancy: Bitboard) -> Bitboard {
    positive_ray_attacks(pos, occupancy, Direction::East)
        | negative_ray_attacks(pos, occupancy, Direction::West)
}

pub fn pawn_attacks(pos: Position, color: Color) -> Bitboard {
    PAWN_TABLE.attacks(pos, color)
}

pub fn bishop_attacks(pos: Position, occupancy: Bitboard) -> Bitboard {
    diagonal_attacks(pos, occupancy) | antidiagonal_attacks(pos, occupancy)
}

pub fn knight_attacks(pos: Position) -> Bitboard {
    KNIGHT_TABLE.attacks(pos)
}

pub fn rook_attacks(pos: Position, occupancy: Bitboard) -> Bitboard {
    file_attacks(pos, occupancy) | rank_attacks(pos, occupancy)
}

pub fn queen_attacks(pos: Position, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(pos, occupancy) | rook_attacks(pos, occupancy)
}

pub fn king_attacks(pos: Position) -> Bitboard {
    KING_TABLE.attacks(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn knight_in_corner() {
        let attacks = knight_attacks(p(0, 0));
        assert_eq!(2, attacks.count());
        assert!(attacks.test(p(2, 1)));
        assert!(attacks.test(p(1, 2)));
    }

    #[test]
    fn king_in_center() {
        assert_eq!(8, king_attacks(p(3, 3)).count());
        assert_eq!(3, king_attacks(p(7, 0)).count());
    }

    #[test]
    fn pawns_attack_forward_diagonals() {
        let white = pawn_attacks(p(1, 0), Color::White);
        assert_eq!(1, white.count());
        assert!(white.test(p(2, 1)));

        let black = pawn_attacks(p(6, 4), Color::Black);
        assert!(black.test(p(5, 3)));
        assert!(black.test(p(5, 5)));
        assert!(pawn_attacks(p(7, 4), Color::White).empty());
    }

    #[test]
    fn queen_on_empty_board() {
        assert_eq!(27, queen_attacks(p(3, 3), Bitboard::none()).count());
        assert_eq!(21, queen_attacks(p(0, 0), Bitboard::none()).count());
    }

    #[test]
    fn rook_stops_at_first_blocker() {
        let mut occupancy = Bitboard::none();
        occupancy.set(p(0, 3));
        occupancy.set(p(4, 0));
        let attacks = rook_attacks(p(0, 0), occupancy);

        // blockers themselves are included, squares behind them are not.
        assert!(attacks.test(p(0, 3)));
        assert!(!attacks.test(p(0, 4)));
        assert!(attacks.test(p(4, 0)));
        assert!(!attacks.test(p(5, 0)));
        assert_eq!(7, attacks.count());
    }

    #[test]
    fn bishop_blocked_both_ways() {
        let mut occupancy = Bitboard::none();
        occupancy.set(p(5, 5));
        occupancy.set(p(1, 1));
        let attacks = bishop_attacks(p(3, 3), occupancy);
        assert!(attacks.test(p(5, 5)));
        assert!(!attacks.test(p(6, 6)));
        assert!(attacks.test(p(1, 1)));
        assert!(!attacks.test(p(0, 0)));
        assert!(attacks.test(p(0, 6)));
        assert!(attacks.test(p(6, 0)));
    }
}
