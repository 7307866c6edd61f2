// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Legal move enumeration. Moves are generated pseudo-legally per piece into a
//! fixed-size buffer, and each candidate is then played out on a snapshot of
//! the state to discard the ones that leave the mover's own king attacked.
use hashbrown::HashSet;

use crate::attacks;
use crate::moves::{Move, MoveVec};
use crate::state::{king_home, kingside_rook, queenside_rook, State};
use crate::types::{Color, Direction, Piece, PieceKind, Position, PROMOTION_KINDS};

/// Read-only queries over a `State`. The explorer holds no data of its own;
/// one instance can serve any number of states.
#[derive(Copy, Clone, Debug, Default)]
pub struct StateExplorer;

impl StateExplorer {
    pub fn new() -> StateExplorer {
        StateExplorer
    }

    /// Every legal move of the piece standing on `pos`. Empty if the square
    /// is empty, holds a piece of the side not to move, or the game is over.
    pub fn possible_moves_from_position(&self, state: &State, pos: Position) -> HashSet<Move> {
        self.legal_moves_from(state, pos).into_iter().collect()
    }

    /// The squares of the side to move that have at least one legal move.
    pub fn possible_start_positions(&self, state: &State) -> HashSet<Position> {
        if state.is_game_over() {
            return HashSet::new();
        }

        state
            .pieces(state.turn())
            .iter()
            .filter(|&pos| !self.legal_moves_from(state, pos).is_empty())
            .collect()
    }

    /// Every legal move of the side to move.
    pub fn possible_moves(&self, state: &State) -> HashSet<Move> {
        let mut moves = HashSet::new();
        if state.is_game_over() {
            return moves;
        }

        for pos in state.pieces(state.turn()) {
            moves.extend(self.legal_moves_from(state, pos));
        }

        moves
    }

    /// Whether the piece on `attacker` attacks `target` on the current board.
    /// Pawns only attack diagonally forward, and sliding pieces stop at the
    /// first occupied square.
    pub fn can_attack(&self, state: &State, attacker: Position, target: Position) -> bool {
        match state.piece_at(attacker) {
            Some(piece) => piece.attacks(attacker, state.occupancy()).test(target),
            None => false,
        }
    }

    pub fn is_attacked(&self, state: &State, target: Position, by: Color) -> bool {
        state.is_attacked(target, by)
    }

    pub fn is_in_check(&self, state: &State, color: Color) -> bool {
        state.is_check(color)
    }

    /// Whether the side to move has any legal move at all, ignoring whether
    /// the game already has a result. Stops at the first one found.
    pub(crate) fn has_legal_move(&self, state: &State) -> bool {
        let color = state.turn();
        state.pieces(color).iter().any(|pos| {
            let mut candidates = MoveVec::new();
            self.pseudolegal_moves_from(state, pos, &mut candidates);
            candidates
                .iter()
                .any(|&mov| self.is_legal_given_pseudolegal(state, mov))
        })
    }

    pub(crate) fn legal_moves_from(&self, state: &State, pos: Position) -> MoveVec {
        let mut moves = MoveVec::new();
        if state.is_game_over() {
            return moves;
        }

        match state.piece_at(pos) {
            Some(piece) if piece.color == state.turn() => {}
            _ => return moves,
        }

        self.pseudolegal_moves_from(state, pos, &mut moves);
        moves.retain(|mov| self.is_legal_given_pseudolegal(state, *mov));
        moves
    }

    fn is_legal_given_pseudolegal(&self, state: &State, mov: Move) -> bool {
        let color = state.turn();
        let mut next = state.snapshot();
        next.apply_unchecked(mov);
        !next.is_check(color)
    }

    fn pseudolegal_moves_from(&self, state: &State, pos: Position, moves: &mut MoveVec) {
        let piece = match state.piece_at(pos) {
            Some(piece) => piece,
            None => return,
        };

        match piece.kind {
            PieceKind::Pawn => add_pawn_moves(state, pos, piece.color, moves),
            PieceKind::King => {
                add_targets(state, pos, piece, moves);
                add_castles(state, pos, piece.color, moves);
            }
            _ => add_targets(state, pos, piece, moves),
        }
    }
}

// Moves onto every attacked square not held by an allied piece. Covers all
// pieces except pawns, whose captures and pushes differ.
fn add_targets(state: &State, pos: Position, piece: Piece, moves: &mut MoveVec) {
    let allied = state.pieces(piece.color);
    for target in piece.attacks(pos, state.occupancy()) {
        if !allied.test(target) {
            moves.push(Move::quiet(pos, target));
        }
    }
}

fn add_pawn_moves(state: &State, pawn: Position, color: Color, moves: &mut MoveVec) {
    fn push_pawn_move(pawn: Position, target: Position, color: Color, moves: &mut MoveVec) {
        if target.row() == color.promotion_row() {
            for &kind in PROMOTION_KINDS.iter() {
                moves.push(Move::promotion(pawn, target, kind));
            }
        } else {
            moves.push(Move::quiet(pawn, target));
        }
    }

    let occupancy = state.occupancy();
    let enemies = state.pieces(color.toggle());
    let direction = color.pawn_direction();

    // pushes
    if let Some(target) = pawn.offset(direction, 0) {
        if !occupancy.test(target) {
            push_pawn_move(pawn, target, color, moves);

            if pawn.row() == color.pawn_row() {
                if let Some(two_step) = target.offset(direction, 0) {
                    if !occupancy.test(two_step) {
                        moves.push(Move::quiet(pawn, two_step));
                    }
                }
            }
        }
    }

    // captures
    for target in attacks::pawn_attacks(pawn, color) {
        if enemies.test(target) {
            push_pawn_move(pawn, target, color, moves);
        }
    }

    // en passant: the pawn that just double-stepped stands beside us, and we
    // take it by moving to the square behind it.
    if let Some(ep) = state.en_passant_position() {
        let beside = ep.row() == pawn.row()
            && (ep.col() as i32 - pawn.col() as i32).abs() == 1
            && state.piece_at(ep) == Some(Piece::new(PieceKind::Pawn, color.toggle()));
        if beside {
            if let Some(target) = ep.offset(direction, 0) {
                if !occupancy.test(target) {
                    moves.push(Move::quiet(pawn, target));
                }
            }
        }
    }
}

fn add_castles(state: &State, king: Position, color: Color, moves: &mut MoveVec) {
    if king != king_home(color) {
        return;
    }

    let enemy = color.toggle();
    let occupancy = state.occupancy();
    let rook = Some(Piece::new(PieceKind::Rook, color));

    // can't castle out of check
    if state.is_attacked(king, enemy) {
        return;
    }

    let sides = [
        (
            state.can_castle_kingside(color),
            kingside_rook(color),
            Direction::East,
        ),
        (
            state.can_castle_queenside(color),
            queenside_rook(color),
            Direction::West,
        ),
    ];

    for &(allowed, corner, dir) in sides.iter() {
        if !allowed || state.piece_at(corner) != rook {
            continue;
        }

        // every square strictly between king and rook must be empty.
        let mut cursor = king.towards(dir);
        let mut blocked = false;
        while let Some(square) = cursor {
            if square == corner {
                break;
            }

            if occupancy.test(square) {
                blocked = true;
                break;
            }

            cursor = square.towards(dir);
        }

        if blocked {
            continue;
        }

        let transit = king.towards(dir);
        let destination = transit.and_then(|sq| sq.towards(dir));
        if let (Some(transit), Some(destination)) = (transit, destination) {
            if !state.is_attacked(transit, enemy) && !state.is_attacked(destination, enemy) {
                moves.push(Move::quiet(king, destination));
            }
        }
    }
}
