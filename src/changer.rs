// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

use crate::explorer::StateExplorer;
use crate::moves::Move;
use crate::state::{king_home, GameResult, GameResultReason, State};
use crate::types::{Color, PieceKind};

/// A move was refused. The state it was offered to is left untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    GameOver,
    NoPieceAtSource,
    WrongTurn,
    NullMove,
    OwnPieceAtDestination,
    InvalidPromotion,
    NotAPossibleMove,
    CastlingThroughCheck,
    MissingKing,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self {
            IllegalMove::GameOver => "the game is already over",
            IllegalMove::NoPieceAtSource => "there is no piece on the source square",
            IllegalMove::WrongTurn => "it is not that piece's turn",
            IllegalMove::NullMove => "source and destination are the same square",
            IllegalMove::OwnPieceAtDestination => "the destination holds a piece of the same color",
            IllegalMove::InvalidPromotion => "invalid promotion",
            IllegalMove::NotAPossibleMove => "the piece cannot move there",
            IllegalMove::CastlingThroughCheck => "the king would castle out of or through check",
            IllegalMove::MissingKing => "the side to move would have no king",
        };

        write!(f, "illegal move: {}", reason)
    }
}

impl Error for IllegalMove {}

/// Validates moves and advances a `State` by one half-move at a time.
#[derive(Copy, Clone, Debug, Default)]
pub struct StateChanger {
    explorer: StateExplorer,
}

impl StateChanger {
    pub fn new() -> StateChanger {
        StateChanger {
            explorer: StateExplorer::new(),
        }
    }

    pub fn explorer(&self) -> &StateExplorer {
        &self.explorer
    }

    /// Plays `mov` on `state`. On success the state holds the position after
    /// the move, with the game result set if the move ended the game. On
    /// failure `state` is exactly as it was.
    pub fn make_move(&self, state: &mut State, mov: Move) -> Result<(), IllegalMove> {
        match self.next_state(state, mov) {
            Ok(next) => {
                *state = next;
                Ok(())
            }
            Err(err) => {
                debug!("rejected {}: {}", mov, err);
                Err(err)
            }
        }
    }

    fn next_state(&self, state: &State, mov: Move) -> Result<State, IllegalMove> {
        if state.is_game_over() {
            return Err(IllegalMove::GameOver);
        }

        let piece = state
            .piece_at(mov.from())
            .ok_or(IllegalMove::NoPieceAtSource)?;
        let color = piece.color;
        if color != state.turn() {
            return Err(IllegalMove::WrongTurn);
        }

        if mov.from() == mov.to() {
            return Err(IllegalMove::NullMove);
        }

        if state.piece_at(mov.to()).map(|p| p.color) == Some(color) {
            return Err(IllegalMove::OwnPieceAtDestination);
        }

        if let Some(kind) = mov.promotion_piece() {
            if piece.kind != PieceKind::Pawn
                || !kind.is_promotion_target()
                || mov.to().row() != color.promotion_row()
            {
                return Err(IllegalMove::InvalidPromotion);
            }
        }

        if !self.explorer.legal_moves_from(state, mov.from()).contains(&mov) {
            if piece.kind == PieceKind::King && castles_through_check(state, mov) {
                return Err(IllegalMove::CastlingThroughCheck);
            }

            return Err(IllegalMove::NotAPossibleMove);
        }

        let mut next = state.snapshot();
        next.apply_unchecked(mov);
        if next.king_position(next.turn()).is_none() {
            return Err(IllegalMove::MissingKing);
        }

        let result = self.result_after_move(&next, color);
        if let Some(result) = result {
            info!("game over after {}: {}", mov, result);
        }

        next.set_game_result(result);
        Ok(next)
    }

    // The result from the point of view of the side now to move. The
    // fifty-move rule wins over mate and stalemate.
    fn result_after_move(&self, next: &State, mover: Color) -> Option<GameResult> {
        if next.halfmove_clock() >= 100 {
            return Some(GameResult::draw(GameResultReason::FiftyMoveRule));
        }

        if self.explorer.has_legal_move(next) {
            return None;
        }

        if next.is_check(next.turn()) {
            Some(GameResult::checkmate(mover))
        } else {
            Some(GameResult::draw(GameResultReason::Stalemate))
        }
    }
}

// Whether `mov` is a castling attempt by a king on its home square whose
// origin or transit square is attacked.
fn castles_through_check(state: &State, mov: Move) -> bool {
    let color = state.turn();
    let from = mov.from();
    if from != king_home(color) || mov.to().row() != from.row() || mov.col_distance() != 2 {
        return false;
    }

    let enemy = color.toggle();
    let step = if mov.to().col() > from.col() { 1 } else { -1 };
    state.is_attacked(from, enemy)
        || from
            .offset(0, step)
            .map_or(false, |transit| state.is_attacked(transit, enemy))
}
