// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::changer::StateChanger;
use crate::moves::Move;
use crate::state::State;

/// Counts the leaves of the legal move tree rooted at `state`, `depth`
/// half-moves deep. Every move is played through the move applier, so a
/// finished game has no children.
pub fn perft(state: &State, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let changer = StateChanger::new();
    let moves: Vec<Move> = changer.explorer().possible_moves(state).into_iter().collect();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| {
            let mut next = state.snapshot();
            match changer.make_move(&mut next, mov) {
                Ok(()) => perft(&next, depth - 1),
                Err(err) => {
                    // every listed move must be accepted; count nothing so the
                    // totals expose the disagreement.
                    error!("explorer listed {} but the applier refused it: {}", mov, err);
                    0
                }
            }
        })
        .sum()
}

/// Node counts below each legal move of `state`, sorted by move text.
pub fn perft_divide(state: &State, depth: u32) -> Vec<(Move, u64)> {
    let changer = StateChanger::new();
    let mut counts: Vec<(Move, u64)> = changer
        .explorer()
        .possible_moves(state)
        .into_iter()
        .collect::<Vec<_>>()
        .par_iter()
        .map(|&mov| {
            let mut next = state.snapshot();
            let count = match changer.make_move(&mut next, mov) {
                Ok(()) => perft(&next, depth.saturating_sub(1)),
                Err(_) => 0,
            };
            (mov, count)
        })
        .collect();

    counts.sort_by_key(|&(mov, _)| mov.to_string());
    counts
}
