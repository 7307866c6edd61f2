// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use chess_rules::attacks;
use chess_rules::{serialize_state, try_deserialize_state};
use chess_rules::{Bitboard, Move, Position, State, StateChanger, StateExplorer};
use criterion::black_box;
use criterion::Criterion;

fn queen_attacks(pos: Position, occ: Bitboard) -> Bitboard {
    attacks::queen_attacks(pos, occ)
}

fn knight_attacks(pos: Position) -> Bitboard {
    attacks::knight_attacks(pos)
}

fn criterion_benchmark(c: &mut Criterion) {
    let f5 = Position::new(4, 5).unwrap();
    c.bench_function("queen attacks f5 empty board", move |b| {
        b.iter(|| queen_attacks(black_box(f5), Bitboard::none()))
    });

    c.bench_function("knight attacks f5", move |b| {
        b.iter(|| knight_attacks(black_box(f5)))
    });

    c.bench_function("state snapshot", |b| {
        let state = State::new();
        b.iter(|| black_box(&state).snapshot())
    });

    c.bench_function("possible moves start", |b| {
        let state = State::new();
        let explorer = StateExplorer::new();
        b.iter(|| explorer.possible_moves(black_box(&state)))
    });

    c.bench_function("make move e2e4", |b| {
        let state = State::new();
        let changer = StateChanger::new();
        let mov = Move::quiet(Position::new(1, 4).unwrap(), Position::new(3, 4).unwrap());
        b.iter(|| {
            let mut next = black_box(&state).snapshot();
            changer.make_move(&mut next, mov)
        })
    });

    c.bench_function("serialize round trip", |b| {
        let state = State::new();
        b.iter(|| try_deserialize_state(&serialize_state(black_box(&state))))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
