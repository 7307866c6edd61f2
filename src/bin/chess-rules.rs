// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::process;
use std::time::Instant;

use chess_rules::{perft, perft_divide, serialize_state, try_deserialize_state};
use chess_rules::{Game, Move, State, StateExplorer};
use clap::{App, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let state_arg = || {
        Arg::with_name("STATE")
            .help("\"start\", a FEN string, or a serialized state")
            .required(true)
            .index(1)
    };

    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(state_arg())
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("divide")
                        .help("Print the node count below each root move")
                        .long("--divide"),
                ),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal moves of the side to move")
                .arg(state_arg()),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a sequence of moves from the initial position")
                .arg(
                    Arg::with_name("MOVE")
                        .help("Moves written as (r,c)->(r,c), optionally followed by (promoting to KIND)")
                        .multiple(true)
                        .index(1),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    if let Some(matches) = matches.subcommand_matches("moves") {
        run_moves(matches);
    }

    if let Some(matches) = matches.subcommand_matches("play") {
        run_play(matches);
    }

    println!("{}", matches.usage());
    process::exit(2);
}

fn parse_state(matches: &ArgMatches) -> State {
    let input = matches.value_of("STATE").unwrap_or("start");
    if input == "start" {
        return State::new();
    }

    if input.contains('/') {
        match State::from_fen(input) {
            Ok(state) => return state,
            Err(err) => {
                println!("invalid fen: {}", err);
                process::exit(1);
            }
        }
    }

    match try_deserialize_state(input) {
        Ok(state) => state,
        Err(err) => {
            println!("invalid state: {}", err);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let state = parse_state(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);
    println!("fen:   {}", state.as_fen());
    println!("depth: {}", depth);
    println!();
    println!("{}", state);
    println!();

    if matches.is_present("divide") {
        let mut total = 0;
        for (mov, count) in perft_divide(&state, depth) {
            println!("{}: {}", mov, count);
            total += count;
        }

        println!();
        println!("total: {}", total);
        process::exit(0);
    }

    for i in 1..=depth {
        let start = Instant::now();
        let results = perft(&state, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let state = parse_state(matches);
    println!("{}", state);
    if let Some(result) = state.game_result() {
        println!("game over: {}", result);
        process::exit(0);
    }

    let explorer = StateExplorer::new();
    let mut moves: Vec<Move> = explorer.possible_moves(&state).into_iter().collect();
    moves.sort_by_key(|mov| mov.to_string());
    for mov in &moves {
        println!("{}", mov);
    }

    println!();
    println!("{} legal moves for {}", moves.len(), state.turn());
    process::exit(0);
}

fn run_play(matches: &ArgMatches) -> ! {
    let mut game = Game::new();
    for text in matches.values_of("MOVE").into_iter().flatten() {
        let mov = match text.parse::<Move>() {
            Ok(mov) => mov,
            Err(err) => {
                println!("{}", err);
                process::exit(1);
            }
        };

        if let Err(err) = game.make_move(mov) {
            println!("{}: {}", mov, err);
            process::exit(1);
        }
    }

    let state = game.state();
    println!("{}", state);
    println!("state: {}", serialize_state(state));
    match state.game_result() {
        Some(result) => println!("result: {}", result),
        None => println!("result: in progress, {} to move", state.turn()),
    }

    process::exit(0);
}
