// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess rules engine. Given a `State` and a candidate `Move`, the
//! `StateChanger` decides whether the move is legal, applies it, and records
//! checkmate, stalemate or a fifty-move draw when the game ends. The
//! `StateExplorer` answers which moves are available, and `serializer` and
//! `fen` turn states into text and back.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod attacks;
mod bitboard;
mod changer;
mod explorer;
mod fen;
mod game;
mod moves;
mod perft;
pub mod serializer;
mod state;
mod types;

pub use bitboard::{Bitboard, BitboardIterator};
pub use changer::{IllegalMove, StateChanger};
pub use explorer::StateExplorer;
pub use fen::FenParseError;
pub use game::{Game, GameIoError};
pub use moves::{Move, MoveParseError, MoveVec};
pub use perft::{perft, perft_divide};
pub use serializer::{deserialize_state, serialize_state, try_deserialize_state, StateParseError};
pub use state::{GameResult, GameResultReason, State};
pub use types::{CastleStatus, Color, Direction, File, InvalidArgument, Piece, PieceKind, Position, Rank};
