// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A game in progress, as a user interface would hold it: the current state
//! plus the serialized state after every half-move played so far. The history
//! can be saved to and loaded from a small JSON document, and exported as CSV.
use std::error::Error;
use std::fmt;
use std::io::{self, Read, Write};

use csv::Writer;

use crate::changer::{IllegalMove, StateChanger};
use crate::moves::Move;
use crate::serializer::{deserialize_state, serialize_state};
use crate::state::State;
use crate::types::Color;

/// Failures reading or writing a saved game.
#[derive(Debug)]
pub enum GameIoError {
    Io(io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    EmptyHistory,
}

impl fmt::Display for GameIoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameIoError::Io(err) => write!(f, "i/o error: {}", err),
            GameIoError::Json(err) => write!(f, "malformed save file: {}", err),
            GameIoError::Csv(err) => write!(f, "csv error: {}", err),
            GameIoError::EmptyHistory => write!(f, "save file has an empty history"),
        }
    }
}

impl Error for GameIoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameIoError::Io(err) => Some(err),
            GameIoError::Json(err) => Some(err),
            GameIoError::Csv(err) => Some(err),
            GameIoError::EmptyHistory => None,
        }
    }
}

impl From<io::Error> for GameIoError {
    fn from(err: io::Error) -> GameIoError {
        GameIoError::Io(err)
    }
}

impl From<serde_json::Error> for GameIoError {
    fn from(err: serde_json::Error) -> GameIoError {
        GameIoError::Json(err)
    }
}

impl From<csv::Error> for GameIoError {
    fn from(err: csv::Error) -> GameIoError {
        GameIoError::Csv(err)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    current: String,
    history: Vec<String>,
}

#[derive(Serialize)]
struct HistoryRecord<'a> {
    ply: usize,
    turn: &'static str,
    state: &'a str,
}

pub struct Game {
    state: State,
    history: Vec<String>,
    changer: StateChanger,
}

impl Game {
    pub fn new() -> Game {
        let state = State::new();
        let history = vec![serialize_state(&state)];
        Game {
            state,
            history,
            changer: StateChanger::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Serialized states, oldest first. The first entry is the state the game
    /// started from; each later one follows a half-move.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn make_move(&mut self, mov: Move) -> Result<(), IllegalMove> {
        self.changer.make_move(&mut self.state, mov)?;
        self.history.push(serialize_state(&self.state));
        Ok(())
    }

    /// Jumps to the state encoded by `token`. A token already in the history
    /// discards everything after it, as when stepping back; any other token
    /// is appended. Malformed tokens restore a new game.
    pub fn restore(&mut self, token: &str) {
        self.state = deserialize_state(token);
        let canonical = serialize_state(&self.state);
        match self.history.iter().position(|t| *t == canonical) {
            Some(idx) => self.history.truncate(idx + 1),
            None => self.history.push(canonical),
        }
    }

    pub fn save<W: Write>(&self, writer: W) -> Result<(), GameIoError> {
        let file = SaveFile {
            current: serialize_state(&self.state),
            history: self.history.clone(),
        };

        serde_json::to_writer_pretty(writer, &file)?;
        Ok(())
    }

    pub fn load<R: Read>(reader: R) -> Result<Game, GameIoError> {
        let file: SaveFile = serde_json::from_reader(reader)?;
        if file.history.is_empty() {
            return Err(GameIoError::EmptyHistory);
        }

        info!("loaded game with {} half-moves", file.history.len() - 1);
        Ok(Game {
            state: deserialize_state(&file.current),
            history: file.history,
            changer: StateChanger::new(),
        })
    }

    /// One row per entry of the history: `ply,turn,state`.
    pub fn write_history_csv<W: Write>(&self, writer: W) -> Result<(), GameIoError> {
        let mut writer = Writer::from_writer(writer);
        for (ply, token) in self.history.iter().enumerate() {
            let turn = match deserialize_state(token).turn() {
                Color::White => "white",
                Color::Black => "black",
            };

            writer.serialize(HistoryRecord {
                ply,
                turn,
                state: token,
            })?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
