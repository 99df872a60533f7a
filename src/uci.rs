/*
 * Krill, a UCI-compatible chess engine
 * Copyright (C) 2025 Jasper Shovelton
 *
 * Krill is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Krill is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Krill. If not, see <https://www.gnu.org/licenses/>.
 */

//! Handles UCI input: a thin line-oriented shell over the board and the
//! move generator. See
//! <https://gist.github.com/DOBRO/2592c6dad754ba67e6dcaec8c90165bf> for
//! the protocol.

use std::{
    io::{self, BufRead},
    str::FromStr,
};

use crate::{
    board::Board,
    defs::{PieceType, Square},
    movegen::{generated_moves, Move},
};

/// The name of the author of this engine.
const ID_AUTHOR: &str = "Jasper Shovelton";
/// The name of this engine.
const ID_NAME: &str = "Krill";
/// The version of this engine.
const ID_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The UCI shell: one board, mutated by `position` commands.
pub struct Uci {
    board: Board,
}

impl Default for Uci {
    fn default() -> Self {
        Self::new()
    }
}

impl Uci {
    /// Creates a [`Uci`] shell holding the starting position.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::start_pos(),
        }
    }

    /// Repeatedly reads a command from stdin and executes it, until
    /// `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if reading from stdin fails.
    pub fn main_loop(&mut self) -> Result<(), io::Error> {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if !self.handle_command(&line) {
                break;
            }
        }
        Ok(())
    }

    /// Executes one command line. Returns `false` when the shell should
    /// exit.
    pub fn handle_command(&mut self, line: &str) -> bool {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("uci") => {
                println!("id name {ID_NAME} {ID_VERSION}");
                println!("id author {ID_AUTHOR}");
                println!("uciok");
            }
            Some("isready") => println!("readyok"),
            Some("ucinewgame") => self.board = Board::start_pos(),
            Some("position") => self.handle_position(tokens),
            Some("d") => println!("{}", self.board),
            Some("go" | "stop" | "eval") => println!("Not implemented yet!"),
            Some("help") => print_help(),
            Some("quit") => {
                println!("goodbye");
                return false;
            }
            Some(_) => println!("Unknown command, type help for more information"),
            None => (),
        }
        true
    }

    /// Handles the `position [fen <fenstring> | startpos] moves <move1>
    /// .. <movei>` command.
    ///
    /// The moves are matched against the generated moves of each
    /// successive position, so only moves the generator knows can be
    /// played. If anything fails to parse, the board is left as it was.
    fn handle_position<'a, T>(&mut self, mut tokens: T)
    where
        T: Iterator<Item = &'a str>,
    {
        let mut board = Board::new();

        match tokens.next() {
            Some("startpos") => board = Board::start_pos(),
            Some("fen") => {
                let mut fen = String::with_capacity(128);
                // a FEN string is exactly 6 whitespace-separated fields
                for _ in 0..6 {
                    let Some(token) = tokens.next() else {
                        return eprintln!("info string incomplete FEN string");
                    };
                    fen.push_str(token);
                    fen.push(' ');
                }
                board.load_fen(&fen);
            }
            _ => return eprintln!("info string expected 'startpos' or 'fen'"),
        }

        match tokens.next() {
            Some("moves") => (),
            Some(_) => return eprintln!("info string expected 'moves'"),
            None => {
                self.board = board;
                return;
            }
        }

        for token in tokens {
            let Some(mv) = parse_move(&board, token) else {
                return eprintln!("info string cannot play move {token}");
            };
            // the move came from the generator, so it can't be a
            // sentinel
            let _ = board.make_move(mv);
        }
        self.board = board;
    }
}

/// Parses a move in long algebraic notation (e.g. `e2e4`, `g7g8q`) and
/// finds it among the moves available on `board`.
fn parse_move(board: &Board, token: &str) -> Option<Move> {
    let origin = Square::from_str(token.get(0..2)?).ok()?;
    let dest = Square::from_str(token.get(2..4)?).ok()?;
    let moves = generated_moves(board);

    match token.len() {
        // `move_with` also matches castling, which arrives as the
        // two-square king move (e.g. e1g1)
        4 => moves.move_with(origin, dest),
        5 => {
            let piece_type = PieceType::from_char(token.chars().nth(4)?)?;
            moves.move_with_promotion(origin, dest, piece_type)
        }
        _ => None,
    }
}

/// Prints a summary of every command the shell understands.
fn print_help() {
    println!(
        "Commands:\n\
         ----------------------------------------\n\
         uci\n\
         \tTell engine to use the UCI (Universal Chess Interface).\n\
         \tThe engine must respond with 'uciok'.\n\n\
         isready\n\
         \tSynchronize the engine with the GUI. The engine must respond with 'readyok'.\n\n\
         ucinewgame\n\
         \tStart of a new game.\n\n\
         position [fen <fenstring> | startpos ] moves <move1> .... <movei>\n\
         \tSet up the position on the internal board.\n\n\
         go\n\
         \tStart calculating.\n\n\
         stop\n\
         \tStop calculating.\n\n\
         d\n\
         \tDisplay the current position on the board.\n\n\
         quit\n\
         \tQuit the program.\n"
    );
}
