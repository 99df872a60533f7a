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

//! Krill, a UCI-compatible chess engine.
//!
//! Accepted commands:
//! - `uci`
//! - `isready`
//! - `ucinewgame`
//! - `position [fen <fenstring> | startpos ] moves <move1> .. <movei>`
//! - `d`: print the current board
//! - `go`, `stop`, `eval`: stubs for now
//! - `help`
//! - `quit`

use std::io;

use krill::uci::Uci;

fn main() -> Result<(), io::Error> {
    Uci::new().main_loop()
}
