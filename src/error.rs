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

//! Error handling.

use thiserror::Error;

/// An error surfaced by the core.
///
/// FEN loading never fails: malformed fields fall back to their defaults
/// and inconsistent state is repaired, so there is no FEN variant here.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The `none` or `null` sentinel was passed to
    /// [`make_move`](crate::board::Board::make_move).
    #[error("cannot apply the none or null move")]
    InvalidMove,
    /// A string that should have been a square in algebraic notation
    /// wasn't one.
    #[error("invalid square notation: {0:?}")]
    InvalidSquare(String),
}
