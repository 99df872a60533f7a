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

//! Precomputed attack and move lookup tables, shared by all boards.

use std::sync::LazyLock;

use oorandom::Rand64;

use self::magic::{blocker_subsets, find_magic, sliding_attacks, Magic};

use crate::{
    bitboard::Bitboard,
    defs::{Color, PieceType, Square},
};

/// Magic bitboard indexing.
mod magic;

/// The lookup tables of every piece: per-square attack sets for the
/// jumping pieces, and blocker-indexed move sets for the sliders.
///
/// Constructed once, never mutated afterwards, and safe to read from
/// anywhere: use the shared [`LOOKUPS`] handle.
pub struct Lookups {
    pawn_attacks: [[Bitboard; Square::COUNT]; Color::COUNT],
    knight_attacks: [Bitboard; Square::COUNT],
    king_attacks: [Bitboard; Square::COUNT],
    /// Empty-board rook attacks: the rank and file of the square, edges
    /// included. Both the coarse attack set and the domain of the
    /// blocker keys.
    rook_masks: [Bitboard; Square::COUNT],
    /// Empty-board bishop attacks: the diagonals of the square.
    bishop_masks: [Bitboard; Square::COUNT],
    rook_magics: [Magic; Square::COUNT],
    bishop_magics: [Magic; Square::COUNT],
    rook_table: Vec<Bitboard>,
    bishop_table: Vec<Bitboard>,
}

/// The process-lifetime table set, built on first use.
pub static LOOKUPS: LazyLock<Lookups> = LazyLock::new(Lookups::new);

/// The total number of rook table entries: the sum over all squares of
/// `2^popcount(mask)`, with `2^12` blocker permutations for each corner,
/// `2^11` for each non-corner edge square and `2^10` for all others.
const ROOK_TABLE_SIZE: usize = 102_400;
/// The total number of bishop table entries, summed the same way:
/// `2^9` permutations for the four centre squares down to `2^5` for the
/// edge.
const BISHOP_TABLE_SIZE: usize = 5_248;
/// Fixed seed for the magic search, so that construction is
/// deterministic from run to run.
const MAGIC_SEED: u128 = 0x2b7e_1516_28ae_d2a6_abf7_1588_09cf_4f3c;

impl Lookups {
    /// Computes all tables. Takes a few milliseconds: the magic numbers
    /// are searched for, not hardcoded.
    #[allow(clippy::new_without_default)]
    #[must_use]
    pub fn new() -> Self {
        let mut rng = Rand64::new(MAGIC_SEED);
        let (rook_magics, rook_table) = build_slider_table(PieceType::ROOK, &mut rng);
        let (bishop_magics, bishop_table) = build_slider_table(PieceType::BISHOP, &mut rng);
        debug_assert_eq!(rook_table.len(), ROOK_TABLE_SIZE);
        debug_assert_eq!(bishop_table.len(), BISHOP_TABLE_SIZE);

        let mut lookups = Self {
            pawn_attacks: [[Bitboard::EMPTY; Square::COUNT]; Color::COUNT],
            knight_attacks: [Bitboard::EMPTY; Square::COUNT],
            king_attacks: [Bitboard::EMPTY; Square::COUNT],
            rook_masks: [Bitboard::EMPTY; Square::COUNT],
            bishop_masks: [Bitboard::EMPTY; Square::COUNT],
            rook_magics,
            bishop_magics,
            rook_table,
            bishop_table,
        };
        lookups.init_pawn_attacks();
        lookups.init_knight_attacks();
        lookups.init_king_attacks();
        lookups.init_masks();
        lookups
    }

    /// Initialises the pawn attack tables for both colors.
    ///
    /// The tables are uniform over all 64 squares, including ranks that
    /// pawns never occupy; callers restrict by board state.
    fn init_pawn_attacks(&mut self) {
        for square in 0..Square::COUNT {
            let bb = Bitboard::from_square(Square(square as u8));
            self.pawn_attacks[Color::WHITE.to_index()][square] =
                bb.north().east() | bb.north().west();
            self.pawn_attacks[Color::BLACK.to_index()][square] =
                bb.south().east() | bb.south().west();
        }
    }

    /// Initialises the knight attack table.
    fn init_knight_attacks(&mut self) {
        for square in 0..Square::COUNT {
            let bb = Bitboard::from_square(Square(square as u8));
            let east = bb.east();
            let west = bb.west();
            let mut attacks = (east | west).north().north() | (east | west).south().south();
            let east = east.east();
            let west = west.west();
            attacks |= (east | west).north() | (east | west).south();
            self.knight_attacks[square] = attacks;
        }
    }

    /// Initialises the king attack table.
    fn init_king_attacks(&mut self) {
        for square in 0..Square::COUNT {
            let bb = Bitboard::from_square(Square(square as u8));
            let mut attacks = bb.east() | bb.west() | bb;
            attacks |= attacks.north() | attacks.south();
            self.king_attacks[square] = attacks ^ bb;
        }
    }

    /// Initialises the empty-board rook and bishop attack sets.
    fn init_masks(&mut self) {
        for square in 0..Square::COUNT {
            let sq = Square(square as u8);
            self.rook_masks[square] = sliding_attacks(PieceType::ROOK, sq, Bitboard::EMPTY);
            self.bishop_masks[square] = sliding_attacks(PieceType::BISHOP, sq, Bitboard::EMPTY);
        }
    }
}

impl Lookups {
    /// Finds the pawn attacks of the given color from `square`.
    #[inline]
    #[must_use]
    pub fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        self.pawn_attacks[color.to_index()][square.to_index()]
    }

    /// Finds the knight attacks from `square`.
    #[inline]
    #[must_use]
    pub fn knight_attacks(&self, square: Square) -> Bitboard {
        self.knight_attacks[square.to_index()]
    }

    /// Finds the king attacks from `square`.
    #[inline]
    #[must_use]
    pub fn king_attacks(&self, square: Square) -> Bitboard {
        self.king_attacks[square.to_index()]
    }

    /// Returns the empty-board rook attacks from `square`. Blocker keys
    /// for [`rook_moves`](Self::rook_moves) are subsets of this.
    #[inline]
    #[must_use]
    pub fn rook_mask(&self, square: Square) -> Bitboard {
        self.rook_masks[square.to_index()]
    }

    /// Returns the empty-board bishop attacks from `square`. Blocker
    /// keys for [`bishop_moves`](Self::bishop_moves) are subsets of
    /// this.
    #[inline]
    #[must_use]
    pub fn bishop_mask(&self, square: Square) -> Bitboard {
        self.bishop_masks[square.to_index()]
    }

    /// Returns the empty-board queen attacks from `square`: the union of
    /// the rook and bishop sets.
    #[inline]
    #[must_use]
    pub fn queen_mask(&self, square: Square) -> Bitboard {
        self.rook_mask(square) | self.bishop_mask(square)
    }

    /// Finds the moves of a rook on `square` with the given blockers:
    /// each ray stops at, and includes, its first blocker.
    ///
    /// Blockers outside the rook mask are ignored, so the full occupancy
    /// bitboard can be passed directly.
    #[inline]
    #[must_use]
    pub fn rook_moves(&self, square: Square, blockers: Bitboard) -> Bitboard {
        self.rook_table[self.rook_magics[square.to_index()].index(blockers)]
    }

    /// Finds the moves of a bishop on `square` with the given blockers:
    /// each ray stops at, and includes, its first blocker.
    #[inline]
    #[must_use]
    pub fn bishop_moves(&self, square: Square, blockers: Bitboard) -> Bitboard {
        self.bishop_table[self.bishop_magics[square.to_index()].index(blockers)]
    }

    /// Finds the moves of a queen on `square` with the given blockers,
    /// as the union of the rook and bishop lookups.
    #[inline]
    #[must_use]
    pub fn queen_moves(&self, square: Square, blockers: Bitboard) -> Bitboard {
        self.rook_moves(square, blockers) | self.bishop_moves(square, blockers)
    }
}

/// Builds the magic table of a slider: for each square, a magic number
/// is searched for and the table segment of `2^popcount(mask)` entries
/// is filled with the attack set of every blocker permutation.
fn build_slider_table(
    piece_type: PieceType,
    rng: &mut Rand64,
) -> ([Magic; Square::COUNT], Vec<Bitboard>) {
    let mut magics = [Magic::EMPTY; Square::COUNT];
    let mut table = Vec::new();

    for square in 0..Square::COUNT {
        let sq = Square(square as u8);
        let full_mask = sliding_attacks(piece_type, sq, Bitboard::EMPTY);
        let mask = full_mask & !Bitboard::edges_without(sq);
        let shift = 64 - mask.count();

        let subsets: Vec<(Bitboard, Bitboard)> = blocker_subsets(mask)
            .into_iter()
            .map(|blockers| (blockers, sliding_attacks(piece_type, sq, blockers)))
            .collect();

        let magic = Magic::new(
            find_magic(&subsets, shift, rng),
            mask,
            shift,
            table.len(),
        );
        table.resize(table.len() + subsets.len(), Bitboard::EMPTY);
        for &(blockers, attacks) in &subsets {
            table[magic.index(blockers)] = attacks;
        }
        magics[square] = magic;
    }

    (magics, table)
}

#[cfg(test)]
mod tests {
    use oorandom::Rand64;

    use super::{magic::sliding_attacks, LOOKUPS};
    use crate::{
        bitboard::Bitboard,
        defs::{Color, PieceType, Square},
    };

    #[test]
    fn king_attacks() {
        // a corner king attacks 3 squares, a centre king 8
        assert_eq!(LOOKUPS.king_attacks(Square::A1).count(), 3);
        assert_eq!(LOOKUPS.king_attacks(Square::E4).count(), 8);
        assert!(LOOKUPS.king_attacks(Square::A1).contains(Square::B2));
        assert!(!LOOKUPS.king_attacks(Square::A1).contains(Square::C1));
    }

    #[test]
    fn knight_attacks() {
        assert_eq!(LOOKUPS.knight_attacks(Square::A1).count(), 2);
        assert_eq!(LOOKUPS.knight_attacks(Square::G1).count(), 3);
        assert_eq!(LOOKUPS.knight_attacks(Square::D4).count(), 8);
        assert!(LOOKUPS.knight_attacks(Square::G1).contains(Square::F3));
        assert!(LOOKUPS.knight_attacks(Square::G1).contains(Square::H3));
        assert!(LOOKUPS.knight_attacks(Square::G1).contains(Square::E2));
    }

    #[test]
    fn pawn_attacks() {
        assert!(LOOKUPS
            .pawn_attacks(Color::WHITE, Square::E4)
            .contains(Square::D5));
        assert!(LOOKUPS
            .pawn_attacks(Color::WHITE, Square::E4)
            .contains(Square::F5));
        assert!(LOOKUPS
            .pawn_attacks(Color::BLACK, Square::E4)
            .contains(Square::D3));
        assert_eq!(LOOKUPS.pawn_attacks(Color::WHITE, Square::A2).count(), 1);
        // the tables are uniform: even ranks pawns never occupy have
        // entries
        assert_eq!(LOOKUPS.pawn_attacks(Color::WHITE, Square::E8).count(), 0);
        assert_eq!(LOOKUPS.pawn_attacks(Color::BLACK, Square::E1).count(), 0);
    }

    #[test]
    fn masks_are_empty_board_attacks() {
        // a rook always attacks its full rank and file
        for square in 0..Square::COUNT {
            let sq = Square(square as u8);
            assert_eq!(LOOKUPS.rook_mask(sq).count(), 14);
            assert!(!LOOKUPS.rook_mask(sq).contains(sq));
            assert!(!LOOKUPS.bishop_mask(sq).contains(sq));
        }
        assert_eq!(LOOKUPS.bishop_mask(Square::D4).count(), 13);
        assert_eq!(LOOKUPS.bishop_mask(Square::A1).count(), 7);
    }

    #[test]
    fn queen_mask_is_rook_or_bishop() {
        for square in 0..Square::COUNT {
            let sq = Square(square as u8);
            assert_eq!(
                LOOKUPS.queen_mask(sq),
                LOOKUPS.rook_mask(sq) | LOOKUPS.bishop_mask(sq),
            );
        }
    }

    /// Checks every table entry of a slider against a fresh ray-walk.
    fn exhaustive_slider_check(piece_type: PieceType) {
        for square in 0..Square::COUNT {
            let sq = Square(square as u8);
            let full_mask = sliding_attacks(piece_type, sq, Bitboard::EMPTY);
            let mask = full_mask & !Bitboard::edges_without(sq);
            for blockers in super::magic::blocker_subsets(mask) {
                let looked_up = if piece_type == PieceType::ROOK {
                    LOOKUPS.rook_moves(sq, blockers)
                } else {
                    LOOKUPS.bishop_moves(sq, blockers)
                };
                assert_eq!(looked_up, sliding_attacks(piece_type, sq, blockers));
            }
        }
    }

    #[test]
    fn rook_moves_match_ray_walk() {
        exhaustive_slider_check(PieceType::ROOK);
    }

    #[test]
    fn bishop_moves_match_ray_walk() {
        exhaustive_slider_check(PieceType::BISHOP);
    }

    #[test]
    fn slider_lookups_ignore_irrelevant_blockers() {
        // random occupancies: only the bits on the square's rays matter,
        // and a blocker on the board edge changes nothing
        let mut rng = Rand64::new(0xdecafbad);
        for square in 0..Square::COUNT {
            let sq = Square(square as u8);
            for _ in 0..200 {
                let occupancies = Bitboard(rng.rand_u64());
                assert_eq!(
                    LOOKUPS.rook_moves(sq, occupancies),
                    sliding_attacks(PieceType::ROOK, sq, occupancies & LOOKUPS.rook_mask(sq)),
                );
                assert_eq!(
                    LOOKUPS.bishop_moves(sq, occupancies),
                    sliding_attacks(PieceType::BISHOP, sq, occupancies & LOOKUPS.bishop_mask(sq)),
                );
            }
        }
    }

    #[test]
    fn queen_moves_are_rook_or_bishop_moves() {
        let occupancies = Bitboard(0x00ff_0000_1234_ff00);
        for square in 0..Square::COUNT {
            let sq = Square(square as u8);
            assert_eq!(
                LOOKUPS.queen_moves(sq, occupancies),
                LOOKUPS.rook_moves(sq, occupancies) | LOOKUPS.bishop_moves(sq, occupancies),
            );
        }
    }
}
