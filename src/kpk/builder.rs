use std::time::Instant;

use super::{
    KpkTable,
    geometry::{in_pawn_zone, pawn_attacks, taxi},
    index::{TABLE_SIZE, TableIndex},
};
use crate::prelude::*;

/// Retrograde solver for the two KPK tables.
///
/// For every [`TableIndex`] the white table holds the black king squares where white to move
/// wins, the black table the squares where black to move loses. Both start empty except for
/// promoted pawns, and [`Builder::run`] alternates a white pass and a black pass until the
/// black table stops changing.
pub struct Builder {
    tables: [[BitBoard; TABLE_SIZE]; NUM_SIDES],
    /// Black king squares that are legal with white to move. Not part of the result.
    legal: [BitBoard; TABLE_SIZE],
    /// Indices with the pawn on ranks 2 to 7 and apart from the white king.
    active: Vec<TableIndex>,
    passes: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        let mut builder = Self {
            tables: [[BitBoard::EMPTY; TABLE_SIZE]; NUM_SIDES],
            legal: [BitBoard::EMPTY; TABLE_SIZE],
            active: Vec::with_capacity(TABLE_SIZE),
            passes: 0,
        };
        builder.seed();
        builder
    }

    fn seed(&mut self) {
        for ix in TableIndex::all() {
            let white_king = ix.white_king();
            let white_pawn = ix.white_pawn();
            if white_king == white_pawn {
                continue;
            }

            let king = BitBoard::from_square(white_king);
            let pawn = BitBoard::from_square(white_pawn);

            // Pawn has promoted. Black loses unless the king can take the new queen.
            if white_pawn.rank() == RANK_8 {
                let mut lost = !king.king_moves() & !king & !pawn;
                if taxi(white_king, white_pawn) > 1 {
                    lost &= !pawn.king_moves();
                }
                self.tables[Side::Black.index()][ix.raw()] = lost;
            }

            if in_pawn_zone(white_pawn) {
                self.legal[ix.raw()] = !king.king_moves() & !pawn_attacks(white_pawn);
                self.active.push(ix);
            }
        }
    }

    /// Recomputes every white to move entry from the current black table.
    pub fn white_pass(&mut self) {
        let [white, black] = &mut self.tables;

        for &ix in &self.active {
            let white_king = ix.white_king();
            let white_pawn = ix.white_pawn();
            let mut won = BitBoard::EMPTY;

            for to in BitBoard::from_square(white_king).king_moves().iter_bits() {
                let to = Square::from(to);
                if to == white_pawn {
                    continue;
                }
                // Black king may not stand next to the king's new square
                won |= black[ix.with_king(to).raw()] & !BitBoard::from_square(to).king_moves();
            }

            let push = white_pawn.up();
            if push != white_king {
                let single = BitBoard::from_square(push);
                won |= black[ix.advance_pawn(1).raw()] & !single;

                let double = push.up();
                if white_pawn.rank() == RANK_2 && double != white_king {
                    won |= black[ix.advance_pawn(2).raw()] & !single & !BitBoard::from_square(double);
                }
            }

            white[ix.raw()] = won & self.legal[ix.raw()] & !BitBoard::from_square(white_pawn);
        }
    }

    /// Recomputes every black to move entry from the white table.
    /// Returns the number of bits that changed.
    pub fn black_pass(&mut self) -> u32 {
        let [white, black] = &mut self.tables;
        let mut changed = 0;

        for &ix in &self.active {
            let legal = self.legal[ix.raw()];
            let has_moves = legal.king_moves();
            let can_draw = (legal & !white[ix.raw()]).king_moves();
            // Stalemate is a draw, so a lost square needs at least one move
            let lost = has_moves & !can_draw;

            changed += BitBoard(black[ix.raw()].0 ^ lost.0).pop_count();
            black[ix.raw()] = lost;
        }

        changed
    }

    /// Runs passes until the black table is stable.
    #[instrument(skip_all)]
    pub fn run(&mut self) {
        let start = Instant::now();
        loop {
            self.passes += 1;
            self.white_pass();
            let changed = self.black_pass();
            debug!("pass {}: {changed} black to move bits changed", self.passes);
            if changed == 0 {
                break;
            }
        }
        info!(
            "KPK tables converged after {} passes in {:?}",
            self.passes,
            start.elapsed()
        );
    }

    pub const fn passes(&self) -> usize {
        self.passes
    }

    pub fn finish(self) -> KpkTable {
        KpkTable::from_parts(self.tables, self.passes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    #[test]
    fn test_promotion_seed() {
        let builder = Builder::new();
        let black = &builder.tables[Side::Black.index()];

        // Queen on a8 defended by the king on b7
        let defended = black[TableIndex::new(sq("b7"), sq("a8")).raw()];
        assert!(!defended.contains_square(sq("a7").index()), "king next to white king");
        assert!(!defended.contains_square(sq("b7").index()));
        assert!(!defended.contains_square(sq("a8").index()));
        assert!(defended.contains_square(sq("h1").index()));

        // Undefended queen on c8 can be taken from d7
        let hanging = black[TableIndex::new(sq("e1"), sq("c8")).raw()];
        assert!(!hanging.contains_square(sq("d7").index()));
        assert!(hanging.contains_square(sq("e8").index()));
        assert!(!hanging.contains_square(sq("e2").index()));
    }

    #[test]
    fn test_seed_legal_squares() {
        let builder = Builder::new();
        let ix = TableIndex::new(sq("e1"), sq("b4"));
        let legal = builder.legal[ix.raw()];
        assert!(!legal.contains_square(sq("a5").index()));
        assert!(!legal.contains_square(sq("c5").index()));
        assert!(!legal.contains_square(sq("f2").index()));
        assert!(legal.contains_square(sq("b5").index()));
        // Pawn itself may be captured
        assert!(legal.contains_square(sq("b4").index()));

        assert!(builder.active.iter().all(|ix| in_pawn_zone(ix.white_pawn())));
        assert_eq!(builder.active.len(), 64 * 24 - 24);
    }

    #[test]
    fn test_out_of_zone_entries_are_untouched() {
        let mut builder = Builder::new();
        let seeded = builder.tables[Side::Black.index()][TableIndex::new(sq("b7"), sq("a8")).raw()];
        builder.run();
        let after = builder.tables[Side::Black.index()][TableIndex::new(sq("b7"), sq("a8")).raw()];
        assert_eq!(seeded, after);
        assert_eq!(
            builder.tables[Side::White.index()][TableIndex::new(sq("e1"), sq("c1")).raw()],
            BitBoard::EMPTY
        );
    }

    #[test]
    fn test_fixed_point_is_stable() {
        let mut builder = Builder::new();
        builder.run();
        let passes = builder.passes();
        assert!(passes > 1 && passes < 64, "unexpected pass count {passes}");

        let before = builder.tables;
        builder.white_pass();
        assert_eq!(builder.black_pass(), 0);
        assert_eq!(before, builder.tables);
    }

    #[test]
    fn test_double_push_is_considered() {
        let mut builder = Builder::new();
        builder.run();
        // Only a2-a4 keeps the black king on g4 outside the pawn's square
        let ix = TableIndex::new(sq("e1"), sq("a2"));
        assert!(builder.tables[Side::White.index()][ix.raw()].contains_square(sq("g4").index()));
    }
}
