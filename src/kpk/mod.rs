//! King and pawn versus king.
//!
//! The full table is computed once by retrograde analysis and then probed in constant time.
//! Only positions with the pawn on files A to D are stored, everything else is mirrored.

pub mod builder;
pub mod geometry;
pub mod index;
pub mod stats;

use std::sync::LazyLock;

use crate::prelude::*;
use builder::Builder;
use geometry::{black_in_check, conflict, in_pawn_zone, white_in_check};
use index::{TABLE_SIZE, TableIndex, normalise};

/// Process wide table, built on first use.
pub static KPK_TABLE: LazyLock<KpkTable> = LazyLock::new(KpkTable::build);

/// Result of a probe, always from white's point of view. White can never lose this ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Draw,
}

impl Outcome {
    /// Interprets the signed value returned by [`probe`].
    pub const fn from_probe(value: i32) -> Self {
        if value == 0 { Outcome::Draw } else { Outcome::Win }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "White wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct KpkTable {
    /// [`Side::White`]: black king squares where white to move wins.
    /// [`Side::Black`]: black king squares where black to move loses.
    tables: [[BitBoard; TABLE_SIZE]; NUM_SIDES],
    passes: usize,
}

impl std::fmt::Debug for KpkTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KpkTable")
            .field("passes", &self.passes)
            .field("byte_size", &self.byte_size())
            .finish_non_exhaustive()
    }
}

impl KpkTable {
    /// Runs the full retrograde analysis. Takes a few milliseconds in release builds.
    pub fn build() -> Self {
        let mut builder = Builder::new();
        builder.run();
        let table = builder.finish();
        info!("KPK table ready, {} bytes", table.byte_size());
        table
    }

    pub(crate) fn from_parts(tables: [[BitBoard; TABLE_SIZE]; NUM_SIDES], passes: usize) -> Self {
        Self { tables, passes }
    }

    pub const fn byte_size(&self) -> usize {
        std::mem::size_of::<[[BitBoard; TABLE_SIZE]; NUM_SIDES]>()
    }

    /// Number of white/black pass pairs the build needed, including the final quiet one.
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// Stored black king squares for an unmirrored key.
    #[inline(always)]
    pub fn entry(&self, side: Side, ix: TableIndex) -> BitBoard {
        self.tables[side.index()][ix.raw()]
    }

    /// `1` if white to move wins, `-1` if black to move loses, `0` otherwise.
    ///
    /// Positions with overlapping pieces or a pawn outside ranks 2 to 7 are not rejected,
    /// they just read whatever is stored and usually come back as `0`.
    /// Use [`probe_checked`] to tell those apart from real draws.
    #[inline(always)]
    pub fn probe(&self, side: Side, white_king: Square, white_pawn: Square, black_king: Square) -> i32 {
        let (white_king, white_pawn, black_king) = normalise(white_king, white_pawn, black_king);
        let ix = TableIndex::new(white_king, white_pawn);
        let bit = self.entry(side, ix).contains_square(black_king.index()) as i32;
        match side {
            Side::White => bit,
            Side::Black => -bit,
        }
    }
}

/// Forces the build and returns the size of both tables in bytes.
pub fn generate() -> usize {
    LazyLock::force(&KPK_TABLE).byte_size()
}

/// Probes the process wide table, building it first if needed. See [`KpkTable::probe`].
#[inline(always)]
pub fn probe(side: Side, white_king: Square, white_pawn: Square, black_king: Square) -> i32 {
    KPK_TABLE.probe(side, white_king, white_pawn, black_king)
}

/// Like [`probe`], but refuses positions that cannot occur instead of reporting them as drawn.
pub fn probe_checked(
    side: Side,
    white_king: Square,
    white_pawn: Square,
    black_king: Square,
) -> miette::Result<Outcome> {
    miette::ensure!(
        !conflict(white_king, white_pawn, black_king),
        "Two pieces share a square: K{white_king} P{white_pawn} k{black_king}"
    );
    miette::ensure!(
        in_pawn_zone(white_pawn),
        "Pawn on {white_pawn} is outside ranks 2 to 7"
    );
    let side_not_to_move_in_check = match side {
        Side::White => black_in_check(white_king, white_pawn, black_king),
        Side::Black => white_in_check(white_king, white_pawn, black_king),
    };
    miette::ensure!(
        !side_not_to_move_in_check,
        "{} to move, but {} is in check",
        side,
        side.flip()
    );

    Ok(Outcome::from_probe(probe(
        side, white_king, white_pawn, black_king,
    )))
}

/// Recounts the table against the published Edwards totals.
pub fn self_check() -> bool {
    stats::TableStats::collect(&KPK_TABLE).matches(&stats::ReferenceCounts::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    fn probe_named(side: Side, white_king: &str, white_pawn: &str, black_king: &str) -> i32 {
        probe(side, sq(white_king), sq(white_pawn), sq(black_king))
    }

    #[test]
    fn test_self_check() {
        assert!(self_check(), "KPK table does not match the reference counts");
    }

    #[test]
    fn test_generate_size() {
        assert_eq!(generate(), 2 * 64 * 32 * 8);
    }

    #[test]
    fn test_builds_are_identical() {
        let first = KpkTable::build();
        let second = KpkTable::build();
        assert!(first == second, "two builds produced different tables");
        assert!(first == *KPK_TABLE);
    }

    #[test]
    fn test_opposition() {
        // Key squares reached, whoever moves
        assert_eq!(probe_named(Side::White, "e6", "e5", "e8"), 1);
        assert_eq!(probe_named(Side::Black, "e6", "e5", "e8"), -1);
        assert_eq!(probe_named(Side::White, "d6", "e5", "e8"), 1);

        // King in front of the pawn, only wins when black has to give way
        assert_eq!(probe_named(Side::Black, "e5", "e4", "e7"), -1);
        assert_eq!(probe_named(Side::White, "e5", "e4", "e7"), 0);

        assert_eq!(probe_named(Side::White, "e3", "e2", "e5"), 0);
        assert_eq!(probe_named(Side::Black, "e3", "e2", "e5"), -1);
    }

    #[test]
    fn test_defender_in_front_draws() {
        assert_eq!(probe_named(Side::White, "e1", "e4", "e8"), 0);
        assert_eq!(probe_named(Side::White, "d1", "d2", "d7"), 0);
    }

    #[test]
    fn test_rook_pawn_draws() {
        assert_eq!(probe_named(Side::Black, "a1", "a2", "a8"), 0);
        assert_eq!(probe_named(Side::White, "a1", "a2", "a8"), 0);
        assert_eq!(probe_named(Side::White, "a6", "a5", "a8"), 0);
        assert_eq!(probe_named(Side::Black, "b6", "a5", "a8"), 0);
    }

    #[test]
    fn test_king_controls_promotion_square() {
        assert_eq!(probe_named(Side::White, "d7", "e6", "h1"), 1);
        assert_eq!(probe_named(Side::White, "f7", "e5", "a1"), 1);
        assert_eq!(probe_named(Side::White, "c6", "c5", "c8"), 1);
        assert_eq!(probe_named(Side::White, "g6", "g5", "g8"), 1);
    }

    #[test]
    fn test_double_push_outruns_king() {
        assert_eq!(probe_named(Side::White, "e1", "a2", "g4"), 1);
        assert_eq!(probe_named(Side::White, "d1", "h2", "b4"), 1);
    }

    #[test]
    fn test_mirror_symmetry() {
        for side in Side::SIDES {
            for ix in TableIndex::all() {
                let (white_king, white_pawn) = (ix.white_king(), ix.white_pawn());
                for black_king in Square::all() {
                    assert_eq!(
                        probe(side, white_king, white_pawn, black_king),
                        probe(side, white_king.mirror(), white_pawn.mirror(), black_king.mirror()),
                        "{side} K{white_king} P{white_pawn} k{black_king}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_probe_checked() {
        assert_eq!(
            probe_checked(Side::White, sq("e6"), sq("e5"), sq("e8")).unwrap(),
            Outcome::Win
        );
        assert_eq!(
            probe_checked(Side::White, sq("e1"), sq("e4"), sq("e8")).unwrap(),
            Outcome::Draw
        );
        assert!(probe_checked(Side::White, sq("e1"), sq("e1"), sq("e8")).is_err());
        assert!(probe_checked(Side::White, sq("e1"), sq("e8"), sq("a8")).is_err());
        // Black king attacked by the pawn with white to move
        assert!(probe_checked(Side::White, sq("a1"), sq("e4"), sq("d5")).is_err());
        assert!(probe_checked(Side::Black, sq("a1"), sq("e4"), sq("d5")).is_ok());
        assert!(probe_checked(Side::Black, sq("e4"), sq("a2"), sq("e5")).is_err());
    }

    #[test]
    fn test_outcome_from_probe() {
        assert_eq!(Outcome::from_probe(1), Outcome::Win);
        assert_eq!(Outcome::from_probe(-1), Outcome::Win);
        assert_eq!(Outcome::from_probe(0), Outcome::Draw);
        assert_eq!(Outcome::Win.to_string(), "White wins");
    }
}
