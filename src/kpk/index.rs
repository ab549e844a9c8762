use crate::prelude::*;

/// Slots per side: 64 white king squares times 32 pawn squares on files A to D.
pub const TABLE_SIZE: usize = NUM_SQUARES * 32;

/// Position key for one side's table.
/// ```text
/// bit:  10 .. 5   4 3   2 1 0
///       wK square  file  rank
///                  (wP, A..D)
/// ```
/// The black king is not part of the key, it selects a bit in the stored [`BitBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TableIndex(usize);

impl TableIndex {
    /// Pawn must stand on files A to D, see [`normalise`].
    #[inline(always)]
    pub fn new(white_king: Square, white_pawn: Square) -> Self {
        debug_assert!(white_pawn.file() < 4, "pawn on {white_pawn} must be mirrored first");
        Self((white_king.index() << 5) | (white_pawn.file() << 3) | white_pawn.rank())
    }

    #[inline(always)]
    pub const fn raw(&self) -> usize {
        self.0
    }

    #[inline(always)]
    pub fn white_king(&self) -> Square {
        Square::from(self.0 >> 5)
    }

    #[inline(always)]
    pub fn white_pawn(&self) -> Square {
        Square::from(((self.0 & 7) << 3) | ((self.0 >> 3) & 3))
    }

    /// Same pawn, king moved to `king`.
    #[inline(always)]
    pub const fn with_king(&self, king: Square) -> Self {
        Self((self.0 & 31) | (king.index() << 5))
    }

    /// Same king, pawn pushed `ranks` forward. Callers keep the pawn on the board.
    #[inline(always)]
    pub const fn advance_pawn(&self, ranks: usize) -> Self {
        Self(self.0 + ranks)
    }

    pub fn all() -> impl Iterator<Item = TableIndex> {
        (0..TABLE_SIZE).map(TableIndex)
    }
}

/// Reflects all three pieces when the pawn is on files E to H, so the pawn ends up on A to D.
#[inline(always)]
pub fn normalise(
    white_king: Square,
    white_pawn: Square,
    black_king: Square,
) -> (Square, Square, Square) {
    if white_pawn.file() >= 4 {
        (white_king.mirror(), white_pawn.mirror(), black_king.mirror())
    } else {
        (white_king, white_pawn, black_king)
    }
}
