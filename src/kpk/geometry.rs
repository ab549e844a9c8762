//! Board predicates for a white king, white pawn and black king.
//! Nothing here holds state, every function is a pure function of the three squares.

use crate::prelude::*;

/// King distance between two squares, the larger of the file and rank distances.
#[inline(always)]
pub const fn taxi(a: Square, b: Square) -> usize {
    let files = a.file().abs_diff(b.file());
    let ranks = a.rank().abs_diff(b.rank());
    if files > ranks { files } else { ranks }
}

/// Squares a white pawn on `pawn` captures on. Empty for a pawn on the eighth rank.
#[inline(always)]
pub const fn pawn_attacks(pawn: Square) -> BitBoard {
    let front = BitBoard::from_square(pawn).north();
    front.east().or(front.west())
}

/// Kings stand next to each other, so black could take the white king.
/// Only happens with white to move in a position that cannot arise.
#[inline(always)]
pub const fn white_in_check(white_king: Square, _white_pawn: Square, black_king: Square) -> bool {
    taxi(white_king, black_king) == 1
}

#[inline(always)]
pub const fn black_in_check(white_king: Square, white_pawn: Square, black_king: Square) -> bool {
    taxi(white_king, black_king) == 1
        || pawn_attacks(white_pawn).contains_square(black_king.index())
}

/// Ranks two to seven. Pawns never stand on the first rank, and on the eighth they have promoted.
#[inline(always)]
pub const fn in_pawn_zone(square: Square) -> bool {
    square.rank() != RANK_1 && square.rank() != RANK_8
}

/// Two of the three pieces share a square.
#[inline(always)]
pub const fn conflict(white_king: Square, white_pawn: Square, black_king: Square) -> bool {
    let (king, pawn, enemy) = (white_king.index(), white_pawn.index(), black_king.index());
    king == pawn || pawn == enemy || king == enemy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    #[test]
    fn test_taxi() {
        assert_eq!(taxi(sq("e4"), sq("e4")), 0);
        assert_eq!(taxi(sq("e4"), sq("f5")), 1);
        assert_eq!(taxi(sq("a1"), sq("h8")), 7);
        assert_eq!(taxi(sq("a1"), sq("b7")), 6);
        assert_eq!(taxi(sq("h2"), sq("a3")), 7);
    }

    #[test]
    fn test_pawn_attacks_edges() {
        let a2 = pawn_attacks(sq("a2"));
        assert_eq!(a2, BitBoard::from_square(sq("b3")));

        let h5 = pawn_attacks(sq("h5"));
        assert_eq!(h5, BitBoard::from_square(sq("g6")));

        let e4 = pawn_attacks(sq("e4"));
        assert_eq!(e4, BitBoard::from_square(sq("d5")) | BitBoard::from_square(sq("f5")));

        assert_eq!(pawn_attacks(sq("c8")), BitBoard::EMPTY);
    }

    #[test]
    fn test_checks() {
        assert!(white_in_check(sq("e4"), sq("a2"), sq("e5")));
        assert!(!white_in_check(sq("e4"), sq("d4"), sq("c5")));

        // Pawn gives check, kings apart
        assert!(black_in_check(sq("a1"), sq("d4"), sq("e5")));
        assert!(black_in_check(sq("a1"), sq("d4"), sq("c5")));
        assert!(!black_in_check(sq("a1"), sq("d4"), sq("d5")));
        // Pawn on the A file has no western capture to wrap onto the H file
        assert!(!black_in_check(sq("e1"), sq("a4"), sq("h4")));
        assert!(black_in_check(sq("e4"), sq("a2"), sq("e5")));
    }

    #[test]
    fn test_zone_and_conflict() {
        assert!(!in_pawn_zone(sq("e1")));
        assert!(in_pawn_zone(sq("e2")));
        assert!(in_pawn_zone(sq("e7")));
        assert!(!in_pawn_zone(sq("e8")));

        assert!(conflict(sq("e1"), sq("e1"), sq("a8")));
        assert!(conflict(sq("e1"), sq("e2"), sq("e2")));
        assert!(conflict(sq("a8"), sq("e2"), sq("a8")));
        assert!(!conflict(sq("e1"), sq("e2"), sq("e8")));
    }

    #[test]
    fn test_conflict_in_const_context() {
        const E1: Square = match Square::from_coords(4, 0) {
            Some(square) => square,
            None => panic!(),
        };
        const E2: Square = E1.up();
        const CLASH: bool = conflict(E1, E2, E2);
        const APART: bool = conflict(E1, E2, E2.up().up());
        assert!(CLASH);
        assert!(!APART);
    }
}
