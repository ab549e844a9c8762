use std::{
    fmt::Display,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
    str::FromStr,
};

use miette::Context;

use crate::consts::{FILE_A, FILE_H, FILE_MASKS};

/// Set of squares, one bit per square. Bit `n` is [`Square`] index `n`.
#[derive(Debug, Default, Hash, PartialEq, Eq, PartialOrd, Clone, Copy)]
#[repr(transparent)]
pub struct BitBoard(pub u64);

impl BitAndAssign for BitBoard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl BitOrAssign for BitBoard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl BitOr for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl Not for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl BitBoard {
    pub const EMPTY: BitBoard = BitBoard(0);

    const NOT_FILE_A: u64 = !FILE_MASKS[FILE_A];
    const NOT_FILE_H: u64 = !FILE_MASKS[FILE_H];

    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.index())
    }

    #[inline(always)]
    pub const fn pop_count(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline(always)]
    pub const fn iter_bits(&self) -> BitBoardIterator {
        BitBoardIterator { remaining: self.0 }
    }

    #[inline(always)]
    pub const fn or(self, rhs: Self) -> Self {
        BitBoard(self.0 | rhs.0)
    }

    #[inline(always)]
    pub const fn contains_square(&self, index: usize) -> bool {
        (self.0 & (1 << index)) != 0
    }

    #[inline(always)]
    pub const fn north(self) -> Self {
        BitBoard(self.0 << 8)
    }

    #[inline(always)]
    pub const fn south(self) -> Self {
        BitBoard(self.0 >> 8)
    }

    /// Shifts every square one file towards H. Squares on the H file fall off the board.
    #[inline(always)]
    pub const fn east(self) -> Self {
        BitBoard((self.0 << 1) & Self::NOT_FILE_A)
    }

    /// Shifts every square one file towards A. Squares on the A file fall off the board.
    #[inline(always)]
    pub const fn west(self) -> Self {
        BitBoard((self.0 >> 1) & Self::NOT_FILE_H)
    }

    /// All squares one king step away from any member of the set.
    /// Members are only included when they neighbour another member.
    #[inline(always)]
    pub const fn king_moves(self) -> Self {
        let vertical = self.north().or(self.south());
        let row = self.or(vertical);
        vertical.or(row.east()).or(row.west())
    }
}

/// Iterator that yields each set bit position in a BitBoard
pub struct BitBoardIterator {
    remaining: u64,
}

impl Iterator for BitBoardIterator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.remaining.trailing_zeros() as usize;
        self.remaining &= self.remaining - 1; // Clear the least significant bit
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.remaining.count_ones() as usize;
        (exact, Some(exact))
    }
}

impl ExactSizeIterator for BitBoardIterator {
    fn len(&self) -> usize {
        self.remaining.count_ones() as usize
    }
}

#[derive(Default, Debug, Hash, PartialEq, Eq, PartialOrd, Clone, Copy)]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

impl FromStr for Side {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Side::White),
            "b" | "black" => Ok(Side::Black),
            _ => Err(miette::miette!(
                "Unknown side to move '{s}'. Expected one of: w, white, b, black"
            )),
        }
    }
}

impl Side {
    pub const SIDES: [Side; 2] = [Side::White, Side::Black];

    pub const fn flip(&self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub const fn index(&self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
}

/// Represents a single square on the board.
/// # Representation
/// ```text
///  A8, B8, C8, D8, E8, F8, G8, H8,  <- bit 63
///  A7, B7, C7, D7, E7, F7, G7, H7,
///  A6, B6, C6, D6, E6, F6, G6, H6,
///  A5, B5, C5, D5, E5, F5, G5, H5,
///  A4, B4, C4, D4, E4, F4, G4, H4,
///  A3, B3, C3, D3, E3, F3, G3, H3,
///  A2, B2, C2, D2, E2, F2, G2, H2,
///  A1, B1, C1, D1, E1, F1, G1, H1,  <- bit 7
///  ^(bit 0)
///```
#[derive(Default, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[repr(transparent)]
pub struct Square(usize);

impl Square {
    /// Returns a Square from a given File and Rank.
    /// Will return None if either File or Rank are out of bounds.
    #[inline(always)]
    pub const fn from_coords(file: usize, rank: usize) -> Option<Self> {
        if file < 8 && rank < 8 {
            return Some(Square(rank * 8 + file));
        }
        None
    }

    /// Zero indexed, A file is 0
    #[inline(always)]
    pub const fn file(&self) -> usize {
        self.0 % 8
    }

    /// Zero indexed, first rank is 0
    #[inline(always)]
    pub const fn rank(&self) -> usize {
        self.0 / 8
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Reflects the square across the line between the D and E files.
    #[inline(always)]
    pub const fn mirror(&self) -> Self {
        Self(self.0 ^ 7)
    }

    /// Square directly in front of this one from white's point of view.
    /// Callers guarantee the square is not on the eighth rank.
    #[inline(always)]
    pub const fn up(&self) -> Self {
        Self(self.0 + 8)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl From<usize> for Square {
    fn from(value: usize) -> Self {
        debug_assert!(value < 64, "square index out of range: {value}");
        Self(value)
    }
}

impl FromStr for Square {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        miette::ensure!(
            s.len() == 2,
            "Square needs 1 Letter and 1 Number to construct, got '{s}'"
        );
        let s = s.to_ascii_uppercase();
        let mut iter = s.chars();
        let letter = iter.next().context("1st char should be letter")?;
        let num = iter.next().context("2nd char should be number")?;
        miette::ensure!(
            ('A'..='H').contains(&letter),
            "given file '{letter}' isn't valid. Valid file = ['a'..='h']"
        );
        miette::ensure!(
            ('1'..='8').contains(&num),
            "given rank '{num}' isn't valid. Valid rank = ['1'..='8']"
        );
        let file = (letter as u8 - b'A') as usize;
        let rank = (num as u8 - b'1') as usize;

        Ok(Self(8 * rank + file))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = self.file() as u8 + b'A';
        let rank = self.rank() as u8 + b'1';
        write!(f, "{}{}", file as char, rank as char)
    }
}
