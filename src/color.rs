use std::fmt;
use std::ops::Not;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represent the color of a piece, and therefore the side it plays for.
#[derive(PartialOrd, PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum PieceColor {
    White,
    Black,
}

/// How many colors are there?
pub const NUM_COLORS: usize = 2;
/// List all colors
pub const ALL_COLORS: [PieceColor; NUM_COLORS] = [PieceColor::White, PieceColor::Black];

impl PieceColor {
    /// Convert the `PieceColor` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// The row holding this colors king and rooks at the start of the game.
    ///
    /// Row 0 is the eighth rank, so White starts at the bottom of the grid.
    #[inline]
    pub fn back_row(&self) -> u8 {
        match *self {
            PieceColor::White => 7,
            PieceColor::Black => 0,
        }
    }

    /// The row this colors pawns start on, and the only row they may double step from.
    #[inline]
    pub fn pawn_row(&self) -> u8 {
        match *self {
            PieceColor::White => 6,
            PieceColor::Black => 1,
        }
    }

    /// The row a pawn of this color promotes on.
    #[inline]
    pub fn promotion_row(&self) -> u8 {
        (!*self).back_row()
    }

    /// The row delta of one pawn step "forward" for this color.
    #[inline]
    pub fn forward(&self) -> i8 {
        match *self {
            PieceColor::White => -1,
            PieceColor::Black => 1,
        }
    }
}

impl Not for PieceColor {
    type Output = PieceColor;

    /// Get the other color.
    #[inline]
    fn not(self) -> PieceColor {
        if self == PieceColor::White {
            PieceColor::Black
        } else {
            PieceColor::White
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PieceColor::White => write!(f, "White"),
            PieceColor::Black => write!(f, "Black"),
        }
    }
}

#[test]
fn rows_mirror_each_other() {
    for color in ALL_COLORS.iter() {
        assert_eq!(color.back_row() + (!*color).back_row(), 7);
        assert_eq!(color.pawn_row() + (!*color).pawn_row(), 7);
        assert_eq!(
            color.pawn_row() as i8 - color.forward(),
            color.back_row() as i8
        );
    }
    assert_eq!(PieceColor::White.promotion_row(), 0);
    assert_eq!(PieceColor::Black.promotion_row(), 7);
}
