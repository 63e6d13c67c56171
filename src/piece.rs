use crate::color::PieceColor;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represent a chess piece kind as a very simple enum
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    Pawn,
}

/// How many piece kinds are there?
pub const NUM_PIECES: usize = 6;

/// An array representing each piece kind.
pub const ALL_PIECES: [PieceKind; NUM_PIECES] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Pawn,
];

/// How many ways can I promote?
pub const NUM_PROMOTION_PIECES: usize = 4;

/// What pieces can I promote to, best first?
pub const PROMOTION_PIECES: [PieceKind; NUM_PROMOTION_PIECES] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl PieceKind {
    /// Convert the `PieceKind` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Conventional material value.  The king is priceless.
    ///
    /// The rules engine itself never looks at these.
    ///
    /// ```
    /// use chess_rules::PieceKind;
    ///
    /// assert_eq!(PieceKind::Queen.value(), 9);
    /// assert!(PieceKind::King.value() > PieceKind::Queen.value());
    /// ```
    pub fn value(&self) -> u32 {
        match *self {
            PieceKind::King => u32::MAX,
            PieceKind::Queen => 9,
            PieceKind::Rook => 5,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 3,
            PieceKind::Pawn => 1,
        }
    }

    /// Do I move along rays that other pieces can block?
    #[inline]
    pub fn is_slider(&self) -> bool {
        match *self {
            PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen => true,
            _ => false,
        }
    }

    /// Convert a piece with a color to a FEN letter.  White is upper case.
    pub fn to_char(&self, color: PieceColor) -> char {
        let piece = match *self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        if color == PieceColor::White {
            piece.to_ascii_uppercase()
        } else {
            piece
        }
    }
}

/// A piece standing on the board.  Pieces are never mutated, only replaced or cleared.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BoardPiece {
    kind: PieceKind,
    color: PieceColor,
}

impl BoardPiece {
    /// Create a piece of a particular kind and color.
    #[inline]
    pub fn new(kind: PieceKind, color: PieceColor) -> BoardPiece {
        BoardPiece { kind, color }
    }

    /// Create a white piece.
    #[inline]
    pub fn white(kind: PieceKind) -> BoardPiece {
        BoardPiece::new(kind, PieceColor::White)
    }

    /// Create a black piece.
    #[inline]
    pub fn black(kind: PieceKind) -> BoardPiece {
        BoardPiece::new(kind, PieceColor::Black)
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> PieceColor {
        self.color
    }

    #[inline]
    pub fn is(&self, kind: PieceKind, color: PieceColor) -> bool {
        self.kind == kind && self.color == color
    }

    /// Parse a FEN letter.  Upper case is white, lower case is black.
    pub fn from_char(c: char) -> Option<BoardPiece> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Some(BoardPiece::new(kind, color))
    }

    /// The four pieces a pawn of `color` may promote to, queen first.
    pub fn promotion_options(color: PieceColor) -> Vec<BoardPiece> {
        PROMOTION_PIECES
            .iter()
            .map(|kind| BoardPiece::new(*kind, color))
            .collect()
    }
}

impl fmt::Display for BoardPiece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.to_char(self.color))
    }
}
