use crate::color::PieceColor;
use crate::position::Position;
use std::ops::RangeInclusive;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Which side of the board is a castle happening on?
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum CastleSide {
    /// Small castling, towards the h-file.
    KingSide,
    /// Big castling, towards the a-file.
    QueenSide,
}

/// Both castling sides.
pub const ALL_CASTLE_SIDES: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

/// The column every king starts on.
pub const KING_COLUMN: u8 = 4;

impl CastleSide {
    /// The column the rook for this side starts on.
    pub fn rook_column(&self) -> u8 {
        match *self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// Where does the king end up?
    pub fn king_destination(&self, color: PieceColor) -> Position {
        match *self {
            CastleSide::KingSide => Position::new(color.back_row(), 6),
            CastleSide::QueenSide => Position::new(color.back_row(), 2),
        }
    }

    /// Where does the rook end up?  Always next to the king, on the side it came from.
    pub fn rook_destination(&self, color: PieceColor) -> Position {
        match *self {
            CastleSide::KingSide => Position::new(color.back_row(), 5),
            CastleSide::QueenSide => Position::new(color.back_row(), 3),
        }
    }

    /// Where does the rook start?
    pub fn rook_origin(&self, color: PieceColor) -> Position {
        Position::new(color.back_row(), self.rook_column())
    }

    /// Which columns need to be empty, strictly between king and rook?
    pub fn between_columns(&self) -> RangeInclusive<u8> {
        match *self {
            CastleSide::KingSide => 5..=6,
            CastleSide::QueenSide => 1..=3,
        }
    }

    /// Which way does the king walk, one column at a time?
    pub fn step(&self) -> i8 {
        match *self {
            CastleSide::KingSide => 1,
            CastleSide::QueenSide => -1,
        }
    }
}

/// Has this colors king, or either of its rooks, ever moved?
///
/// Castling on a side needs both the king flag and the rook flag for that side to be clear.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CastleFlags {
    pub king_moved: bool,
    pub king_rook_moved: bool,
    pub queen_rook_moved: bool,
}

impl CastleFlags {
    /// Every piece has moved: no castling possible.
    pub const ALL_MOVED: CastleFlags = CastleFlags {
        king_moved: true,
        king_rook_moved: true,
        queen_rook_moved: true,
    };

    /// Has the rook for this side moved?
    pub fn rook_moved(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::KingSide => self.king_rook_moved,
            CastleSide::QueenSide => self.queen_rook_moved,
        }
    }

    /// Mark the rook for this side as moved.
    pub fn set_rook_moved(&mut self, side: CastleSide) {
        match side {
            CastleSide::KingSide => self.king_rook_moved = true,
            CastleSide::QueenSide => self.queen_rook_moved = true,
        }
    }

    /// Could I still castle to `side`, as far as the moved-flags are concerned?
    pub fn may_castle(&self, side: CastleSide) -> bool {
        !self.king_moved && !self.rook_moved(side)
    }

    /// Convert the flags to an FEN compatible string.
    ///
    /// ```
    /// use chess_rules::{CastleFlags, PieceColor};
    ///
    /// assert_eq!(CastleFlags::ALL_MOVED.to_string(PieceColor::White), "");
    /// assert_eq!(CastleFlags::default().to_string(PieceColor::Black), "kq");
    /// ```
    pub fn to_string(&self, color: PieceColor) -> String {
        let mut result = String::new();
        if self.may_castle(CastleSide::KingSide) {
            result.push('k');
        }
        if self.may_castle(CastleSide::QueenSide) {
            result.push('q');
        }

        if color == PieceColor::White {
            result.to_uppercase()
        } else {
            result
        }
    }

    /// Build flags from the letters present in a FEN castling field.
    pub fn from_fen(king_side: bool, queen_side: bool) -> CastleFlags {
        CastleFlags {
            king_moved: !king_side && !queen_side,
            king_rook_moved: !king_side,
            queen_rook_moved: !queen_side,
        }
    }
}

/// If `position` is the home corner of one of `color`'s rooks, which side is it?
pub fn rook_home_side(color: PieceColor, position: Position) -> Option<CastleSide> {
    if position.row() != color.back_row() {
        return None;
    }
    match position.column() {
        0 => Some(CastleSide::QueenSide),
        7 => Some(CastleSide::KingSide),
        _ => None,
    }
}
