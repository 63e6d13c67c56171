use crate::castle_rights::CastleSide;
use crate::piece::BoardPiece;
use crate::position::Position;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Which pawn is taking which en passant.
///
/// The captured pawn never stands on the destination square: it sits one row behind it, on the
/// row the capturing pawn started from.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum EnPassantDirection {
    WhiteTakesBlack,
    BlackTakesWhite,
}

impl EnPassantDirection {
    /// Where is the pawn that gets removed, given where the capturing pawn lands?
    pub fn captured_position(&self, dest: Position) -> Position {
        match *self {
            EnPassantDirection::WhiteTakesBlack => Position::new(dest.row() + 1, dest.column()),
            EnPassantDirection::BlackTakesWhite => Position::new(dest.row() - 1, dest.column()),
        }
    }
}

/// What a move validator decided about a proposed move.
///
/// Every positive variant needs different handling when the move is executed, so callers match
/// on this instead of comparing against a flat list of flags.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MoveOutcome {
    NotAllowed,
    /// A plain move or capture.
    Allowed,
    /// A pawn double step; the pawn becomes capturable en passant for one ply.
    AllowedEnPassantSetup,
    AllowedEnPassantCapture(EnPassantDirection),
    SmallCastling,
    BigCastling,
    /// A pawn reaches the last row and must be replaced through `Board::promote`.
    PromotionPending,
}

impl MoveOutcome {
    /// Is this any kind of yes?
    #[inline]
    pub fn is_allowed(&self) -> bool {
        *self != MoveOutcome::NotAllowed
    }

    /// The castling side, if this is a castle.
    pub fn castle_side(&self) -> Option<CastleSide> {
        match *self {
            MoveOutcome::SmallCastling => Some(CastleSide::KingSide),
            MoveOutcome::BigCastling => Some(CastleSide::QueenSide),
            _ => None,
        }
    }

    /// The castling outcome for a side.
    pub fn castling(side: CastleSide) -> MoveOutcome {
        match side {
            CastleSide::KingSide => MoveOutcome::SmallCastling,
            CastleSide::QueenSide => MoveOutcome::BigCastling,
        }
    }
}

/// The result of a successful `Board::make_move`.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct MoveOutput {
    /// Did the move take a piece?
    pub capture: bool,
    /// Set only when a pawn reached the last row.  The caller must pick one and pass it to
    /// `Board::promote`.
    pub promotion_options: Option<Vec<BoardPiece>>,
}

impl MoveOutput {
    pub(crate) fn plain(capture: bool) -> MoveOutput {
        MoveOutput {
            capture,
            promotion_options: None,
        }
    }
}

#[test]
fn en_passant_victim_sits_behind_the_destination() {
    let dest = Position::new(2, 3);
    assert_eq!(
        EnPassantDirection::WhiteTakesBlack.captured_position(dest),
        Position::new(3, 3)
    );
    let dest = Position::new(5, 4);
    assert_eq!(
        EnPassantDirection::BlackTakesWhite.captured_position(dest),
        Position::new(4, 4)
    );
}
