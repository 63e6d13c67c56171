use super::{baseline, MoveValidator, ValidationMode};
use crate::board::Board;
use crate::castle_rights::{ALL_CASTLE_SIDES, KING_COLUMN};
use crate::color::PieceColor;
use crate::move_outcome::MoveOutcome;
use crate::piece::{BoardPiece, PieceKind};
use crate::position::Position;

pub struct KingValidator;

impl KingValidator {
    /// Can the king of `color` castle from `from` to `to`?
    ///
    /// We can do so iff:
    ///  * neither the king nor the rook on that side has ever moved, and the rook is still there.
    ///  * the squares between the king and the rook are empty.
    ///  * no enemy piece attacks a square the king walks over, including where it lands.
    ///
    /// The caller has already made sure the king is not currently in check.
    fn castling(board: &Board, color: PieceColor, from: Position, to: Position) -> MoveOutcome {
        let row = color.back_row();
        if from != Position::new(row, KING_COLUMN) {
            return MoveOutcome::NotAllowed;
        }
        let side = match ALL_CASTLE_SIDES
            .iter()
            .find(|side| side.king_destination(color) == to)
        {
            Some(side) => *side,
            None => return MoveOutcome::NotAllowed,
        };
        if !board.castle_flags(color).may_castle(side) {
            return MoveOutcome::NotAllowed;
        }
        let rook = BoardPiece::new(PieceKind::Rook, color);
        if board.piece_on(side.rook_origin(color)) != Some(rook) {
            return MoveOutcome::NotAllowed;
        }
        if side
            .between_columns()
            .any(|column| board.piece_on(Position::new(row, column)).is_some())
        {
            return MoveOutcome::NotAllowed;
        }

        let mut walked = from;
        while walked != to {
            walked = match walked.offset(0, side.step()) {
                Some(p) => p,
                None => return MoveOutcome::NotAllowed,
            };
            if board.is_check(walked) {
                return MoveOutcome::NotAllowed;
            }
        }

        MoveOutcome::castling(side)
    }
}

impl MoveValidator for KingValidator {
    fn kind() -> PieceKind {
        PieceKind::King
    }

    fn is_allowed(
        board: &Board,
        from: Position,
        to: Position,
        mode: ValidationMode,
    ) -> MoveOutcome {
        if !baseline(board, from, to, mode) || from == to {
            return MoveOutcome::NotAllowed;
        }
        let king = match board.piece_on(from) {
            Some(p) => p,
            None => return MoveOutcome::NotAllowed,
        };

        // Only the side to move has to worry about walking into check.
        let verify = king.color() == board.current() && !mode.bypass_check_safety;

        let (rows, columns) = from.delta(to);
        if rows.abs() <= 1 && columns.abs() <= 1 {
            if verify && board.is_check(to) {
                MoveOutcome::NotAllowed
            } else {
                MoveOutcome::Allowed
            }
        } else if verify && !mode.attack_probe && !board.is_current_king_in_check() {
            KingValidator::castling(board, king.color(), from, to)
        } else {
            MoveOutcome::NotAllowed
        }
    }
}
