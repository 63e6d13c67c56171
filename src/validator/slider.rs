use super::{baseline, MoveValidator, ValidationMode};
use crate::board::Board;
use crate::move_outcome::MoveOutcome;
use crate::piece::PieceKind;
use crate::position::Position;

pub struct RookValidator;
pub struct BishopValidator;
pub struct QueenValidator;

/// Walk from `from` towards `to` one square at a time and make sure nothing stands in between.
///
/// While probing for attacks the enemy king does not block: the square behind it is still
/// attacked, otherwise the king could step back along the ray it is being checked on.  Our own
/// king blocks like any other piece.
fn path_is_clear(board: &Board, from: Position, to: Position, mode: ValidationMode) -> bool {
    let mover = board.piece_on(from).map(|p| p.color());
    let (rows, columns) = from.delta(to);
    let (row_step, column_step) = (rows.signum(), columns.signum());

    let mut current = match from.offset(row_step, column_step) {
        Some(p) => p,
        None => return false,
    };
    while current != to {
        match board.piece_on(current) {
            None => {}
            Some(p)
                if mode.attack_probe
                    && p.kind() == PieceKind::King
                    && Some(p.color()) != mover => {}
            Some(_) => return false,
        }
        current = match current.offset(row_step, column_step) {
            Some(p) => p,
            None => return false,
        };
    }
    true
}

impl MoveValidator for RookValidator {
    fn kind() -> PieceKind {
        PieceKind::Rook
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
        if from.row() != to.row() && from.column() != to.column() {
            return MoveOutcome::NotAllowed;
        }
        if path_is_clear(board, from, to, mode) {
            MoveOutcome::Allowed
        } else {
            MoveOutcome::NotAllowed
        }
    }
}

impl MoveValidator for BishopValidator {
    fn kind() -> PieceKind {
        PieceKind::Bishop
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
        let (rows, columns) = from.delta(to);
        if rows.abs() != columns.abs() {
            return MoveOutcome::NotAllowed;
        }
        if path_is_clear(board, from, to, mode) {
            MoveOutcome::Allowed
        } else {
            MoveOutcome::NotAllowed
        }
    }
}

impl MoveValidator for QueenValidator {
    fn kind() -> PieceKind {
        PieceKind::Queen
    }

    /// A queen is a rook or a bishop.  Both can never apply to the same pair of squares.
    fn is_allowed(
        board: &Board,
        from: Position,
        to: Position,
        mode: ValidationMode,
    ) -> MoveOutcome {
        match RookValidator::is_allowed(board, from, to, mode) {
            MoveOutcome::Allowed => MoveOutcome::Allowed,
            _ => BishopValidator::is_allowed(board, from, to, mode),
        }
    }
}
