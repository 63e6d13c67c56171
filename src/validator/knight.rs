use super::{baseline, MoveValidator, ValidationMode};
use crate::board::Board;
use crate::move_outcome::MoveOutcome;
use crate::piece::PieceKind;
use crate::position::Position;

pub struct KnightValidator;

impl MoveValidator for KnightValidator {
    fn kind() -> PieceKind {
        PieceKind::Knight
    }

    fn is_allowed(
        board: &Board,
        from: Position,
        to: Position,
        mode: ValidationMode,
    ) -> MoveOutcome {
        if !baseline(board, from, to, mode) {
            return MoveOutcome::NotAllowed;
        }
        match from.delta(to) {
            (rows, columns) if (rows.abs(), columns.abs()) == (1, 2) => MoveOutcome::Allowed,
            (rows, columns) if (rows.abs(), columns.abs()) == (2, 1) => MoveOutcome::Allowed,
            _ => MoveOutcome::NotAllowed,
        }
    }
}

#[test]
fn knight_jumps() {
    let board = Board::default();
    let b1 = Position::new(7, 1);
    let jump = |row, column, mode| {
        KnightValidator::is_allowed(&board, b1, Position::new(row, column), mode)
    };
    let m = ValidationMode::MOVE;
    assert_eq!(jump(5, 0, m), MoveOutcome::Allowed);
    assert_eq!(jump(5, 2, m), MoveOutcome::Allowed);
    // own pawn on d2
    assert_eq!(jump(6, 3, m), MoveOutcome::NotAllowed);
    assert_eq!(jump(6, 3, ValidationMode::ATTACK_PROBE), MoveOutcome::Allowed);
    assert_eq!(jump(5, 1, m), MoveOutcome::NotAllowed);
    assert_eq!(jump(4, 2, m), MoveOutcome::NotAllowed);
}
