use super::{MoveValidator, ValidationMode};
use crate::board::Board;
use crate::color::PieceColor;
use crate::move_outcome::{EnPassantDirection, MoveOutcome};
use crate::piece::PieceKind;
use crate::position::Position;

pub struct PawnValidator;

impl MoveValidator for PawnValidator {
    fn kind() -> PieceKind {
        PieceKind::Pawn
    }

    /// Pawns have four ways to move, tried in this order:
    ///  1. two squares forward from the starting row, onto an empty square.
    ///  2. one square forward, onto an empty square.
    ///  3. one square diagonally forward, capturing an enemy piece.
    ///  4. one square diagonally forward onto an empty square, capturing en passant the pawn
    ///     beside it that just double stepped.
    ///
    /// Direction, starting row and promotion row all come from the pawn's own color.  Pawns never
    /// attack straight ahead, so an attack probe only considers the diagonals, occupied or not.
    fn is_allowed(
        board: &Board,
        from: Position,
        to: Position,
        mode: ValidationMode,
    ) -> MoveOutcome {
        let color = match board.piece_on(from) {
            Some(p) => p.color(),
            None => return MoveOutcome::NotAllowed,
        };
        let forward = color.forward();
        let (rows, columns) = from.delta(to);
        let target = board.piece_on(to);

        let advance = if to.row() == color.promotion_row() {
            MoveOutcome::PromotionPending
        } else {
            MoveOutcome::Allowed
        };

        if columns == 0 && rows == 2 * forward && from.row() == color.pawn_row() {
            let jumped_empty = from
                .offset(forward, 0)
                .map_or(false, |p| board.piece_on(p).is_none());
            return if !mode.attack_probe && target.is_none() && jumped_empty {
                MoveOutcome::AllowedEnPassantSetup
            } else {
                MoveOutcome::NotAllowed
            };
        }

        if columns == 0 && rows == forward {
            return if !mode.attack_probe && target.is_none() {
                advance
            } else {
                MoveOutcome::NotAllowed
            };
        }

        if rows == forward && columns.abs() == 1 {
            return match target {
                Some(t) if t.color() != color => advance,
                _ if mode.attack_probe => MoveOutcome::Allowed,
                Some(_) => MoveOutcome::NotAllowed,
                None => PawnValidator::en_passant(board, color, from, to),
            };
        }

        MoveOutcome::NotAllowed
    }
}

impl PawnValidator {
    /// The pawn we would take stands beside us, on our row and the destination's column.  It has
    /// to be the pawn recorded as having just double stepped.
    fn en_passant(board: &Board, color: PieceColor, from: Position, to: Position) -> MoveOutcome {
        let beside = Position::new(from.row(), to.column());
        let capturable = board.en_passant() == Some(beside)
            && board
                .piece_on(beside)
                .map_or(false, |p| p.is(PieceKind::Pawn, !color));
        if !capturable {
            return MoveOutcome::NotAllowed;
        }
        let direction = match color {
            PieceColor::White => EnPassantDirection::WhiteTakesBlack,
            PieceColor::Black => EnPassantDirection::BlackTakesWhite,
        };
        MoveOutcome::AllowedEnPassantCapture(direction)
    }
}
