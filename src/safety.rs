//! The check-safety simulator.
//!
//! Validators only know how pieces move.  Whether a move leaves the mover's own king in check is
//! decided here, by playing the move out on a copy of the board and asking every enemy piece if
//! it can now reach the king.

use crate::board::Board;
use crate::move_outcome::MoveOutcome;
use crate::position::Position;
use crate::validator::ValidationMode;
use tracing::trace;

impl Board {
    /// After moving the piece on `from` to `to` as `outcome` describes, is the mover's king safe?
    ///
    /// `outcome` should come from the validator for this very move: it decides whether a pawn is
    /// taken en passant or a rook jumps over the king.
    pub fn is_check_free(&self, from: Position, to: Position, outcome: MoveOutcome) -> bool {
        let mover = match self.piece_on(from) {
            Some(piece) => piece.color(),
            None => return false,
        };

        let mut after = *self;
        after.place(from, to, outcome);
        after.set_en_passant(None);
        after.set_current(!mover);

        let king = after.king_position(mover);
        let attacker = after
            .positions_of(!mover)
            .find(|p| after.validate(*p, king, ValidationMode::SIMULATION).is_allowed());

        match attacker {
            Some(attacker) => {
                trace!(
                    from = %from,
                    to = %to,
                    king = %king,
                    attacker = %attacker,
                    "move rejected, king left in check"
                );
                false
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_outcome::EnPassantDirection;

    fn board(fen: &str) -> Board {
        fen.parse().expect("valid board")
    }

    fn pos(s: &str) -> Position {
        s.parse().expect("valid square")
    }

    #[test]
    fn simulation_leaves_the_board_alone() {
        let b = Board::new();
        let before = b;
        assert!(b.is_check_free(pos("e2"), pos("e4"), MoveOutcome::AllowedEnPassantSetup));
        assert_eq!(b, before);
    }

    #[test]
    fn moving_a_pinned_piece_is_rejected() {
        let b = board("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(!b.is_check_free(pos("e2"), pos("d3"), MoveOutcome::Allowed));
    }

    #[test]
    fn king_may_not_take_a_defended_piece() {
        let b = board("4k3/8/8/8/8/2n5/4q3/4K3 w - - 0 1");
        assert!(!b.is_check_free(pos("e1"), pos("e2"), MoveOutcome::Allowed));
        let b = board("4k3/8/8/8/8/8/4q3/4K3 w - - 0 1");
        assert!(b.is_check_free(pos("e1"), pos("e2"), MoveOutcome::Allowed));
    }

    #[test]
    fn blocking_and_capturing_resolve_check() {
        let b = board("4k3/8/8/8/8/8/3N4/r3K3 w - - 0 1");
        // Nb1 blocks, Nf3 does not
        assert!(b.is_check_free(pos("d2"), pos("b1"), MoveOutcome::Allowed));
        assert!(!b.is_check_free(pos("d2"), pos("f3"), MoveOutcome::Allowed));
        let b = board("4k3/8/8/8/8/1N6/8/r3K3 w - - 0 1");
        assert!(b.is_check_free(pos("b3"), pos("a1"), MoveOutcome::Allowed));
    }

    #[test]
    fn en_passant_removal_is_simulated() {
        // with the d5 pawn gone the h5 rook sees the king on a5
        let b = board("4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 1");
        let outcome = MoveOutcome::AllowedEnPassantCapture(EnPassantDirection::WhiteTakesBlack);
        assert!(!b.is_check_free(pos("e5"), pos("d6"), outcome));
        // a plain move to d6 would leave d5 standing in the way
        assert!(b.is_check_free(pos("e5"), pos("d6"), MoveOutcome::Allowed));
    }

    #[test]
    fn pawn_promoting_onto_the_king_counts_as_an_attack() {
        // the g2 pawn attacks h1, the reply would be a capture with promotion
        let b = board("4k3/8/8/8/8/8/6p1/6K1 w - - 0 1");
        assert!(!b.is_check_free(pos("g1"), pos("h1"), MoveOutcome::Allowed));
        assert!(b.is_check_free(pos("g1"), pos("g2"), MoveOutcome::Allowed));
    }
}
