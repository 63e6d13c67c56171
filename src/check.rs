//! Check and checkmate detection.

use crate::board::Board;
use crate::color::PieceColor;
use crate::move_outcome::MoveOutcome;
use crate::position::{Position, NUM_POSITIONS};
use crate::validator::ValidationMode;
use arrayvec::ArrayVec;

impl Board {
    /// Does any piece of `attacker` attack `target`?
    ///
    /// Without a collector this stops at the first attacker found.  With one, every attacking
    /// origin is reported.
    pub(crate) fn is_attacked_by(
        &self,
        attacker: PieceColor,
        target: Position,
        mut collector: Option<&mut dyn FnMut(Position)>,
    ) -> bool {
        let mut found = false;
        for from in self.positions_of(attacker) {
            if !self.validate(from, target, ValidationMode::ATTACK_PROBE).is_allowed() {
                continue;
            }
            found = true;
            match collector.as_deref_mut() {
                Some(collect) => collect(from),
                None => break,
            }
        }
        found
    }

    /// Is `target` attacked by the side not to move?
    #[inline]
    pub fn is_check(&self, target: Position) -> bool {
        self.is_attacked_by(!self.current(), target, None)
    }

    /// Is `target` attacked by the side not to move?  Every attacking position is handed to
    /// `collector`.
    ///
    /// ```
    /// use chess_rules::{Board, Position};
    ///
    /// let board: Board = "4k3/8/8/8/8/5n2/8/R3K2r w - - 0 1".parse()?;
    /// let mut attackers = vec![];
    /// assert!(board.is_check_with("e1".parse()?, |p| attackers.push(p)));
    /// attackers.sort();
    /// assert_eq!(attackers, vec!["f3".parse::<Position>()?, "h1".parse()?]);
    /// # Ok::<(), chess_rules::Error>(())
    /// ```
    pub fn is_check_with<F>(&self, target: Position, mut collector: F) -> bool
    where
        F: FnMut(Position),
    {
        self.is_attacked_by(!self.current(), target, Some(&mut collector))
    }

    /// Every position holding a piece that gives check to the side to move.
    pub fn checkers(&self) -> ArrayVec<Position, NUM_POSITIONS> {
        let mut result = ArrayVec::new();
        let king = self.king_position(self.current());
        self.is_check_with(king, |p| result.push(p));
        result
    }

    /// Is the king of the side to move in check?
    pub fn is_current_king_in_check(&self) -> bool {
        self.is_check(self.king_position(self.current()))
    }

    /// Is there any piece of the side to move that can legally go to `to`, with an outcome
    /// `accept` likes?
    fn can_be_reached(&self, to: Position, accept: impl Fn(MoveOutcome) -> bool) -> bool {
        self.positions_of(self.current()).any(|from| {
            let outcome = self.validate(from, to, ValidationMode::MOVE);
            outcome.is_allowed() && accept(outcome) && self.is_check_free(from, to, outcome)
        })
    }

    /// Is the side to move checkmated?
    ///
    /// This only recognizes checkmate.  A side with no legal moves that is not in check is not
    /// reported here.
    ///
    /// ```
    /// use chess_rules::Board;
    ///
    /// let board: Board = "R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1".parse()?;
    /// assert!(board.is_checkmate());
    ///
    /// let board: Board = "R5k1/5pp1/8/8/8/8/8/4K3 b - - 0 1".parse()?;
    /// assert!(!board.is_checkmate());
    /// # Ok::<(), chess_rules::Error>(())
    /// ```
    pub fn is_checkmate(&self) -> bool {
        let attackers = self.checkers();
        if attackers.is_empty() {
            return false;
        }

        let king = self.king_position(self.current());
        if !self.legal_destinations(king).is_empty() {
            return false;
        }

        // Nothing but a king move answers a double check.
        if attackers.len() > 1 {
            return true;
        }
        let attacker = attackers[0];

        if self.can_be_reached(attacker, |_| true) {
            return false;
        }

        // A pawn that just double stepped can also be taken en passant.
        if self.en_passant() == Some(attacker) {
            let capture = attacker.offset(self.current().forward(), 0);
            if let Some(behind) = capture {
                let en_passant = |outcome: MoveOutcome| match outcome {
                    MoveOutcome::AllowedEnPassantCapture(_) => true,
                    _ => false,
                };
                if self.can_be_reached(behind, en_passant) {
                    return false;
                }
            }
        }

        let slider = self
            .piece_on(attacker)
            .map_or(false, |piece| piece.kind().is_slider());
        if slider {
            let (rows, columns) = attacker.delta(king);
            let (row_step, column_step) = (rows.signum(), columns.signum());
            let mut between = attacker.offset(row_step, column_step);
            while let Some(square) = between {
                if square == king {
                    break;
                }
                if self.can_be_reached(square, |_| true) {
                    return false;
                }
                between = square.offset(row_step, column_step);
            }
        }

        true
    }
}
