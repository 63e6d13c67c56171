//! Per-piece movement rules.
//!
//! Each piece kind gets a zero sized type implementing `MoveValidator`.  The validators only
//! establish *pseudo-legality* (geometry, blocking, castling preconditions); whether a move leaves
//! the mover's king in check is decided by the simulator in `safety`.

mod king;
mod knight;
mod pawn;
mod slider;

pub use self::king::KingValidator;
pub use self::knight::KnightValidator;
pub use self::pawn::PawnValidator;
pub use self::slider::{BishopValidator, QueenValidator, RookValidator};

use crate::board::Board;
use crate::move_outcome::MoveOutcome;
use crate::piece::{PieceKind, NUM_PIECES};
use crate::position::Position;
use std::fmt;

/// How strict should a validator be?
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct ValidationMode {
    /// Answer "does the piece on `from` attack `to`?" instead of "may it move there?".  Same
    /// colored pieces on `to` count as defended, pawns attack diagonally regardless of what stands
    /// there, and the enemy king does not block a sliding piece.
    pub attack_probe: bool,
    /// Skip the king's own check-safety verification.  Used while already simulating a move, so
    /// that castling safety does not recurse.
    pub bypass_check_safety: bool,
}

impl ValidationMode {
    /// Full validation of a move the side to move wants to make.
    pub const MOVE: ValidationMode = ValidationMode {
        attack_probe: false,
        bypass_check_safety: false,
    };

    /// Check detection.  Whether a piece attacks a square never depends on its own king's safety.
    pub const ATTACK_PROBE: ValidationMode = ValidationMode {
        attack_probe: true,
        bypass_check_safety: true,
    };

    /// Replies examined inside the check-safety simulator.
    pub const SIMULATION: ValidationMode = ValidationMode {
        attack_probe: false,
        bypass_check_safety: true,
    };
}

/// The rules for one piece kind.
pub trait MoveValidator {
    /// Which piece kind do I validate?
    fn kind() -> PieceKind;

    /// May the piece standing on `from` go to `to`, and if so, what kind of move is it?
    fn is_allowed(board: &Board, from: Position, to: Position, mode: ValidationMode)
        -> MoveOutcome;
}

/// The signature every `MoveValidator::is_allowed` shares.
pub type ValidateFn = fn(&Board, Position, Position, ValidationMode) -> MoveOutcome;

/// A lookup table from piece kind to its validator.
pub struct ValidatorTable {
    table: [ValidateFn; NUM_PIECES],
}

/// The validators for standard chess, indexed by `PieceKind::to_index`.
pub static VALIDATORS: ValidatorTable = ValidatorTable::new([
    RookValidator::is_allowed,
    KnightValidator::is_allowed,
    BishopValidator::is_allowed,
    QueenValidator::is_allowed,
    KingValidator::is_allowed,
    PawnValidator::is_allowed,
]);

impl ValidatorTable {
    /// Build a table from one validator per piece kind, in `ALL_PIECES` order.
    pub const fn new(table: [ValidateFn; NUM_PIECES]) -> ValidatorTable {
        ValidatorTable { table }
    }

    /// Find the validator for a piece kind.
    #[inline]
    pub fn get(&self, kind: PieceKind) -> ValidateFn {
        self.table[kind.to_index()]
    }
}

impl fmt::Debug for ValidatorTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ValidatorTable")
    }
}

/// The check every validator starts with: a piece may not land on its own color, unless we are
/// only asking whether it attacks that square.
#[inline]
pub(crate) fn baseline(board: &Board, from: Position, to: Position, mode: ValidationMode) -> bool {
    if mode.attack_probe {
        return true;
    }
    match (board.piece_on(from), board.piece_on(to)) {
        (Some(mover), Some(target)) => mover.color() != target.color(),
        _ => true,
    }
}
