use crate::board_builder::BoardBuilder;
use crate::castle_rights::{self, CastleFlags};
use crate::color::{PieceColor, ALL_COLORS, NUM_COLORS};
use crate::error::Error;
use crate::move_outcome::{MoveOutcome, MoveOutput};
use crate::piece::{BoardPiece, PieceKind};
use crate::position::{Position, ALL_POSITIONS, NUM_POSITIONS};
use crate::validator::{ValidationMode, ValidatorTable, VALIDATORS};
use arrayvec::ArrayVec;
use std::convert::{TryFrom, TryInto};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use tracing::debug;

/// The pieces on the back row, from the a-file to the h-file.
const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A representation of a chess board, along with everything needed to decide whether a move is
/// legal: whose turn it is, which kings and rooks have moved, and which pawn may be taken en
/// passant.
///
/// The grid is a flat array, so the whole board is `Copy`.  Every candidate move is checked by
/// playing it out on a copy.
///
/// ```
/// use chess_rules::{Board, PieceColor, Position};
///
/// let mut board = Board::new();
/// let e2: Position = "e2".parse()?;
/// let e4: Position = "e4".parse()?;
///
/// assert_eq!(board.legal_destinations(e2).len(), 2);
/// let output = board.make_move(e2, e4)?;
/// assert!(!output.capture);
/// assert_eq!(board.current(), PieceColor::Black);
/// # Ok::<(), chess_rules::Error>(())
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Board {
    grid: [Option<BoardPiece>; NUM_POSITIONS],
    current: PieceColor,
    castle_flags: [CastleFlags; NUM_COLORS],
    en_passant: Option<Position>,
    promotion: Option<Position>,
    validators: &'static ValidatorTable,
}

impl Board {
    /// Construct the initial position, White to move.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for color in ALL_COLORS.iter() {
            for (column, kind) in BACK_ROW.iter().enumerate() {
                let column = column as u8;
                board.set(
                    Position::new(color.back_row(), column),
                    Some(BoardPiece::new(*kind, *color)),
                );
                board.set(
                    Position::new(color.pawn_row(), column),
                    Some(BoardPiece::new(PieceKind::Pawn, *color)),
                );
            }
        }
        board
    }

    /// A board with no pieces on it.  Not a valid position on its own.
    pub(crate) fn empty() -> Board {
        Board {
            grid: [None; NUM_POSITIONS],
            current: PieceColor::White,
            castle_flags: [CastleFlags::default(); NUM_COLORS],
            en_passant: None,
            promotion: None,
            validators: &VALIDATORS,
        }
    }

    /// Use a different set of movement rules on this board.
    pub fn with_validators(mut self, validators: &'static ValidatorTable) -> Board {
        self.validators = validators;
        self
    }

    /// A snapshot of every cell, indexed `[row][column]`.
    pub fn grid(&self) -> [[Option<BoardPiece>; 8]; 8] {
        let mut result = [[None; 8]; 8];
        for position in ALL_POSITIONS.iter() {
            result[position.row() as usize][position.column() as usize] = self[*position];
        }
        result
    }

    /// What piece is on a particular `Position`?  Is there even one?
    #[inline]
    pub fn piece_on(&self, position: Position) -> Option<BoardPiece> {
        self.grid[position.to_index()]
    }

    #[inline]
    pub(crate) fn set(&mut self, position: Position, piece: Option<BoardPiece>) {
        self.grid[position.to_index()] = piece;
    }

    /// Who's turn is it?
    #[inline]
    pub fn current(&self) -> PieceColor {
        self.current
    }

    pub(crate) fn set_current(&mut self, color: PieceColor) {
        self.current = color;
    }

    /// Grab the moved-flags for a particular side.
    #[inline]
    pub fn castle_flags(&self, color: PieceColor) -> CastleFlags {
        self.castle_flags[color.to_index()]
    }

    pub(crate) fn set_castle_flags(&mut self, color: PieceColor, flags: CastleFlags) {
        self.castle_flags[color.to_index()] = flags;
    }

    /// The pawn that just advanced two squares, if the last move was such a step.
    #[inline]
    pub fn en_passant(&self) -> Option<Position> {
        self.en_passant
    }

    pub(crate) fn set_en_passant(&mut self, position: Option<Position>) {
        self.en_passant = position;
    }

    /// The square where a pawn was just promoted and `promote` has not been called yet.
    #[inline]
    pub fn pending_promotion(&self) -> Option<Position> {
        self.promotion
    }

    /// Iterate over the positions holding a piece of `color`.
    pub fn positions_of(&self, color: PieceColor) -> impl Iterator<Item = Position> + '_ {
        IntoIterator::into_iter(ALL_POSITIONS)
            .filter(move |p| self.piece_on(*p).map_or(false, |piece| piece.color() == color))
    }

    /// Where is the king of `color`?
    ///
    /// # Panics
    ///
    /// Panics if that king is not on the board.  `BoardBuilder` refuses to build such a board,
    /// so this can only happen if the board state was corrupted.
    pub fn king_position(&self, color: PieceColor) -> Position {
        match ALL_POSITIONS
            .iter()
            .find(|p| self[**p] == Some(BoardPiece::new(PieceKind::King, color)))
        {
            Some(position) => *position,
            None => panic!("corrupted board: the {} king is missing\n{}", color, self),
        }
    }

    /// Ask the validator for the piece on `from` what it thinks about going to `to`.
    ///
    /// This only establishes pseudo-legality: the move may still leave the mover's king in check.
    /// See `is_check_free` for that.
    pub fn validate(&self, from: Position, to: Position, mode: ValidationMode) -> MoveOutcome {
        match self.piece_on(from) {
            Some(piece) => (self.validators.get(piece.kind()))(self, from, to, mode),
            None => MoveOutcome::NotAllowed,
        }
    }

    /// Would moving from `from` to `to` be fully legal for the side to move?
    pub fn is_legal(&self, from: Position, to: Position) -> bool {
        match self.piece_on(from) {
            Some(piece) if piece.color() == self.current => self.legal_outcome(from, to).is_some(),
            _ => false,
        }
    }

    /// The outcome of a fully legal move, or `None` if the move is not legal.
    fn legal_outcome(&self, from: Position, to: Position) -> Option<MoveOutcome> {
        let outcome = self.validate(from, to, ValidationMode::MOVE);
        if outcome.is_allowed() && self.is_check_free(from, to, outcome) {
            Some(outcome)
        } else {
            None
        }
    }

    /// Give me every position the piece on `from` may legally move to.
    ///
    /// This is empty if there is no piece on `from`, or if it belongs to the side not to move.
    pub fn legal_destinations(&self, from: Position) -> ArrayVec<Position, NUM_POSITIONS> {
        let mut result = ArrayVec::new();
        for to in ALL_POSITIONS.iter() {
            if self.is_legal(from, *to) {
                result.push(*to);
            }
        }
        result
    }

    /// Move the pieces as `outcome` says, without touching turn, flags or en passant state.
    /// Returns whether something was captured.
    ///
    /// A promoting pawn is placed on its destination here.  `make_move` puts back whatever stood
    /// there until `promote` is called.
    pub(crate) fn place(&mut self, from: Position, to: Position, outcome: MoveOutcome) -> bool {
        let mover = self.piece_on(from);
        let mut capture = self.piece_on(to).is_some();
        self.set(to, mover);
        self.set(from, None);

        match outcome {
            MoveOutcome::AllowedEnPassantCapture(direction) => {
                self.set(direction.captured_position(to), None);
                capture = true;
            }
            MoveOutcome::SmallCastling | MoveOutcome::BigCastling => {
                if let (Some(side), Some(king)) = (outcome.castle_side(), mover) {
                    let rook = self.piece_on(side.rook_origin(king.color()));
                    self.set(side.rook_origin(king.color()), None);
                    self.set(side.rook_destination(king.color()), rook);
                }
            }
            _ => {}
        }
        capture
    }

    /// Keep track of which kings and rooks have moved, or been taken.
    fn update_castle_flags(&mut self, piece: BoardPiece, from: Position, to: Position) {
        let color = piece.color();
        match piece.kind() {
            PieceKind::King => self.castle_flags[color.to_index()].king_moved = true,
            PieceKind::Rook => {
                if let Some(side) = castle_rights::rook_home_side(color, from) {
                    self.castle_flags[color.to_index()].set_rook_moved(side);
                }
            }
            _ => {}
        }
        if let Some(side) = castle_rights::rook_home_side(!color, to) {
            self.castle_flags[(!color).to_index()].set_rook_moved(side);
        }
    }

    /// Move the piece on `from` to `to`.
    ///
    /// The move is validated fully before anything changes, so on error the board is left
    /// exactly as it was.  On success the side to move flips.
    ///
    /// If a pawn reaches the last row it leaves the board, the destination is left as it was and
    /// the output lists the four pieces it may become.  Call `promote` with one of them.
    ///
    /// ```
    /// use chess_rules::{Board, Error, Position};
    ///
    /// let mut board = Board::new();
    /// let e7: Position = "e7".parse()?;
    /// let e5: Position = "e5".parse()?;
    /// assert_eq!(board.make_move(e7, e5), Err(Error::WrongTurn));
    /// assert_eq!(board.make_move(e5, e7), Err(Error::NoPieceAtSource));
    /// # Ok::<(), chess_rules::Error>(())
    /// ```
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<MoveOutput, Error> {
        let piece = self.piece_on(from).ok_or(Error::NoPieceAtSource)?;
        if piece.color() != self.current {
            return Err(Error::WrongTurn);
        }
        let outcome = self.legal_outcome(from, to).ok_or(Error::IllegalMove)?;
        let target = self.piece_on(to);

        let capture = self.place(from, to, outcome);
        self.update_castle_flags(piece, from, to);
        if let Some(side) = outcome.castle_side() {
            self.castle_flags[piece.color().to_index()].set_rook_moved(side);
        }

        self.en_passant = match outcome {
            MoveOutcome::AllowedEnPassantSetup => Some(to),
            _ => None,
        };

        let output = match outcome {
            MoveOutcome::PromotionPending => {
                self.set(to, target);
                self.promotion = Some(to);
                MoveOutput {
                    capture,
                    promotion_options: Some(BoardPiece::promotion_options(piece.color())),
                }
            }
            _ => MoveOutput::plain(capture),
        };

        self.current = !self.current;

        debug!(
            piece = %piece,
            from = %from,
            to = %to,
            outcome = ?outcome,
            capture,
            "move committed"
        );
        Ok(output)
    }

    /// Put `piece` on `at`, completing a pending promotion.
    ///
    /// There is no legality check here: the caller must have just received `promotion_options`
    /// from `make_move` for this square.
    pub fn promote(&mut self, piece: BoardPiece, at: Position) {
        self.set(at, Some(piece));
        if self.promotion == Some(at) {
            self.promotion = None;
        }
        debug!(piece = %piece, at = %at, "promotion completed");
    }

    /// Does this board make sense as a position to play from?
    ///
    /// * exactly one king of each color.
    /// * the side not to move is not in check.
    /// * the en passant pawn, if any, belongs to the side not to move and stands where a double
    ///   step would have put it.
    pub(crate) fn is_sane(&self) -> bool {
        for color in ALL_COLORS.iter() {
            let king = BoardPiece::new(PieceKind::King, *color);
            if ALL_POSITIONS.iter().filter(|p| self[**p] == Some(king)).count() != 1 {
                return false;
            }
        }

        if let Some(ep) = self.en_passant {
            let them = !self.current;
            let pawn = BoardPiece::new(PieceKind::Pawn, them);
            let expected_row = them.pawn_row() as i8 + 2 * them.forward();
            if self[ep] != Some(pawn) || ep.row() as i8 != expected_row {
                return false;
            }
        }

        let their_king = self.king_position(!self.current);
        !self.is_attacked_by(self.current, their_king, None)
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::new()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.grid[..] == other.grid[..]
            && self.current == other.current
            && self.castle_flags == other.castle_flags
            && self.en_passant == other.en_passant
            && self.promotion == other.promotion
    }
}

impl Eq for Board {}

impl Index<Position> for Board {
    type Output = Option<BoardPiece>;

    fn index(&self, index: Position) -> &Self::Output {
        &self.grid[index.to_index()]
    }
}

impl TryFrom<&BoardBuilder> for Board {
    type Error = Error;

    fn try_from(builder: &BoardBuilder) -> Result<Self, Self::Error> {
        let mut board = Board::empty();
        for position in ALL_POSITIONS.iter() {
            board.set(*position, builder[*position]);
        }
        board.set_current(builder.get_side_to_move());
        for color in ALL_COLORS.iter() {
            board.set_castle_flags(*color, builder.get_castle_flags(*color));
        }
        board.set_en_passant(builder.get_en_passant());

        if board.is_sane() {
            Ok(board)
        } else {
            Err(Error::InvalidBoard)
        }
    }
}

impl TryFrom<&mut BoardBuilder> for Board {
    type Error = Error;

    fn try_from(builder: &mut BoardBuilder) -> Result<Self, Self::Error> {
        (&*builder).try_into()
    }
}

impl TryFrom<BoardBuilder> for Board {
    type Error = Error;

    fn try_from(builder: BoardBuilder) -> Result<Self, Self::Error> {
        (&builder).try_into()
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BoardBuilder::from_str(value)?.try_into()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for column in 0..8u8 {
                match self[Position::new(row, column)] {
                    Some(piece) => write!(f, " {}", piece)?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move", self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::castle_rights::{CastleSide, KING_COLUMN};
    use crate::move_outcome::EnPassantDirection;
    use crate::validator::{KnightValidator, MoveValidator, ValidateFn};

    fn pos(s: &str) -> Position {
        s.parse().expect("valid square")
    }

    fn sorted(mut positions: ArrayVec<Position, NUM_POSITIONS>) -> Vec<Position> {
        positions.sort();
        positions.to_vec()
    }

    /// Count the leaves of the legal move tree, with every promotion choice as its own move.
    ///
    /// Along the way, make sure no legal move leaves the mover's king attacked.
    fn perft(board: &Board, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mover = board.current();
        let mut nodes = 0;
        for from in board.positions_of(mover) {
            for to in board.legal_destinations(from) {
                let mut next = *board;
                let output = next.make_move(from, to).expect("legal destination");
                let children = match output.promotion_options {
                    Some(options) => options
                        .into_iter()
                        .map(|piece| {
                            let mut promoted = next;
                            promoted.promote(piece, to);
                            promoted
                        })
                        .collect(),
                    None => vec![next],
                };
                for child in children {
                    let king = child.king_position(mover);
                    assert!(
                        !child.is_attacked_by(!mover, king, None),
                        "{} to {} leaves the king attacked\n{}",
                        from,
                        to,
                        child
                    );
                    nodes += perft(&child, depth - 1);
                }
            }
        }
        nodes
    }

    fn perft_test(fen: &str, depth: u32, result: u64) {
        let board: Board = fen.parse().expect("valid fen");
        assert_eq!(perft(&board, depth), result);
    }

    #[test]
    fn perft_initial_position() {
        perft_test("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3, 8902);
    }

    #[test]
    fn perft_kiwipete() {
        perft_test(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            2,
            2039,
        );
    }

    #[test]
    fn perft_rook_endgame() {
        perft_test("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3, 2812);
    }

    #[test]
    fn perft_promotions() {
        perft_test(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            2,
            264,
        );
    }

    #[test]
    fn initial_layout() {
        let board = Board::new();
        let grid = board.grid();
        assert_eq!(grid[7][4], Some(BoardPiece::white(PieceKind::King)));
        assert_eq!(grid[0][3], Some(BoardPiece::black(PieceKind::Queen)));
        assert_eq!(grid[6][0], Some(BoardPiece::white(PieceKind::Pawn)));
        assert_eq!(grid[1][7], Some(BoardPiece::black(PieceKind::Pawn)));
        assert_eq!(grid[4][4], None);
        assert_eq!(board.current(), PieceColor::White);
        assert_eq!(board.king_position(PieceColor::Black), Position::new(0, KING_COLUMN));
        assert_eq!(board.castle_flags(PieceColor::White), CastleFlags::default());
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn e_pawn_destinations() {
        let board = Board::new();
        assert_eq!(
            sorted(board.legal_destinations(Position::new(6, 4))),
            vec![Position::new(4, 4), Position::new(5, 4)]
        );
        // black's pieces are not ours to move
        assert!(board.legal_destinations(Position::new(1, 4)).is_empty());
        assert!(board.legal_destinations(Position::new(4, 4)).is_empty());
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let board = Board::new();
        let total: usize = board
            .positions_of(PieceColor::White)
            .map(|p| board.legal_destinations(p).len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn errors_leave_the_board_alone() {
        let mut board = Board::new();
        let before = board;
        assert_eq!(
            board.make_move(Position::new(1, 4), Position::new(3, 4)),
            Err(Error::WrongTurn)
        );
        assert_eq!(
            board.make_move(Position::new(4, 4), Position::new(3, 4)),
            Err(Error::NoPieceAtSource)
        );
        assert_eq!(
            board.make_move(Position::new(6, 4), Position::new(3, 4)),
            Err(Error::IllegalMove)
        );
        assert_eq!(board, before);
        assert_eq!(board.current(), PieceColor::White);
    }

    #[test]
    fn moves_alternate_turns() {
        let mut board = Board::new();
        board.make_move(pos("g1"), pos("f3")).expect("legal");
        assert_eq!(board.current(), PieceColor::Black);
        board.make_move(pos("g8"), pos("f6")).expect("legal");
        assert_eq!(board.current(), PieceColor::White);
        assert_eq!(board[pos("f3")], Some(BoardPiece::white(PieceKind::Knight)));
        assert_eq!(board[pos("g1")], None);
    }

    #[test]
    fn capture_is_reported() {
        let mut board = Board::new();
        board.make_move(pos("e2"), pos("e4")).expect("legal");
        board.make_move(pos("d7"), pos("d5")).expect("legal");
        let output = board.make_move(pos("e4"), pos("d5")).expect("legal");
        assert!(output.capture);
        assert_eq!(output.promotion_options, None);
        assert_eq!(board[pos("d5")], Some(BoardPiece::white(PieceKind::Pawn)));
    }

    #[test]
    fn en_passant_white_takes_black() {
        let mut board: Board = "4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1".parse().expect("valid");
        board.make_move(pos("d7"), pos("d5")).expect("legal");
        assert_eq!(board.en_passant(), Some(pos("d5")));
        assert_eq!(
            board.validate(pos("e5"), pos("d6"), ValidationMode::MOVE),
            MoveOutcome::AllowedEnPassantCapture(EnPassantDirection::WhiteTakesBlack)
        );
        let output = board.make_move(pos("e5"), pos("d6")).expect("legal");
        assert!(output.capture);
        assert_eq!(board[pos("d6")], Some(BoardPiece::white(PieceKind::Pawn)));
        // the captured pawn is taken from its own row, not the destination's
        assert_eq!(board[pos("d5")], None);
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn en_passant_black_takes_white() {
        let mut board = Board::new();
        for (from, to) in &[("e2", "e3"), ("d7", "d5"), ("h2", "h3"), ("d5", "d4"), ("e3", "e4")] {
            board.make_move(pos(from), pos(to)).expect("legal");
        }
        // e3-e4 was a single step, so no en passant
        assert!(!board.is_legal(pos("d4"), pos("e3")));

        let mut board = Board::new();
        for (from, to) in &[("h2", "h3"), ("d7", "d5"), ("h3", "h4"), ("d5", "d4"), ("e2", "e4")] {
            board.make_move(pos(from), pos(to)).expect("legal");
        }
        assert_eq!(
            board.validate(pos("d4"), pos("e3"), ValidationMode::MOVE),
            MoveOutcome::AllowedEnPassantCapture(EnPassantDirection::BlackTakesWhite)
        );
        let output = board.make_move(pos("d4"), pos("e3")).expect("legal");
        assert!(output.capture);
        assert_eq!(board[pos("e4")], None);
        assert_eq!(board[pos("e3")], Some(BoardPiece::black(PieceKind::Pawn)));
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let mut board: Board = "4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1".parse().expect("valid");
        board.make_move(pos("d7"), pos("d5")).expect("legal");
        board.make_move(pos("e1"), pos("e2")).expect("legal");
        board.make_move(pos("e8"), pos("e7")).expect("legal");
        assert_eq!(board.en_passant(), None);
        assert_eq!(board.make_move(pos("e5"), pos("d6")), Err(Error::IllegalMove));
    }

    #[test]
    fn fools_mate() {
        let mut board = Board::new();
        let moves = [
            (Position::new(6, 5), Position::new(5, 5)),
            (Position::new(1, 4), Position::new(3, 4)),
            (Position::new(6, 6), Position::new(4, 6)),
        ];
        for (from, to) in moves.iter() {
            board.make_move(*from, *to).expect("legal");
            assert!(!board.is_checkmate());
        }
        board
            .make_move(Position::new(0, 3), Position::new(4, 7))
            .expect("legal");
        assert!(board.is_current_king_in_check());
        assert!(board.is_checkmate());
        let total: usize = board
            .positions_of(PieceColor::White)
            .map(|p| board.legal_destinations(p).len())
            .sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn king_side_castling() {
        let mut board = Board::new();
        let opening = [
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
        ];
        for (from, to) in &opening {
            board.make_move(pos(from), pos(to)).expect("legal");
        }
        assert_eq!(
            board.validate(Position::new(7, 4), Position::new(7, 6), ValidationMode::MOVE),
            MoveOutcome::SmallCastling
        );
        let output = board
            .make_move(Position::new(7, 4), Position::new(7, 6))
            .expect("legal");
        assert!(!output.capture);
        assert_eq!(board[Position::new(7, 6)], Some(BoardPiece::white(PieceKind::King)));
        assert_eq!(board[Position::new(7, 5)], Some(BoardPiece::white(PieceKind::Rook)));
        assert_eq!(board[Position::new(7, 7)], None);
        assert_eq!(board[Position::new(7, 4)], None);
        let flags = board.castle_flags(PieceColor::White);
        assert!(flags.king_moved);
        assert!(flags.king_rook_moved);
        assert!(!flags.queen_rook_moved);
    }

    #[test]
    fn queen_side_castling_moves_the_rook_next_to_the_king() {
        let mut board: Board = "r3k3/8/8/8/8/8/8/4K3 b q - 0 1".parse().expect("valid");
        board.make_move(pos("e8"), pos("c8")).expect("legal");
        assert_eq!(board[pos("c8")], Some(BoardPiece::black(PieceKind::King)));
        assert_eq!(board[pos("d8")], Some(BoardPiece::black(PieceKind::Rook)));
        assert_eq!(board[pos("a8")], None);
        assert!(!board.castle_flags(PieceColor::Black).may_castle(CastleSide::QueenSide));
    }

    #[test]
    fn moving_the_king_or_rook_ends_castling() {
        let mut board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().expect("valid");
        board.make_move(pos("h1"), pos("h2")).expect("legal");
        board.make_move(pos("e8"), pos("f8")).expect("legal");
        board.make_move(pos("h2"), pos("h1")).expect("legal");
        board.make_move(pos("f8"), pos("e8")).expect("legal");

        assert_eq!(board.make_move(pos("e1"), pos("g1")), Err(Error::IllegalMove));
        let black = board.castle_flags(PieceColor::Black);
        assert!(black.king_moved);
        assert!(!black.may_castle(CastleSide::KingSide));
        assert!(board.is_legal(pos("e1"), pos("c1")));
    }

    #[test]
    fn captured_rook_ends_castling() {
        let mut board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().expect("valid");
        board.make_move(pos("h1"), pos("h8")).expect("legal");
        assert!(board.castle_flags(PieceColor::Black).king_rook_moved);
        assert!(board.castle_flags(PieceColor::White).king_rook_moved);
    }

    #[test]
    fn promotion_waits_for_a_choice() {
        let mut board: Board = "1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().expect("valid");
        let output = board.make_move(pos("a7"), pos("b8")).expect("legal");
        assert!(output.capture);
        let options = output.promotion_options.expect("promotion");
        assert_eq!(options.len(), 4);
        assert!(options.iter().all(|p| p.color() == PieceColor::White));
        assert_eq!(
            options.iter().map(|p| p.kind()).collect::<Vec<_>>(),
            vec![PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight]
        );
        // the captured rook stays until the promotion completes
        assert_eq!(board[pos("b8")], Some(BoardPiece::black(PieceKind::Rook)));
        assert_eq!(board[pos("a7")], None);
        assert_eq!(board.pending_promotion(), Some(pos("b8")));
        assert_eq!(board.current(), PieceColor::Black);

        board.promote(BoardPiece::white(PieceKind::Queen), pos("b8"));
        assert_eq!(board[pos("b8")], Some(BoardPiece::white(PieceKind::Queen)));
        assert_eq!(board.pending_promotion(), None);
        assert!(board.is_current_king_in_check());
    }

    #[test]
    fn quiet_promotion_leaves_the_destination_empty() {
        let mut board: Board = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().expect("valid");
        let output = board.make_move(pos("a7"), pos("a8")).expect("legal");
        assert!(!output.capture);
        assert!(output.promotion_options.is_some());
        assert_eq!(board[pos("a8")], None);
        assert_eq!(board[pos("a7")], None);
        board.promote(BoardPiece::white(PieceKind::Knight), pos("a8"));
        assert_eq!(board[pos("a8")], Some(BoardPiece::white(PieceKind::Knight)));
    }

    #[test]
    fn capture_promotion_keeps_the_king_covered() {
        // the knight on b8 shields the white king from the rook on d8
        let mut board: Board = "Kn1r4/2P5/8/8/8/8/8/7k w - - 0 1".parse().expect("valid");
        let output = board.make_move(pos("c7"), pos("b8")).expect("legal");
        assert!(output.capture);
        assert_eq!(board[pos("b8")], Some(BoardPiece::black(PieceKind::Knight)));
        assert!(!board.legal_destinations(pos("d8")).contains(&pos("a8")));
        assert_eq!(board.make_move(pos("d8"), pos("a8")), Err(Error::IllegalMove));

        board.promote(BoardPiece::white(PieceKind::Queen), pos("b8"));
        let builder = BoardBuilder::from(&board);
        assert!(Board::try_from(builder).is_ok());
        assert!(board.legal_destinations(pos("d8")).contains(&pos("b8")));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let board: Board = "4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1".parse().expect("valid");
        assert!(board.legal_destinations(pos("e2")).is_empty());

        let board: Board = "4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1".parse().expect("valid");
        assert_eq!(
            sorted(board.legal_destinations(pos("e2"))),
            vec![pos("e7"), pos("e6"), pos("e5"), pos("e4"), pos("e3")]
        );
    }

    #[test]
    fn en_passant_may_not_expose_the_king() {
        // taking d5 would open the fifth rank between the rook and the king
        let mut board: Board = "4k3/3p4/8/K3P2r/8/8/8/8 b - - 0 1".parse().expect("valid");
        board.make_move(pos("d7"), pos("d5")).expect("legal");
        assert_eq!(
            board.validate(pos("e5"), pos("d6"), ValidationMode::MOVE),
            MoveOutcome::AllowedEnPassantCapture(EnPassantDirection::WhiteTakesBlack)
        );
        assert_eq!(board.make_move(pos("e5"), pos("d6")), Err(Error::IllegalMove));
    }

    #[test]
    fn custom_validators() {
        fn frozen(_: &Board, _: Position, _: Position, _: ValidationMode) -> MoveOutcome {
            MoveOutcome::NotAllowed
        }
        static FROZEN_KNIGHTS: ValidatorTable = ValidatorTable::new([
            crate::validator::RookValidator::is_allowed,
            frozen as ValidateFn,
            crate::validator::BishopValidator::is_allowed,
            crate::validator::QueenValidator::is_allowed,
            crate::validator::KingValidator::is_allowed,
            crate::validator::PawnValidator::is_allowed,
        ]);

        let board = Board::new();
        assert_eq!(board.legal_destinations(pos("g1")).len(), 2);
        assert_eq!(
            KnightValidator::is_allowed(&board, pos("g1"), pos("f3"), ValidationMode::MOVE),
            MoveOutcome::Allowed
        );
        let board = board.with_validators(&FROZEN_KNIGHTS);
        assert!(board.legal_destinations(pos("g1")).is_empty());
        assert_eq!(board.legal_destinations(pos("e2")).len(), 2);
    }

    #[test]
    fn display_board() {
        let board = Board::new();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[4], "4  . . . . . . . .");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
        assert_eq!(lines[9], "White to move");
    }

    #[test]
    #[should_panic]
    fn missing_king_is_fatal() {
        let mut board = Board::new();
        board.set(Position::new(7, 4), None);
        board.king_position(PieceColor::White);
    }
}
