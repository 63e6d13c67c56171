use crate::board::Board;
use crate::castle_rights::CastleFlags;
use crate::color::{PieceColor, ALL_COLORS, NUM_COLORS};
use crate::error::Error;
use crate::piece::BoardPiece;
use crate::position::{Position, ALL_POSITIONS, NUM_POSITIONS};

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Represents a chess position that has *not* been validated for legality.
///
/// This structure is useful in the following cases:
/// * You are trying to build a chess board manually in code.
/// * The `Board` structure will try to keep the position fully legal, which will prevent you from
///   placing pieces arbitrarily.  This structure will not.
/// * You want to convert between formats like FEN.
///
/// ```
/// use chess_rules::{BoardBuilder, Board, BoardPiece, PieceColor, PieceKind, Position};
/// use std::convert::TryFrom;
///
/// let a1: Position = "a1".parse()?;
/// let a8: Position = "a8".parse()?;
/// let d1: Position = "d1".parse()?;
///
/// let mut position = BoardBuilder::new();
/// position.piece(a1, BoardPiece::white(PieceKind::King));
/// position.piece(a8, BoardPiece::black(PieceKind::Rook));
/// position.piece(d1, BoardPiece::black(PieceKind::King));
///
/// // You can index the position by the square:
/// assert_eq!(position[a1], Some(BoardPiece::white(PieceKind::King)));
///
/// // White is in check, but that's ok, it's white's turn to move.
/// assert!(Board::try_from(&position).is_ok());
///
/// // Now White is in check, but Black is ready to move.  This position is invalid.
/// position.side_to_move(PieceColor::Black);
/// assert!(Board::try_from(position).is_err());
///
/// // One liners are possible with the builder pattern.
/// use std::convert::TryInto;
///
/// let res: Result<Board, _> = BoardBuilder::new()
///     .piece(a1, BoardPiece::white(PieceKind::King))
///     .piece(a8, BoardPiece::black(PieceKind::King))
///     .try_into();
/// assert!(res.is_ok());
/// # Ok::<(), chess_rules::Error>(())
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BoardBuilder {
    pieces: [Option<BoardPiece>; NUM_POSITIONS],
    side_to_move: PieceColor,
    castle_flags: [CastleFlags; NUM_COLORS],
    en_passant: Option<Position>,
}

impl BoardBuilder {
    /// Construct a new, empty, BoardBuilder.
    ///
    /// * No pieces are on the board
    /// * Every king and rook counts as moved, so nobody may castle
    /// * `en_passant` is not set
    /// * `side_to_move` is White
    pub fn new() -> BoardBuilder {
        BoardBuilder {
            pieces: [None; NUM_POSITIONS],
            side_to_move: PieceColor::White,
            castle_flags: [CastleFlags::ALL_MOVED; NUM_COLORS],
            en_passant: None,
        }
    }

    /// Set up a board with everything pre-loaded.
    ///
    /// ```
    /// use chess_rules::{
    ///     Board, BoardBuilder, BoardPiece, CastleFlags, PieceColor, PieceKind, Position,
    /// };
    /// use std::convert::TryInto;
    ///
    /// let board: Board = BoardBuilder::setup(
    ///         &[
    ///             ("a1".parse::<Position>()?, BoardPiece::white(PieceKind::King)),
    ///             ("h8".parse::<Position>()?, BoardPiece::black(PieceKind::King)),
    ///         ],
    ///         PieceColor::Black,
    ///         CastleFlags::ALL_MOVED,
    ///         CastleFlags::ALL_MOVED,
    ///         None)
    ///     .try_into()?;
    /// assert_eq!(board.current(), PieceColor::Black);
    /// # Ok::<(), chess_rules::Error>(())
    /// ```
    pub fn setup<'a>(
        pieces: impl IntoIterator<Item = &'a (Position, BoardPiece)>,
        side_to_move: PieceColor,
        white_castle_flags: CastleFlags,
        black_castle_flags: CastleFlags,
        en_passant: Option<Position>,
    ) -> BoardBuilder {
        let mut result = BoardBuilder {
            pieces: [None; NUM_POSITIONS],
            side_to_move,
            castle_flags: [white_castle_flags, black_castle_flags],
            en_passant,
        };

        for (position, piece) in pieces.into_iter() {
            result[*position] = Some(*piece);
        }

        result
    }

    /// Get the current player
    pub fn get_side_to_move(&self) -> PieceColor {
        self.side_to_move
    }

    /// Get the moved-flags for a player
    pub fn get_castle_flags(&self, color: PieceColor) -> CastleFlags {
        self.castle_flags[color.to_index()]
    }

    /// Get the pawn that may be taken en passant
    ///
    /// ```
    /// use chess_rules::{Board, BoardBuilder, Position};
    ///
    /// let mut board = Board::default();
    /// board.make_move("e2".parse()?, "e4".parse()?)?;
    /// let bb: BoardBuilder = board.into();
    /// assert_eq!(bb.get_en_passant(), Some("e4".parse::<Position>()?));
    /// # Ok::<(), chess_rules::Error>(())
    /// ```
    pub fn get_en_passant(&self) -> Option<Position> {
        self.en_passant
    }

    /// Set the side to move on the position
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn side_to_move<'a>(&'a mut self, color: PieceColor) -> &'a mut Self {
        self.side_to_move = color;
        self
    }

    /// Set the moved-flags for a particular color on the position
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn castle_flags<'a>(&'a mut self, color: PieceColor, flags: CastleFlags) -> &'a mut Self {
        self.castle_flags[color.to_index()] = flags;
        self
    }

    /// Set a piece on a position.
    ///
    /// Note that this can and will overwrite another piece on the square if need.
    ///
    /// Note also that this will not update your moved-flags.
    pub fn piece<'a>(&'a mut self, position: Position, piece: BoardPiece) -> &'a mut Self {
        self[position] = Some(piece);
        self
    }

    /// Clear a position on the board.
    ///
    /// Note that this will not update your moved-flags.
    pub fn clear_position<'a>(&'a mut self, position: Position) -> &'a mut Self {
        self[position] = None;
        self
    }

    /// Set or clear the pawn that may be taken en passant.
    pub fn en_passant<'a>(&'a mut self, position: Option<Position>) -> &'a mut Self {
        self.en_passant = position;
        self
    }

    /// The square a pawn skipped over with its double step, as FEN writes it.
    fn en_passant_target(&self) -> Option<Position> {
        self.en_passant
            .and_then(|pawn| pawn.offset(-(!self.side_to_move).forward(), 0))
    }
}

impl Index<Position> for BoardBuilder {
    type Output = Option<BoardPiece>;

    fn index<'a>(&'a self, index: Position) -> &'a Self::Output {
        &self.pieces[index.to_index()]
    }
}

impl IndexMut<Position> for BoardBuilder {
    fn index_mut<'a>(&'a mut self, index: Position) -> &'a mut Self::Output {
        &mut self.pieces[index.to_index()]
    }
}

impl fmt::Display for BoardBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut count = 0;
        for row in 0..8u8 {
            for column in 0..8u8 {
                let position = Position::new(row, column);

                if self[position].is_some() && count != 0 {
                    write!(f, "{}", count)?;
                    count = 0;
                }

                if let Some(piece) = self[position] {
                    write!(f, "{}", piece)?;
                } else {
                    count += 1;
                }
            }

            if count != 0 {
                write!(f, "{}", count)?;
            }

            if row != 7 {
                write!(f, "/")?;
            }
            count = 0;
        }

        write!(f, " ")?;

        if self.side_to_move == PieceColor::White {
            write!(f, "w ")?;
        } else {
            write!(f, "b ")?;
        }

        let mut castles = String::new();
        for color in ALL_COLORS.iter() {
            castles.push_str(&self.get_castle_flags(*color).to_string(*color));
        }
        if castles.is_empty() {
            castles.push('-');
        }
        write!(f, "{} ", castles)?;

        if let Some(target) = self.en_passant_target() {
            write!(f, "{}", target)?;
        } else {
            write!(f, "-")?;
        }

        write!(f, " 0 1")
    }
}

impl Default for BoardBuilder {
    fn default() -> BoardBuilder {
        BoardBuilder::from(Board::default())
    }
}

impl FromStr for BoardBuilder {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFen {
            fen: value.to_string(),
        };
        let mut fen = BoardBuilder::new();

        let tokens: Vec<&str> = value.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(invalid());
        }

        let pieces = tokens[0];
        let side = tokens[1];
        let castles = tokens[2];
        let ep = tokens[3];

        let rows: Vec<&str> = pieces.split('/').collect();
        if rows.len() != 8 {
            return Err(invalid());
        }
        for (row, text) in rows.iter().enumerate() {
            let mut column = 0u8;
            for x in text.chars() {
                if let Some(skip) = x.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err(invalid());
                    }
                    column += skip as u8;
                } else {
                    let piece = BoardPiece::from_char(x).ok_or_else(invalid)?;
                    if column >= 8 {
                        return Err(invalid());
                    }
                    fen[Position::new(row as u8, column)] = Some(piece);
                    column += 1;
                }
                if column > 8 {
                    return Err(invalid());
                }
            }
            if column != 8 {
                return Err(invalid());
            }
        }

        match side {
            "w" | "W" => fen.side_to_move(PieceColor::White),
            "b" | "B" => fen.side_to_move(PieceColor::Black),
            _ => return Err(invalid()),
        };

        if castles != "-" && !castles.chars().all(|c| "KQkq".contains(c)) {
            return Err(invalid());
        }
        fen.castle_flags(
            PieceColor::White,
            CastleFlags::from_fen(castles.contains('K'), castles.contains('Q')),
        );
        fen.castle_flags(
            PieceColor::Black,
            CastleFlags::from_fen(castles.contains('k'), castles.contains('q')),
        );

        if ep != "-" {
            // FEN names the skipped square, we keep the pawn that skipped it.
            let target = Position::from_str(ep).map_err(|_| invalid())?;
            let them = !fen.side_to_move;
            let pawn = target.offset(them.forward(), 0).ok_or_else(invalid)?;
            fen.en_passant(Some(pawn));
        }

        Ok(fen)
    }
}

impl From<&Board> for BoardBuilder {
    fn from(board: &Board) -> Self {
        let pieces: Vec<(Position, BoardPiece)> = ALL_POSITIONS
            .iter()
            .filter_map(|p| board.piece_on(*p).map(|piece| (*p, piece)))
            .collect();

        BoardBuilder::setup(
            &pieces,
            board.current(),
            board.castle_flags(PieceColor::White),
            board.castle_flags(PieceColor::Black),
            board.en_passant(),
        )
    }
}

impl From<Board> for BoardBuilder {
    fn from(board: Board) -> Self {
        (&board).into()
    }
}

#[cfg(test)]
use crate::piece::PieceKind;
#[cfg(test)]
use std::convert::TryInto;

#[cfg(test)]
fn pos(s: &str) -> Position {
    s.parse().expect("valid square")
}

#[test]
fn check_initial_position() {
    let initial_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let fen: BoardBuilder = Board::default().into();
    let computed_initial_fen = format!("{}", fen);
    assert_eq!(computed_initial_fen, initial_fen);

    let pass_through = format!("{}", BoardBuilder::default());
    assert_eq!(pass_through, initial_fen);

    let parsed: Board = initial_fen.parse().expect("valid fen");
    assert_eq!(parsed, Board::default());
}

#[test]
fn en_passant_round_trip() {
    let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1";
    let bb: BoardBuilder = fen.parse().expect("valid fen");
    assert_eq!(bb.get_en_passant(), Some(pos("d5")));
    assert_eq!(format!("{}", bb), fen);

    let fen = "4k3/8/8/8/2Pp4/8/8/4K3 b - c3 0 1";
    let bb: BoardBuilder = fen.parse().expect("valid fen");
    assert_eq!(bb.get_en_passant(), Some(pos("c4")));
    assert_eq!(format!("{}", bb), fen);
}

#[test]
fn castle_field_marks_moved_pieces() {
    let bb: BoardBuilder = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1".parse().expect("valid fen");
    let white = bb.get_castle_flags(PieceColor::White);
    assert!(!white.king_moved);
    assert!(!white.king_rook_moved);
    assert!(white.queen_rook_moved);
    let black = bb.get_castle_flags(PieceColor::Black);
    assert!(black.king_rook_moved);
    assert!(!black.queen_rook_moved);

    let bb: BoardBuilder = "r3k2r/8/8/8/8/8/8/R3K2R b - - 0 1".parse().expect("valid fen");
    assert_eq!(bb.get_castle_flags(PieceColor::Black), CastleFlags::ALL_MOVED);
    assert_eq!(format!("{}", bb), "r3k2r/8/8/8/8/8/8/R3K2R b - - 0 1");
}

#[test]
fn invalid_fens() {
    for fen in &[
        "",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/7/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1",
    ] {
        assert!(fen.parse::<BoardBuilder>().is_err(), "{}", fen);
    }
}

#[test]
fn missing_or_extra_kings() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(pos("a1"), BoardPiece::white(PieceKind::King))
        .try_into();
    assert_eq!(res, Err(Error::InvalidBoard));

    let res: Result<Board, _> = BoardBuilder::new()
        .piece(pos("a1"), BoardPiece::white(PieceKind::King))
        .piece(pos("h1"), BoardPiece::white(PieceKind::King))
        .piece(pos("a8"), BoardPiece::black(PieceKind::King))
        .try_into();
    assert_eq!(res, Err(Error::InvalidBoard));
}

#[test]
fn test_kissing_kings() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(pos("a1"), BoardPiece::white(PieceKind::King))
        .piece(pos("a2"), BoardPiece::black(PieceKind::King))
        .try_into();
    assert!(res.is_err());
}

#[test]
fn test_in_check() {
    let mut bb: BoardBuilder = BoardBuilder::new();
    bb.piece(pos("a1"), BoardPiece::white(PieceKind::King))
        .piece(pos("a8"), BoardPiece::black(PieceKind::King))
        .piece(pos("h1"), BoardPiece::black(PieceKind::Rook));

    let board: Board = (&bb).try_into().expect("valid board");
    assert_eq!(board.checkers().to_vec(), vec![pos("h1")]);

    bb.side_to_move(PieceColor::Black);
    let res: Result<Board, _> = bb.try_into();
    assert!(res.is_err()); // My opponent cannot be in check when it's my move.
}

#[test]
fn en_passant_pawn_must_exist() {
    let res: Result<Board, _> = "4k3/8/8/8/8/8/8/4K3 w - d6 0 1".parse();
    assert_eq!(res, Err(Error::InvalidBoard));
}

#[test]
fn board_round_trips_through_builder() {
    let mut board = Board::default();
    board.make_move(pos("g1"), pos("f3")).expect("legal");
    let bb = BoardBuilder::from(&board);
    assert_eq!(
        format!("{}", bb),
        "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 0 1"
    );
    let back: Board = bb.try_into().expect("valid board");
    assert_eq!(back, board);
}
