use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represent a square on the chess board by row and column, each in 0..8.
///
/// Row 0 is the eighth rank (Black's back row) and row 7 is the first rank.  Column 0 is the
/// a-file.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Position(u8);

/// How many positions are there?
pub const NUM_POSITIONS: usize = 64;

/// A list of every position on the chessboard, row by row.
pub const ALL_POSITIONS: [Position; NUM_POSITIONS] = {
    let mut all = [Position(0); NUM_POSITIONS];
    let mut i = 0;
    while i < NUM_POSITIONS {
        all[i] = Position(i as u8);
        i += 1;
    }
    all
};

impl Position {
    /// Make a position given a row and a column.
    /// Note: It is invalid, but allowed, to pass in a row or column >= 8.  Doing so will crash
    /// stuff.
    #[inline]
    pub fn new(row: u8, column: u8) -> Position {
        debug_assert!(row < 8 && column < 8);
        Position(row << 3 | column)
    }

    /// Make a position from signed coordinates, or `None` if they fall off the board.
    #[inline]
    pub fn try_new(row: i8, column: i8) -> Option<Position> {
        if (0..8).contains(&row) && (0..8).contains(&column) {
            Some(Position::new(row as u8, column as u8))
        } else {
            None
        }
    }

    /// Return the row of this position.
    #[inline]
    pub fn row(&self) -> u8 {
        self.0 >> 3
    }

    /// Return the column of this position.
    #[inline]
    pub fn column(&self) -> u8 {
        self.0 & 7
    }

    /// Convert this `Position` to a `usize` for table lookup purposes
    #[inline]
    pub fn to_index(&self) -> usize {
        self.0 as usize
    }

    /// Walk `rows` and `columns` away from here.  `None` if that leaves the board.
    #[inline]
    pub fn offset(&self, rows: i8, columns: i8) -> Option<Position> {
        Position::try_new(self.row() as i8 + rows, self.column() as i8 + columns)
    }

    /// Signed (row, column) distance from `self` to `other`.
    #[inline]
    pub fn delta(&self, other: Position) -> (i8, i8) {
        (
            other.row() as i8 - self.row() as i8,
            other.column() as i8 - self.column() as i8,
        )
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parse algebraic notation, e.g. "e2".
    ///
    /// ```
    /// use chess_rules::Position;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(Position::from_str("e2").unwrap(), Position::new(6, 4));
    /// assert_eq!(Position::from_str("a8").unwrap(), Position::new(0, 0));
    /// assert!(Position::from_str("i9").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPosition {
            position: s.to_string(),
        };
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(invalid()),
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Position::new(
            b'8' - rank as u8,
            file as u8 - b'a',
        ))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.column()) as char,
            (b'8' - self.row()) as char
        )
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row(), self.column())
    }
}
