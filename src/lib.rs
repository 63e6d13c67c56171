//! # Chess rules
//!
//! This crate decides what is legal on a chess board.  Give it a board and a proposed move and it
//! tells you whether the move is allowed, what kind of move it is, and then plays it: castling
//! moves the rook, en passant removes the right pawn, promotion waits for your choice of piece.
//! It also knows when a king is in check and when it is checkmated.
//!
//! ## Example
//!
//! This plays the fool's mate.
//!
//! ```
//! use chess_rules::{Board, Position};
//!
//! let mut board = Board::default();
//! for (from, to) in &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     board.make_move(from.parse()?, to.parse()?)?;
//! }
//!
//! assert!(board.is_current_king_in_check());
//! assert!(board.is_checkmate());
//! # Ok::<(), chess_rules::Error>(())
//! ```
//!
//! Every piece kind has a validator that knows how it moves.  Whether a move leaves your own king
//! in check is decided separately, by playing the move on a copy of the board.  `Board` is a flat
//! array of 64 cells, so that copy is cheap.

mod board;
pub use crate::board::*;

mod board_builder;
pub use crate::board_builder::BoardBuilder;

mod castle_rights;
pub use crate::castle_rights::*;

mod check;

mod color;
pub use crate::color::*;

mod error;
pub use crate::error::*;

mod move_outcome;
pub use crate::move_outcome::*;

mod piece;
pub use crate::piece::*;

mod position;
pub use crate::position::*;

mod safety;

pub mod validator;
pub use crate::validator::{MoveValidator, ValidationMode, ValidatorTable, VALIDATORS};
