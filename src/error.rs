use failure::Fail;

/// Sometimes, bad stuff happens.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source square of a move is empty.
    #[fail(display = "There is no piece on the source square")]
    NoPieceAtSource,

    /// The piece on the source square belongs to the side that is not to move.
    #[fail(display = "The piece on the source square belongs to the side not to move")]
    WrongTurn,

    /// The move breaks a movement rule, is blocked, fails a castling precondition or leaves the
    /// mover's own king in check.
    #[fail(display = "The move is not allowed")]
    IllegalMove,

    /// A coordinate could not be parsed or is off the board.
    #[fail(display = "Invalid position: {}", position)]
    InvalidPosition { position: String },

    /// The FEN string is invalid
    #[fail(display = "Invalid FEN string: {}", fen)]
    InvalidFen { fen: String },

    /// The board created from BoardBuilder was found to be invalid
    #[fail(
        display = "The board specified did not pass sanity checks.  Are you sure there is exactly one king of each color and the side not to move is not in check?"
    )]
    InvalidBoard,
}
