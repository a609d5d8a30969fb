use crate::step::Step;
use crate::tiles::{Coords, Tile};
use thiserror::Error;

/// Errors that may be encountered when parsing a string.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Tried to parse an empty string.
    #[error("empty string")]
    EmptyString,
    /// Tried to parse a string which was not the expected length. The given `usize` is the actual
    /// length in characters.
    #[error("unexpected string length {0}")]
    BadStringLen(usize),
    /// Encountered an unexpected character in a string.
    #[error("unexpected character {0:?}")]
    BadChar(char),
    /// A generic error type where the given string could not be parsed for some reason.
    #[error("could not parse {0:?}")]
    BadString(String),
    /// The string was well-formed but names a position that is not on the board.
    #[error(transparent)]
    OutOfBounds(#[from] BoardError),
}

/// Errors relating to the board.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum BoardError {
    /// Coordinates are out of bounds, ie, not on board.
    #[error("coordinates {0} are not on the board")]
    OutOfBounds(Coords),
    /// A setup placed two pieces on the same tile.
    #[error("duplicate placement at {0}")]
    DuplicatePlacement(Tile),
    /// There is no piece at the given tile, where one is expected.
    #[error("no piece of the side to play at {0}")]
    NoPiece(Tile),
}

/// A step that cannot be applied to the current state.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum StepInvalid {
    /// The step is not a member of the legal step set.
    #[error("illegal step {0}")]
    Illegal(Step),
}

/// Ways a call to [`crate::game::turn::play_turn`] can be rejected.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum TurnError {
    /// The turn entry point was called part-way through a turn.
    #[error("turn must start with a full move budget, {moves_left} moves left")]
    OutOfPhase { moves_left: u8 },
    /// The step at `index` was not legal in the state reached by the steps before it.
    #[error("illegal step {step} at position {index}")]
    IllegalStep { index: usize, step: Step },
    /// The turn ended after `consumed` steps but the caller supplied `supplied`.
    #[error("turn ended after {consumed} of {supplied} steps")]
    Oversupplied { consumed: usize, supplied: usize },
}

/// Errors raised when restoring a [`crate::game::state::GameState`] from a snapshot.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SnapshotError {
    /// A board cell holds something other than -1, 0 or 1.
    #[error("cell ({row}, {col}) holds invalid value {value}")]
    BadCell { row: usize, col: usize, value: i8 },
    /// Move budget outside `0..=MAX_MOVES_PER_TURN`.
    #[error("invalid number of moves left: {0}")]
    BadMovesLeft(u8),
    /// A start square is recorded for a tile not holding a piece of the side to play.
    #[error("start square recorded for unoccupied tile {0}")]
    StaleStartSquare(Tile),
    /// Start squares are recorded although no step has been taken this turn.
    #[error("start squares recorded at the start of a turn")]
    StartSquaresAtTurnStart,
    /// More than one start square is recorded for the same tile.
    #[error("more than one start square recorded for {0}")]
    DuplicateStartSquare(Tile),
}
