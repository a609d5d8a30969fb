//! This crate provides the rules of Margrites, a two-player game played on an 8x9 board. Black
//! and White each move pieces one step at a time (orthogonally or diagonally), up to four steps per
//! turn, aiming to carry pieces off the far edge of the board while capturing opposing pieces that
//! become surrounded. It is not a goal of this crate to provide a game client or an AI, only the
//! data and logic needed to build them.
//!
//! # Getting started
//!
//! - [`game::state::GameState`]: All the data that changes over the course of a game: the pieces
//!   on the board, which side is to play, how many steps remain in the turn, where moved pieces
//!   started the turn, and the running score and capture counts. It is `Copy` and makes no heap
//!   allocations, so states can be cheaply passed around and kept for later inspection.
//! - [`game::logic`]: Free functions which take a `GameState` by reference and either inspect it
//!   ([`legal_steps`], [`is_terminal`], [`result`]) or return a new state ([`apply_step`]). The
//!   state passed in is never modified.
//! - [`game::turn`]: Playing a whole turn, ie, a sequence of steps by one side, atomically.
//! - [`game::Game`]: Wraps a `GameState` along with the history of steps and previous states, to
//!   allow a client to show the steps made and to undo them.
//!
//! # Notation
//!
//! Tiles are written as a file letter `a` to `i` followed by a rank `1` to `8`, with rank 8 at the
//! top of the board (row 0). A step is written `e5-e6`, or `e8-B++` / `e1-W++` when a piece scores
//! by leaving the board. See [`tiles::Tile`] and [`step::Step`].
//!
//! # Board state
//!
//! The board is represented as a pair of bitfields, one per side, each held in a `u128` (72 tiles
//! fit comfortably). See [`board::state::Board`].

/// Miscellaneous utilities used elsewhere in the crate.
#[macro_use]
mod utils;

/// Errors used elsewhere in the crate.
pub mod error;

/// Code relating to board tiles and coordinates.
pub mod tiles;

/// Code relating to the two sides and their pieces.
pub mod pieces;

/// Code relating to the board, including board state and geometry.
pub mod board;

/// Code relating to steps (ie, single piece moves) and records of them.
pub mod step;

/// Code for implementing a game, including game logic and state.
pub mod game;

pub use board::geometry::{neighbors, BOARD_COLS, BOARD_LEN, BOARD_ROWS};
pub use game::logic::{apply_step, is_terminal, legal_steps, resolve_captures, result};
pub use game::state::{GameState, MAX_MOVES_PER_TURN};
pub use game::turn::{legal_turn_exists, play_turn};
pub use game::{Game, GameOutcome, GameResult, GameStatus};
pub use pieces::Side;
pub use step::Step;
pub use tiles::Tile;
