use crate::board::geometry::BOARD_ROWS;
use crate::tiles::Tile;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The two sides of the game. Black moves up the board towards row 0 and White moves down towards
/// the last row.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Black,
    White
}

impl Side {

    /// Return the other side.
    pub fn opponent(&self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black
        }
    }

    /// The sign convention used on numeric boards: `+1` for Black, `-1` for White.
    pub fn sign(&self) -> i8 {
        match self {
            Side::Black => 1,
            Side::White => -1
        }
    }

    /// Inverse of [`Self::sign`]. Zero (an empty cell) and any other value give `None`.
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Side::Black),
            -1 => Some(Side::White),
            _ => None
        }
    }

    /// The row from which this side's pieces may score.
    pub fn scoring_row(&self) -> u8 {
        match self {
            Side::Black => 0,
            Side::White => (BOARD_ROWS - 1) as u8
        }
    }

    /// The sentinel written in place of a destination tile when this side scores.
    pub fn scoring_notation(&self) -> &'static str {
        match self {
            Side::Black => "B++",
            Side::White => "W++"
        }
    }

    /// Parse a scoring sentinel back into the side it belongs to.
    pub fn from_scoring_notation(s: &str) -> Option<Self> {
        match s {
            "B++" => Some(Side::Black),
            "W++" => Some(Side::White),
            _ => None
        }
    }
}

impl From<Side> for char {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => 'B',
            Side::White => 'W'
        }
    }
}

impl TryFrom<char> for Side {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'B' => Ok(Side::Black),
            'W' => Ok(Side::White),
            other => Err(other)
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Black => write!(f, "black"),
            Side::White => write!(f, "white")
        }
    }
}

/// A piece of the given side at a particular tile.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub tile: Tile,
    pub side: Side
}

impl PlacedPiece {
    pub fn new(tile: Tile, side: Side) -> Self {
        Self { tile, side }
    }
}
