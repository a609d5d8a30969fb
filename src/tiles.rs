use crate::board::geometry::{BOARD_COLS, BOARD_ROWS};
use crate::error::ParseError::{BadChar, BadStringLen, EmptyString};
use crate::error::{BoardError, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::ops::Add;
use std::str::FromStr;

/// Letters used for the board's files, ie, columns `0..BOARD_COLS`.
pub const FILE_LABELS: &str = "abcdefghi";

/// An offset which can be applied to [`Coords`], composed of the row and column offset to be
/// applied.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RowColOffset {
    pub row: i8,
    pub col: i8
}

impl RowColOffset {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

/// An unbounded row-column pair representing a hypothetical location, which may or may not be on
/// the board. Can be used to represent out-of-bounds locations, including those with negative row
/// or column values.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Coords {
    pub row: i8,
    pub col: i8
}

impl Coords {
    pub fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

/// Convert to `i8`, clamping values too large to fit.
fn saturating_i8(v: u8) -> i8 {
    i8::try_from(v).unwrap_or(i8::MAX)
}

impl From<Tile> for Coords {
    fn from(t: Tile) -> Self {
        Self {
            row: t.row as i8,
            col: t.col as i8
        }
    }
}

impl Add<RowColOffset> for Coords {
    type Output = Self;

    fn add(self, rhs: RowColOffset) -> Self {
        Self {
            row: self.row + rhs.row,
            col: self.col + rhs.col
        }
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The location of a single tile on the board, ie, row and column. Row 0 is the rank furthest
/// from White (rank `8` in notation) and column 0 is file `a`.
///
/// A `Tile` always refers to a position on the board: the fallible constructors reject anything
/// else, so code holding a `Tile` never needs to re-check bounds. Use [`Coords`] for positions
/// which may lie off the board.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tile {
    row: u8,
    col: u8
}

impl Tile {

    /// Create a new [`Tile`] with the given row and column, failing if it is not on the board.
    pub fn new(row: u8, col: u8) -> Result<Self, BoardError> {
        if (row as usize) < BOARD_ROWS && (col as usize) < BOARD_COLS {
            Ok(Self { row, col })
        } else {
            Err(BoardError::OutOfBounds(Coords::new(saturating_i8(row), saturating_i8(col))))
        }
    }

    /// Create a tile the caller already knows to be in bounds.
    pub(crate) const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Position of this tile in a row-major scan of the board.
    pub fn index(&self) -> usize {
        (self.row as usize) * BOARD_COLS + (self.col as usize)
    }

    /// Inverse of [`Self::index`]. Returns `None` for indices past the last tile.
    pub fn from_index(i: usize) -> Option<Self> {
        if i < BOARD_ROWS * BOARD_COLS {
            Some(Self::new_unchecked((i / BOARD_COLS) as u8, (i % BOARD_COLS) as u8))
        } else {
            None
        }
    }

}

impl Debug for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({}, row={}, col={})", self, self.row, self.col)
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let file = FILE_LABELS.as_bytes()[self.col as usize] as char;
        write!(f, "{}{}", file, BOARD_ROWS - self.row as usize)
    }
}

impl FromStr for Tile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let (file, rank) = match chars.as_slice() {
            [] => return Err(EmptyString),
            [file, rank] => (*file, *rank),
            other => return Err(BadStringLen(other.len()))
        };
        if !file.is_ascii_lowercase() {
            return Err(BadChar(file))
        }
        let rank = rank.to_digit(10).ok_or(BadChar(rank))? as i8;
        let col = match FILE_LABELS.find(file) {
            Some(col) => col as i8,
            // Letters past the last file are reported as off-board columns.
            None => (file as u8 - b'a') as i8
        };
        let coords = Coords::new(BOARD_ROWS as i8 - rank, col);
        if (0..BOARD_ROWS as i8).contains(&coords.row) && (0..BOARD_COLS as i8).contains(&coords.col) {
            Ok(Tile::new_unchecked(coords.row as u8, coords.col as u8))
        } else {
            Err(BoardError::OutOfBounds(coords).into())
        }
    }
}

impl TryFrom<(u8, u8)> for Tile {
    type Error = BoardError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Tile::new(row, col)
    }
}

impl TryFrom<String> for Tile {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tile::from_str(&value)
    }
}

impl From<Tile> for String {
    fn from(value: Tile) -> Self {
        value.to_string()
    }
}

impl From<Tile> for (u8, u8) {
    fn from(value: Tile) -> Self {
        (value.row, value.col)
    }
}

/// Iterator over all tiles on the board, in row-major order.
#[derive(Default)]
pub struct TileIterator {
    next_index: usize
}

impl Iterator for TileIterator {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        let tile = Tile::from_index(self.next_index)?;
        self.next_index += 1;
        Some(tile)
    }
}
