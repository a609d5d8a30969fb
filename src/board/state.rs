use crate::board::geometry::{BOARD_COLS, BOARD_LEN, BOARD_ROWS};
use crate::error::ParseError;
use crate::error::ParseError::{BadChar, BadStringLen};
use crate::pieces::Side;
use crate::tiles::Tile;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Iterator over the tiles set in a bitfield, in ascending (row-major) order.
pub struct BitfieldIter {
    /// Bitfield representing the remaining tiles.
    state: u128,
}

impl Iterator for BitfieldIter {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == 0 {
            return None
        }
        let i = self.state.trailing_zeros() as usize;
        self.state &= self.state - 1;
        Tile::from_index(i)
    }
}

/// Create a bitmask for the given tile. Only the bit corresponding to the tile's position on the
/// board will be set.
fn tile_mask(t: Tile) -> u128 {
    1u128 << t.index()
}

/// Store the placement of pieces on the board using bitfields: one `u128` records the positions
/// of Black's pieces and another those of White's, one bit per tile in row-major order. Only the
/// low [`BOARD_LEN`] bits are ever set, and no bit is set in both fields.
///
/// The struct is `Copy`, so a scratch board for hypothetical moves is just a local copy.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Default, Debug)]
pub struct Board {
    black: u128,
    white: u128,
}

impl Board {

    fn bits(&self, side: Side) -> u128 {
        match side {
            Side::Black => self.black,
            Side::White => self.white
        }
    }

    /// Place a piece of the given side at the given position, replacing any existing piece.
    pub fn set_piece(&mut self, t: Tile, side: Side) {
        let mask = tile_mask(t);
        match side {
            Side::Black => {
                self.black |= mask;
                self.white &= !mask;
            },
            Side::White => {
                self.white |= mask;
                self.black &= !mask;
            }
        }
    }

    /// Clear a tile.
    pub fn clear_tile(&mut self, t: Tile) {
        let mask = !tile_mask(t);
        self.black &= mask;
        self.white &= mask;
    }

    /// Get the side of the piece that occupies the given tile, if any.
    pub fn get_piece(&self, t: Tile) -> Option<Side> {
        let mask = tile_mask(t);
        if self.black & mask != 0 {
            Some(Side::Black)
        } else if self.white & mask != 0 {
            Some(Side::White)
        } else {
            None
        }
    }

    /// Check if there is any piece occupying a tile.
    pub fn tile_occupied(&self, t: Tile) -> bool {
        (self.black | self.white) & tile_mask(t) != 0
    }

    /// Count the number of pieces of the given side left on the board.
    pub fn count_pieces(&self, side: Side) -> u32 {
        self.bits(side).count_ones()
    }

    /// Return an iterator over the tiles that are occupied by pieces of the given side, in
    /// row-major order.
    pub fn iter_occupied(&self, side: Side) -> BitfieldIter {
        BitfieldIter { state: self.bits(side) }
    }

    /// Move a piece from one position to another. This does not check whether a move is valid; it
    /// just clears `from` and sets `to`. Returns the side of the piece that was moved, or `None`
    /// (leaving the board untouched) if `from` is empty.
    pub fn move_piece(&mut self, from: Tile, to: Tile) -> Option<Side> {
        let side = self.get_piece(from)?;
        self.clear_tile(from);
        self.set_piece(to, side);
        Some(side)
    }

    /// The board as a grid of signs: `1` for Black, `-1` for White and `0` for an empty tile.
    pub fn to_grid(&self) -> [[i8; BOARD_COLS]; BOARD_ROWS] {
        let mut grid = [[0i8; BOARD_COLS]; BOARD_ROWS];
        for side in [Side::Black, Side::White] {
            for t in self.iter_occupied(side) {
                grid[t.row() as usize][t.col() as usize] = side.sign();
            }
        }
        grid
    }

    /// Build a board from a grid of signs. Returns the row, column and value of the first cell
    /// that is not `-1`, `0` or `1`.
    pub fn from_grid(grid: &[[i8; BOARD_COLS]; BOARD_ROWS]) -> Result<Self, (usize, usize, i8)> {
        let mut board = Self::default();
        for (r, row) in grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue
                }
                let side = Side::from_sign(value).ok_or((r, c, value))?;
                board.set_piece(Tile::new_unchecked(r as u8, c as u8), side);
            }
        }
        Ok(board)
    }

    /// Parse a board from a string in the format output by [`Self::to_display_str`]: one line per
    /// row, `B` and `W` for pieces and `.` for empty tiles. Surrounding whitespace on each line is
    /// ignored.
    pub fn from_display_str(display_str: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = display_str.trim().lines().map(str::trim).collect();
        if lines.len() != BOARD_ROWS {
            return Err(BadStringLen(lines.len()))
        }
        let mut board = Self::default();
        for (r, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != BOARD_COLS {
                return Err(BadStringLen(chars.len()))
            }
            for (c, chr) in chars.into_iter().enumerate() {
                if chr != '.' {
                    board.set_piece(Tile::new_unchecked(r as u8, c as u8), Side::try_from(chr).map_err(BadChar)?)
                }
            }
        }
        Ok(board)
    }

    /// Return a string representing the board state, in a format suitable for printing.
    pub fn to_display_str(&self) -> String {
        let mut s = String::with_capacity(BOARD_LEN + BOARD_ROWS);
        for (i, t) in crate::board::geometry::iter_tiles().enumerate() {
            match self.get_piece(t) {
                Some(side) => s.push(side.into()),
                None => s.push('.')
            }
            if i % BOARD_COLS == BOARD_COLS - 1 {
                s.push('\n');
            }
        }
        s
    }
}

impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_display_str(s)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_str())
    }
}
