use crate::error::BoardError;
use crate::tiles::{Coords, RowColOffset, Tile, TileIterator};

/// Number of rows (ranks) on the board.
pub const BOARD_ROWS: usize = 8;
/// Number of columns (files) on the board.
pub const BOARD_COLS: usize = 9;
/// Number of tiles on the board.
pub const BOARD_LEN: usize = BOARD_ROWS * BOARD_COLS;

/// Offsets to the eight surrounding tiles. Their order fixes the order of [`neighbors`].
const NEIGHBOR_OFFSETS: [RowColOffset; 8] = [
    RowColOffset::new(-1, -1),
    RowColOffset::new(-1, 0),
    RowColOffset::new(-1, 1),
    RowColOffset::new(0, -1),
    RowColOffset::new(0, 1),
    RowColOffset::new(1, -1),
    RowColOffset::new(1, 0),
    RowColOffset::new(1, 1),
];

/// Check whether the coords refer to a position on the board.
pub fn coords_in_bounds(coords: Coords) -> bool {
    (0..BOARD_ROWS as i8).contains(&coords.row) && (0..BOARD_COLS as i8).contains(&coords.col)
}

/// Convert an unbounded [`Coords`] to a [`Tile`] representing a position on the board, if
/// possible. If the coords represents a position not on the board, return a
/// [`BoardError::OutOfBounds`] error.
pub fn coords_to_tile(coords: Coords) -> Result<Tile, BoardError> {
    if coords_in_bounds(coords) {
        Ok(Tile::new_unchecked(coords.row as u8, coords.col as u8))
    } else {
        Err(BoardError::OutOfBounds(coords))
    }
}

/// Find a tile's neighbours, ie, the up to eight tiles touching it orthogonally or diagonally.
/// The origin tile is never included.
pub fn neighbors(tile: Tile) -> Vec<Tile> {
    let origin = Coords::from(tile);
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|offset| coords_to_tile(origin + *offset).ok())
        .collect()
}

/// Return an iterator over all tiles on the board, in row-major order.
pub fn iter_tiles() -> TileIterator {
    TileIterator::default()
}
