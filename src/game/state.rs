use crate::board::geometry::{BOARD_COLS, BOARD_LEN, BOARD_ROWS};
use crate::board::state::Board;
use crate::error::{BoardError, SnapshotError};
use crate::pieces::Side;
use crate::tiles::Tile;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Maximum number of steps a side may take in one turn.
pub const MAX_MOVES_PER_TURN: u8 = 4;

/// Remembers, for each piece that has moved this turn, the tile it stood on when the turn began.
/// Entries are keyed by the piece's *current* tile and follow the piece as it moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StartSquares {
    squares: [Option<Tile>; BOARD_LEN]
}

impl Default for StartSquares {
    fn default() -> Self {
        Self { squares: [None; BOARD_LEN] }
    }
}

impl StartSquares {

    /// The start square recorded for the piece now at `current`, if it has moved this turn.
    pub fn get(&self, current: Tile) -> Option<Tile> {
        self.squares[current.index()]
    }

    pub fn insert(&mut self, current: Tile, start: Tile) {
        self.squares[current.index()] = Some(start);
    }

    /// Remove and return the entry for the piece at `current`.
    pub fn remove(&mut self, current: Tile) -> Option<Tile> {
        self.squares[current.index()].take()
    }

    pub fn clear(&mut self) {
        self.squares = [None; BOARD_LEN];
    }

    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(Option::is_none)
    }

    /// Iterate over `(current, start)` pairs in row-major order of the current tile.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, Tile)> + '_ {
        self.squares.iter().enumerate().filter_map(|(i, start)| {
            Some((Tile::from_index(i)?, (*start)?))
        })
    }
}

/// A per-side counter.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tally {
    pub black: u32,
    pub white: u32
}

impl Tally {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Black => self.black,
            Side::White => self.white
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Black => self.black += 1,
            Side::White => self.white += 1
        }
    }
}

/// All the state of a game in progress. The struct is `Copy`: rules operations take a state by
/// reference and return a new one, so earlier states stay valid for inspection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    /// Board state, ie, the current pieces on the board.
    pub board: Board,
    /// The side whose turn it is.
    pub side_to_play: Side,
    /// Steps left in the current turn, counting down from [`MAX_MOVES_PER_TURN`].
    pub moves_left: u8,
    /// Start-of-turn positions of the pieces moved this turn.
    pub start_squares: StartSquares,
    /// Points scored by each side.
    pub score: Tally,
    /// Opposing pieces each side has captured.
    pub captures: Tally
}

impl GameState {

    /// Create the state at the start of a game with Black's pieces on `black` and White's on
    /// `white`. Fails if any tile is listed twice.
    pub fn from_setup(black: &[Tile], white: &[Tile], side_to_play: Side) -> Result<Self, BoardError> {
        let mut board = Board::default();
        for (tiles, side) in [(black, Side::Black), (white, Side::White)] {
            for &t in tiles {
                if board.tile_occupied(t) {
                    return Err(BoardError::DuplicatePlacement(t))
                }
                board.set_piece(t, side);
            }
        }
        Ok(Self::from_board(board, side_to_play))
    }

    /// As [`Self::from_setup`], from raw `(row, col)` pairs which are checked to be on the board.
    pub fn from_coords(
        black: &[(u8, u8)],
        white: &[(u8, u8)],
        side_to_play: Side
    ) -> Result<Self, BoardError> {
        let black = black.iter().map(|&rc| Tile::try_from(rc)).collect::<Result<Vec<_>, _>>()?;
        let white = white.iter().map(|&rc| Tile::try_from(rc)).collect::<Result<Vec<_>, _>>()?;
        Self::from_setup(&black, &white, side_to_play)
    }

    /// Create the state at the start of a turn for the given board.
    pub fn from_board(board: Board, side_to_play: Side) -> Self {
        Self {
            board,
            side_to_play,
            moves_left: MAX_MOVES_PER_TURN,
            start_squares: StartSquares::default(),
            score: Tally::default(),
            captures: Tally::default()
        }
    }

    /// Whether no step has been taken yet in the current turn.
    pub fn at_turn_start(&self) -> bool {
        self.moves_left == MAX_MOVES_PER_TURN
    }

    /// Take a self-contained snapshot of this state, suitable for serialization.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::from(self)
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let grid = self.board.to_display_str();
        for (r, line) in grid.lines().enumerate() {
            writeln!(f, "{} {}", BOARD_ROWS - r, line)?;
        }
        writeln!(f, "  {}", crate::tiles::FILE_LABELS)?;
        write!(
            f,
            "{} to play, {} moves left; score {}-{}, captures {}-{}",
            self.side_to_play,
            self.moves_left,
            self.score.black,
            self.score.white,
            self.captures.black,
            self.captures.white
        )
    }
}

/// A start-square entry in a [`StateSnapshot`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSquareEntry {
    pub current: Tile,
    pub start: Tile
}

/// A deep, self-contained copy of a [`GameState`] in plain data, for storage or transmission.
/// Board cells hold `1` for Black, `-1` for White and `0` when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub board: [[i8; BOARD_COLS]; BOARD_ROWS],
    pub to_move: Side,
    pub moves_left: u8,
    pub start_squares: Vec<StartSquareEntry>,
    pub score: Tally,
    pub captures: Tally
}

impl From<&GameState> for StateSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            board: state.board.to_grid(),
            to_move: state.side_to_play,
            moves_left: state.moves_left,
            start_squares: state.start_squares.iter()
                .map(|(current, start)| StartSquareEntry { current, start })
                .collect(),
            score: state.score,
            captures: state.captures
        }
    }
}

impl TryFrom<StateSnapshot> for GameState {
    type Error = SnapshotError;

    fn try_from(snapshot: StateSnapshot) -> Result<Self, Self::Error> {
        let board = Board::from_grid(&snapshot.board)
            .map_err(|(row, col, value)| SnapshotError::BadCell { row, col, value })?;
        if snapshot.moves_left > MAX_MOVES_PER_TURN {
            return Err(SnapshotError::BadMovesLeft(snapshot.moves_left))
        }
        if snapshot.moves_left == MAX_MOVES_PER_TURN && !snapshot.start_squares.is_empty() {
            return Err(SnapshotError::StartSquaresAtTurnStart)
        }
        let mut start_squares = StartSquares::default();
        for StartSquareEntry { current, start } in snapshot.start_squares {
            if board.get_piece(current) != Some(snapshot.to_move) {
                return Err(SnapshotError::StaleStartSquare(current))
            }
            if start_squares.get(current).is_some() {
                return Err(SnapshotError::DuplicateStartSquare(current))
            }
            start_squares.insert(current, start);
        }
        Ok(Self {
            board,
            side_to_play: snapshot.to_move,
            moves_left: snapshot.moves_left,
            start_squares,
            score: snapshot.score,
            captures: snapshot.captures
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{BoardError, SnapshotError};
    use crate::game::logic::legal_steps;
    use crate::game::state::{GameState, StartSquareEntry, StartSquares, StateSnapshot, MAX_MOVES_PER_TURN};
    use crate::pieces::Side::{Black, White};
    use crate::step::Step;
    use crate::tiles::{Coords, Tile};
    use std::str::FromStr;

    fn t(s: &str) -> Tile {
        Tile::from_str(s).unwrap()
    }

    #[test]
    fn test_from_setup() {
        let state = GameState::from_setup(&[t("d5"), t("e5")], &[t("e6")], White).unwrap();
        assert_eq!(state.side_to_play, White);
        assert_eq!(state.moves_left, MAX_MOVES_PER_TURN);
        assert!(state.at_turn_start());
        assert!(state.start_squares.is_empty());
        assert_eq!(state.board.count_pieces(Black), 2);
        assert_eq!(state.board.count_pieces(White), 1);
        assert_eq!(state.score.get(Black), 0);
        assert_eq!(state.captures.get(White), 0);

        assert_eq!(
            GameState::from_setup(&[t("d5"), t("d5")], &[], Black),
            Err(BoardError::DuplicatePlacement(t("d5")))
        );
        assert_eq!(
            GameState::from_setup(&[t("d5")], &[t("d5")], Black),
            Err(BoardError::DuplicatePlacement(t("d5")))
        );
    }

    #[test]
    fn test_from_coords() {
        let state = GameState::from_coords(&[(3, 4)], &[(0, 8)], Black).unwrap();
        assert_eq!(state.board.get_piece(t("e5")), Some(Black));
        assert_eq!(state.board.get_piece(t("i8")), Some(White));
        assert_eq!(
            GameState::from_coords(&[(8, 0)], &[], Black),
            Err(BoardError::OutOfBounds(Coords::new(8, 0)))
        );
        assert_eq!(
            GameState::from_coords(&[], &[(2, 9)], Black),
            Err(BoardError::OutOfBounds(Coords::new(2, 9)))
        );
    }

    #[test]
    fn test_copies_are_independent() {
        let original = GameState::from_setup(&[t("e5")], &[], Black).unwrap();
        let mut copy = original;
        copy.board.clear_tile(t("e5"));
        copy.start_squares.insert(t("e6"), t("e5"));
        copy.score.increment(Black);
        assert_eq!(original.board.get_piece(t("e5")), Some(Black));
        assert!(original.start_squares.is_empty());
        assert_eq!(original.score.black, 0);
    }

    #[test]
    fn test_start_squares() {
        let mut squares = StartSquares::default();
        squares.insert(t("e6"), t("e5"));
        squares.insert(t("a1"), t("b2"));
        assert_eq!(squares.get(t("e6")), Some(t("e5")));
        assert_eq!(squares.iter().collect::<Vec<_>>(), vec![(t("e6"), t("e5")), (t("a1"), t("b2"))]);
        assert_eq!(squares.remove(t("e6")), Some(t("e5")));
        assert_eq!(squares.remove(t("e6")), None);
        squares.clear();
        assert!(squares.is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = GameState::from_setup(&[t("d5"), t("e8")], &[t("a1")], Black).unwrap();
        state.board.move_piece(t("d5"), t("d6"));
        state.start_squares.insert(t("d6"), t("d5"));
        state.moves_left = 3;
        state.score.white = 2;
        state.captures.black = 5;

        let snapshot = state.snapshot();
        assert_eq!(snapshot.board[2][3], 1);
        assert_eq!(snapshot.board[7][0], -1);
        assert_eq!(snapshot.start_squares, vec![StartSquareEntry { current: t("d6"), start: t("d5") }]);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"to_move\":\"black\""));
        assert!(json.contains("{\"current\":\"d6\",\"start\":\"d5\"}"));
        let parsed: StateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
        assert_eq!(GameState::try_from(parsed), Ok(state));
    }

    #[test]
    fn test_bad_snapshots() {
        let state = GameState::from_setup(&[t("d5")], &[t("a1")], Black).unwrap();

        let mut snapshot = state.snapshot();
        snapshot.board[0][0] = 2;
        assert_eq!(
            GameState::try_from(snapshot),
            Err(SnapshotError::BadCell { row: 0, col: 0, value: 2 })
        );

        let mut snapshot = state.snapshot();
        snapshot.moves_left = 5;
        assert_eq!(GameState::try_from(snapshot), Err(SnapshotError::BadMovesLeft(5)));

        let mut snapshot = state.snapshot();
        snapshot.moves_left = 3;
        snapshot.start_squares.push(StartSquareEntry { current: t("a1"), start: t("a2") });
        assert_eq!(GameState::try_from(snapshot), Err(SnapshotError::StaleStartSquare(t("a1"))));

        // Nothing has moved yet at the start of a turn.
        let mut snapshot = state.snapshot();
        snapshot.start_squares.push(StartSquareEntry { current: t("d5"), start: t("d4") });
        assert_eq!(GameState::try_from(snapshot), Err(SnapshotError::StartSquaresAtTurnStart));

        let mut snapshot = state.snapshot();
        snapshot.moves_left = 2;
        snapshot.start_squares.push(StartSquareEntry { current: t("d5"), start: t("d4") });
        snapshot.start_squares.push(StartSquareEntry { current: t("d5"), start: t("c4") });
        assert_eq!(GameState::try_from(snapshot), Err(SnapshotError::DuplicateStartSquare(t("d5"))));

        // A restored turn-start state allows every step a fresh one does.
        let restored = GameState::try_from(state.snapshot()).unwrap();
        assert!(restored.start_squares.is_empty());
        assert_eq!(legal_steps(&restored), legal_steps(&state));
        assert!(legal_steps(&restored).contains(&Step::new(t("d5"), t("d4"))));

        let json = serde_json::to_string(&state.snapshot()).unwrap().replace("\"to_move\":\"black\"", "\"to_move\":\"red\"");
        assert!(serde_json::from_str::<StateSnapshot>(&json).is_err());
        let json = serde_json::to_string(&state.snapshot()).unwrap().replace("\"score\"", "\"x\"");
        assert!(serde_json::from_str::<StateSnapshot>(&json).is_err());
    }
}
