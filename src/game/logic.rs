use crate::board::geometry::{iter_tiles, neighbors};
use crate::board::state::Board;
use crate::error::{BoardError, StepInvalid};
use crate::game::state::{GameState, MAX_MOVES_PER_TURN};
use crate::game::{GameOutcome, GameResult, GameStatus};
use crate::pieces::{PlacedPiece, Side};
use crate::step::{Step, StepRecord};
use crate::tiles::Tile;

/// The result of making a step.
pub struct DoStepResult {
    /// The game state following the step.
    pub new_state: GameState,
    /// A record of the step and its effect.
    pub record: StepRecord
}

impl From<DoStepResult> for (GameState, StepRecord) {
    fn from(result: DoStepResult) -> (GameState, StepRecord) {
        (result.new_state, result.record)
    }
}

/// All steps the side to play may take, in row-major order of the stepping piece. Empty once the
/// move budget is spent.
pub fn legal_steps(state: &GameState) -> Vec<Step> {
    let mut steps = Vec::new();
    if state.moves_left == 0 {
        return steps
    }
    for tile in state.board.iter_occupied(state.side_to_play) {
        collect_piece_steps(state, tile, &mut steps);
    }
    steps
}

/// The legal steps for the piece at `tile` alone. Returns an error if `tile` does not hold a
/// piece of the side to play.
pub fn legal_steps_from(state: &GameState, tile: Tile) -> Result<Vec<Step>, BoardError> {
    if state.board.get_piece(tile) != Some(state.side_to_play) {
        return Err(BoardError::NoPiece(tile))
    }
    let mut steps = Vec::new();
    if state.moves_left > 0 {
        collect_piece_steps(state, tile, &mut steps);
    }
    Ok(steps)
}

fn collect_piece_steps(state: &GameState, from: Tile, steps: &mut Vec<Step>) {
    let side = state.side_to_play;
    let start_square = state.start_squares.get(from).unwrap_or(from);
    for to in neighbors(from) {
        if state.board.tile_occupied(to) || to == start_square {
            continue
        }
        if is_martyrdom(&state.board, from, to) {
            continue
        }
        steps.push(Step::new(from, to));
    }
    if from.row() == side.scoring_row() {
        steps.push(Step::score(from, side));
    }
}

/// Whether moving the piece at `from` to `to` would get it captured straight away. The move and
/// the resulting captures are played out on a copy of the board; `board` itself is not touched.
pub fn is_martyrdom(board: &Board, from: Tile, to: Tile) -> bool {
    let mut scratch = *board;
    let Some(side) = scratch.move_piece(from, to) else {
        return false
    };
    resolve_board_captures(&mut scratch);
    scratch.get_piece(to) != Some(side)
}

/// Whether a piece of `side` at `tile` is captured: it is if the opposing pieces around it number
/// at least twice its allies, counting the piece itself as an ally.
pub fn is_captured(board: &Board, tile: Tile, side: Side) -> bool {
    let mut opponents = 0;
    let mut allies = 1;
    for n in neighbors(tile) {
        match board.get_piece(n) {
            Some(s) if s == side => allies += 1,
            Some(_) => opponents += 1,
            None => {}
        }
    }
    opponents >= 2 * allies
}

/// Remove captured pieces until none remain. Each round finds every captured piece on the board
/// and removes them all at once, so removals in one round can enable (or prevent) captures in
/// the next. Returns the removed pieces in the order they were removed.
pub fn resolve_board_captures(board: &mut Board) -> Vec<PlacedPiece> {
    let mut removed = Vec::new();
    loop {
        let round: Vec<PlacedPiece> = iter_tiles()
            .filter_map(|t| board.get_piece(t).map(|side| PlacedPiece::new(t, side)))
            .filter(|p| is_captured(board, p.tile, p.side))
            .collect();
        if round.is_empty() {
            return removed
        }
        for p in &round {
            board.clear_tile(p.tile);
        }
        removed.extend(round);
    }
}

/// Resolve captures on the state's board, crediting each capture to the captured piece's
/// opponent and forgetting the captured piece's start square.
pub fn resolve_captures(state: &mut GameState) -> Vec<PlacedPiece> {
    let removed = resolve_board_captures(&mut state.board);
    for p in &removed {
        state.captures.increment(p.side.opponent());
        state.start_squares.remove(p.tile);
    }
    removed
}

/// Apply a step for the side to play, returning the new state. The step must be one of
/// [`legal_steps`]; `state` is left as it was in either case.
pub fn apply_step(state: &GameState, step: Step) -> Result<GameState, StepInvalid> {
    Ok(do_step(state, step)?.new_state)
}

/// As [`apply_step`], but also return a [`StepRecord`] describing what the step did.
pub fn do_step(state: &GameState, step: Step) -> Result<DoStepResult, StepInvalid> {
    if !legal_steps(state).contains(&step) {
        return Err(StepInvalid::Illegal(step))
    }
    let side = state.side_to_play;
    let mut new_state = *state;
    match step {
        Step::Move { from, to } => {
            let start = new_state.start_squares.remove(from).unwrap_or(from);
            new_state.board.move_piece(from, to);
            new_state.start_squares.insert(to, start);
        },
        Step::Score { from, .. } => {
            new_state.board.clear_tile(from);
            new_state.start_squares.remove(from);
            new_state.score.increment(side);
        }
    }
    let captures = resolve_captures(&mut new_state);
    new_state.moves_left -= 1;
    let ended_turn = new_state.moves_left == 0 || legal_steps(&new_state).is_empty();
    if ended_turn {
        end_turn(&mut new_state);
    }
    Ok(DoStepResult {
        new_state,
        record: StepRecord { side, step, captures, ended_turn }
    })
}

fn end_turn(state: &mut GameState) {
    state.side_to_play = state.side_to_play.opponent();
    state.moves_left = MAX_MOVES_PER_TURN;
    state.start_squares.clear();
}

/// The game is over once either side has no pieces left on the board.
pub fn is_terminal(state: &GameState) -> bool {
    state.board.count_pieces(Side::Black) == 0 || state.board.count_pieces(Side::White) == 0
}

/// Tally the game: the side with more points wins, then the side with more captures, otherwise
/// it is a draw.
pub fn result(state: &GameState) -> GameResult {
    let (points_black, points_white) = (state.score.black, state.score.white);
    let (captures_black, captures_white) = (state.captures.black, state.captures.white);
    let winner = match (points_black.cmp(&points_white), captures_black.cmp(&captures_white)) {
        (std::cmp::Ordering::Greater, _) => GameOutcome::Win(Side::Black),
        (std::cmp::Ordering::Less, _) => GameOutcome::Win(Side::White),
        (_, std::cmp::Ordering::Greater) => GameOutcome::Win(Side::Black),
        (_, std::cmp::Ordering::Less) => GameOutcome::Win(Side::White),
        _ => GameOutcome::Draw
    };
    GameResult { points_black, points_white, captures_black, captures_white, winner }
}

/// The current status of the game.
pub fn status(state: &GameState) -> GameStatus {
    if is_terminal(state) {
        GameStatus::Over(result(state))
    } else {
        GameStatus::Ongoing
    }
}
