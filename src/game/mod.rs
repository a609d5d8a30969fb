pub mod logic;
pub mod state;
pub mod turn;

use crate::error::{StepInvalid, TurnError};
use crate::game::state::GameState;
use crate::pieces::Side;
use crate::step::{Step, StepRecord};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The outcome of a finished game.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    /// Game has been won by the specified side.
    Win(Side),
    /// Neither side is ahead on points or captures.
    Draw
}

/// The tallies used to decide a game, along with the decision itself.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct GameResult {
    pub points_black: u32,
    pub points_white: u32,
    pub captures_black: u32,
    pub captures_white: u32,
    pub winner: GameOutcome
}

impl Display for GameResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.winner {
            GameOutcome::Win(side) => write!(f, "{side} wins")?,
            GameOutcome::Draw => write!(f, "draw")?
        }
        write!(
            f,
            " (points {}-{}, captures {}-{})",
            self.points_black, self.points_white, self.captures_black, self.captures_white
        )
    }
}

/// The current status of the game.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum GameStatus {
    /// Game is still ongoing.
    Ongoing,
    /// Game is over, with the given result.
    Over(GameResult)
}

/// A struct representing a single game: the current state plus a record of all previous steps
/// and the game state before each of them (to allow undoing steps).
#[derive(Clone, Debug)]
pub struct Game {
    pub state: GameState,
    pub step_history: Vec<StepRecord>,
    pub state_history: Vec<GameState>
}

impl Game {

    /// Start a game from the given state.
    pub fn new(state: GameState) -> Self {
        Self { state, step_history: vec![], state_history: vec![] }
    }

    /// Apply a single step, recording it and the state it was made from.
    pub fn do_step(&mut self, step: Step) -> Result<GameStatus, StepInvalid> {
        let (state, record) = logic::do_step(&self.state, step)?.into();
        self.state_history.push(self.state);
        self.state = state;
        self.step_history.push(record);
        Ok(self.status())
    }

    /// Play a whole turn (see [`turn::play_turn`]). Nothing is recorded unless every step is
    /// accepted.
    pub fn do_turn(&mut self, steps: &[Step]) -> Result<GameStatus, TurnError> {
        let playback = turn::play_turn_recorded(&self.state, steps)?;
        self.state_history.extend(playback.states);
        self.step_history.extend(playback.records);
        self.state = playback.final_state;
        Ok(self.status())
    }

    /// Return to the state before the most recent step. Does nothing if no step has been made.
    pub fn undo_last_step(&mut self) {
        if let Some(state) = self.state_history.pop() {
            self.state = state;
            self.step_history.pop();
        }
    }

    /// All steps the side to play may take now.
    pub fn legal_steps(&self) -> Vec<Step> {
        logic::legal_steps(&self.state)
    }

    pub fn status(&self) -> GameStatus {
        logic::status(&self.state)
    }
}
