use crate::error::StepInvalid;
use crate::error::TurnError;
use crate::game::logic::{do_step, legal_steps};
use crate::game::state::GameState;
use crate::step::{Step, StepRecord};

/// Every state passed through while playing a turn, with a record of each step.
pub struct TurnPlayback {
    /// The state after the last step.
    pub final_state: GameState,
    /// The state before each step, in order.
    pub states: Vec<GameState>,
    /// What each step did, in order.
    pub records: Vec<StepRecord>
}

/// Play a whole turn for the side to play: apply `steps` in order, checking each against the
/// state the earlier ones produced. `state` must be at the start of a turn. It is an error to
/// supply more steps than the turn can take, ie, steps left over once the turn has ended.
pub fn play_turn(state: &GameState, steps: &[Step]) -> Result<GameState, TurnError> {
    Ok(play_turn_recorded(state, steps)?.final_state)
}

/// As [`play_turn`], but keep the intermediate states and step records.
pub fn play_turn_recorded(state: &GameState, steps: &[Step]) -> Result<TurnPlayback, TurnError> {
    if !state.at_turn_start() {
        return Err(TurnError::OutOfPhase { moves_left: state.moves_left })
    }
    let mut playback = TurnPlayback {
        final_state: *state,
        states: Vec::with_capacity(steps.len()),
        records: Vec::with_capacity(steps.len())
    };
    for (index, &step) in steps.iter().enumerate() {
        let (new_state, record) = do_step(&playback.final_state, step)
            .map_err(|StepInvalid::Illegal(step)| TurnError::IllegalStep { index, step })?
            .into();
        let ended_turn = record.ended_turn;
        playback.states.push(playback.final_state);
        playback.records.push(record);
        playback.final_state = new_state;
        if ended_turn && index + 1 < steps.len() {
            return Err(TurnError::Oversupplied { consumed: index + 1, supplied: steps.len() })
        }
    }
    Ok(playback)
}

/// Whether the side to play has any legal step.
pub fn legal_turn_exists(state: &GameState) -> bool {
    !legal_steps(state).is_empty()
}

#[cfg(test)]
mod tests {
    use crate::error::TurnError;
    use crate::game::logic::{apply_step, legal_steps};
    use crate::game::state::{GameState, MAX_MOVES_PER_TURN};
    use crate::game::turn::{legal_turn_exists, play_turn, play_turn_recorded};
    use crate::pieces::Side::{Black, White};
    use crate::step::Step;
    use crate::tiles::Tile;
    use std::str::FromStr;

    fn t(s: &str) -> Tile {
        Tile::from_str(s).unwrap()
    }

    fn steps(s: &[&str]) -> Vec<Step> {
        s.iter().map(|s| Step::from_str(s).unwrap()).collect()
    }

    fn setup(black: &[&str], white: &[&str]) -> GameState {
        let black: Vec<Tile> = black.iter().map(|s| t(s)).collect();
        let white: Vec<Tile> = white.iter().map(|s| t(s)).collect();
        GameState::from_setup(&black, &white, Black).unwrap()
    }

    #[test]
    fn test_scoring_sequence_four_steps() {
        let state = setup(&["e5"], &[]);
        let final_state = play_turn(&state, &steps(&["e5-e6", "e6-e7", "e7-e8", "e8-B++"])).unwrap();
        assert_eq!(final_state.score.black, 1);
        assert_eq!(final_state.board.count_pieces(Black), 0);
        assert_eq!(final_state.board.count_pieces(White), 0);
        assert_eq!(final_state.side_to_play, White);
        assert_eq!(final_state.moves_left, MAX_MOVES_PER_TURN);
    }

    #[test]
    fn test_scoring_in_one_move() {
        let state = setup(&["e8"], &[]);
        let final_state = play_turn(&state, &steps(&["e8-B++"])).unwrap();
        assert_eq!(final_state.score.black, 1);
        assert_eq!(final_state.side_to_play, White);
        assert_eq!(final_state.moves_left, MAX_MOVES_PER_TURN);
    }

    #[test]
    fn test_partial_turn_leaves_budget() {
        let state = setup(&["e5"], &["a1"]);
        let new_state = play_turn(&state, &steps(&["e5-e6", "e6-e7"])).unwrap();
        assert_eq!(new_state.side_to_play, Black);
        assert_eq!(new_state.moves_left, 2);
        assert_eq!(play_turn(&state, &[]), Ok(state));
    }

    #[test]
    fn test_turn_must_start_with_full_budget() {
        let state = setup(&["e5"], &["a1"]);
        let mid_turn = apply_step(&state, Step::new(t("e5"), t("e6"))).unwrap();
        assert_eq!(
            play_turn(&mid_turn, &steps(&["e6-e7"])),
            Err(TurnError::OutOfPhase { moves_left: 3 })
        );
        assert_eq!(play_turn(&mid_turn, &[]), Err(TurnError::OutOfPhase { moves_left: 3 }));
    }

    #[test]
    fn test_steps_revalidated_in_sequence() {
        let state = setup(&["e5"], &["a1"]);
        // The second step would return the piece to its start square.
        assert_eq!(
            play_turn(&state, &steps(&["e5-e6", "e6-e5"])),
            Err(TurnError::IllegalStep { index: 1, step: Step::new(t("e6"), t("e5")) })
        );
        assert_eq!(
            play_turn(&state, &steps(&["a1-a2"])),
            Err(TurnError::IllegalStep { index: 0, step: Step::new(t("a1"), t("a2")) })
        );
    }

    #[test]
    fn test_capture_can_invalidate_later_step() {
        // a2 only survives while b2 stands beside it, so once b2 steps away a2 is captured and
        // can no longer step to a1.
        let state = setup(&["a2", "b2"], &["a4", "a3", "b1", "c1"]);
        assert!(legal_steps(&state).contains(&Step::new(t("a2"), t("a1"))));
        assert_eq!(
            play_turn(&state, &steps(&["b2-c3", "a2-a1"])),
            Err(TurnError::IllegalStep { index: 1, step: Step::new(t("a2"), t("a1")) })
        );
        let new_state = play_turn(&state, &steps(&["b2-c3"])).unwrap();
        assert_eq!(new_state.board.get_piece(t("a2")), None);
        assert_eq!(new_state.captures.white, 1);
        assert_eq!(new_state.side_to_play, Black);
    }

    #[test]
    fn test_oversupplied_turn_rejected() {
        let state = setup(&["e5"], &["a1"]);
        assert_eq!(
            play_turn(&state, &steps(&["e5-e6", "e6-e7", "e7-d7", "d7-c7", "c7-b7"])),
            Err(TurnError::Oversupplied { consumed: 4, supplied: 5 })
        );

        // Trapped after the first step.
        let state = setup(&["b2"], &["a2", "c1", "c2"]);
        assert_eq!(
            play_turn(&state, &steps(&["b2-a1", "a1-b1"])),
            Err(TurnError::Oversupplied { consumed: 1, supplied: 2 })
        );
        let new_state = play_turn(&state, &steps(&["b2-a1"])).unwrap();
        assert_eq!(new_state.side_to_play, White);
    }

    #[test]
    fn test_recorded_turn() {
        let state = setup(&["d5", "e5", "f5", "f6"], &["e6", "e7", "a1"]);
        let playback = play_turn_recorded(&state, &steps(&["d5-d6", "d6-d7"])).unwrap();
        assert_eq!(playback.states.len(), 2);
        assert_eq!(playback.states[0], state);
        assert_eq!(playback.records[0].to_string(), "d5-d6xe6/e7");
        assert_eq!(playback.records[1].to_string(), "d6-d7");
        assert_eq!(playback.final_state.moves_left, 2);
        assert_eq!(playback.final_state.start_squares.get(t("d7")), Some(t("d5")));
    }

    #[test]
    fn test_legal_turn_exists() {
        assert!(legal_turn_exists(&setup(&["e5"], &[])));
        assert!(!legal_turn_exists(&setup(&[], &["e5"])));
        let mut state = setup(&["e5"], &[]);
        state.moves_left = 0;
        assert!(!legal_turn_exists(&state));
    }
}
