#![cfg(feature = "demo")]

use margrites::game::state::StateSnapshot;
use margrites::game::GameStatus::{self, Over};
use margrites::{Game, GameState, Side, Step, Tile};
use std::io::stdin;
use std::str::FromStr;

const DEMO_BLACK: [&str; 9] = ["a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2", "i2"];
const DEMO_WHITE: [&str; 9] = ["a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7", "i7"];

enum Command {
    Steps(Vec<Step>),
    Undo,
    List,
    Quit
}

fn input(prompt: &str) -> std::io::Result<String> {
    println!("{prompt}");
    let mut s: String = String::new();
    stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn parse_command(s: &str) -> Result<Command, margrites::error::ParseError> {
    match s {
        "undo" => Ok(Command::Undo),
        "?" => Ok(Command::List),
        "quit" => Ok(Command::Quit),
        _ => s.split_whitespace()
            .map(Step::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(Command::Steps)
    }
}

fn get_command() -> Command {
    loop {
        match input("Enter your steps (eg, \"e2-e3 e3-e4\"), \"?\" to list legal steps, \"undo\" or \"quit\":") {
            Ok(s) if s.is_empty() => println!("No steps given. Try again."),
            Ok(s) => match parse_command(&s) {
                Ok(command) => return command,
                Err(e) => println!("Invalid step ({e}). Try again.")
            },
            Err(_) => println!("Error reading input. Try again.")
        }
    }
}

fn demo_state() -> Result<GameState, Box<dyn std::error::Error>> {
    let black = DEMO_BLACK.iter().map(|s| Tile::from_str(s)).collect::<Result<Vec<_>, _>>()?;
    let white = DEMO_WHITE.iter().map(|s| Tile::from_str(s)).collect::<Result<Vec<_>, _>>()?;
    Ok(GameState::from_setup(&black, &white, Side::Black)?)
}

/// Load a JSON-encoded [`StateSnapshot`] from `path`.
fn load_state(path: &str) -> Result<GameState, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    let snapshot: StateSnapshot = serde_json::from_str(&json)?;
    Ok(GameState::try_from(snapshot)?)
}

/// Play the given steps. At the start of a turn they are played atomically as a whole turn;
/// part-way through a turn they are made one at a time, stopping at the first bad one.
fn play_steps(game: &mut Game, steps: &[Step]) -> Result<GameStatus, Box<dyn std::error::Error>> {
    if game.state.at_turn_start() {
        return Ok(game.do_turn(steps)?)
    }
    let mut status = game.status();
    for &step in steps {
        status = game.do_step(step)?;
    }
    Ok(status)
}

/// Undo back to the start of the most recent turn.
fn undo_turn(game: &mut Game) {
    loop {
        game.undo_last_step();
        if game.state.at_turn_start() || game.state_history.is_empty() {
            return
        }
    }
}

fn main() {
    println!("margrites demo");
    let state = match std::env::args().nth(1) {
        Some(path) => load_state(&path),
        None => demo_state()
    };
    let mut game = match state {
        Ok(state) => Game::new(state),
        Err(e) => {
            eprintln!("Could not create game: {e}");
            std::process::exit(1)
        }
    };
    if let Over(result) = game.status() {
        println!("Game over. {result}.");
        return
    }
    loop {
        println!("{}", game.state);
        match get_command() {
            Command::Quit => {
                match serde_json::to_string(&game.state.snapshot()) {
                    Ok(json) => println!("{json}"),
                    Err(e) => eprintln!("Could not save game: {e}")
                }
                return
            },
            Command::Undo => undo_turn(&mut game),
            Command::List => {
                let steps = game.legal_steps().iter().map(Step::to_string).collect::<Vec<_>>();
                println!("Legal steps: {}", steps.join(" "));
            },
            Command::Steps(steps) => {
                let recorded = game.step_history.len();
                let status = play_steps(&mut game, &steps);
                for record in &game.step_history[recorded..] {
                    println!("{}: {record}", record.side);
                }
                match status {
                    Ok(Over(result)) => {
                        println!("Game over. {result}.");
                        println!("Final board:");
                        println!("{}", game.state.board);
                        return
                    },
                    Ok(_) => {},
                    Err(e) => println!("Invalid turn ({e}). Try again.")
                }
            }
        }
    }
}
