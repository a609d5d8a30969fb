/// Fixed facts about the board: its dimensions and which tiles touch which.
pub mod geometry;

/// Placement of pieces on the board.
pub mod state;
