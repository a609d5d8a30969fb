use crate::error::ParseError;
use crate::error::ParseError::BadString;
use crate::pieces::{PlacedPiece, Side};
use crate::tiles::Tile;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A single step by one piece: either to a neighbouring tile, or off the board from the side's
/// scoring row.
///
/// Legality is decided by structural equality against the output of
/// [`crate::game::logic::legal_steps`], so a `Score` step carries the side whose sentinel it
/// uses: `e8-B++` and `e8-W++` are different steps.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Move the piece at `from` to the empty tile `to`.
    Move { from: Tile, to: Tile },
    /// Remove the piece at `from` from the board and score a point for `side`.
    Score { from: Tile, side: Side },
}

impl Step {

    /// Create a step moving a piece between two tiles.
    pub fn new(from: Tile, to: Tile) -> Self {
        Step::Move { from, to }
    }

    /// Create a scoring step for the given side's piece at `from`.
    pub fn score(from: Tile, side: Side) -> Self {
        Step::Score { from, side }
    }

    /// The tile the stepping piece starts from.
    pub fn from(&self) -> Tile {
        match self {
            Step::Move { from, .. } | Step::Score { from, .. } => *from
        }
    }

    /// The destination tile, or `None` for a scoring step.
    pub fn to(&self) -> Option<Tile> {
        match self {
            Step::Move { to, .. } => Some(*to),
            Step::Score { .. } => None
        }
    }

    pub fn is_score(&self) -> bool {
        matches!(self, Step::Score { .. })
    }
}

impl FromStr for Step {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split('-').collect();
        if tokens.len() != 2 {
            return Err(BadString(String::from(s)))
        };
        let from = Tile::from_str(tokens[0])?;
        if let Some(side) = Side::from_scoring_notation(tokens[1]) {
            Ok(Step::score(from, side))
        } else {
            Ok(Step::new(from, Tile::from_str(tokens[1])?))
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Move { from, to } => write!(f, "{from}-{to}"),
            Step::Score { from, side } => write!(f, "{from}-{}", side.scoring_notation())
        }
    }
}

/// A record of a single step.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// The side that made the step.
    pub side: Side,
    /// The step itself.
    pub step: Step,
    /// Pieces removed by capture as a consequence of the step, in the order they were removed.
    pub captures: Vec<PlacedPiece>,
    /// Whether the step ended the side's turn.
    pub ended_turn: bool,
}

impl Display for StepRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.step)?;
        if !self.captures.is_empty() {
            write!(f, "x{}",
                self.captures.iter().map(|p|
                    p.tile.to_string()).collect::<Vec<_>>().join("/"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError::{BadChar, BadString, OutOfBounds};
    use crate::error::BoardError;
    use crate::pieces::Side::{Black, White};
    use crate::pieces::PlacedPiece;
    use crate::step::{Step, StepRecord};
    use crate::tiles::{Coords, Tile};
    use std::str::FromStr;
    use test_case::test_case;

    fn t(s: &str) -> Tile {
        Tile::from_str(s).unwrap()
    }

    #[test_case("e5-e6", Step::new(t("e5"), t("e6")); "move up")]
    #[test_case("a1-b2", Step::new(t("a1"), t("b2")); "diagonal")]
    #[test_case("e8-B++", Step::score(t("e8"), Black); "black scores")]
    #[test_case("c1-W++", Step::score(t("c1"), White); "white scores")]
    fn test_parsing_steps(s: &str, expected: Step) {
        assert_eq!(Step::from_str(s), Ok(expected));
        assert_eq!(expected.to_string(), s);
    }

    #[test]
    fn test_bad_step_strings() {
        assert_eq!(Step::from_str("e5"), Err(BadString(String::from("e5"))));
        assert_eq!(Step::from_str("e5-e6-e7"), Err(BadString(String::from("e5-e6-e7"))));
        assert_eq!(Step::from_str("e5-X++"), Err(crate::error::ParseError::BadStringLen(3)));
        assert_eq!(Step::from_str("!5-e6"), Err(BadChar('!')));
        assert_eq!(
            Step::from_str("e5-e9"),
            Err(OutOfBounds(BoardError::OutOfBounds(Coords::new(-1, 4))))
        );
    }

    #[test]
    fn test_score_steps_differ_by_side() {
        assert_ne!(Step::score(t("e8"), Black), Step::score(t("e8"), White));
        assert!(Step::score(t("e8"), Black).is_score());
        assert_eq!(Step::score(t("e8"), Black).to(), None);
        assert_eq!(Step::new(t("d5"), t("d6")).to(), Some(t("d6")));
        assert_eq!(Step::new(t("d5"), t("d6")).from(), t("d5"));
    }

    #[test]
    fn test_record_display() {
        let record = StepRecord {
            side: Black,
            step: Step::new(t("d5"), t("d6")),
            captures: vec![PlacedPiece::new(t("e6"), White), PlacedPiece::new(t("e7"), White)],
            ended_turn: false
        };
        assert_eq!(record.to_string(), "d5-d6xe6/e7");
    }
}
