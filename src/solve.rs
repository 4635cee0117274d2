use tracing::debug;

use crate::encoding::{Connectivity, Encoder, GraphEncoder, GridEncoder, Strategy};
use crate::error::Result;
use crate::logic::Session;
use crate::puzzle::Puzzle;

/// How to phrase a puzzle for the SAT engine.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SolveOptions {
    /// Variable scheme.
    pub strategy: Strategy,
    /// Form of the connectivity constraint.
    pub connectivity: Connectivity,
}

impl SolveOptions {
    /// Use `strategy`.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use `connectivity`.
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }
}

impl From<Strategy> for SolveOptions {
    fn from(strategy: Strategy) -> Self {
        Self::default().with_strategy(strategy)
    }
}

/// Result of a satisfiability query on a puzzle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The input with every candidate weight assigned.
    Solved(Puzzle),
    /// The rules cannot all hold at once.
    NoSolution,
}

impl Outcome {
    /// The solved puzzle, if there is one.
    pub fn solution(self) -> Option<Puzzle> {
        match self {
            Self::Solved(puzzle) => Some(puzzle),
            Self::NoSolution => None,
        }
    }

    /// Whether a solution was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

impl Puzzle {
    /// Solve the puzzle, consuming it and yielding a copy with bridge weights assigned.
    ///
    /// Candidate bridges must be current (see [`Puzzle::derive_candidate_bridges`]). Weights already present are
    /// ignored and overwritten.
    pub fn solve(self, options: impl Into<SolveOptions>) -> Result<Outcome> {
        let options = options.into();
        match options.strategy {
            Strategy::Graph => solve_with::<GraphEncoder>(self, options.connectivity),
            Strategy::Grid => solve_with::<GridEncoder>(self, options.connectivity),
        }
    }

    /// Whether the weights currently assigned are the only solution.
    ///
    /// This asks for a solution differing from the current one; the current weights themselves are not validated
    /// (see [`Puzzle::is_solved`] for that).
    pub fn is_unique(&self, options: impl Into<SolveOptions>) -> Result<bool> {
        let options = options.into();
        match options.strategy {
            Strategy::Graph => unique_with::<GraphEncoder>(self, options.connectivity),
            Strategy::Grid => unique_with::<GridEncoder>(self, options.connectivity),
        }
    }
}

fn solve_with<E: Encoder>(mut puzzle: Puzzle, connectivity: Connectivity) -> Result<Outcome> {
    let mut session = Session::new();
    let encoder = E::encode(&puzzle, &mut session, connectivity)?;

    if !session.check()? {
        debug!(islands = puzzle.islands().len(), "no solution");
        return Ok(Outcome::NoSolution);
    }

    let weights = encoder.decode(&puzzle, &session);
    puzzle.apply_weights(&weights)?;
    Ok(Outcome::Solved(puzzle))
}

fn unique_with<E: Encoder>(puzzle: &Puzzle, connectivity: Connectivity) -> Result<bool> {
    let mut session = Session::new();
    let encoder = E::encode(puzzle, &mut session, connectivity)?;
    encoder.forbid_current(puzzle, &mut session);

    let another = session.check()?;
    debug!(islands = puzzle.islands().len(), unique = !another, "uniqueness checked");
    Ok(!another)
}
