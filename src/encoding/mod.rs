//! Translations of a [`Puzzle`] into constraints on a [`Session`].
//!
//! There are two interchangeable schemes, selected with [`Strategy`]:
//!
//! * [`Strategy::Graph`] gives every candidate bridge an integer variable in `0..=2`.
//! Crossing is forbidden pairwise and an island's value is the sum of its bridges.
//! * [`Strategy::Grid`] gives every cell a six-valued variable (see [`Piece`](crate::Piece)).
//! Bridges become runs of identical pieces capped by islands, crossing is impossible by construction, and an island's
//! value is the sum of the pieces pointing at it.
//!
//! Both add the same bounded reachability unrolling on top, phrased over a per-bridge "built" literal.

use strum::{Display, EnumString, VariantArray};
use varisat::Lit;

use crate::error::{Error, Result};
use crate::logic::Session;
use crate::puzzle::{Puzzle, Weight};

pub(crate) mod graph;
pub(crate) mod grid;
pub(crate) mod reach;

pub(crate) use graph::GraphEncoder;
pub(crate) use grid::GridEncoder;

/// Which variable scheme to encode a puzzle with.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Display, EnumString, VariantArray)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Strategy {
    /// One integer variable per candidate bridge.
    #[default]
    Graph,
    /// One variable per grid cell.
    Grid,
}

/// How connectivity of the built bridges is expressed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Display, EnumString, VariantArray)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Connectivity {
    /// Every island is reachable from the first island.
    #[default]
    Rooted,
    /// Every island is reachable from every other island. Quadratically more variables.
    AllPairs,
}

/// A variable scheme for puzzles. Implementations enumerate candidate bridges in the puzzle's own order, so decoded
/// weights can be applied positionally.
pub(crate) trait Encoder: Sized {
    /// Add every rule of the puzzle to `session`.
    fn encode(puzzle: &Puzzle, session: &mut Session, connectivity: Connectivity) -> Result<Self>;

    /// Forbid the assignment currently held in `puzzle`'s bridge weights.
    fn forbid_current(&self, puzzle: &Puzzle, session: &mut Session);

    /// Positional bridge weights from the session's model.
    fn decode(&self, puzzle: &Puzzle, session: &Session) -> Vec<Weight>;
}

pub(crate) fn ensure_derived(puzzle: &Puzzle) -> Result<()> {
    if puzzle.is_derived() {
        Ok(())
    } else {
        Err(Error::StaleCandidates)
    }
}

/// Assert that no horizontal and vertical bridge which would cross are both built.
pub(crate) fn forbid_crossings(puzzle: &Puzzle, session: &mut Session, built: &[Lit]) {
    for (i, h) in puzzle.bridges().iter().enumerate() {
        for (j, v) in puzzle.bridges().iter().enumerate() {
            if puzzle.crosses(h, v) && i < j {
                session.implies(built[i], !built[j]);
            }
        }
    }
}
