#![warn(missing_docs)]

//! # `archipelago`
//!
//! A solver and generator for [Hashiwokakero](https://en.wikipedia.org/wiki/Hashiwokakero) ("bridges") puzzles.
//! Parse a puzzle from its one-line ID with [`decode`] (or [`str::parse`]), then call [`solve()`](crate::Puzzle::solve),
//! consuming the puzzle and yielding a copy with every bridge weight assigned.
//! To make new puzzles with exactly one solution, configure a [`Generator`] with a [`GeneratorConfig`].
//!
//! # Internals
//! Like most modern approaches, this crate expresses the puzzle as a Boolean satisfiability problem, hands it to
//! [`varisat`], and reads the bridges back from the model.
//!
//! Islands live in a row-major sorted arena and every pair of islands that could be joined becomes a candidate
//! bridge. Two encodings of the rules are available through [`Strategy`]:
//!
//! 1. [`Strategy::Graph`]: one integer in `0..=2` per candidate bridge. Degrees are sums over bridges and crossing
//! is forbidden for each pair of candidates which would cross.
//! 2. [`Strategy::Grid`]: one six-valued variable per cell (a [`Piece`]). Bridges are runs of identical pieces ending
//! at islands, so crossings cannot even be expressed.
//!
//! Both then require the built bridges to connect every island, by unrolling "reachable in at most `k` steps" up to
//! the number of islands.
//!
//! Uniqueness is checked by solving again with the known solution forbidden: the puzzle is unique exactly when that
//! second query is unsatisfiable.

pub use cell::Piece;
pub use codec::{decode, encode};
pub use encoding::{Connectivity, Strategy};
pub use error::{ConfigError, Error, Result};
pub use generator::{Exhaustion, Generated, Generator, GeneratorConfig, Status};
pub use location::{Axis, Coord, Dimension, Direction, Location};
pub use puzzle::{Bridge, Island, IslandId, Puzzle, Weight, MAX_WEIGHT};
pub use solve::{Outcome, SolveOptions};
pub use verify::Violation;

pub(crate) mod location;
pub(crate) mod puzzle;
pub(crate) mod cell;
mod render;
pub mod codec;
pub(crate) mod logic;
pub(crate) mod encoding;
pub(crate) mod solve;
pub(crate) mod verify;
pub mod generator;
pub(crate) mod error;
#[cfg(feature = "wasm")]
pub mod wasm;
mod tests;
