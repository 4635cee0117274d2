use thiserror::Error;

/// Reasons a canonical puzzle ID is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No `:` between header and body.
    #[error("missing ':' between header and body")]
    MissingSeparator,
    /// The header is not of the form `<w>x<h>m<max>`.
    #[error("malformed header {0:?}")]
    MalformedHeader(String),
    /// Puzzles which disallow loops (header ending in `L`) are not supported.
    #[error("loop-prohibiting puzzles are not supported")]
    LoopsProhibited,
    /// Only a maximum bridge weight of 2 is supported.
    #[error("maximum bridge weight must be 2, found {0}")]
    UnsupportedMaxWeight(String),
    /// Only square fields are supported.
    #[error("field must be square, found {width}x{height}")]
    NotSquare {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
    },
    /// A field with no cells.
    #[error("field size must be positive")]
    EmptyField,
    /// The body contained something other than a letter or digit.
    #[error("invalid character {0:?} in puzzle body")]
    InvalidCharacter(char),
    /// The body describes more cells than the field has.
    #[error("puzzle body overruns a field of {cells} cells")]
    Overrun {
        /// Cells in the field.
        cells: usize,
    },
}

/// Errors surfaced by solving and generation.
///
/// An unsatisfiable query is not an error; see [`Outcome`](crate::Outcome).
#[derive(Debug, Error)]
pub enum Error {
    /// The puzzle ID could not be read.
    #[error("invalid puzzle: {0}")]
    Config(#[from] ConfigError),
    /// A model or assignment did not line up with the candidate bridges.
    #[error("expected {expected} bridge weights, got {actual}")]
    SizeMismatch {
        /// Number of candidate bridges.
        expected: usize,
        /// Number of weights given.
        actual: usize,
    },
    /// Candidate bridges were not re-derived after the islands changed.
    #[error("candidate bridges are stale; call derive_candidate_bridges first")]
    StaleCandidates,
    /// The SAT engine itself failed.
    #[error("solver session failed: {0}")]
    Solver(String),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
