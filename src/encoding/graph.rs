use itertools::Itertools;
use varisat::Lit;

use crate::encoding::{ensure_derived, forbid_crossings, reach, Connectivity, Encoder};
use crate::error::Result;
use crate::logic::{IntVar, Session};
use crate::puzzle::{Puzzle, Weight, MAX_WEIGHT};

/// One integer variable per candidate bridge, in candidate order.
pub(crate) struct GraphEncoder {
    weights: Vec<IntVar>,
}

impl Encoder for GraphEncoder {
    /// # Logical setup
    /// Let the candidate bridges be `x_0 .. x_{B-1}`.
    ///
    /// ## Bridges
    /// Every `x_i` takes exactly one value in `0..=2`; it is built when that value is not 0.
    /// For every horizontal `x_i` and vertical `x_j` whose spans cross, not both are built.
    ///
    /// ## Islands
    /// The `x_i` touching an island sum to its value.
    ///
    /// ## Connectivity
    /// See [`reach::connect`].
    fn encode(puzzle: &Puzzle, session: &mut Session, connectivity: Connectivity) -> Result<Self> {
        ensure_derived(puzzle)?;

        let weights = (0..puzzle.bridges().len())
            .map(|i| session.declare_int(format!("bridge_{i}"), MAX_WEIGHT as usize))
            .collect_vec();
        let built: Vec<Lit> = weights.iter()
            .map(|weight| !weight.equals(0).expect("0 is in every weight domain"))
            .collect();

        forbid_crossings(puzzle, session, &built);

        for (id, island) in puzzle.islands().iter().enumerate() {
            let terms = puzzle.candidate_bridges_from(id)
                .map(|(index, _)| weights[index].term())
                .collect_vec();
            session.sum_equals(&terms, island.value as usize);
        }

        reach::connect(puzzle, session, &built, connectivity);

        Ok(Self { weights })
    }

    fn forbid_current(&self, puzzle: &Puzzle, session: &mut Session) {
        let current = self.weights.iter()
            .zip(puzzle.bridges())
            .map(|(var, bridge)| var.equals(bridge.weight as usize))
            .collect::<Option<Vec<Lit>>>();

        // a weight outside the domain already differs from every model
        if let Some(current) = current {
            session.add_clause(&current.into_iter().map(|lit| !lit).collect_vec());
        }
    }

    fn decode(&self, _puzzle: &Puzzle, session: &Session) -> Vec<Weight> {
        self.weights.iter()
            .map(|var| session.int_value(var).unwrap_or_default() as Weight)
            .collect()
    }
}
