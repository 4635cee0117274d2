use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;

use crate::puzzle::{IslandId, Puzzle};

/// A broken rule in an assignment of bridge weights.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Violation {
    /// The bridges at `island` do not add up to its value.
    Degree {
        /// The island.
        island: IslandId,
        /// Its value.
        expected: u32,
        /// Sum of its bridge weights.
        actual: u32,
    },
    /// Two built bridges, by index, cross each other.
    Crossing {
        /// Lower bridge index.
        first: usize,
        /// Higher bridge index.
        second: usize,
    },
    /// Only `reached` of `total` islands can be reached from the first one.
    Disconnected {
        /// Islands connected to the first one, itself included.
        reached: usize,
        /// Islands in the puzzle.
        total: usize,
    },
}

impl Puzzle {
    /// Check the current weights against the rules without involving the SAT engine.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = (0..self.islands().len())
            .filter_map(|island| {
                let expected = self.islands()[island].value as u32;
                let actual = self.degree_of(island);
                (expected != actual).then_some(Violation::Degree { island, expected, actual })
            })
            .collect_vec();

        violations.extend(self.built_bridges()
            .collect_vec()
            .into_iter()
            .tuple_combinations()
            .filter(|((_, h), (_, v))| self.crosses(h, v))
            .map(|((first, _), (second, _))| Violation::Crossing { first, second })
        );

        let total = self.islands().len();
        if total > 1 {
            let mut graph: UnGraphMap<IslandId, ()> = UnGraphMap::with_capacity(total, self.bridges().len());
            (0..total).for_each(|island| { graph.add_node(island); });
            self.built_bridges().for_each(|(_, bridge)| { graph.add_edge(bridge.a, bridge.b, ()); });

            let mut bfs = Bfs::new(&graph, 0);
            let mut reached = 0;
            while bfs.next(&graph).is_some() {
                reached += 1;
            }
            if reached != total {
                violations.push(Violation::Disconnected { reached, total });
            }
        }

        violations
    }

    /// Whether the current weights satisfy every rule.
    pub fn is_solved(&self) -> bool {
        self.violations().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_kind() {
        // a plus shape: the horizontal and vertical bridges cross in the middle
        let mut puzzle: Puzzle = "5x5m2:b1g1c1g1b".parse().unwrap();
        let weights = puzzle.bridges().iter().map(|_| 1).collect_vec();
        puzzle.apply_weights(&weights).unwrap();

        let violations = puzzle.violations();
        assert!(violations.contains(&Violation::Crossing { first: 0, second: 1 }));
        assert!(violations.contains(&Violation::Disconnected { reached: 2, total: 4 }));
        assert_eq!(violations.len(), 2);

        puzzle.reset_weights();
        let violations = puzzle.violations();
        assert!(violations.contains(&Violation::Disconnected { reached: 1, total: 4 }));
        assert_eq!(violations.iter().filter(|violation| matches!(violation, Violation::Degree { .. })).count(), 4);
    }

    #[test]
    fn square_is_solved() {
        let mut puzzle: Puzzle = "3x3m2:2a2c2a2".parse().unwrap();
        puzzle.apply_weights(&[1, 1, 1, 1]).unwrap();
        assert!(puzzle.is_solved());
    }
}
