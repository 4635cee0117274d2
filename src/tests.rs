#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use proptest::prelude::*;
    use strum::VariantArray;

    use crate::{Connectivity, Error, Generator, GeneratorConfig, Location, Outcome, Puzzle, SolveOptions, Status, Strategy};

    const PUZZLES: [&str; 9] = [
        "3x3m2:2a2c2a2",
        "7x7m2:4d2b1b4a26b3m1c3c3c2d3",
        "7x7m2:a4d32a4b3b3g4a2c2c3g13d2a",
        "15x15m2:2d4c4b5a4g1e2b2a4a6e2j2f4h2g1y2c2a5g4a3s4t3a3a2d2l1c3b3c2o1a2f4d4a3",
        "15x15m2:3h4i1a3a2b3b2b2d2e2l2e6a5a2b4c3t2a1b2b1d4d5f34i3b2p6m4a1b1c5c4r2f5b2c4k6a3",
        "15x15m2:4c5b5a5d3j3a3g2s2d5b3a4a7a6b4c2f2l2b1b1c3c1o3a6b3b3c2e3c2i4g5b5a2b3d5b1e3c1c2c1a5f42a2a4g2b",
        "30x30m2:a4z4c2a4r5a4a2b2zi4o2e3a4ze3zm2zzzzzd2zb1zd1zzs1b5e4m4v2zj2zb6b7a5k4zp6a3a2b4g1za2m3b2a1a3a2v4c5c5e5a1n1z2f1b3i4a3a2g3o1h1e2b2n1c4b4b14b3d3a1e2a2k",
        "30x30m2:3r4a3d2a1b4d3a1a1e5a2c1a4d3ze5n4b2e3b3za2d3g5i3zo2c3b2b2zk1j5h6a4t1k1d1zy4b4d3i2i2v4h8a3k1c2zf1e2b4a1g1g44w5a5h2o3za1ze2d5a4zd3z3c2r6a5a2h1a4m2k3b2f2e4b6c2g3b4d4n4ze3a4b4b3b1a5c3h1g2w5d3",
        "30x30m2:3a2d3a3a3h4g3b3a4a6r4b3a2f1p3a2g3a6h3d3a1i1zg2b1p3e3a6f1r3ze2zf3r5i4u2a4c3b4e4c2n3zg6s6g3zn4e6d4zs2b6e6c2h3a4t4b3x1b1g2n1zj2a2e5r5a6c2e1g4e4d3k4a4c2n3b42n2b4a1b3k4f7k4a6a4d4e4a1a2b3d4c2z1c2b1a2a3b2b5b6h4f3a",
    ];

    fn solve(id: &str, options: impl Into<SolveOptions>) -> Puzzle {
        let puzzle: Puzzle = id.parse().unwrap();
        puzzle.solve(options).unwrap().solution().unwrap()
    }

    fn built(puzzle: &Puzzle) -> HashSet<(Location, Location, u8)> {
        puzzle.built_bridges()
            .map(|(_, bridge)| (puzzle.location_of(bridge.a), puzzle.location_of(bridge.b), bridge.weight))
            .collect()
    }

    #[test]
    fn ids_round_trip() {
        for id in PUZZLES {
            let puzzle: Puzzle = id.parse().unwrap();
            assert_eq!(puzzle.to_id(), id);
        }
    }

    #[test]
    fn render_unsolved() {
        let puzzle: Puzzle = "3x3m2:2a2c2a2".parse().unwrap();
        assert_eq!(format!("{}", puzzle), "2 2\n   \n2 2\n");
    }

    #[test]
    fn solve_most_basic() {
        for strategy in Strategy::VARIANTS {
            let solved = solve("3x3m2:2a2c2a2", *strategy);

            assert_eq!(format!("{}", solved), "2─2
| |
2─2
");
            assert!((0..4).all(|island| solved.degree_of(island) == 2));
            assert!(solved.is_solved());
        }

        assert_eq!(
            built(&solve("3x3m2:2a2c2a2", Strategy::Graph)),
            built(&solve("3x3m2:2a2c2a2", Strategy::Grid)),
        );
    }

    #[test]
    fn solve_all_pairs() {
        let options = SolveOptions::default().with_connectivity(Connectivity::AllPairs);
        for strategy in Strategy::VARIANTS {
            let solved = solve("3x3m2:2a2c2a2", options.with_strategy(*strategy));
            assert!(solved.is_solved());
        }
    }

    #[test]
    fn uniqueness_all_pairs() {
        let options = SolveOptions::default().with_connectivity(Connectivity::AllPairs);
        for strategy in Strategy::VARIANTS {
            let options = options.with_strategy(*strategy);

            let solved = solve("3x3m2:2a2c2a2", options);
            assert!(solved.is_unique(options).unwrap());

            let solved = solve("3x3m2:3a3c3a3", options);
            assert!(!solved.is_unique(options).unwrap());
        }
    }

    #[test]
    fn generate_all_pairs() {
        let config = GeneratorConfig::default()
            .with_islands(5)
            .with_connectivity(Connectivity::AllPairs);
        let generated = Generator::seeded(config, 5).generate().unwrap();

        assert_eq!(generated.puzzle.dimension(), config.size);
        assert!(generated.solution.is_solved());
        assert!(generated.solution.is_unique(config.options()).unwrap());
        // rooted and all-pairs connectivity accept the same solutions
        assert!(generated.solution.is_unique(Strategy::Graph).unwrap());
    }

    #[test]
    fn solve_seven_by_seven() {
        for id in &PUZZLES[1..3] {
            let solved = solve(id, Strategy::Graph);
            assert!(solved.is_solved(), "{id}:\n{solved}");
            assert!(solved.is_unique(Strategy::Graph).unwrap());
            assert_eq!(solved.to_id(), *id);
        }
    }

    #[test]
    fn solve_fifteen_by_fifteen() {
        let solved = solve(PUZZLES[3], Strategy::Graph);
        assert!(solved.is_solved(), "{solved}");
    }

    #[test]
    fn no_solution() {
        for strategy in Strategy::VARIANTS {
            // odd total degree
            let puzzle: Puzzle = "3x3m2:2a2c2a3".parse().unwrap();
            assert_eq!(puzzle.solve(*strategy).unwrap(), Outcome::NoSolution);

            // degrees only work out as two separate pairs
            let puzzle: Puzzle = "5x5m2:1a1h1i1c".parse().unwrap();
            assert_eq!(puzzle.bridges().len(), 2);
            assert_eq!(puzzle.solve(*strategy).unwrap(), Outcome::NoSolution);
        }
    }

    #[test]
    fn uniqueness() {
        for strategy in Strategy::VARIANTS {
            // the only connected assignment is a ring of single bridges
            let solved = solve("3x3m2:2a2c2a2", *strategy);
            assert!(solved.is_unique(*strategy).unwrap());

            // single and double bridges alternate around the ring, either way round
            let solved = solve("3x3m2:3a3c3a3", *strategy);
            assert!(solved.is_solved());
            assert!(!solved.is_unique(*strategy).unwrap());
        }
    }

    #[test]
    fn stale_candidates() {
        let mut puzzle = Puzzle::new(NonZero::new(5).unwrap());
        puzzle.add_island(Location(0, 0), 1);
        puzzle.add_island(Location(0, 3), 1);
        assert!(matches!(puzzle.clone().solve(Strategy::Graph), Err(Error::StaleCandidates)));
        assert!(matches!(puzzle.is_unique(Strategy::Grid), Err(Error::StaleCandidates)));

        puzzle.derive_candidate_bridges();
        let solved = puzzle.solve(Strategy::Grid).unwrap().solution().unwrap();
        assert_eq!(format!("{}", solved), "1──1 \n     \n     \n     \n     \n");
    }

    #[test]
    fn generator_is_deterministic() {
        let config = GeneratorConfig::default().with_islands(6);
        let first = Generator::seeded(config, 42).generate().unwrap();
        let second = Generator::seeded(config, 42).generate().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.puzzle.to_id(), second.puzzle.to_id());
    }

    #[test]
    fn generated_puzzles_solve_back() {
        for strategy in Strategy::VARIANTS {
            let config = GeneratorConfig::default().with_islands(6).with_strategy(*strategy);
            let generated = Generator::seeded(config, 7).generate().unwrap();

            assert!(generated.solution.is_solved());
            assert!(generated.puzzle.built_bridges().next().is_none());
            let solution = generated.puzzle.clone().solve(*strategy).unwrap().solution().unwrap();
            assert_eq!(solution, generated.solution);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn generated_puzzles_are_unique(seed in any::<u64>(), islands in 2usize..7) {
            let config = GeneratorConfig::default().with_islands(islands);
            let generated = Generator::seeded(config, seed).generate().unwrap();

            prop_assert!(generated.solution.is_solved());
            prop_assert!(generated.solution.is_unique(config.options()).unwrap());
            prop_assert_eq!(generated.puzzle.islands(), generated.solution.islands());
            if generated.status == Status::Complete {
                prop_assert_eq!(generated.solution.islands().len(), islands);
            }
        }
    }
}
