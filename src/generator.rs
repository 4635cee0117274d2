//! Growing puzzles with exactly one solution.
//!
//! The generator keeps a working puzzle whose bridge list holds only the bridges it placed itself. Each round grows
//! it by one island, then checks that the bare puzzle (islands and values only) still has the working bridges as its
//! only solution. Rounds that break uniqueness are rolled back.

use std::num::NonZero;

use rand::prelude::*;
use strum::VariantArray;
use tracing::{debug, info, trace, warn};

use crate::encoding::{Connectivity, Strategy};
use crate::error::Result;
use crate::location::{Dimension, Direction, Location};
use crate::puzzle::{IslandId, Puzzle, Weight, MAX_WEIGHT};
use crate::solve::SolveOptions;

const DEFAULT_SIZE: Dimension = match NonZero::new(7) {
    Some(size) => size,
    None => unreachable!(),
};

/// Closest a new island may be placed to the border, in cells.
const BORDER_MARGIN: usize = 2;
/// Nearest island that way must be at least this far for a direction to be usable.
const ISLAND_CLEARANCE: usize = 4;
/// Nearest crossing bridge that way must be at least this far for a direction to be usable.
const BRIDGE_CLEARANCE: usize = 3;

/// Parameters of a [`Generator`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GeneratorConfig {
    /// Side length of the field.
    pub size: Dimension,
    /// Number of islands to grow to.
    pub islands: usize,
    /// Variable scheme for uniqueness checks.
    pub strategy: Strategy,
    /// Form of the connectivity constraint for uniqueness checks.
    pub connectivity: Connectivity,
    /// Consecutive rounds without a legal placement before giving up.
    pub max_placement_attempts: usize,
    /// Consecutive rounds breaking uniqueness before giving up.
    pub max_uniqueness_failures: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            islands: 8,
            strategy: Strategy::default(),
            connectivity: Connectivity::default(),
            max_placement_attempts: 1000,
            max_uniqueness_failures: 1000,
        }
    }
}

impl GeneratorConfig {
    /// Use a field of side `size`.
    pub fn with_size(mut self, size: Dimension) -> Self {
        self.size = size;
        self
    }

    /// Grow to `islands` islands.
    pub fn with_islands(mut self, islands: usize) -> Self {
        self.islands = islands;
        self
    }

    /// Check uniqueness with `strategy`.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check uniqueness with `connectivity`.
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Give up after `attempts` consecutive failed placements.
    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Self {
        self.max_placement_attempts = attempts;
        self
    }

    /// Give up after `failures` consecutive placements breaking uniqueness.
    pub fn with_max_uniqueness_failures(mut self, failures: usize) -> Self {
        self.max_uniqueness_failures = failures;
        self
    }

    /// The solve options uniqueness checks run with.
    pub fn options(&self) -> SolveOptions {
        SolveOptions::default()
            .with_strategy(self.strategy)
            .with_connectivity(self.connectivity)
    }
}

/// Which limit stopped a generator short of its island goal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Exhaustion {
    /// No legal place for another island was found.
    Placement,
    /// Every recent placement admitted a second solution.
    Uniqueness,
}

/// How a generator run ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Status {
    /// The island goal was reached.
    Complete,
    /// Generation stopped early; the result is smaller than requested but still uniquely solvable.
    Exhausted(Exhaustion),
}

/// A finished generator run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
    /// The puzzle to hand out: islands and values, every candidate weight 0.
    pub puzzle: Puzzle,
    /// Its only solution.
    pub solution: Puzzle,
    /// Whether the island goal was reached.
    pub status: Status,
    /// Growth rounds run, successful or not.
    pub attempts: usize,
}

/// Grows uniquely solvable puzzles from a random source.
pub struct Generator<R: Rng> {
    config: GeneratorConfig,
    rng: R,
}

impl Generator<SmallRng> {
    /// A generator whose output depends only on `config` and `seed`.
    pub fn seeded(config: GeneratorConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    /// A generator drawing from `rng`.
    pub fn new(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// The parameters this generator runs with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the generator to completion or exhaustion.
    pub fn generate(&mut self) -> Result<Generated> {
        let size = self.config.size.get();
        let mut working = Puzzle::new(self.config.size);
        let seed = Location(self.rng.random_range(0..size), self.rng.random_range(0..size));
        working.add_island(seed, 0);
        trace!(row = seed.row(), col = seed.col(), "seeded");

        let mut solution = working.to_bare();
        let mut placement_failures = 0;
        let mut uniqueness_failures = 0;
        let mut attempts = 0;

        let status = loop {
            if working.islands().len() >= self.config.islands {
                break Status::Complete;
            }
            if placement_failures >= self.config.max_placement_attempts {
                break Status::Exhausted(Exhaustion::Placement);
            }
            if uniqueness_failures >= self.config.max_uniqueness_failures {
                break Status::Exhausted(Exhaustion::Uniqueness);
            }

            attempts += 1;
            let snapshot = working.clone();
            if !self.grow(&mut working) {
                working = snapshot;
                placement_failures += 1;
                continue;
            }
            placement_failures = 0;

            match self.verify(&mut working)? {
                Some(verified) => {
                    uniqueness_failures = 0;
                    solution = verified;
                }
                None => {
                    debug!(islands = snapshot.islands().len(), uniqueness_failures, "rolled back");
                    working = snapshot;
                    uniqueness_failures += 1;
                }
            }
        };

        match status {
            Status::Complete => info!(islands = solution.islands().len(), attempts, "generated"),
            Status::Exhausted(reason) => {
                warn!(?reason, islands = solution.islands().len(), goal = self.config.islands, attempts, "generator exhausted")
            }
        }

        Ok(Generated { puzzle: solution.to_bare(), solution, status, attempts })
    }

    /// Try to add one island and its bridges. Returns `false` if no island could be placed.
    fn grow(&mut self, working: &mut Puzzle) -> bool {
        let source = self.rng.random_range(0..working.islands().len());
        let from = working.location_of(source);

        let directions = Direction::VARIANTS.iter()
            .filter_map(|direction| Some((*direction, room(working, source, *direction)?)))
            .collect::<Vec<_>>();
        let Some((direction, room)) = directions.choose(&mut self.rng).copied() else {
            return false;
        };

        let offset = BORDER_MARGIN + self.rng.random_range(0..room);
        let Some(target) = from.step(direction, offset, working.size()) else {
            return false;
        };
        let crowded = Direction::VARIANTS.iter()
            .filter_map(|neighbor| target.step(*neighbor, 1, working.size()))
            .any(|neighbor| working.island_at(neighbor).is_some());
        if crowded {
            trace!(row = target.row(), col = target.col(), "rejected next to an island");
            return false;
        }

        let weight = self.random_weight();
        let island = working.add_island(target, 0);
        // ids at or after the insertion point shifted up by one
        let source = if source >= island { source + 1 } else { source };
        if working.add_bridge(source, island, weight).is_none() {
            return false;
        }
        trace!(row = target.row(), col = target.col(), %direction, weight, "placed island");

        for extra in Direction::VARIANTS.iter().filter(|extra| **extra != direction.invert()) {
            let Some((other, distance)) = nearest_island(working, target, *extra) else { continue };
            let blocked = nearest_crossing(working, target, *extra).is_some_and(|crossing| crossing < distance);
            if blocked || working.bridge_between(island, other).is_some() {
                continue;
            }

            if self.rng.random_bool(0.5) {
                let weight = self.random_weight();
                if working.add_bridge(island, other, weight).is_some() {
                    trace!(to = other, direction = %extra, weight, "placed extra bridge");
                }
            }
        }

        true
    }

    fn random_weight(&mut self) -> Weight {
        self.rng.random_range(1..=MAX_WEIGHT)
    }

    /// Check the grown puzzle. On success, returns the bare puzzle with the placed weights, which is then its only
    /// solution.
    fn verify(&self, working: &mut Puzzle) -> Result<Option<Puzzle>> {
        working.recompute_values();
        let mut candidate = working.to_bare();

        let mut weights = vec![0; candidate.bridges().len()];
        for bridge in working.bridges() {
            match candidate.bridge_between(bridge.a, bridge.b) {
                Some(index) => weights[index] = bridge.weight,
                None => return Ok(None),
            }
        }
        candidate.apply_weights(&weights)?;

        if !candidate.is_solved() || !candidate.is_unique(self.config.options())? {
            return Ok(None);
        }
        Ok(Some(candidate))
    }
}

/// How many distinct offsets a new island may take from `source` in `direction`, or [`None`] if the direction is
/// closed.
fn room(puzzle: &Puzzle, source: IslandId, direction: Direction) -> Option<usize> {
    let from = puzzle.location_of(source);
    let size = puzzle.size();

    // the farthest offset keeps the new island on the field
    let border = match direction {
        Direction::North => from.row().checked_sub(BORDER_MARGIN - 1)?,
        Direction::South => size.checked_sub(BORDER_MARGIN + from.row())?,
        Direction::East => size.checked_sub(BORDER_MARGIN + from.col())?,
        Direction::West => from.col().checked_sub(BORDER_MARGIN - 1)?,
    };
    if border < 1 {
        return None;
    }

    let taken = puzzle.candidate_bridges_from(source)
        .filter_map(|(_, bridge)| bridge.other(source))
        .any(|other| Direction::towards(from, puzzle.location_of(other)) == Some(direction));
    if taken {
        return None;
    }

    let mut room = border;
    if let Some((_, distance)) = nearest_island(puzzle, from, direction) {
        if distance < ISLAND_CLEARANCE {
            return None;
        }
        room = room.min(distance - (ISLAND_CLEARANCE - 1));
    }
    if let Some(distance) = nearest_crossing(puzzle, from, direction) {
        if distance < BRIDGE_CLEARANCE {
            return None;
        }
        room = room.min(distance - (BRIDGE_CLEARANCE - 1));
    }

    Some(room)
}

fn nearest_island(puzzle: &Puzzle, from: Location, direction: Direction) -> Option<(IslandId, usize)> {
    (1..puzzle.size())
        .map_while(|distance| Some((from.step(direction, distance, puzzle.size())?, distance)))
        .find_map(|(location, distance)| Some((puzzle.island_at(location)?, distance)))
}

/// Distance to the nearest bridge piece that a bridge heading in `direction` would cross.
fn nearest_crossing(puzzle: &Puzzle, from: Location, direction: Direction) -> Option<usize> {
    let pieces = puzzle.pieces();
    let crossing = direction.axis().crosses();

    (1..puzzle.size())
        .map_while(|distance| Some((from.step(direction, distance, puzzle.size())?, distance)))
        .find(|(location, _)| pieces[location.as_index()].axis() == Some(crossing))
        .map(|(_, distance)| distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(size: usize) -> Puzzle {
        Puzzle::new(NonZero::new(size).unwrap())
    }

    #[test]
    fn border_closes_directions() {
        let mut puzzle = field(7);
        let corner = puzzle.add_island(Location(0, 0), 0);
        assert_eq!(room(&puzzle, corner, Direction::North), None);
        assert_eq!(room(&puzzle, corner, Direction::West), None);
        // offsets 2 ..= 6
        assert_eq!(room(&puzzle, corner, Direction::East), Some(5));
        assert_eq!(room(&puzzle, corner, Direction::South), Some(5));

        let mut puzzle = field(7);
        let centre = puzzle.add_island(Location(3, 3), 0);
        assert!(Direction::VARIANTS.iter().all(|direction| room(&puzzle, centre, *direction) == Some(2)));
    }

    #[test]
    fn islands_and_bridges_close_directions() {
        let mut puzzle = field(9);
        puzzle.add_island(Location(0, 0), 0);
        puzzle.add_island(Location(0, 3), 0);
        let source = puzzle.island_at(Location(0, 0)).unwrap();
        // the island 3 cells east is too close
        assert_eq!(room(&puzzle, source, Direction::East), None);

        let mut puzzle = field(9);
        let a = puzzle.add_island(Location(0, 0), 0);
        let b = puzzle.add_island(Location(0, 6), 0);
        puzzle.add_bridge(a, b, 1).unwrap();
        // the bridge already leaves that way
        assert_eq!(room(&puzzle, a, Direction::East), None);

        let mut puzzle = field(9);
        let a = puzzle.add_island(Location(0, 4), 0);
        let b = puzzle.add_island(Location(4, 4), 0);
        puzzle.add_bridge(a, b, 2).unwrap();
        let source = puzzle.add_island(Location(2, 0), 0);
        // a vertical bridge 4 cells east limits offsets to 2 ..= 3
        assert_eq!(room(&puzzle, source, Direction::East), Some(2));
    }

    #[test]
    fn single_island_goal_is_immediate() {
        let generated = Generator::seeded(GeneratorConfig::default().with_islands(1), 3).generate().unwrap();
        assert_eq!(generated.status, Status::Complete);
        assert_eq!(generated.attempts, 0);
        assert_eq!(generated.puzzle.islands().len(), 1);
    }

    #[test]
    fn tiny_fields_exhaust_placement() {
        let config = GeneratorConfig::default()
            .with_size(NonZero::new(2).unwrap())
            .with_islands(3)
            .with_max_placement_attempts(20);
        let generated = Generator::seeded(config, 11).generate().unwrap();
        assert_eq!(generated.status, Status::Exhausted(Exhaustion::Placement));
        assert_eq!(generated.attempts, 20);
        assert_eq!(generated.solution.islands().len(), 1);
    }
}
