use std::collections::HashSet;

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::error::{Error, Result};
use crate::location::{Axis, Coord, Dimension, Direction, Location};

/// Index of an island in the row-major sorted island arena of a [`Puzzle`].
pub type IslandId = usize;

/// Bridge multiplicity. 0 means the candidate is not built.
pub type Weight = u8;

/// The largest weight a single bridge may carry.
pub const MAX_WEIGHT: Weight = 2;

/// A numbered island. Two islands are equal if they occupy the same [`Location`], whatever their value.
#[derive(Clone, Copy, Debug)]
pub struct Island {
    location: Location,
    /// Required sum of incident bridge weights.
    pub value: u8,
}

impl Island {
    /// An island at `location` requiring `value`.
    pub fn new(location: Location, value: u8) -> Self {
        Self { location, value }
    }

    /// Where this island sits.
    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }
}

impl PartialEq for Island {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for Island {}

impl std::hash::Hash for Island {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.location.hash(state)
    }
}

/// A candidate bridge between two aligned islands with nothing in between.
///
/// `a` is always the upper/left endpoint, which is also the lower [`IslandId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bridge {
    /// Upper or left endpoint.
    pub a: IslandId,
    /// Lower or right endpoint.
    pub b: IslandId,
    /// Horizontal when the endpoints share a row.
    pub axis: Axis,
    /// Multiplicity, 0 when not built.
    pub weight: Weight,
}

impl Bridge {
    /// Whether the bridge carries any weight.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.weight > 0
    }

    /// Whether `island` is an endpoint.
    #[inline]
    pub fn touches(&self, island: IslandId) -> bool {
        self.a == island || self.b == island
    }

    /// The endpoint opposite `island`, or [`None`] if this bridge does not touch it.
    pub fn other(&self, island: IslandId) -> Option<IslandId> {
        if self.a == island {
            Some(self.b)
        } else if self.b == island {
            Some(self.a)
        } else {
            None
        }
    }

    pub(crate) fn ends(&self) -> UnorderedPair<IslandId> {
        UnorderedPair(self.a, self.b)
    }
}

/// A square field of islands together with the bridges between them.
///
/// Depending on the stage of its life the bridge list holds either the complete candidate set
/// (after [`Puzzle::derive_candidate_bridges`]) or just the bridges placed by the generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    size: Dimension,
    islands: Vec<Island>,
    bridges: Vec<Bridge>,
    derived: bool,
}

impl Puzzle {
    /// An empty field of `size` by `size` cells.
    pub fn new(size: Dimension) -> Self {
        Self {
            size,
            islands: Vec::new(),
            bridges: Vec::new(),
            derived: true,
        }
    }

    /// A field holding `islands`, with candidate bridges already derived.
    ///
    /// Islands outside the field are dropped, and of two islands at the same location the first wins.
    pub fn with_islands(size: Dimension, islands: impl IntoIterator<Item=Island>) -> Self {
        let mut islands = islands.into_iter()
            .filter(|island| island.location.0 < size.get() && island.location.1 < size.get())
            .collect_vec();
        islands.sort_by_key(Island::location);
        islands.dedup();

        let mut puzzle = Self { size, islands, bridges: Vec::new(), derived: false };
        puzzle.derive_candidate_bridges();
        puzzle
    }

    /// Side length of the field.
    #[inline]
    pub fn size(&self) -> Coord {
        self.size.get()
    }

    /// Side length of the field, as given to [`Puzzle::new`].
    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.size
    }

    /// Islands in row-major order; the index of each is its [`IslandId`].
    #[inline]
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// Bridges in candidate order.
    #[inline]
    pub fn bridges(&self) -> &[Bridge] {
        &self.bridges
    }

    /// Where `island` sits. Panics if there is no such island.
    #[inline]
    pub fn location_of(&self, island: IslandId) -> Location {
        self.islands[island].location
    }

    /// Whether the bridge list is the candidate set for the current islands.
    #[inline]
    pub fn is_derived(&self) -> bool {
        self.derived
    }

    /// The island at `location`, if any.
    pub fn island_at(&self, location: Location) -> Option<IslandId> {
        self.islands.binary_search_by_key(&location, Island::location).ok()
    }

    /// Insert an island, keeping the arena sorted. Bridge endpoints are renumbered accordingly.
    ///
    /// If an island already sits at `location` its value is left alone and its id is returned.
    pub fn add_island(&mut self, location: Location, value: u8) -> IslandId {
        match self.islands.binary_search_by_key(&location, Island::location) {
            Ok(existing) => existing,
            Err(position) => {
                self.islands.insert(position, Island::new(location, value));
                for bridge in self.bridges.iter_mut() {
                    if bridge.a >= position {
                        bridge.a += 1;
                    }
                    if bridge.b >= position {
                        bridge.b += 1;
                    }
                }
                self.derived = false;
                position
            }
        }
    }

    /// Add a bridge between two aligned islands, returning its index.
    ///
    /// Returns [`None`] if the islands are not aligned or a bridge between them already exists.
    pub fn add_bridge(&mut self, first: IslandId, second: IslandId, weight: Weight) -> Option<usize> {
        let axis = Axis::between(self.location_of(first), self.location_of(second))?;
        if self.bridge_between(first, second).is_some() {
            return None;
        }

        self.bridges.push(Bridge { a: first.min(second), b: first.max(second), axis, weight });
        self.derived = false;
        Some(self.bridges.len() - 1)
    }

    /// Index of the bridge joining `first` and `second`, in either order.
    pub fn bridge_between(&self, first: IslandId, second: IslandId) -> Option<usize> {
        let wanted = UnorderedPair(first, second);
        self.bridges.iter().position(|bridge| bridge.ends() == wanted)
    }

    /// All bridges touching `island`, regardless of weight, with their indices.
    pub fn candidate_bridges_from(&self, island: IslandId) -> impl Iterator<Item=(usize, &Bridge)> {
        self.bridges.iter()
            .enumerate()
            .filter(move |(_, bridge)| bridge.touches(island))
    }

    /// Built bridges with their indices.
    pub fn built_bridges(&self) -> impl Iterator<Item=(usize, &Bridge)> {
        self.bridges.iter()
            .enumerate()
            .filter(|(_, bridge)| bridge.is_built())
    }

    /// Add every geometrically legal bridge not already present.
    ///
    /// For each island in row-major order, the nearest island east on the same row and then the nearest island south
    /// in the same column. Because the arena is sorted, both are found scanning forward only.
    /// This order is the variable order of both encoders.
    pub fn derive_candidate_bridges(&mut self) {
        let mut present: HashSet<UnorderedPair<IslandId>> = self.bridges.iter().map(Bridge::ends).collect();

        for (id, island) in self.islands.iter().enumerate() {
            let later = self.islands.iter().enumerate().skip(id + 1);
            // row-major: if the next island is on another row there is nothing east
            let east = self.islands.get(id + 1)
                .filter(|next| next.location.0 == island.location.0)
                .map(|_| (id + 1, Axis::Horizontal));
            let south = later
                .filter(|(_, other)| other.location.1 == island.location.1)
                .map(|(other, _)| (other, Axis::Vertical))
                .next();

            for (other, axis) in east.into_iter().chain(south) {
                if present.insert(UnorderedPair(id, other)) {
                    self.bridges.push(Bridge { a: id, b: other, axis, weight: 0 });
                }
            }
        }

        self.derived = true;
    }

    /// Assign weights positionally, in candidate order.
    pub fn apply_weights(&mut self, weights: &[Weight]) -> Result<()> {
        if weights.len() != self.bridges.len() {
            return Err(Error::SizeMismatch { expected: self.bridges.len(), actual: weights.len() });
        }

        self.bridges.iter_mut()
            .zip(weights)
            .for_each(|(bridge, weight)| bridge.weight = *weight);
        Ok(())
    }

    /// Bridge weights in candidate order, the inverse of [`Puzzle::apply_weights`].
    pub fn weights(&self) -> Vec<Weight> {
        self.bridges.iter().map(|bridge| bridge.weight).collect()
    }

    /// Set every bridge weight to 0.
    pub fn reset_weights(&mut self) {
        self.bridges.iter_mut().for_each(|bridge| bridge.weight = 0);
    }

    /// Drop every bridge, leaving the islands.
    pub fn clear_bridges(&mut self) {
        self.bridges.clear();
        self.derived = self.islands.len() < 2;
    }

    /// Sum of the weights of bridges touching `island`.
    pub fn degree_of(&self, island: IslandId) -> u32 {
        self.candidate_bridges_from(island)
            .map(|(_, bridge)| bridge.weight as u32)
            .sum()
    }

    /// Set each island's value to its current degree.
    pub fn recompute_values(&mut self) {
        let degrees = (0..self.islands.len()).map(|id| self.degree_of(id)).collect_vec();
        for (island, degree) in self.islands.iter_mut().zip(degrees) {
            island.value = u8::try_from(degree).unwrap_or(u8::MAX);
        }
    }

    /// The bare puzzle: same islands and values, fresh candidate set with every weight 0.
    pub fn to_bare(&self) -> Self {
        let mut bare = self.clone();
        bare.clear_bridges();
        bare.derive_candidate_bridges();
        bare
    }

    /// Whether horizontal `h` and vertical `v` would cross if both were built.
    /// Bridges of the same axis never cross.
    pub fn crosses(&self, h: &Bridge, v: &Bridge) -> bool {
        let (h, v) = match (h.axis, v.axis) {
            (Axis::Horizontal, Axis::Vertical) => (h, v),
            (Axis::Vertical, Axis::Horizontal) => (v, h),
            _ => return false,
        };

        let (ha, hb) = (self.location_of(h.a), self.location_of(h.b));
        let (va, vb) = (self.location_of(v.a), self.location_of(v.b));

        ha.1 < va.1 && va.1 < hb.1 && va.0 < ha.0 && ha.0 < vb.0
    }

    /// Cells strictly between the endpoints of `bridge`, from `a` towards `b`.
    pub fn interior(&self, bridge: &Bridge) -> impl Iterator<Item=Location> {
        let start = self.location_of(bridge.a);
        let length = start.distance_to(self.location_of(bridge.b));
        let direction = match bridge.axis {
            Axis::Horizontal => Direction::East,
            Axis::Vertical => Direction::South,
        };
        let size = self.size();

        (1..length).filter_map(move |step| start.step(direction, step, size))
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::*;

    fn field(size: usize, islands: &[(usize, usize, u8)]) -> Puzzle {
        Puzzle::with_islands(
            NonZero::new(size).unwrap(),
            islands.iter().map(|(row, col, value)| Island::new(Location(*row, *col), *value)),
        )
    }

    #[test]
    fn islands_equal_by_position() {
        assert_eq!(Island::new(Location(1, 2), 3), Island::new(Location(1, 2), 7));
        assert_ne!(Island::new(Location(1, 2), 3), Island::new(Location(2, 1), 3));
    }

    #[test]
    fn derives_nearest_neighbors_only() {
        // three in a row: only the two adjacent pairs are candidates
        let puzzle = field(5, &[(0, 0, 1), (0, 2, 2), (0, 4, 1), (3, 0, 1)]);

        let pairs = puzzle.bridges().iter().map(|b| (b.a, b.b, b.axis)).collect_vec();
        assert_eq!(pairs, vec![
            (0, 1, Axis::Horizontal),
            (0, 3, Axis::Vertical),
            (1, 2, Axis::Horizontal),
        ]);
    }

    #[test]
    fn derivation_is_idempotent() {
        let mut puzzle = field(7, &[(0, 0, 2), (0, 3, 3), (3, 0, 3), (3, 3, 4), (6, 3, 2)]);
        let before = puzzle.bridges().to_vec();
        puzzle.derive_candidate_bridges();
        assert_eq!(puzzle.bridges(), before.as_slice());
    }

    #[test]
    fn insertion_renumbers_bridges() {
        let mut puzzle = Puzzle::new(NonZero::new(7).unwrap());
        let a = puzzle.add_island(Location(4, 4), 0);
        let b = puzzle.add_island(Location(4, 1), 0);
        assert_eq!((a, b), (0, 0));
        // the first island moved to index 1
        let a = puzzle.island_at(Location(4, 4)).unwrap();
        puzzle.add_bridge(a, b, 2).unwrap();

        puzzle.add_island(Location(0, 1), 0);
        let bridge = puzzle.bridges()[0];
        assert_eq!(puzzle.location_of(bridge.a), Location(4, 1));
        assert_eq!(puzzle.location_of(bridge.b), Location(4, 4));
        assert!(!puzzle.is_derived());
    }

    #[test]
    fn apply_weights_checks_length() {
        let mut puzzle = field(3, &[(0, 0, 2), (0, 2, 2), (2, 0, 2), (2, 2, 2)]);
        assert!(matches!(
            puzzle.apply_weights(&[1, 1]),
            Err(Error::SizeMismatch { expected: 4, actual: 2 })
        ));

        puzzle.apply_weights(&[1, 1, 1, 1]).unwrap();
        assert!((0..4).all(|island| puzzle.degree_of(island) == 2));
        assert_eq!(puzzle.weights(), vec![1, 1, 1, 1]);

        puzzle.reset_weights();
        assert_eq!(puzzle.weights(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn crossing_geometry() {
        // a plus shape with the centre empty
        let puzzle = field(5, &[(0, 2, 1), (2, 0, 1), (2, 4, 1), (4, 2, 1)]);
        let horizontal = puzzle.bridges().iter().find(|b| b.axis == Axis::Horizontal).unwrap();
        let vertical = puzzle.bridges().iter().find(|b| b.axis == Axis::Vertical).unwrap();
        assert!(puzzle.crosses(horizontal, vertical));
        assert!(puzzle.crosses(vertical, horizontal));
        assert!(!puzzle.crosses(horizontal, horizontal));
    }

    #[test]
    fn interior_cells() {
        let puzzle = field(5, &[(1, 0, 1), (1, 3, 1)]);
        let cells = puzzle.interior(&puzzle.bridges()[0]).collect_vec();
        assert_eq!(cells, vec![Location(1, 1), Location(1, 2)]);
    }
}
