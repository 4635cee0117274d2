use std::num::NonZero;

use ndarray::Ix;
use strum::{Display, EnumString, VariantArray};

/// A row or column index.
pub type Coord = usize;
/// Side length of a square field.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Default)]
/// A location `(row, col)` on a field. The top left corner is `Location(0, 0)`.
///
/// The derived ordering is row-major, which is the canonical island order.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// Row index, 0 at the top.
    #[inline]
    pub fn row(&self) -> Coord {
        self.0
    }

    /// Column index, 0 at the left.
    #[inline]
    pub fn col(&self) -> Coord {
        self.1
    }

    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Step `distance` cells in `direction`, or [`None`] if that leaves a field of side `size`.
    pub(crate) fn step(self, direction: Direction, distance: Coord, size: Coord) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let target = self.offset_by((dr * distance as isize, dc * distance as isize));
        (target.0 < size && target.1 < size).then_some(target)
    }

    /// Manhattan distance, which for two aligned locations is the cell distance between them.
    pub(crate) fn distance_to(&self, other: Location) -> Coord {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

/// Orientation of a bridge.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, VariantArray, Display)]
pub enum Axis {
    /// Endpoints share a row.
    Horizontal,
    /// Endpoints share a column.
    Vertical,
}

impl Axis {
    /// The axis along which `a` and `b` are aligned, if any.
    pub fn between(a: Location, b: Location) -> Option<Self> {
        match (a.0 == b.0, a.1 == b.1) {
            (true, false) => Some(Self::Horizontal),
            (false, true) => Some(Self::Vertical),
            _ => None,
        }
    }

    /// The other axis, which is the axis of any bridge this one could cross.
    pub fn crosses(&self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Compass directions on the field, north being row 0.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, VariantArray, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    /// Towards row 0.
    North,
    /// Towards higher columns.
    East,
    /// Towards higher rows.
    South,
    /// Towards column 0.
    West,
}

impl Direction {
    pub(crate) fn delta(&self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// The opposite direction.
    pub fn invert(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// The axis a bridge heading this way lies on.
    pub fn axis(&self) -> Axis {
        match self {
            Self::North | Self::South => Axis::Vertical,
            Self::East | Self::West => Axis::Horizontal,
        }
    }

    /// The direction from `a` to an aligned `b`, or [`None`] if they are not aligned.
    pub fn towards(a: Location, b: Location) -> Option<Self> {
        match Axis::between(a, b)? {
            Axis::Horizontal => Some(if b.1 > a.1 { Self::East } else { Self::West }),
            Axis::Vertical => Some(if b.0 > a.0 { Self::South } else { Self::North }),
        }
    }
}
