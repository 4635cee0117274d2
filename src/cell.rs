use ndarray::Array2;
use strum::VariantArray;

use crate::location::Axis;
use crate::puzzle::{Puzzle, Weight};

/// Contents of a single grid cell, as seen by the cell encoding and by rendering.
///
/// The discriminants are the integer codes used for cell variables.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Piece {
    /// Water.
    #[default]
    Empty = 0,
    /// Part of a single horizontal bridge.
    SingleHorizontal = 1,
    /// Part of a double horizontal bridge.
    DoubleHorizontal = 2,
    /// Part of a single vertical bridge.
    SingleVertical = 3,
    /// Part of a double vertical bridge.
    DoubleVertical = 4,
    /// An island, whatever its value.
    Island = 5,
}

impl Piece {
    /// The piece filling the interior of a bridge on `axis` with `weight`.
    pub fn bridge(axis: Axis, weight: Weight) -> Self {
        match (axis, weight) {
            (_, 0) => Self::Empty,
            (Axis::Horizontal, 1) => Self::SingleHorizontal,
            (Axis::Horizontal, _) => Self::DoubleHorizontal,
            (Axis::Vertical, 1) => Self::SingleVertical,
            (Axis::Vertical, _) => Self::DoubleVertical,
        }
    }

    /// The integer code of this piece, equal to its index in [`Piece::VARIANTS`].
    #[inline]
    pub fn code(&self) -> usize {
        *self as usize
    }

    /// The axis of a bridge piece; [`None`] for water and islands.
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Self::SingleHorizontal | Self::DoubleHorizontal => Some(Axis::Horizontal),
            Self::SingleVertical | Self::DoubleVertical => Some(Axis::Vertical),
            _ => None,
        }
    }

    /// Number of bridge endpoints this piece contributes to an island it points at.
    pub fn weight(&self) -> Weight {
        match self {
            Self::SingleHorizontal | Self::SingleVertical => 1,
            Self::DoubleHorizontal | Self::DoubleVertical => 2,
            _ => 0,
        }
    }

    /// Bridge pieces along `axis`, single first.
    pub fn along(axis: Axis) -> [Self; 2] {
        match axis {
            Axis::Horizontal => [Self::SingleHorizontal, Self::DoubleHorizontal],
            Axis::Vertical => [Self::SingleVertical, Self::DoubleVertical],
        }
    }

    /// The character drawn for this piece. Islands are drawn by value instead, see [`Puzzle::field`].
    pub fn glyph(&self) -> char {
        match self {
            Self::Empty => ' ',
            Self::SingleHorizontal => '─',
            Self::DoubleHorizontal => '═',
            Self::SingleVertical => '|',
            Self::DoubleVertical => '‖',
            Self::Island => 'o',
        }
    }
}

impl Puzzle {
    /// Lay the islands and built bridges out on the grid.
    pub fn pieces(&self) -> Array2<Piece> {
        let mut ret = Array2::from_elem((self.size(), self.size()), Piece::Empty);

        for island in self.islands() {
            if let Some(cell) = ret.get_mut(island.location().as_index()) {
                *cell = Piece::Island;
            }
        }

        for (_, bridge) in self.built_bridges() {
            let piece = Piece::bridge(bridge.axis, bridge.weight);
            for location in self.interior(bridge) {
                if let Some(cell) = ret.get_mut(location.as_index()) {
                    *cell = piece;
                }
            }
        }

        ret
    }
}
