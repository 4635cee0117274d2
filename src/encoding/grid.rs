use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;
use varisat::Lit;

use crate::cell::Piece;
use crate::encoding::{ensure_derived, reach, Connectivity, Encoder};
use crate::error::Result;
use crate::location::{Axis, Direction, Location};
use crate::logic::{IntVar, Session, Term};
use crate::puzzle::{Puzzle, Weight};

const BRIDGE_PIECES: [Piece; 4] = [
    Piece::SingleHorizontal,
    Piece::DoubleHorizontal,
    Piece::SingleVertical,
    Piece::DoubleVertical,
];

/// One [`Piece`]-valued variable per cell.
pub(crate) struct GridEncoder {
    cells: Array2<IntVar>,
}

impl GridEncoder {
    fn is(&self, location: Location, piece: Piece) -> Lit {
        self.cells[location.as_index()]
            .equals(piece.code())
            .expect("cell domains cover every piece")
    }

    fn neighbors(location: Location, size: usize) -> impl Iterator<Item=(Direction, Location)> {
        Direction::VARIANTS.iter()
            .filter_map(move |direction| Some((*direction, location.step(*direction, 1, size)?)))
    }

    /// The literal for "`bridge` is built": its first interior cell holds a piece along its axis.
    fn built(&self, puzzle: &Puzzle, index: usize, session: &mut Session) -> Lit {
        let bridge = &puzzle.bridges()[index];
        match puzzle.interior(bridge).next() {
            Some(first) => {
                let [single, double] = Piece::along(bridge.axis);
                session.or(&[self.is(first, single), self.is(first, double)])
            }
            // orthogonally adjacent islands have no room for a bridge piece
            None => session.constant(false),
        }
    }
}

impl Encoder for GridEncoder {
    /// # Logical setup
    /// Every cell holds exactly one [`Piece`].
    ///
    /// ## Domains
    /// Island cells hold [`Piece::Island`] and no other cell does.
    /// Horizontal pieces never sit in the outer columns and vertical pieces never in the outer rows.
    ///
    /// ## Neighbors
    /// Along its axis, a bridge piece continues as the same piece or ends at an island.
    /// Across its axis, it is never next to a piece of the other axis.
    ///
    /// ## Islands
    /// An island's value is the sum over its four neighbors of the weight of each piece pointing at it.
    ///
    /// ## Connectivity
    /// See [`reach::connect`].
    fn encode(puzzle: &Puzzle, session: &mut Session, connectivity: Connectivity) -> Result<Self> {
        ensure_derived(puzzle)?;

        let size = puzzle.size();
        let cells = Array2::from_shape_fn((size, size), |(row, col)| {
            session.declare_int(format!("cell_{row}_{col}"), Piece::Island.code())
        });
        let encoder = Self { cells };

        for (row, col) in (0..size).cartesian_product(0..size) {
            let location = Location(row, col);

            let island = encoder.is(location, Piece::Island);
            session.assert(if puzzle.island_at(location).is_some() { island } else { !island });

            if col == 0 || col == size - 1 {
                Piece::along(Axis::Horizontal).iter().for_each(|piece| session.assert(!encoder.is(location, *piece)));
            }
            if row == 0 || row == size - 1 {
                Piece::along(Axis::Vertical).iter().for_each(|piece| session.assert(!encoder.is(location, *piece)));
            }

            for piece in BRIDGE_PIECES {
                let Some(axis) = piece.axis() else { continue };

                for (direction, neighbor) in Self::neighbors(location, size) {
                    let allowed = if direction.axis() == axis {
                        vec![piece, Piece::Island]
                    } else {
                        let mut allowed = vec![Piece::Empty, Piece::Island];
                        allowed.extend(Piece::along(axis));
                        allowed
                    };

                    let mut clause = vec![!encoder.is(location, piece)];
                    clause.extend(allowed.into_iter().map(|other| encoder.is(neighbor, other)));
                    session.add_clause(&clause);
                }
            }
        }

        for island in puzzle.islands() {
            let terms = Self::neighbors(island.location(), size)
                .map(|(direction, neighbor)| {
                    let [single, double] = Piece::along(direction.axis());
                    Term::new(vec![encoder.is(neighbor, single), encoder.is(neighbor, double)])
                })
                .collect_vec();
            session.sum_equals(&terms, island.value as usize);
        }

        let built = (0..puzzle.bridges().len())
            .map(|index| encoder.built(puzzle, index, session))
            .collect_vec();
        reach::connect(puzzle, session, &built, connectivity);

        Ok(encoder)
    }

    /// Forbids the cell layout of the current weights, which is the same thing as long as no built bridge joins two
    /// orthogonally adjacent islands.
    fn forbid_current(&self, puzzle: &Puzzle, session: &mut Session) {
        let clause = puzzle.pieces()
            .indexed_iter()
            .map(|(index, piece)| !self.is(Location::from(index), *piece))
            .collect_vec();
        session.add_clause(&clause);
    }

    fn decode(&self, puzzle: &Puzzle, session: &Session) -> Vec<Weight> {
        puzzle.bridges().iter()
            .map(|bridge| {
                puzzle.interior(bridge).next()
                    .and_then(|first| session.int_value(&self.cells[first.as_index()]))
                    .and_then(|code| Piece::VARIANTS.get(code))
                    .filter(|piece| piece.axis() == Some(bridge.axis))
                    .map_or(0, Piece::weight)
            })
            .collect()
    }
}
