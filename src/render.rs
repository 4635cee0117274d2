use std::fmt::{Display, Formatter};

use ndarray::Array2;

use crate::cell::Piece;
use crate::puzzle::Puzzle;

impl Puzzle {
    /// The character grid: space, island digit, `─`/`═` for horizontal and `|`/`‖` for vertical bridges.
    pub fn field(&self) -> Array2<char> {
        let mut field = self.pieces().map(Piece::glyph);

        for island in self.islands() {
            if let Some(cell) = field.get_mut(island.location().as_index()) {
                *cell = char::from_digit(island.value as u32, 10).unwrap_or('?');
            }
        }

        field
    }

    /// The rendered grid, one string per row.
    pub fn rows(&self) -> Vec<String> {
        self.field()
            .rows()
            .into_iter()
            .map(|row| row.iter().collect())
            .collect()
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let field = self.field();
        let mut out = String::with_capacity(field.nrows() * (field.ncols() + 1) * 3);

        for row in field.rows() {
            for col in row {
                out.push(*col);
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
