//! The one-line puzzle ID format, `"<N>x<N>m2:<body>"`.
//!
//! In the body, a lowercase letter skips `letter - 'a' + 1` empty cells and a digit places an island with that value
//! on the next cell, in row-major order. Runs longer than 26 are written as repeated `z`s and a remainder letter.

use std::num::NonZero;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::location::Location;
use crate::puzzle::{Island, Puzzle, MAX_WEIGHT};

const RUN_LIMIT: usize = 26;

/// Parse a puzzle ID. The result has its candidate bridges derived and every weight set to 0.
pub fn decode(id: &str) -> Result<Puzzle, ConfigError> {
    let (header, body) = id.trim().split_once(':').ok_or(ConfigError::MissingSeparator)?;

    if header.ends_with('L') {
        return Err(ConfigError::LoopsProhibited);
    }

    let (dims, max_weight) = header.split_once('m')
        .ok_or_else(|| ConfigError::MalformedHeader(header.to_owned()))?;
    if max_weight != MAX_WEIGHT.to_string() {
        return Err(ConfigError::UnsupportedMaxWeight(max_weight.to_owned()));
    }

    let (width, height) = dims.split_once('x')
        .and_then(|(w, h)| Some((w.parse::<usize>().ok()?, h.parse::<usize>().ok()?)))
        .ok_or_else(|| ConfigError::MalformedHeader(header.to_owned()))?;
    if width != height {
        return Err(ConfigError::NotSquare { width, height });
    }
    let size = NonZero::new(width).ok_or(ConfigError::EmptyField)?;
    let cells = width.checked_mul(width).ok_or_else(|| ConfigError::MalformedHeader(header.to_owned()))?;

    let mut islands = Vec::new();
    let mut cursor = 0;
    for c in body.chars() {
        match c {
            'a'..='z' => cursor += c as usize - 'a' as usize + 1,
            '0'..='9' => {
                if cursor >= cells {
                    return Err(ConfigError::Overrun { cells });
                }
                // the match arm guarantees a decimal digit
                let value = c.to_digit(10).unwrap_or_default() as u8;
                islands.push(Island::new(Location(cursor / width, cursor % width), value));
                cursor += 1;
            }
            _ => return Err(ConfigError::InvalidCharacter(c)),
        }
    }
    if cursor > cells {
        return Err(ConfigError::Overrun { cells });
    }

    Ok(Puzzle::with_islands(size, islands))
}

fn push_run(out: &mut String, mut run: usize) {
    while run >= RUN_LIMIT {
        out.push('z');
        run -= RUN_LIMIT;
    }
    if run > 0 {
        out.push((b'a' + run as u8 - 1) as char);
    }
}

/// Write the canonical ID of `puzzle`. Only islands and their values are encoded.
///
/// Values above 9 cannot be represented and are written as `9`.
pub fn encode(puzzle: &Puzzle) -> String {
    let size = puzzle.size();
    let mut out = format!("{size}x{size}m{MAX_WEIGHT}:");

    let mut cursor = 0;
    for island in puzzle.islands() {
        let index = island.location().row() * size + island.location().col();
        push_run(&mut out, index - cursor);
        out.push(char::from_digit(island.value.min(9) as u32, 10).unwrap_or('9'));
        cursor = index + 1;
    }
    push_run(&mut out, size * size - cursor);

    out
}

impl FromStr for Puzzle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl Puzzle {
    /// Shorthand for [`encode`].
    pub fn to_id(&self) -> String {
        encode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_small_field() {
        let puzzle = decode("3x3m2:2a2c2a2").unwrap();
        assert_eq!(puzzle.size(), 3);
        let locations = puzzle.islands().iter().map(Island::location).collect::<Vec<_>>();
        assert_eq!(locations, vec![Location(0, 0), Location(0, 2), Location(2, 0), Location(2, 2)]);
        assert!(puzzle.islands().iter().all(|island| island.value == 2));
        assert_eq!(puzzle.bridges().len(), 4);
    }

    #[test]
    fn rejections() {
        assert_eq!(decode("7x7m2L:a4"), Err(ConfigError::LoopsProhibited));
        assert_eq!(decode("7x7m3:a4"), Err(ConfigError::UnsupportedMaxWeight("3".into())));
        assert_eq!(decode("7x5m2:a4"), Err(ConfigError::NotSquare { width: 7, height: 5 }));
        assert_eq!(decode("3x3m2:2a2-"), Err(ConfigError::InvalidCharacter('-')));
        assert_eq!(decode("3x3m2 2a2"), Err(ConfigError::MissingSeparator));
        assert_eq!(decode("0x0m2:"), Err(ConfigError::EmptyField));
        assert_eq!(decode("2x2m2:d1"), Err(ConfigError::Overrun { cells: 4 }));
        assert!(matches!(decode("ax3m2:c"), Err(ConfigError::MalformedHeader(_))));
        assert_eq!(
            decode("9999999999x9999999999m2:1"),
            Err(ConfigError::MalformedHeader("9999999999x9999999999m2".into()))
        );
    }

    #[test]
    fn long_runs_use_z() {
        let mut puzzle = Puzzle::new(NonZero::new(7).unwrap());
        puzzle.add_island(Location(4, 2), 3);
        // 30 empty cells, the island, then 18 empty cells
        assert_eq!(encode(&puzzle), "7x7m2:zd3r");
    }
}
