//! JavaScript bindings, enabled by the `wasm` feature.

use std::num::NonZero;

use js_sys::{Array, JsString};
use wasm_bindgen::prelude::*;

use crate::encoding::Strategy;
use crate::generator::{Generator, GeneratorConfig};
use crate::puzzle::Puzzle;
use crate::solve::Outcome;

fn solved(id: &str, strategy: &str) -> Result<Puzzle, JsError> {
    let strategy: Strategy = strategy.parse()?;
    let puzzle: Puzzle = id.parse()?;

    match puzzle.solve(strategy)? {
        Outcome::Solved(solution) => Ok(solution),
        Outcome::NoSolution => Err(JsError::new("puzzle has no solution")),
    }
}

/// Solve the puzzle with the given ID and return the rendered grid, one row per line.
#[wasm_bindgen]
pub fn solve_id(id: &str, strategy: &str) -> Result<String, JsError> {
    Ok(solved(id, strategy)?.to_string())
}

/// Like [`solve_id`], as an array of row strings.
#[wasm_bindgen]
pub fn solve_rows(id: &str, strategy: &str) -> Result<Array, JsError> {
    Ok(solved(id, strategy)?.rows().into_iter().map(|row| JsString::from(row.as_str())).collect())
}

/// Generate a puzzle and return its ID.
#[wasm_bindgen]
pub fn generate_id(size: usize, islands: usize, seed: u64) -> Result<String, JsError> {
    let size = NonZero::new(size).ok_or_else(|| JsError::new("field size must be positive"))?;
    let config = GeneratorConfig::default().with_size(size).with_islands(islands);

    Ok(Generator::seeded(config, seed).generate()?.puzzle.to_id())
}
