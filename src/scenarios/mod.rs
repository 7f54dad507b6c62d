//! Built-in scenarios (compile-time configs).

use std::sync::Arc;

use crate::core::grid::Grid;
use crate::core::moves::MoveKind;
use crate::error::MazeError;
use crate::scenario::{Scenario, SearchConfig};
use crate::search::movegen::MoveRules;

fn demo_search() -> SearchConfig {
    SearchConfig {
        workers: 4,
        result_limit: 64,
        max_nodes: 1_000_000,
    }
}

fn build(
    name: &str,
    pattern: &str,
    columns: usize,
    turns: u8,
    rules: impl FnOnce(&Grid) -> Result<MoveRules, MazeError>,
) -> Result<Scenario, MazeError> {
    let grid = Grid::parse(pattern, columns)?;
    let rules = rules(&grid)?;
    Ok(Scenario {
        name: name.to_string(),
        grid,
        turns,
        rules: Arc::new(rules),
        search: demo_search(),
    })
}

/// 1x4 corridor, open end to end. One walk solves it.
pub fn corridor() -> Result<Scenario, MazeError> {
    build("corridor", "4551", 4, 1, |g| Ok(MoveRules::all(g)))
}

/// 2x2 where the exit is sealed off and one turn is not enough.
pub fn sealed_corner() -> Result<Scenario, MazeError> {
    build("sealed_corner", "e7d0", 2, 1, |g| Ok(MoveRules::all(g)))
}

/// 2x2: rotating the bottom row right opens the exit (`R1 (1,1)`).
pub fn slide_demo() -> Result<Scenario, MazeError> {
    build("slide_demo", "4380", 2, 2, |g| Ok(MoveRules::all(g)))
}

/// 3x3: the vertical connector in row 1 must reach the last column.
///
/// Right rotations only need two turns (`R1 R1`); a left rotation does it in one.
pub fn connector() -> Result<Scenario, MazeError> {
    build("connector", "453a00008", 3, 3, |g| {
        MoveRules::new(
            g,
            vec![1],
            vec![0, 2],
            vec![MoveKind::RowRight, MoveKind::ColumnDown],
        )
    })
}

/// [`connector`] with left and up rotations enabled as well.
pub fn connector_both_ways() -> Result<Scenario, MazeError> {
    build("connector_both_ways", "453a00008", 3, 3, |g| {
        MoveRules::new(g, vec![1], vec![0, 2], MoveKind::ROTATIONS.to_vec())
    })
}

/// Return a config by name.
pub fn by_name(name: &str) -> Result<Option<Scenario>, MazeError> {
    match name {
        "corridor" => Ok(Some(corridor()?)),
        "sealed_corner" => Ok(Some(sealed_corner()?)),
        "slide_demo" => Ok(Some(slide_demo()?)),
        "connector" => Ok(Some(connector()?)),
        "connector_both_ways" => Ok(Some(connector_both_ways()?)),
        _ => Ok(None),
    }
}

/// Names of all built-in scenarios.
pub fn names() -> &'static [&'static str] {
    &[
        "corridor",
        "sealed_corner",
        "slide_demo",
        "connector",
        "connector_both_ways",
    ]
}
