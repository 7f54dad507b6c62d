//! Flood fill over reciprocally open passages.
//!
//! [`Reachable`] is an explicit-stack traversal: it yields lazily, terminates (each cell is
//! marked before it is pushed) and holds no state beyond one call. Calling
//! [`Grid::reachable_from`] again restarts it.

use crate::core::cell::{passage_open, Direction};
use crate::core::grid::{Grid, MAX_CELLS};

/// Fixed-size visited marker covering every supported cell index.
#[derive(Debug, Clone, Default)]
struct Visited([u64; MAX_CELLS / 64]);

impl Visited {
    #[inline]
    fn insert(&mut self, index: usize) -> bool {
        let (word, bit) = (index / 64, 1u64 << (index % 64));
        let fresh = self.0[word] & bit == 0;
        self.0[word] |= bit;
        fresh
    }
}

/// Cells reachable from a start cell, the start itself first.
#[derive(Debug, Clone)]
pub struct Reachable<'a> {
    grid: &'a Grid,
    stack: Vec<usize>,
    visited: Visited,
}

impl<'a> Reachable<'a> {
    pub(crate) fn new(grid: &'a Grid, start: usize) -> Self {
        assert!(
            start < grid.len(),
            "start cell {start} outside grid of {} cells",
            grid.len()
        );
        let mut visited = Visited::default();
        visited.insert(start);
        Self {
            grid,
            stack: vec![start],
            visited,
        }
    }
}

impl Iterator for Reachable<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let here = self.stack.pop()?;
        let cell = self.grid.cell(here);
        // Pushed in reverse so the first direction in ALL is explored first.
        for dir in Direction::ALL.iter().rev() {
            let Some(next) = dir.step(here, self.grid.columns(), self.grid.len()) else {
                continue;
            };
            if passage_open(cell, self.grid.cell(next), *dir) && self.visited.insert(next) {
                self.stack.push(next);
            }
        }
        Some(here)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.grid.len()))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::grid::Grid;

    #[test]
    fn start_comes_first() {
        let g = Grid::parse("e7d0", 2).unwrap();
        let cells: Vec<usize> = g.reachable_from(2).collect();
        assert_eq!(cells[0], 2);
    }

    #[test]
    fn closed_cell_reaches_only_itself() {
        let g = Grid::parse("ff0f", 2).unwrap();
        assert_eq!(g.reachable_from(2).collect::<Vec<_>>(), vec![2]);
    }
}
