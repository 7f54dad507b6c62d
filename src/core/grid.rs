use std::fmt;
use std::sync::Arc;

use crate::core::cell::Cell;
use crate::core::moves::Move;
use crate::core::reach::Reachable;
use crate::error::MazeError;

/// Largest supported maze (cells are indexed with a fixed 256-bit visited set).
pub const MAX_CELLS: usize = 256;

/// An immutable rectangular maze, row-major.
///
/// Cells live behind an `Arc` so clones are cheap; every rotation builds a fresh copy and leaves
/// the receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Arc<[Cell]>,
    columns: usize,
}

impl Grid {
    pub fn new(cells: Vec<Cell>, columns: usize) -> Result<Self, MazeError> {
        if cells.len() > MAX_CELLS {
            return Err(MazeError::TooLarge {
                cells: cells.len(),
                max: MAX_CELLS,
            });
        }
        if columns == 0 || cells.is_empty() || cells.len() % columns != 0 {
            return Err(MazeError::Dimensions {
                cells: cells.len(),
                rows: if columns == 0 { 0 } else { cells.len() / columns },
                columns,
            });
        }
        Ok(Self {
            cells: cells.into(),
            columns,
        })
    }

    /// Build from raw masks, rejecting anything wider than a nibble.
    pub fn from_masks(masks: &[u8], columns: usize) -> Result<Self, MazeError> {
        let mut cells = Vec::with_capacity(masks.len());
        for (position, &value) in masks.iter().enumerate() {
            cells.push(Cell::new(value).ok_or(MazeError::InvalidCell { value, position })?);
        }
        Self::new(cells, columns)
    }

    /// Parse a hex pattern, one nibble per cell.
    pub fn parse(pattern: &str, columns: usize) -> Result<Self, MazeError> {
        let mut cells = Vec::with_capacity(pattern.len());
        for (position, ch) in pattern.chars().enumerate() {
            cells.push(Cell::from_hex(ch).ok_or(MazeError::InvalidPattern { ch, position })?);
        }
        Self::new(cells, columns)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.cells.len() / self.columns
    }

    #[inline]
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    #[inline]
    pub fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// The exit cell.
    #[inline]
    pub fn last(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn reachable_from(&self, start: usize) -> Reachable<'_> {
        Reachable::new(self, start)
    }

    pub fn can_reach(&self, start: usize, target: usize) -> bool {
        self.reachable_from(start).any(|c| c == target)
    }

    pub fn rotate_row_right(&self, row: usize) -> Grid {
        self.with_row(row, |cells| cells.rotate_right(1))
    }

    pub fn rotate_row_left(&self, row: usize) -> Grid {
        self.with_row(row, |cells| cells.rotate_left(1))
    }

    pub fn rotate_column_down(&self, column: usize) -> Grid {
        self.with_column(column, |cells| cells.rotate_right(1))
    }

    pub fn rotate_column_up(&self, column: usize) -> Grid {
        self.with_column(column, |cells| cells.rotate_left(1))
    }

    /// Apply a rotation; a walk leaves the grid as it is.
    pub fn apply(&self, mv: Move) -> Grid {
        match mv {
            Move::Walk(_) => self.clone(),
            Move::RotateRowRight(row) => self.rotate_row_right(row),
            Move::RotateRowLeft(row) => self.rotate_row_left(row),
            Move::RotateColumnDown(column) => self.rotate_column_down(column),
            Move::RotateColumnUp(column) => self.rotate_column_up(column),
        }
    }

    fn with_row(&self, row: usize, f: impl FnOnce(&mut [Cell])) -> Grid {
        assert!(row < self.rows(), "invalid row {row} (rows={})", self.rows());
        let mut cells = self.cells.to_vec();
        let start = row * self.columns;
        f(&mut cells[start..start + self.columns]);
        Grid {
            cells: cells.into(),
            columns: self.columns,
        }
    }

    fn with_column(&self, column: usize, f: impl FnOnce(&mut [Cell])) -> Grid {
        assert!(
            column < self.columns,
            "invalid column {column} (columns={})",
            self.columns
        );
        let mut strip: Vec<Cell> = self
            .cells
            .iter()
            .skip(column)
            .step_by(self.columns)
            .copied()
            .collect();
        f(&mut strip);

        let mut cells = self.cells.to_vec();
        for (row, cell) in strip.into_iter().enumerate() {
            cells[row * self.columns + column] = cell;
        }
        Grid {
            cells: cells.into(),
            columns: self.columns,
        }
    }
}

/// Writes the hex pattern back out.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.cells.iter() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_derived_from_length() {
        let g = Grid::parse("0123456789ab", 4).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.columns(), 4);
        assert_eq!(g.row_col(6), (1, 2));
        assert_eq!(g.index(1, 2), 6);
        assert_eq!(g.to_string(), "0123456789ab");
    }

    #[test]
    fn row_rotation_shifts_only_that_row() {
        let g = Grid::parse("012345", 3).unwrap();
        assert_eq!(g.rotate_row_right(1).to_string(), "012534");
        assert_eq!(g.rotate_row_left(0).to_string(), "120345");
        assert_eq!(g.to_string(), "012345");
    }

    #[test]
    fn column_rotation_shifts_only_that_column() {
        let g = Grid::parse("012345678", 3).unwrap();
        assert_eq!(g.rotate_column_down(1).to_string(), "072315648");
        assert_eq!(g.rotate_column_up(2).to_string(), "015348672");
    }

    #[test]
    #[should_panic(expected = "invalid row")]
    fn rotating_missing_row_panics() {
        let g = Grid::parse("0123", 2).unwrap();
        let _ = g.rotate_row_right(2);
    }
}
