use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::grid::Grid;
use crate::error::MazeError;

/// What a turn does, without its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Walk,
    RowRight,
    RowLeft,
    ColumnDown,
    ColumnUp,
}

impl MoveKind {
    pub const ROTATIONS: [MoveKind; 4] = [
        MoveKind::RowRight,
        MoveKind::RowLeft,
        MoveKind::ColumnDown,
        MoveKind::ColumnUp,
    ];

    #[inline]
    pub fn is_row(self) -> bool {
        matches!(self, MoveKind::RowRight | MoveKind::RowLeft)
    }

    #[inline]
    pub fn is_column(self) -> bool {
        matches!(self, MoveKind::ColumnDown | MoveKind::ColumnUp)
    }

    /// Attach an argument.
    pub fn with(self, argument: usize) -> Move {
        match self {
            MoveKind::Walk => Move::Walk(argument),
            MoveKind::RowRight => Move::RotateRowRight(argument),
            MoveKind::RowLeft => Move::RotateRowLeft(argument),
            MoveKind::ColumnDown => Move::RotateColumnDown(argument),
            MoveKind::ColumnUp => Move::RotateColumnUp(argument),
        }
    }

    pub fn parse(text: &str) -> Option<MoveKind> {
        match text.trim().to_ascii_lowercase().as_str() {
            "walk" => Some(MoveKind::Walk),
            "row_right" | "r" => Some(MoveKind::RowRight),
            "row_left" | "l" => Some(MoveKind::RowLeft),
            "column_down" | "d" => Some(MoveKind::ColumnDown),
            "column_up" | "u" => Some(MoveKind::ColumnUp),
            _ => None,
        }
    }
}

/// A single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Walk the token to a cell in its connected component.
    Walk(usize),
    RotateRowRight(usize),
    RotateRowLeft(usize),
    RotateColumnDown(usize),
    RotateColumnUp(usize),
}

impl Move {
    #[inline]
    pub fn kind(self) -> MoveKind {
        match self {
            Move::Walk(_) => MoveKind::Walk,
            Move::RotateRowRight(_) => MoveKind::RowRight,
            Move::RotateRowLeft(_) => MoveKind::RowLeft,
            Move::RotateColumnDown(_) => MoveKind::ColumnDown,
            Move::RotateColumnUp(_) => MoveKind::ColumnUp,
        }
    }

    #[inline]
    pub fn argument(self) -> usize {
        match self {
            Move::Walk(a)
            | Move::RotateRowRight(a)
            | Move::RotateRowLeft(a)
            | Move::RotateColumnDown(a)
            | Move::RotateColumnUp(a) => a,
        }
    }

    #[inline]
    pub fn is_walk(self) -> bool {
        matches!(self, Move::Walk(_))
    }

    /// Check the argument against the grid's bounds.
    pub fn validate(self, grid: &Grid) -> Result<(), MazeError> {
        let (what, bound) = match self.kind() {
            MoveKind::Walk => ("cell", grid.len()),
            k if k.is_row() => ("row", grid.rows()),
            _ => ("column", grid.columns()),
        };
        if self.argument() >= bound {
            return Err(MazeError::OutOfRange {
                what,
                value: self.argument(),
                bound,
            });
        }
        Ok(())
    }

    /// Human notation: `(r,c)` for walks, `R1`/`L1`/`D1`/`U1` for rotations.
    pub fn notation(self, columns: usize) -> Notation {
        Notation { mv: self, columns }
    }

    /// Parse human notation and validate it against `grid`.
    pub fn parse(text: &str, grid: &Grid) -> Result<Move, MazeError> {
        let text = text.trim();
        let bad = || MazeError::ParseMove(text.to_string());

        let mut chars = text.chars();
        let head = chars.next().ok_or_else(bad)?;
        let rest = chars.as_str();

        let mv = match head.to_ascii_uppercase() {
            '(' => {
                let inner = rest.strip_suffix(')').ok_or_else(bad)?;
                let (r, c) = inner.split_once(',').ok_or_else(bad)?;
                let row: usize = r.trim().parse().map_err(|_| bad())?;
                let column: usize = c.trim().parse().map_err(|_| bad())?;
                if row >= grid.rows() || column >= grid.columns() {
                    return Err(MazeError::IllegalMove {
                        notation: text.to_string(),
                        reason: "walk target is outside the maze".to_string(),
                    });
                }
                Move::Walk(grid.index(row, column))
            }
            letter => {
                let argument: usize = rest.parse().map_err(|_| bad())?;
                let kind = match letter {
                    'R' => MoveKind::RowRight,
                    'L' => MoveKind::RowLeft,
                    'D' => MoveKind::ColumnDown,
                    'U' => MoveKind::ColumnUp,
                    _ => return Err(bad()),
                };
                kind.with(argument)
            }
        };

        mv.validate(grid)?;
        Ok(mv)
    }
}

/// Display adapter returned by [`Move::notation`].
#[derive(Debug, Clone, Copy)]
pub struct Notation {
    mv: Move,
    columns: usize,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mv {
            Move::Walk(cell) => write!(f, "({},{})", cell / self.columns, cell % self.columns),
            Move::RotateRowRight(a) => write!(f, "R{a}"),
            Move::RotateRowLeft(a) => write!(f, "L{a}"),
            Move::RotateColumnDown(a) => write!(f, "D{a}"),
            Move::RotateColumnUp(a) => write!(f, "U{a}"),
        }
    }
}
