//! Plain-text drawing of grids and solution paths.
//!
//! Each cell is drawn as a 3x3 block of two-character tiles; open sides are blank. The cells a
//! move touched are drawn with a lighter tile.

use std::fmt::Write;
use std::sync::Arc;

use crate::core::cell::Direction;
use crate::core::grid::Grid;
use crate::core::moves::Move;
use crate::state::StateNode;

const WALL: &str = "██";
const WALL_HIGHLIGHT: &str = "▓▓";
const OPEN: &str = "  ";
const TOKEN: &str = "¥ ";

/// Which cells a move touched: the walk target, or the rotated row/column.
pub fn touched_by(mv: Option<Move>, grid: &Grid) -> impl Fn(usize, usize) -> bool {
    let columns = grid.columns();
    move |row, column| match mv {
        Some(Move::Walk(cell)) => cell == row * columns + column,
        Some(Move::RotateRowRight(r)) | Some(Move::RotateRowLeft(r)) => r == row,
        Some(Move::RotateColumnDown(c)) | Some(Move::RotateColumnUp(c)) => c == column,
        None => false,
    }
}

/// Draw `grid` with the token on `location`.
pub fn draw(grid: &Grid, location: usize, highlight: impl Fn(usize, usize) -> bool) -> String {
    let width = grid.columns() * 6 + 2;
    let mut out = String::new();
    out.push_str(&"_".repeat(width));
    out.push('\n');

    for row in 0..grid.rows() {
        let mut lines = [String::from("│"), String::from("│"), String::from("│")];
        for column in 0..grid.columns() {
            let index = grid.index(row, column);
            let cell = grid.cell(index);
            let wall = if highlight(row, column) {
                WALL_HIGHLIGHT
            } else {
                WALL
            };
            let side = |dir: Direction| if cell.is_open(dir) { OPEN } else { wall };
            let centre = if index == location { TOKEN } else { OPEN };

            lines[0].push_str(wall);
            lines[0].push_str(side(Direction::North));
            lines[0].push_str(wall);

            lines[1].push_str(side(Direction::West));
            lines[1].push_str(centre);
            lines[1].push_str(side(Direction::East));

            lines[2].push_str(wall);
            lines[2].push_str(side(Direction::South));
            lines[2].push_str(wall);
        }
        for line in lines {
            out.push_str(&line);
            out.push_str("│\n");
        }
    }

    out.push_str(&"¯".repeat(width));
    out.push('\n');
    out
}

/// Draw a node, highlighting what its last move touched.
pub fn draw_node(node: &StateNode) -> String {
    draw(
        node.grid(),
        node.location(),
        touched_by(node.last_move(), node.grid()),
    )
}

/// Every step from the root to `goal`, then the move list.
pub fn summary(goal: &Arc<StateNode>) -> String {
    let mut out = String::new();
    let columns = goal.grid().columns();
    for node in goal.path() {
        if let Some(mv) = node.last_move() {
            let _ = writeln!(out, ">>> {}", mv.notation(columns));
        }
        out.push_str(&draw_node(&node));
    }
    let _ = writeln!(
        out,
        "SOLUTION: {} ({} turns left)",
        goal.notation(),
        goal.turns_remaining()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_open_cell_drawing() {
        let g = Grid::parse("f", 1).unwrap();
        let s = draw(&g, 0, |_, _| false);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "│██  ██│");
        assert_eq!(lines[2], "│  ¥   │");
        assert_eq!(lines[3], "│██  ██│");
    }

    #[test]
    fn highlight_follows_rotated_row() {
        let g = Grid::parse("0000", 2).unwrap();
        let h = touched_by(Some(Move::RotateRowRight(1)), &g);
        assert!(h(1, 0) && h(1, 1));
        assert!(!h(0, 0));
        let s = draw(&g, 3, h);
        assert!(s.lines().nth(1).unwrap().contains(WALL));
        assert!(s.lines().nth(4).unwrap().contains(WALL_HIGHLIGHT));
    }
}
