use std::fmt;

/// One grid position: a 4-bit mask of open sides.
///
/// Bit layout: `1` = west, `2` = south, `4` = east, `8` = north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell(u8);

impl Cell {
    pub const CLOSED: Cell = Cell(0);
    pub const OPEN: Cell = Cell(0xf);

    /// Build from a raw mask; `None` if any bit above the low nibble is set.
    #[inline]
    pub const fn new(mask: u8) -> Option<Cell> {
        if mask > 0xf {
            None
        } else {
            Some(Cell(mask))
        }
    }

    #[inline]
    pub const fn mask(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_open(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    /// Parse a single hex nibble (either case).
    pub fn from_hex(ch: char) -> Option<Cell> {
        ch.to_digit(16).map(|d| Cell(d as u8))
    }

    pub fn to_hex(self) -> char {
        char::from_digit(self.0 as u32, 16).unwrap_or('?')
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    South,
    East,
    North,
}

impl Direction {
    /// Flood-fill order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Direction::West => 1,
            Direction::South => 2,
            Direction::East => 4,
            Direction::North => 8,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::West => Direction::East,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::North => Direction::South,
        }
    }

    /// Index of the neighbour in this direction, or `None` at the grid edge (no wrap-around).
    #[inline]
    pub fn step(self, index: usize, columns: usize, len: usize) -> Option<usize> {
        match self {
            Direction::West => (index % columns != 0).then(|| index - 1),
            Direction::East => ((index + 1) % columns != 0).then(|| index + 1),
            Direction::North => index.checked_sub(columns),
            Direction::South => (index + columns < len).then(|| index + columns),
        }
    }
}

/// True iff `from` opens toward `dir` and `to` opens back.
#[inline]
pub fn passage_open(from: Cell, to: Cell, dir: Direction) -> bool {
    from.is_open(dir) && to.is_open(dir.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_digits_round_trip_case_insensitively() {
        assert_eq!(Cell::from_hex('e'), Some(Cell(0xe)));
        assert_eq!(Cell::from_hex('E'), Some(Cell(0xe)));
        assert_eq!(Cell::from_hex('g'), None);
        assert_eq!(Cell(0xb).to_hex(), 'b');
    }

    #[test]
    fn steps_stop_at_edges() {
        // 2 rows x 3 columns
        assert_eq!(Direction::West.step(3, 3, 6), None);
        assert_eq!(Direction::East.step(2, 3, 6), None);
        assert_eq!(Direction::North.step(2, 3, 6), None);
        assert_eq!(Direction::South.step(4, 3, 6), None);
        assert_eq!(Direction::North.step(4, 3, 6), Some(1));
        assert_eq!(Direction::East.step(3, 3, 6), Some(4));
    }

    #[test]
    fn passage_requires_both_sides() {
        let east_only = Cell::new(4).unwrap();
        let west_only = Cell::new(1).unwrap();
        assert!(passage_open(east_only, west_only, Direction::East));
        assert!(!passage_open(east_only, Cell::CLOSED, Direction::East));
        assert!(!passage_open(west_only, east_only, Direction::East));
    }
}
