use proptest::prelude::*;

use slide_maze::core::cell::{passage_open, Direction};
use slide_maze::core::grid::Grid;
use slide_maze::error::MazeError;

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..=6, 1usize..=6).prop_flat_map(|(rows, columns)| {
        prop::collection::vec(0u8..16, rows * columns)
            .prop_map(move |masks| Grid::from_masks(&masks, columns).unwrap())
    })
}

proptest! {
    #[test]
    fn row_rotation_round_trips(g in arb_grid()) {
        for row in 0..g.rows() {
            prop_assert_eq!(&g.rotate_row_right(row).rotate_row_left(row), &g);
            prop_assert_eq!(&g.rotate_row_left(row).rotate_row_right(row), &g);
        }
    }

    #[test]
    fn column_rotation_round_trips(g in arb_grid()) {
        for column in 0..g.columns() {
            prop_assert_eq!(&g.rotate_column_down(column).rotate_column_up(column), &g);
            prop_assert_eq!(&g.rotate_column_up(column).rotate_column_down(column), &g);
        }
    }

    #[test]
    fn full_cycle_is_identity(g in arb_grid()) {
        let mut h = g.clone();
        for _ in 0..g.columns() {
            h = h.rotate_row_right(0);
        }
        prop_assert_eq!(&h, &g);

        let mut v = g.clone();
        for _ in 0..g.rows() {
            v = v.rotate_column_down(0);
        }
        prop_assert_eq!(&v, &g);
    }

    #[test]
    fn reachable_includes_start_without_duplicates(g in arb_grid(), seed in any::<usize>()) {
        let start = seed % g.len();
        let cells: Vec<usize> = g.reachable_from(start).collect();
        prop_assert_eq!(cells[0], start);
        prop_assert!(cells.len() <= g.len());
        let mut sorted = cells.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), cells.len());
        prop_assert!(cells.iter().all(|&c| c < g.len()));
    }

    #[test]
    fn reachable_is_closed_under_walking(g in arb_grid(), seed in any::<usize>()) {
        // Two walks in a row never reach anything one walk could not.
        let start = seed % g.len();
        let first: Vec<usize> = g.reachable_from(start).collect();
        for &mid in &first {
            for end in g.reachable_from(mid) {
                prop_assert!(first.contains(&end), "{} -> {} -> {}", start, mid, end);
            }
        }
    }

    #[test]
    fn adjacent_pair_connects_iff_reciprocal(
        rows in 1usize..=4,
        columns in 1usize..=4,
        seed in any::<usize>(),
        a_mask in 0u8..16,
        b_mask in 0u8..16,
        dir_index in 0usize..4,
    ) {
        let len = rows * columns;
        let a = seed % len;
        let dir = Direction::ALL[dir_index];
        if let Some(b) = dir.step(a, columns, len) {
            let mut masks = vec![0u8; len];
            masks[a] = a_mask;
            masks[b] = b_mask;
            let g = Grid::from_masks(&masks, columns).unwrap();
            let connected = g.reachable_from(a).any(|c| c == b);
            let open = passage_open(g.cell(a), g.cell(b), dir);
            prop_assert_eq!(connected, open);
            prop_assert_eq!(
                connected,
                a_mask & dir.bit() != 0 && b_mask & dir.opposite().bit() != 0
            );
        }
    }
}

#[test]
fn reachability_does_not_wrap_around_edges() {
    // Row 0: cell 1 opens east, cell 0 opens west. They are not neighbours across the edge.
    let g = Grid::parse("1400", 2).unwrap();
    assert_eq!(g.reachable_from(0).collect::<Vec<_>>(), vec![0]);
    assert_eq!(g.reachable_from(1).collect::<Vec<_>>(), vec![1]);

    // Column 0: cell 2 opens south, cell 0 opens north.
    let g = Grid::parse("8020", 2).unwrap();
    assert_eq!(g.reachable_from(0).collect::<Vec<_>>(), vec![0]);
}

#[test]
fn reachable_sequence_is_restartable() {
    let g = Grid::parse("e7db", 2).unwrap();
    let first: Vec<usize> = g.reachable_from(0).collect();
    let second: Vec<usize> = g.reachable_from(0).collect();
    assert_eq!(first, second);
    let mut sorted = first;
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 1, 2, 3]);
}

#[test]
fn blocked_corner_is_not_reachable() {
    let g = Grid::parse("e7d0", 2).unwrap();
    let mut cells: Vec<usize> = g.reachable_from(0).collect();
    cells.sort_unstable();
    assert_eq!(cells, vec![0, 1, 2]);
}

#[test]
fn rotations_leave_receiver_untouched() {
    let g = Grid::parse("0123456789abcdef", 4).unwrap();
    let before = g.to_string();
    let _ = g.rotate_row_right(3);
    let _ = g.rotate_row_left(0);
    let _ = g.rotate_column_down(2);
    let _ = g.rotate_column_up(1);
    assert_eq!(g.to_string(), before);
}

#[test]
fn malformed_patterns_are_rejected() {
    assert!(matches!(
        Grid::parse("12g4", 2),
        Err(MazeError::InvalidPattern { ch: 'g', position: 2 })
    ));
    assert!(matches!(
        Grid::parse("12345", 2),
        Err(MazeError::Dimensions { cells: 5, .. })
    ));
    assert!(matches!(Grid::parse("", 2), Err(MazeError::Dimensions { .. })));
    assert!(matches!(Grid::parse("1234", 0), Err(MazeError::Dimensions { .. })));
    assert!(matches!(
        Grid::parse(&"f".repeat(257), 1),
        Err(MazeError::TooLarge { cells: 257, max: 256 })
    ));
    assert!(Grid::parse(&"F".repeat(256), 16).is_ok());
    assert!(matches!(
        Grid::from_masks(&[1, 16], 2),
        Err(MazeError::InvalidCell { value: 16, position: 1 })
    ));
}

#[test]
fn largest_grid_flood_fills_everything() {
    let g = Grid::parse(&"f".repeat(256), 16).unwrap();
    assert_eq!(g.reachable_from(255).count(), 256);
}
