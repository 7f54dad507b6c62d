//! Successor generation for [`StateNode`]s.
//!
//! Two pruning rules keep the branching factor down without losing any reachable state:
//! - a walk never follows a walk (one walk already reaches the whole connected component),
//! - consecutive rotations of the same kind are generated in non-decreasing argument order
//!   (rotations of distinct rows, or of distinct columns, commute).
//!
//! The ordering rule is applied per [`MoveKind`]; a right rotation never constrains a following
//! left rotation and vice versa.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::core::grid::Grid;
use crate::core::moves::{Move, MoveKind};
use crate::error::MazeError;
use crate::search::engine::Searchable;
use crate::state::StateNode;

/// Which rotations a scenario may use.
///
/// The allow-lists bound the branching factor; they are scenario configuration, not part of
/// the puzzle itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRules {
    rows: Vec<usize>,
    columns: Vec<usize>,
    kinds: Vec<MoveKind>,
}

impl MoveRules {
    /// Validate allow-lists against `grid`. Lists are sorted; duplicates are rejected.
    pub fn new(
        grid: &Grid,
        rows: Vec<usize>,
        columns: Vec<usize>,
        kinds: Vec<MoveKind>,
    ) -> Result<Self, MazeError> {
        let rows = checked_list("row", rows, grid.rows())?;
        let columns = checked_list("column", columns, grid.columns())?;

        if kinds.contains(&MoveKind::Walk) {
            return Err(MazeError::InvalidRule(
                "walk is always available and can not be listed as a rotation".to_string(),
            ));
        }
        let mut seen: FxHashSet<MoveKind> = FxHashSet::default();
        for &k in &kinds {
            if !seen.insert(k) {
                return Err(MazeError::InvalidRule(format!(
                    "rotation kind {k:?} listed more than once"
                )));
            }
        }
        let mut kinds = kinds;
        kinds.sort_unstable();

        Ok(Self {
            rows,
            columns,
            kinds,
        })
    }

    /// Every row and column, rotated right and down.
    pub fn all(grid: &Grid) -> Self {
        Self {
            rows: (0..grid.rows()).collect(),
            columns: (0..grid.columns()).collect(),
            kinds: vec![MoveKind::RowRight, MoveKind::ColumnDown],
        }
    }

    /// Walks only.
    pub fn walks_only() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            kinds: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn kinds(&self) -> &[MoveKind] {
        &self.kinds
    }

    /// Whether `mv` is a rotation these rules generate (walks are always permitted).
    pub fn permits(&self, mv: Move) -> bool {
        let kind = mv.kind();
        if kind == MoveKind::Walk {
            return true;
        }
        let args = if kind.is_row() { &self.rows } else { &self.columns };
        self.kinds.contains(&kind) && args.binary_search(&mv.argument()).is_ok()
    }

    fn arguments(&self, kind: MoveKind) -> &[usize] {
        if kind.is_row() {
            &self.rows
        } else {
            &self.columns
        }
    }
}

fn checked_list(
    what: &'static str,
    list: Vec<usize>,
    bound: usize,
) -> Result<Vec<usize>, MazeError> {
    let mut seen: FxHashSet<usize> = FxHashSet::default();
    for &value in &list {
        if value >= bound {
            return Err(MazeError::OutOfRange { what, value, bound });
        }
        if !seen.insert(value) {
            return Err(MazeError::Duplicate { what, value });
        }
    }
    let mut list = list;
    list.sort_unstable();
    Ok(list)
}

/// True if `next` may follow `prev` under the same-kind ordering rule.
#[inline]
pub fn in_canonical_order(prev: Option<Move>, next: Move) -> bool {
    match prev {
        Some(p) if p.kind() == next.kind() && !next.is_walk() => p.argument() <= next.argument(),
        _ => true,
    }
}

/// Emit every canonical successor of `node`.
///
/// Output order is deterministic: walks in flood-fill order, then rotations by kind and argument.
pub fn expand(node: &Arc<StateNode>, emit: &mut dyn FnMut(Arc<StateNode>)) {
    if node.turns_remaining() == 0 {
        return;
    }
    let prev = node.last_move();

    if !prev.is_some_and(Move::is_walk) {
        for cell in node.grid().reachable_from(node.location()) {
            if cell != node.location() {
                emit(StateNode::child(node, Move::Walk(cell)));
            }
        }
    }

    let rules = node.rules();
    for &kind in rules.kinds() {
        for &arg in rules.arguments(kind) {
            let mv = kind.with(arg);
            if in_canonical_order(prev, mv) {
                emit(StateNode::child(node, mv));
            }
        }
    }
}

/// Collect [`expand`] into a vector.
pub fn successors(node: &Arc<StateNode>) -> Vec<Arc<StateNode>> {
    let mut out = Vec::new();
    expand(node, &mut |c| out.push(c));
    out
}

/// Goals with more turns left rank first.
impl Searchable for Arc<StateNode> {
    fn expand(&self, emit: &mut dyn FnMut(Self)) {
        expand(self, emit);
    }

    fn is_goal(&self) -> bool {
        StateNode::is_goal(self)
    }

    fn score(&self) -> i64 {
        self.turns_remaining() as i64
    }
}
