use std::sync::Arc;

use crate::core::grid::Grid;
use crate::core::moves::Move;
use crate::error::MazeError;
use crate::search::movegen::MoveRules;

/// An immutable search state.
///
/// Nodes form a persistent tree: each child holds an `Arc` to its parent, so many frontier nodes
/// share one history and a node is freed once nothing downstream needs it for path
/// reconstruction.
#[derive(Debug)]
pub struct StateNode {
    grid: Grid,
    location: usize,
    turns_remaining: u8,
    mv: Option<Move>,
    parent: Option<Arc<StateNode>>,
    rules: Arc<MoveRules>,
}

impl StateNode {
    /// The start of a puzzle: token on cell 0.
    pub fn root(grid: Grid, turns: u8, rules: Arc<MoveRules>) -> Arc<StateNode> {
        Arc::new(StateNode {
            grid,
            location: 0,
            turns_remaining: turns,
            mv: None,
            parent: None,
            rules,
        })
    }

    /// Apply `mv` without legality checks beyond the grid's own bounds assertions.
    ///
    /// Panics if no turns remain or the argument is out of range; callers pass moves that came
    /// from the move generator or from [`StateNode::try_apply`].
    pub fn child(parent: &Arc<StateNode>, mv: Move) -> Arc<StateNode> {
        assert!(parent.turns_remaining > 0, "no turns remaining");
        let (grid, location) = match mv {
            Move::Walk(target) => {
                assert!(
                    target < parent.grid.len(),
                    "walk target {target} outside grid of {} cells",
                    parent.grid.len()
                );
                (parent.grid.clone(), target)
            }
            rotation => (parent.grid.apply(rotation), parent.location),
        };
        Arc::new(StateNode {
            grid,
            location,
            turns_remaining: parent.turns_remaining - 1,
            mv: Some(mv),
            parent: Some(Arc::clone(parent)),
            rules: Arc::clone(&parent.rules),
        })
    }

    /// Validate a user-supplied move and apply it.
    ///
    /// Rotations are not required to be in the scenario's allow-list; a replay may use any
    /// in-bounds rotation.
    pub fn try_apply(parent: &Arc<StateNode>, mv: Move) -> Result<Arc<StateNode>, MazeError> {
        let illegal = |reason: &str| MazeError::IllegalMove {
            notation: mv.notation(parent.grid.columns()).to_string(),
            reason: reason.to_string(),
        };

        if parent.turns_remaining == 0 {
            return Err(illegal("no turns remaining"));
        }
        mv.validate(&parent.grid)?;
        if let Move::Walk(target) = mv {
            if target == parent.location {
                return Err(illegal("token is already there"));
            }
            if !parent.grid.can_reach(parent.location, target) {
                return Err(illegal("target is not reachable from the token"));
            }
        }
        Ok(StateNode::child(parent, mv))
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn location(&self) -> usize {
        self.location
    }

    #[inline]
    pub fn turns_remaining(&self) -> u8 {
        self.turns_remaining
    }

    /// The move that produced this node (`None` at the root).
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.mv
    }

    pub fn parent(&self) -> Option<&Arc<StateNode>> {
        self.parent.as_ref()
    }

    pub fn rules(&self) -> &MoveRules {
        &self.rules
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Token on the last cell.
    #[inline]
    pub fn is_goal(&self) -> bool {
        self.location == self.grid.last()
    }

    /// Turns taken since the root.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// This node, then its parent, up to the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Moves from the root to this node.
    pub fn moves(&self) -> Vec<Move> {
        let mut out: Vec<Move> = self.ancestors().filter_map(|n| n.mv).collect();
        out.reverse();
        out
    }

    /// Nodes from the root to this node, inclusive.
    pub fn path(self: &Arc<Self>) -> Vec<Arc<StateNode>> {
        let mut out = vec![Arc::clone(self)];
        let mut cur = self.parent.clone();
        while let Some(n) = cur {
            cur = n.parent.clone();
            out.push(n);
        }
        out.reverse();
        out
    }

    /// Space-separated move notation, e.g. `R1 D0 (2,3)`.
    pub fn notation(&self) -> String {
        let columns = self.grid.columns();
        self.moves()
            .into_iter()
            .map(|m| m.notation(columns).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct Ancestors<'a> {
    next: Option<&'a StateNode>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a StateNode;

    fn next(&mut self) -> Option<&'a StateNode> {
        let cur = self.next?;
        self.next = cur.parent.as_deref();
        Some(cur)
    }
}
