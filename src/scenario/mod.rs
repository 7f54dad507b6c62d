//! Scenario layer: glue between the pure maze model and the search engine.
//!
//! A [`Scenario`] bundles:
//! - the starting [`Grid`] and turn budget,
//! - the rotation allow-lists ([`MoveRules`]) that bound the branching factor,
//! - the engine configuration ([`SearchConfig`]).
//!
//! Scenarios come from JSON files ([`ScenarioFile`]), from command-line arguments, or from the
//! built-in registry in [`crate::scenarios`]. Everything is validated up front; a `Scenario`
//! that exists is safe to search.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::grid::Grid;
use crate::core::moves::MoveKind;
use crate::error::MazeError;
use crate::search::engine::{ParallelSearch, SearchError, SearchOutcome};
use crate::search::movegen::MoveRules;
use crate::search::resources::ResourceLimits;
use crate::state::StateNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
/// Engine settings. Opaque to the maze model; passed straight to [`ParallelSearch`].
pub struct SearchConfig {
    pub workers: usize,
    pub result_limit: usize,
    pub max_nodes: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: 16,
            result_limit: 8,
            max_nodes: ResourceLimits::default().max_nodes,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.workers == 0 {
            return Err(MazeError::InvalidConfig("Workers must be at least 1".to_string()));
        }
        if self.result_limit == 0 {
            return Err(MazeError::InvalidConfig(
                "ResultLimit must be at least 1".to_string(),
            ));
        }
        if self.max_nodes == 0 {
            return Err(MazeError::InvalidConfig("MaxNodes must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
/// On-disk scenario, e.g.
///
/// ```json
/// { "Turns": 2, "Columns": 2, "Rows": 2, "MazePattern": "4380" }
/// ```
///
/// Omitted allow-lists mean "every row" / "every column"; omitted `Rotations` means right and
/// down only.
pub struct ScenarioFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub turns: u8,
    pub columns: u8,
    pub rows: u8,
    pub maze_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotatable_rows: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotatable_columns: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotations: Option<Vec<MoveKind>>,
    #[serde(default)]
    pub search: SearchConfig,
}

impl ScenarioFile {
    pub fn from_json(text: &str) -> Result<Self, MazeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Validate everything and build the searchable scenario.
    pub fn build(self) -> Result<Scenario, MazeError> {
        let grid = Grid::parse(&self.maze_pattern, self.columns as usize)?;
        if grid.rows() != self.rows as usize {
            return Err(MazeError::Dimensions {
                cells: grid.len(),
                rows: self.rows as usize,
                columns: self.columns as usize,
            });
        }
        self.search.validate()?;

        let default_kinds = MoveRules::all(&grid).kinds().to_vec();
        let rules = MoveRules::new(
            &grid,
            self.rotatable_rows.unwrap_or_else(|| (0..grid.rows()).collect()),
            self.rotatable_columns
                .unwrap_or_else(|| (0..grid.columns()).collect()),
            self.rotations.unwrap_or(default_kinds),
        )?;

        Ok(Scenario {
            name: self.name.unwrap_or_else(|| "unnamed".to_string()),
            grid,
            turns: self.turns,
            rules: Arc::new(rules),
            search: self.search,
        })
    }
}

#[derive(Debug, Clone)]
/// A validated puzzle instance.
pub struct Scenario {
    pub name: String,
    pub grid: Grid,
    pub turns: u8,
    pub rules: Arc<MoveRules>,
    pub search: SearchConfig,
}

impl Scenario {
    pub fn from_path(path: &Path) -> Result<Self, MazeError> {
        ScenarioFile::from_path(path)?.build()
    }

    pub fn from_json(text: &str) -> Result<Self, MazeError> {
        ScenarioFile::from_json(text)?.build()
    }

    /// Token on cell 0 with the full turn budget.
    pub fn root(&self) -> Arc<StateNode> {
        StateNode::root(self.grid.clone(), self.turns, Arc::clone(&self.rules))
    }

    /// Engine configured from [`SearchConfig`], searching as deep as the turn budget.
    pub fn engine(&self) -> ParallelSearch {
        ParallelSearch::new(
            self.search.workers,
            self.turns as usize,
            self.search.result_limit,
        )
        .with_limits(ResourceLimits {
            max_nodes: self.search.max_nodes,
        })
    }

    pub fn solve(&self) -> Result<SearchOutcome<Arc<StateNode>>, SearchError> {
        self.engine().run(self.root())
    }

    /// Round-trip back to the on-disk form.
    pub fn to_file(&self) -> ScenarioFile {
        ScenarioFile {
            name: Some(self.name.clone()),
            turns: self.turns,
            columns: self.grid.columns() as u8,
            rows: self.grid.rows() as u8,
            maze_pattern: self.grid.to_string(),
            rotatable_rows: Some(self.rules.rows().to_vec()),
            rotatable_columns: Some(self.rules.columns().to_vec()),
            rotations: Some(self.rules.kinds().to_vec()),
            search: self.search,
        }
    }
}

/// Parse `ROWSxCOLUMNS`, e.g. `4x5`.
pub fn parse_dimensions(text: &str) -> Result<(u8, u8), MazeError> {
    let bad = || MazeError::InvalidConfig(format!("dimensions must look like 4x5, got {text:?}"));
    let (r, c) = text
        .split_once(['x', 'X'])
        .ok_or_else(bad)?;
    let rows: u8 = r.trim().parse().map_err(|_| bad())?;
    let columns: u8 = c.trim().parse().map_err(|_| bad())?;
    if rows == 0 || columns == 0 {
        return Err(bad());
    }
    Ok((rows, columns))
}
