use std::path::PathBuf;

/// Errors raised while building grids, rules and scenarios, or while replaying moves.
///
/// Contract violations on already validated values (e.g. rotating row 7 of a 3-row grid) are not
/// represented here; those panic.
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("invalid hex character {ch:?} at position {position} of maze pattern")]
    InvalidPattern { ch: char, position: usize },

    #[error("cell value {value:#x} at position {position} does not fit in 4 bits")]
    InvalidCell { value: u8, position: usize },

    #[error("maze of {cells} cells does not match dimensions {rows}x{columns}")]
    Dimensions {
        cells: usize,
        rows: usize,
        columns: usize,
    },

    #[error("maze has {cells} cells (at most {max} supported)")]
    TooLarge { cells: usize, max: usize },

    #[error("{what} {value} is out of range (must be < {bound})")]
    OutOfRange {
        what: &'static str,
        value: usize,
        bound: usize,
    },

    #[error("{what} {value} listed more than once")]
    Duplicate { what: &'static str, value: usize },

    #[error("invalid move rules: {0}")]
    InvalidRule(String),

    #[error("illegal move {notation}: {reason}")]
    IllegalMove { notation: String, reason: String },

    #[error("can not parse move {0:?}")]
    ParseMove(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_error_display() {
        let err = MazeError::Dimensions {
            cells: 5,
            rows: 2,
            columns: 2,
        };
        assert_eq!(err.to_string(), "maze of 5 cells does not match dimensions 2x2");
    }

    #[test]
    fn out_of_range_error_display() {
        let err = MazeError::OutOfRange {
            what: "row",
            value: 4,
            bound: 3,
        };
        assert_eq!(err.to_string(), "row 4 is out of range (must be < 3)");
    }
}
