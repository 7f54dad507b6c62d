//! A solver for sliding-tile mazes: walk the token through open passages or rotate a whole row
//! or column each turn, and reach the last cell within a turn budget.

pub mod core;
pub mod error;
pub mod render;
pub mod scenario;
pub mod scenarios;
pub mod search;
pub mod state;
