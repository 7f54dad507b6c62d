//! Maze primitives.
//!
//! - [`cell`]: the 4-bit wall mask and compass directions.
//! - [`grid`]: an immutable rectangular maze with copy-on-transform rotations.
//! - [`reach`]: the flood fill that decides where a walk can go.
//! - [`moves`]: the tagged turn type and its text notation.

pub mod cell;
pub mod grid;
pub mod moves;
pub mod reach;
