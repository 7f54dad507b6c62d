//! Search-space generation and the parallel engine that walks it.

pub mod engine;
pub mod movegen;
pub mod resources;
