//! CLI command implementations.

pub mod cells;
pub mod compile;
pub mod version;
