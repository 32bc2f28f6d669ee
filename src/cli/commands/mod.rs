//! CLI command implementations.

pub mod compile;
pub mod probe;
pub mod serve;
