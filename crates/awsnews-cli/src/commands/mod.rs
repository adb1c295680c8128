//! CLI command definitions.

pub mod fetch;
pub mod serve;
