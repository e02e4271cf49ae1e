//! Line-oriented editing of files far larger than memory.
//!
//! A file is memory-mapped once, indexed in parallel, and then edited through
//! a piece table whose pieces span whole lines of either the mapping or an
//! append-only add buffer. [`engine::Engine`] is the entry point.

pub mod config;
pub mod edit;
pub mod engine;
pub mod enums;
pub mod errors;
pub mod line_index;
pub mod persist;
pub mod piece_table;
pub mod pool;
pub mod query;
pub mod search;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::EngineConfig;
pub use engine::Engine;
pub use errors::{EngineError, EngineResult};
