//! Errors raised at the load/config boundary, in the style of the game
//! crate's own `miette`-based error handling at its I/O boundaries
//! (`window.rs`). Nothing in the stepping/predicate API returns a `Result`
//! (spec.md §7): bad indices are a loader bug, not a recoverable condition.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced by config loading and world validation.
#[derive(Debug, Error, Diagnostic)]
pub enum CoreError {
    /// Failed to read a config file from disk.
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config TOML did not parse.
    #[error("failed to parse config TOML")]
    TomlParse(#[from] toml::de::Error),

    /// A lump referenced a side/edge/vertex range outside the index pool.
    #[error("lump {lump} references index range [{start}, {end}) out of bounds for pool of length {pool_len}")]
    IndexRangeOutOfBounds {
        lump: usize,
        start: usize,
        end: usize,
        pool_len: usize,
    },

    /// A lump has zero sides, so it cannot bound a convex region.
    #[error("lump {lump} has zero sides")]
    EmptyLump { lump: usize },

    /// A body, node, or path referenced an index that does not exist.
    #[error("{what} index {index} out of range (len {len})")]
    DanglingIndex {
        what: &'static str,
        index: i32,
        len: usize,
    },

    /// A path's successor chain does not cycle back on itself within the
    /// number of paths in the world (spec.md §3, Path invariant).
    #[error("path {start} does not reach a cycle")]
    PathDoesNotCycle { start: usize },
}
