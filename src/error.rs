//! Error taxonomy shared by every fallible entry point in this crate.
//!
//! Internal logic errors (broken invariants) are not part of this enum —
//! they are checked with `assert!`/`debug_assert!` and are bugs, not
//! recoverable conditions.

use std::fmt;
use std::io;

/// A single tagged failure surfaced to a top-level driver call.
#[derive(Debug)]
pub enum Error {
    /// Malformed file, out-of-range node id, inconsistent header.
    InvalidInput(String),
    /// Operation requires an undirected (symmetric) graph.
    NotSymmetric,
    /// Operation requires a graph without duplicate `(tail, head)` arcs.
    HasMultiArcs,
    /// Operation requires a loop-free graph.
    HasLoops,
    /// Operation (e.g. enumerate cuts) requires a connected graph.
    NotConnected,
    /// Operation requires arcs sorted by tail.
    UnsortedTails,
    /// Negative arc weight where a non-negative one is required.
    InvalidCapacity,
    /// Source or target terminal set was empty.
    EmptyTerminals,
    /// Unknown config key, or a value out of its admissible range.
    ConfigError(String),
    /// Chordal-supergraph elimination expected a simplicial node but found none.
    NotChordal,
    /// Wraps an underlying I/O failure (file not found, truncated read, ...).
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Error::NotSymmetric => write!(f, "graph is not symmetric"),
            Error::HasMultiArcs => write!(f, "graph has duplicate arcs"),
            Error::HasLoops => write!(f, "graph has loops"),
            Error::NotConnected => write!(f, "graph is not connected"),
            Error::UnsortedTails => write!(f, "arcs are not sorted by tail"),
            Error::InvalidCapacity => write!(f, "negative arc capacity"),
            Error::EmptyTerminals => write!(f, "source or target set is empty"),
            Error::ConfigError(msg) => write!(f, "config error: {}", msg),
            Error::NotChordal => write!(f, "expected a simplicial node during elimination but found none"),
            Error::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::ConfigError(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
