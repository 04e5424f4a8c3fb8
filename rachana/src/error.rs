//! Error types for Rachana

use std::collections::BTreeSet;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Rachana error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration file or values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configured map is not provided by the map source
    #[error("Cannot find map name \"{name}\", know {available:?}")]
    UnknownMap {
        /// Offending map name
        name: String,
        /// Every map the source knows about
        available: BTreeSet<String>,
    },

    /// Map text could not be parsed into a tile map
    #[error("Malformed map: {0}")]
    MapFormat(String),

    /// Map has no tile the lane sampler may place a robot on
    #[error("Map has no candidate tiles (only_straight = {only_straight})")]
    NoCandidateTiles {
        /// Whether the sampler was restricted to straight tiles
        only_straight: bool,
    },

    /// Rejection sampling ran out of attempts
    #[error(
        "Placement infeasible: placed {placed} of {requested} after {attempts} attempts"
    )]
    PlacementInfeasible {
        /// Items accepted before the budget ran out
        placed: usize,
        /// Items requested
        requested: usize,
        /// Candidate draws spent
        attempts: usize,
    },

    /// Internal invariant violated
    #[error("Inconsistent state: {0}")]
    Inconsistent(String),

    /// Message (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Framing or transport protocol violation
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl Error {
    /// Whether the node can keep serving after this error.
    ///
    /// Infeasible placements depend on the seed and configuration, not on
    /// corrupted state, so the host reports them and carries on. Everything
    /// else aborts the current request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::PlacementInfeasible { .. } | Error::NoCandidateTiles { .. }
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::MapFormat(e.to_string())
    }
}
