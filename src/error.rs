//! Error types for graph construction, snapshots and disintegration runs.

use std::io;

use thiserror::Error;

use crate::graph::NodeId;

/// The error type returned by fallible operations in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An edge endpoint doesn't name a live node, or both endpoints are the same node.
    #[error("invalid edge ({from}, {to}): {reason}")]
    InvalidReference {
        from: NodeId,
        to: NodeId,
        reason: &'static str,
    },

    /// A disintegration budget was negative.
    #[error("invalid budget {0}: the cost must be non-negative")]
    InvalidBudget(i64),

    /// A strategy name didn't match any known selection mode.
    #[error("unknown strategy '{0}'. Valid strategies: max, min, mean")]
    InvalidStrategy(String),

    /// A snapshot document violates the expected schema.
    #[error("malformed snapshot: {0}")]
    MalformedInput(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = Error::InvalidReference {
            from: 0,
            to: 7,
            reason: "node is not alive",
        };
        assert_eq!(err.to_string(), "invalid edge (0, 7): node is not alive");

        assert_eq!(
            Error::InvalidStrategy("median".into()).to_string(),
            "unknown strategy 'median'. Valid strategies: max, min, mean"
        );
        assert_eq!(
            Error::InvalidBudget(-1).to_string(),
            "invalid budget -1: the cost must be non-negative"
        );
    }
}
