//! Error types

/// Transposition table errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The configured entry limit is smaller than the reachable state space
    #[error("transposition table full: limit of {limit} entries reached")]
    CapacityExceeded { limit: usize },
}

/// Rejected moves from checked play
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} is off the board")]
    OutOfRange(usize),

    #[error("cell {0} is not a legal placement")]
    Illegal(usize),

    #[error("cannot pass while a legal placement exists")]
    PassWithMoves,

    #[error("cannot parse move {0:?}")]
    Parse(String),
}
