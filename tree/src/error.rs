//! Tree construction and indexing errors

use crate::node::NodeId;
use arbor_engine::{Action, GameError, PlayerId, PolicyError};
use thiserror::Error;

/// Construction invariant violations. Any of these aborts the whole build;
/// they point at a defective game implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    #[error("responder {responder} is out of range for a {num_players}-player game")]
    ResponderOutOfRange { responder: PlayerId, num_players: usize },
    #[error("non-terminal state at history [{history}] reports no legal actions")]
    NoLegalActions { history: String },
    #[error("legal action {action} at history [{history}] produced no successor: {source}")]
    InvalidSuccessor {
        history: String,
        action: Action,
        source: GameError,
    },
    #[error("history [{history}] is produced by more than one node")]
    DuplicateHistory { history: String },
    #[error("more than {} histories", NodeId::MAX)]
    TooManyHistories,
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Failures of `compute_info_sets`.
#[derive(Debug, Error)]
pub enum InfoSetError {
    #[error("tree was built for player {tree} but indexed for player {requested}")]
    ResponderMismatch { tree: PlayerId, requested: PlayerId },
    #[error("initial state [{found}] does not match the tree root [{expected}]")]
    RootMismatch { expected: String, found: String },
    #[error("policy failed at history [{history}]: {source}")]
    Policy {
        history: String,
        source: PolicyError,
    },
}
