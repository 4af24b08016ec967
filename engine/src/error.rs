//! Error types shared by games and policies

use crate::game::{Action, Player, PlayerId};
use thiserror::Error;

/// Failures reported by a game or one of its states.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("action {action} is not legal after history [{history}]")]
    IllegalAction { action: Action, history: String },
    #[error("no acting player at history [{history}] (next to move: {player})")]
    NoActingPlayer { player: Player, history: String },
    #[error("player {player} is out of range for a {num_players}-player game")]
    PlayerOutOfRange { player: PlayerId, num_players: usize },
    #[error("unknown game `{0}`")]
    UnknownGame(String),
    #[error("malformed game string `{0}`")]
    MalformedGameString(String),
    #[error("invalid parameter `{name}` for {game}: {reason}")]
    InvalidParameter {
        game: String,
        name: String,
        reason: String,
    },
}

/// Failures reported by a policy when asked for an action distribution.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("no policy entry for info state `{0}`")]
    MissingInfoState(String),
    #[error("policy queried at a non-decision state [{history}] (next to move: {player})")]
    NotDecisionState { player: Player, history: String },
    /// The policy implementation itself refused to answer. Externally backed
    /// policies report their own failures through this variant.
    #[error("policy cannot answer for `{state}`: {reason}")]
    Unavailable { state: String, reason: String },
    #[error("invalid policy parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("policy serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
