//! Game and state capability sets
//!
//! Every concrete game is a `Game` that hands out boxed `State`s. The tree
//! only ever talks to these traits, so one implementation serves card games,
//! dice games and hand-scripted fixtures alike.

use crate::error::GameError;
use std::fmt;

/// Action identifier. Chance outcomes and player moves share one numbering
/// per game.
pub type Action = i64;

/// Seat index of a real (non-chance) player.
pub type PlayerId = usize;

/// `(action, probability)` pairs in the order their producer reports them.
pub type ActionsAndProbs = Vec<(Action, f64)>;

/// Who moves next in a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// The outcome is drawn from `State::chance_outcomes`
    Chance,
    /// A seated player chooses an action
    Decision(PlayerId),
    /// Nobody moves; the game is over
    Terminal,
}

impl Player {
    /// Seat index for decision players
    pub fn id(self) -> Option<PlayerId> {
        match self {
            Player::Decision(id) => Some(id),
            Player::Chance | Player::Terminal => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Chance => write!(f, "chance"),
            Player::Decision(id) => write!(f, "player {}", id),
            Player::Terminal => write!(f, "terminal"),
        }
    }
}

/// A snapshot of an extensive-form game.
///
/// States are values: `child` never mutates the receiver, so a parent can
/// hand out one successor per legal action.
pub trait State: fmt::Debug + Send + Sync {
    /// Who moves next
    fn current_player(&self) -> Player;

    /// Number of seated players
    fn num_players(&self) -> usize;

    /// Legal actions in a stable, game-defined order. Empty at terminal states.
    fn legal_actions(&self) -> Vec<Action>;

    /// Outcome distribution at a chance node; empty anywhere else.
    fn chance_outcomes(&self) -> ActionsAndProbs;

    /// Advance this state in place.
    fn apply_action(&mut self, action: Action) -> Result<(), GameError>;

    /// Deep copy behind a fresh box
    fn clone_state(&self) -> Box<dyn State>;

    /// Actions taken from the initial state, in order.
    fn history(&self) -> &[Action];

    /// Information observable by `player`, serialized.
    fn information_state_string_for(&self, player: PlayerId) -> Result<String, GameError>;

    /// Per-player utilities. All zeros until the state is terminal.
    fn returns(&self) -> Vec<f64>;

    fn is_terminal(&self) -> bool {
        self.current_player() == Player::Terminal
    }

    fn is_chance_node(&self) -> bool {
        self.current_player() == Player::Chance
    }

    /// Successor reached by `action`; the receiver is left untouched.
    fn child(&self, action: Action) -> Result<Box<dyn State>, GameError> {
        let mut child = self.clone_state();
        child.apply_action(action)?;
        Ok(child)
    }

    /// Canonical history key: the actions joined by `", "`.
    fn history_string(&self) -> String {
        self.history()
            .iter()
            .map(|action| action.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Information state of whoever is acting.
    ///
    /// Chance and terminal states have no acting player and report an error.
    fn information_state_string(&self) -> Result<String, GameError> {
        match self.current_player() {
            Player::Decision(player) => self.information_state_string_for(player),
            player => Err(GameError::NoActingPlayer {
                player,
                history: self.history_string(),
            }),
        }
    }
}

impl Clone for Box<dyn State> {
    fn clone(&self) -> Self {
        self.clone_state()
    }
}

/// A game definition: a factory for initial states plus static metadata.
pub trait Game: fmt::Debug + Send + Sync {
    /// Registry name, e.g. `kuhn_poker`
    fn name(&self) -> &str;

    fn num_players(&self) -> usize;

    /// Size of the player action space (chance outcomes excluded).
    fn num_distinct_actions(&self) -> usize;

    fn new_initial_state(&self) -> Box<dyn State>;
}
