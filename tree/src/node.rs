//! History nodes
//!
//! A node owns the game state reached by its history and records how the
//! responder sees it. Nodes never point at each other directly: parent and
//! children are ids into the owning `HistoryTree`.

use arbor_engine::{Action, GameError, Player, PlayerId, State};
use std::fmt;

/// Node id type (index into the tree's flat node array)
pub type NodeId = u32;

/// Info state stored on every chance node
pub const CHANCE_NODE_INFO_STATE: &str = "Chance Node";

/// Info state stored on every terminal node
pub const TERMINAL_NODE_INFO_STATE: &str = "Terminal Node";

/// Classification of a node, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateType {
    /// A seated player chooses
    Decision,
    /// Nature draws an outcome
    Chance,
    /// The game is over
    Terminal,
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateType::Decision => write!(f, "decision"),
            StateType::Chance => write!(f, "chance"),
            StateType::Terminal => write!(f, "terminal"),
        }
    }
}

/// One reachable history of a game.
#[derive(Debug)]
pub struct HistoryNode {
    id: NodeId,
    parent: Option<NodeId>,
    history: String,
    state: Box<dyn State>,
    state_type: StateType,
    info_state: String,
    child_actions: Vec<Action>,
    children: Vec<NodeId>,
}

impl HistoryNode {
    /// Detached node with no children linked
    #[cfg(test)]
    pub(crate) fn new(responder: PlayerId, state: Box<dyn State>) -> Result<Self, GameError> {
        Self::with_parent(0, None, responder, state)
    }

    /// Classify `state` from `responder`'s point of view.
    ///
    /// Responder decisions carry the responder's information state; other
    /// players' decisions carry the acting player's generic one.
    pub(crate) fn with_parent(
        id: NodeId,
        parent: Option<NodeId>,
        responder: PlayerId,
        state: Box<dyn State>,
    ) -> Result<Self, GameError> {
        let (state_type, info_state) = match state.current_player() {
            Player::Terminal => (StateType::Terminal, TERMINAL_NODE_INFO_STATE.to_string()),
            Player::Chance => (StateType::Chance, CHANCE_NODE_INFO_STATE.to_string()),
            Player::Decision(player) if player == responder => {
                (StateType::Decision, state.information_state_string_for(responder)?)
            }
            Player::Decision(_) => (StateType::Decision, state.information_state_string()?),
        };
        let child_actions = match state_type {
            StateType::Terminal => Vec::new(),
            StateType::Decision | StateType::Chance => state.legal_actions(),
        };
        Ok(HistoryNode {
            id,
            parent,
            history: state.history_string(),
            state,
            state_type,
            info_state,
            children: Vec::with_capacity(child_actions.len()),
            child_actions,
        })
    }

    /// Link the next child. Children arrive in `child_actions` order.
    pub(crate) fn push_child(&mut self, child: NodeId) {
        debug_assert!(self.children.len() < self.child_actions.len());
        self.children.push(child);
    }

    /// Position in the owning tree (pre-order)
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Parent id (None for the root)
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Game state reached by this history
    pub fn state(&self) -> &dyn State {
        self.state.as_ref()
    }

    /// Actions from the initial state, joined by `", "`
    pub fn history(&self) -> &str {
        &self.history
    }

    /// Information state as seen by the responder, or a sentinel for
    /// chance and terminal nodes
    pub fn info_state(&self) -> &str {
        &self.info_state
    }

    /// Decision, chance or terminal
    pub fn state_type(&self) -> StateType {
        self.state_type
    }

    /// Acting player, if this is a decision node
    pub fn player(&self) -> Option<PlayerId> {
        self.state.current_player().id()
    }

    /// Legal actions in the order the state reports them
    pub fn child_actions(&self) -> &[Action] {
        &self.child_actions
    }

    /// Child ids, parallel to `child_actions`
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of linked children
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Id of the child reached by `action`
    pub fn child_id(&self, action: Action) -> Option<NodeId> {
        self.child_actions
            .iter()
            .position(|&a| a == action)
            .and_then(|i| self.children.get(i).copied())
    }

    pub fn is_decision(&self) -> bool {
        self.state_type == StateType::Decision
    }

    pub fn is_chance(&self) -> bool {
        self.state_type == StateType::Chance
    }

    pub fn is_terminal(&self) -> bool {
        self.state_type == StateType::Terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_game::{Defect, Scripted};

    fn at(actions: &[Action]) -> Box<dyn State> {
        let mut state: Box<dyn State> = Box::new(Scripted::new(Defect::None));
        for &action in actions {
            state.apply_action(action).unwrap();
        }
        state
    }

    #[test]
    fn test_chance_and_terminal_sentinels() {
        let root = HistoryNode::new(0, at(&[])).unwrap();
        assert_eq!(root.state_type(), StateType::Chance);
        assert_eq!(root.info_state(), CHANCE_NODE_INFO_STATE);
        assert_eq!(root.child_actions(), &[0, 1]);

        let leaf = HistoryNode::new(0, at(&[1, 0, 2])).unwrap();
        assert!(leaf.is_terminal());
        assert_eq!(leaf.info_state(), TERMINAL_NODE_INFO_STATE);
        assert!(leaf.child_actions().is_empty());
        assert_ne!(CHANCE_NODE_INFO_STATE, TERMINAL_NODE_INFO_STATE);
    }

    #[test]
    fn test_responder_decision_uses_responder_view() {
        let node = HistoryNode::new(1, at(&[1, 0])).unwrap();
        assert!(node.is_decision());
        assert_eq!(node.player(), Some(1));
        assert_eq!(node.info_state(), "m0");
        assert_eq!(node.history(), "1, 0");
    }

    #[test]
    fn test_opponent_decision_uses_generic_view() {
        // Player 0 acts; responder 1 is not on move.
        let node = HistoryNode::new(1, at(&[1])).unwrap();
        assert!(node.is_decision());
        assert_eq!(node.info_state(), "c1");
    }

    #[test]
    fn test_detached_node_has_no_children_yet() {
        let node = HistoryNode::new(0, at(&[0])).unwrap();
        assert_eq!(node.id(), 0);
        assert_eq!(node.parent(), None);
        assert_eq!(node.child_actions(), &[0, 1]);
        assert_eq!(node.num_children(), 0);
        assert_eq!(node.child_id(0), None);
    }
}
