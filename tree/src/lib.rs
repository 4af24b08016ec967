//! arbor Tree - History tree construction and info-set indexing
//!
//! `HistoryTree::build` materializes every reachable history of a game from a
//! responder's point of view. `compute_info_sets` then walks the finished tree
//! once under an opponent policy and groups the responder's decision nodes by
//! information state, each with its counterfactual reach probability.
//!
//! Trees are built fully and eagerly. Memory grows with the number of
//! reachable histories, so unbounded games are out of reach by construction.

pub mod error;
pub mod infosets;
pub mod node;

#[cfg(test)]
mod test_game;

pub use error::{InfoSetError, TreeError};
pub use infosets::{compute_info_sets, InfoSets};
pub use node::{
    HistoryNode, NodeId, StateType, CHANCE_NODE_INFO_STATE, TERMINAL_NODE_INFO_STATE,
};

use arbor_engine::{Action, PlayerId, State};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Every reachable history of a game, owned in one flat arena.
///
/// Node ids are assigned in depth-first pre-order, so the root is node 0 and
/// `nodes[id]` is the node with that id. Dropping the tree drops the arena;
/// there is no recursive teardown.
#[derive(Debug)]
pub struct HistoryTree {
    nodes: Vec<HistoryNode>,
    by_history: HashMap<String, NodeId>,
    responder: PlayerId,
}

/// A state waiting to become a node
struct Pending {
    parent: Option<NodeId>,
    state: Box<dyn State>,
}

impl HistoryTree {
    /// Expand every legal action and chance outcome from `initial_state`.
    ///
    /// Uses an explicit work stack, so stack depth does not grow with game
    /// length. Any inconsistency reported by the game aborts the build.
    pub fn build(initial_state: Box<dyn State>, responder: PlayerId) -> Result<Self, TreeError> {
        let num_players = initial_state.num_players();
        if responder >= num_players {
            return Err(TreeError::ResponderOutOfRange {
                responder,
                num_players,
            });
        }
        let mut nodes: Vec<HistoryNode> = Vec::new();
        let mut by_history: HashMap<String, NodeId> = HashMap::new();
        let mut stack = vec![Pending {
            parent: None,
            state: initial_state,
        }];

        while let Some(Pending { parent, state }) = stack.pop() {
            let id = NodeId::try_from(nodes.len()).map_err(|_| TreeError::TooManyHistories)?;
            let node = HistoryNode::with_parent(id, parent, responder, state)?;
            log::trace!("{:<10}{:<12}[{}]", id, node.state_type(), node.history());

            if !node.is_terminal() && node.child_actions().is_empty() {
                return Err(TreeError::NoLegalActions {
                    history: node.history().to_string(),
                });
            }
            let successors = node
                .child_actions()
                .iter()
                .map(|&action| Self::successor(&node, id, action))
                .collect::<Result<Vec<_>, _>>()?;
            // reversed so the first legal action is popped (and numbered) first
            stack.extend(successors.into_iter().rev());

            match by_history.entry(node.history().to_string()) {
                Entry::Occupied(_) => {
                    return Err(TreeError::DuplicateHistory {
                        history: node.history().to_string(),
                    })
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            if let Some(parent) = parent {
                nodes[parent as usize].push_child(id);
            }
            nodes.push(node);
        }

        let tree = HistoryTree {
            nodes,
            by_history,
            responder,
        };
        tree.log_summary();
        Ok(tree)
    }

    fn successor(node: &HistoryNode, id: NodeId, action: Action) -> Result<Pending, TreeError> {
        node.state()
            .child(action)
            .map(|state| Pending {
                parent: Some(id),
                state,
            })
            .map_err(|source| TreeError::InvalidSuccessor {
                history: node.history().to_string(),
                action,
                source,
            })
    }

    fn log_summary(&self) {
        let count = |kind: StateType| self.nodes.iter().filter(|n| n.state_type() == kind).count();
        log::debug!(
            "{:<12}{:<12}{:<12}",
            format!("decision {}", count(StateType::Decision)),
            format!("chance {}", count(StateType::Chance)),
            format!("terminal {}", count(StateType::Terminal)),
        );
        log::info!(
            "built history tree for player {}: {} histories",
            self.responder,
            self.nodes.len()
        );
    }

    /// Total node count (decision + chance + terminal)
    pub fn num_histories(&self) -> usize {
        self.nodes.len()
    }

    /// Player the tree was built for
    pub fn responder(&self) -> PlayerId {
        self.responder
    }

    /// Node built from the initial state (id 0)
    pub fn root(&self) -> &HistoryNode {
        // build always pushes the initial state first
        &self.nodes[0]
    }

    /// Get a node by ID
    pub fn node(&self, id: NodeId) -> Option<&HistoryNode> {
        self.nodes.get(id as usize)
    }

    /// Node for an exact history string, if one exists
    pub fn by_history(&self, history: &str) -> Option<&HistoryNode> {
        self.by_history.get(history).and_then(|&id| self.node(id))
    }

    /// Every history key in pre-order. Call again to restart.
    pub fn histories(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(HistoryNode::history)
    }

    /// Every node in pre-order
    pub fn iter(&self) -> impl Iterator<Item = &HistoryNode> + '_ {
        self.nodes.iter()
    }

    /// Child of `node` reached by `action`
    pub fn child(&self, node: &HistoryNode, action: Action) -> Option<&HistoryNode> {
        node.child_id(action).and_then(|id| self.node(id))
    }

    /// `(action, child)` pairs of `node`, in legal-action order
    pub fn children<'t>(
        &'t self,
        node: &'t HistoryNode,
    ) -> impl Iterator<Item = (Action, &'t HistoryNode)> + 't {
        node.child_actions()
            .iter()
            .zip(node.children())
            .map(move |(&action, &id)| (action, &self.nodes[id as usize]))
    }
}
