//! Counterfactual reach indexing
//!
//! Groups the responder's decision nodes by information state. Each entry
//! carries the probability that chance and the other players (following a
//! fixed policy) bring play to that history, ignoring the responder's own
//! choices. Best-response style computations consume this map.

use crate::error::InfoSetError;
use crate::node::{HistoryNode, NodeId, StateType};
use crate::HistoryTree;
use arbor_engine::{Action, ActionsAndProbs, Player, PlayerId, Policy, State};
use std::collections::HashMap;

/// Info state -> every responder history in it, with counterfactual reach.
/// Histories within one info state appear in tree pre-order.
pub type InfoSets<'t> = HashMap<String, Vec<(&'t HistoryNode, f64)>>;

/// Walk `tree` once and index `responder`'s decision nodes.
///
/// `initial_state` must be the state the tree was built from. Policy
/// entries for actions that are not legal are ignored; legal actions the
/// policy leaves out get probability zero, and their subtrees are still
/// indexed.
pub fn compute_info_sets<'t>(
    tree: &'t HistoryTree,
    initial_state: &dyn State,
    responder: PlayerId,
    policy: &dyn Policy,
) -> Result<InfoSets<'t>, InfoSetError> {
    if tree.responder() != responder {
        return Err(InfoSetError::ResponderMismatch {
            tree: tree.responder(),
            requested: responder,
        });
    }
    let root = tree.root();
    let found = initial_state.history_string();
    if found != root.history() {
        return Err(InfoSetError::RootMismatch {
            expected: root.history().to_string(),
            found,
        });
    }

    let mut infosets: InfoSets<'t> = HashMap::new();
    let mut stack: Vec<(NodeId, f64)> = vec![(root.id(), 1.0)];
    let mut visited = 0usize;

    while let Some((id, reach)) = stack.pop() {
        // ids on the stack all come from `tree`
        let node = &tree.nodes[id as usize];
        visited += 1;

        let weights: Vec<f64> = match node.state_type() {
            StateType::Terminal => continue,
            StateType::Decision if node.player() == Some(responder) => {
                infosets
                    .entry(node.info_state().to_string())
                    .or_default()
                    .push((node, reach));
                vec![reach; node.num_children()]
            }
            StateType::Decision => {
                let probs = policy
                    .state_policy(node.state())
                    .map_err(|source| InfoSetError::Policy {
                        history: node.history().to_string(),
                        source,
                    })?;
                scale(node, &probs, reach)
            }
            StateType::Chance => scale(node, &node.state().chance_outcomes(), reach),
        };

        // reversed so the first legal action is visited first
        for (&child, weight) in node.children().iter().zip(weights).rev() {
            stack.push((child, weight));
        }
    }

    log::debug!(
        "indexed {} info states for player {} over {} histories",
        infosets.len(),
        responder,
        visited
    );
    Ok(infosets)
}

/// Child reach for each of `node`'s children: `reach` times the first
/// probability listed for that action, or zero if it is not listed.
fn scale(node: &HistoryNode, probs: &ActionsAndProbs, reach: f64) -> Vec<f64> {
    let lookup = |action: Action| {
        probs
            .iter()
            .find(|(a, _)| *a == action)
            .map(|&(_, p)| p)
            .unwrap_or(0.0)
    };
    let extra = probs
        .iter()
        .filter(|(a, _)| !node.child_actions().contains(a))
        .count();
    if extra > 0 {
        let who = match node.state().current_player() {
            Player::Chance => "chance".to_string(),
            player => player.to_string(),
        };
        log::debug!(
            "{} lists {} actions that are not legal at [{}]; ignored",
            who,
            extra,
            node.history()
        );
    }
    node.child_actions()
        .iter()
        .map(|&action| reach * lookup(action))
        .collect()
}
