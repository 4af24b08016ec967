//! Policies: action distributions for a state or an information state
//!
//! The tree indexer only sees `&dyn Policy`. Closed-form rules, lookup tables
//! and callbacks into another runtime all satisfy the same contract and
//! report refusal through `PolicyError`.

use crate::error::{GameError, PolicyError};
use crate::game::{Action, ActionsAndProbs, Game, Player, PlayerId, State};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Something that can say how likely each action is.
pub trait Policy {
    /// Distribution for whoever is acting in `state`.
    fn state_policy(&self, state: &dyn State) -> Result<ActionsAndProbs, PolicyError> {
        match state.current_player() {
            Player::Decision(player) => self.state_policy_for_player(state, player),
            player => Err(PolicyError::NotDecisionState {
                player,
                history: state.history_string(),
            }),
        }
    }

    /// Distribution for `player` at `state`, looked up by that player's
    /// information state unless the policy overrides it.
    fn state_policy_for_player(
        &self,
        state: &dyn State,
        player: PlayerId,
    ) -> Result<ActionsAndProbs, PolicyError> {
        let info_state = state.information_state_string_for(player)?;
        self.info_state_policy(&info_state)
    }

    /// Distribution for a serialized information state.
    fn info_state_policy(&self, info_state: &str) -> Result<ActionsAndProbs, PolicyError> {
        Err(PolicyError::Unavailable {
            state: info_state.to_string(),
            reason: "this policy needs the full state".to_string(),
        })
    }

    /// Same as `state_policy`, keyed by action. Later duplicates win.
    fn state_policy_as_map(&self, state: &dyn State) -> Result<HashMap<Action, f64>, PolicyError> {
        Ok(self.state_policy(state)?.into_iter().collect())
    }

    /// Same as `state_policy`, split into parallel action/probability vectors.
    fn state_policy_as_parallel_vectors(
        &self,
        state: &dyn State,
    ) -> Result<(Vec<Action>, Vec<f64>), PolicyError> {
        Ok(self.state_policy(state)?.into_iter().unzip())
    }

    /// Same as `info_state_policy`, keyed by action. Later duplicates win.
    fn info_state_policy_as_map(
        &self,
        info_state: &str,
    ) -> Result<HashMap<Action, f64>, PolicyError> {
        Ok(self.info_state_policy(info_state)?.into_iter().collect())
    }

    /// Same as `info_state_policy`, split into parallel vectors.
    fn info_state_policy_as_parallel_vectors(
        &self,
        info_state: &str,
    ) -> Result<(Vec<Action>, Vec<f64>), PolicyError> {
        Ok(self.info_state_policy(info_state)?.into_iter().unzip())
    }

    /// Text dump of the whole policy. `precision` fixes the number of
    /// decimals; `None` prints the shortest exact form.
    fn serialize(
        &self,
        _precision: Option<usize>,
        _delimiter: &str,
    ) -> Result<String, PolicyError> {
        Err(PolicyError::Unavailable {
            state: String::new(),
            reason: "this policy has no finite table to serialize".to_string(),
        })
    }
}

/// Uniform distribution over `state`'s legal actions.
pub fn uniform_actions(state: &dyn State) -> ActionsAndProbs {
    let actions = state.legal_actions();
    let p = 1.0 / actions.len() as f64;
    actions.into_iter().map(|action| (action, p)).collect()
}

/// All mass on the first legal action, none on the rest.
pub fn first_legal_action(state: &dyn State) -> ActionsAndProbs {
    state
        .legal_actions()
        .into_iter()
        .enumerate()
        .map(|(i, action)| (action, if i == 0 { 1.0 } else { 0.0 }))
        .collect()
}

/// Every player mixes uniformly over legal actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandomPolicy;

impl Policy for UniformRandomPolicy {
    fn state_policy_for_player(
        &self,
        state: &dyn State,
        _player: PlayerId,
    ) -> Result<ActionsAndProbs, PolicyError> {
        Ok(uniform_actions(state))
    }
}

/// Every player always takes the first legal action.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstActionPolicy;

impl Policy for FirstActionPolicy {
    fn state_policy_for_player(
        &self,
        state: &dyn State,
        _player: PlayerId,
    ) -> Result<ActionsAndProbs, PolicyError> {
        Ok(first_legal_action(state))
    }
}

/// Lookup table from information state to action distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularPolicy {
    table: BTreeMap<String, ActionsAndProbs>,
}

impl TabularPolicy {
    pub fn new(table: impl IntoIterator<Item = (String, ActionsAndProbs)>) -> Self {
        TabularPolicy {
            table: table.into_iter().collect(),
        }
    }

    /// Tabulate `rule` at every decision state reachable in `game`, keyed by
    /// the acting player's information state. The first state seen for an
    /// information state decides its entry.
    pub fn from_game<F>(game: &dyn Game, rule: F) -> Result<Self, GameError>
    where
        F: Fn(&dyn State) -> ActionsAndProbs,
    {
        let mut table = BTreeMap::new();
        let mut stack = vec![game.new_initial_state()];
        let mut visited = 0usize;
        while let Some(state) = stack.pop() {
            visited += 1;
            if state.is_terminal() {
                continue;
            }
            if !state.is_chance_node() {
                let info_state = state.information_state_string()?;
                if !table.contains_key(&info_state) {
                    table.insert(info_state, rule(state.as_ref()));
                }
            }
            for action in state.legal_actions() {
                stack.push(state.child(action)?);
            }
        }
        log::debug!(
            "tabulated {} info states of {} over {} states",
            table.len(),
            game.name(),
            visited
        );
        Ok(TabularPolicy { table })
    }

    /// Uniform random play at every information state of `game`.
    pub fn uniform(game: &dyn Game) -> Result<Self, GameError> {
        Self::from_game(game, uniform_actions)
    }

    /// First-legal-action play at every information state of `game`.
    pub fn first_action(game: &dyn Game) -> Result<Self, GameError> {
        Self::from_game(game, first_legal_action)
    }

    pub fn get(&self, info_state: &str) -> Option<&[(Action, f64)]> {
        self.table.get(info_state).map(Vec::as_slice)
    }

    /// Replace the entry for `info_state`, returning the previous one.
    pub fn insert(
        &mut self,
        info_state: impl Into<String>,
        policy: ActionsAndProbs,
    ) -> Option<ActionsAndProbs> {
        self.table.insert(info_state.into(), policy)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Entries in info-state order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(Action, f64)])> {
        self.table.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn to_json(&self) -> Result<String, PolicyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Policy for TabularPolicy {
    fn info_state_policy(&self, info_state: &str) -> Result<ActionsAndProbs, PolicyError> {
        self.table
            .get(info_state)
            .cloned()
            .ok_or_else(|| PolicyError::MissingInfoState(info_state.to_string()))
    }

    /// One line per info state, in sorted order:
    /// `<info_state><delimiter><action>=<prob>,<action>=<prob>`.
    fn serialize(&self, precision: Option<usize>, delimiter: &str) -> Result<String, PolicyError> {
        if delimiter.is_empty() || delimiter.contains([',', '=', '\n']) {
            return Err(PolicyError::InvalidParameter(format!(
                "serialization delimiter {:?} must be non-empty and free of ',', '=' and newlines",
                delimiter
            )));
        }
        let mut out = String::new();
        for (info_state, probs) in &self.table {
            let entries = probs
                .iter()
                .map(|&(action, p)| match precision {
                    Some(digits) => format!("{}={:.*}", action, digits, p),
                    None => format!("{}={}", action, p),
                })
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(info_state);
            out.push_str(delimiter);
            out.push_str(&entries);
            out.push('\n');
        }
        Ok(out)
    }
}

/// A policy whose answers come from a caller-supplied function.
///
/// This is the seam for policies implemented outside the process or in
/// another runtime: the closure marshals the state across, and any failure
/// it reports is passed through untouched.
pub struct CallbackPolicy<F> {
    callback: F,
}

impl<F> CallbackPolicy<F>
where
    F: Fn(&dyn State) -> Result<ActionsAndProbs, PolicyError>,
{
    pub fn new(callback: F) -> Self {
        CallbackPolicy { callback }
    }
}

impl<F> Policy for CallbackPolicy<F>
where
    F: Fn(&dyn State) -> Result<ActionsAndProbs, PolicyError>,
{
    fn state_policy_for_player(
        &self,
        state: &dyn State,
        _player: PlayerId,
    ) -> Result<ActionsAndProbs, PolicyError> {
        (self.callback)(state)
    }
}

impl<F> fmt::Debug for CallbackPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackPolicy").finish_non_exhaustive()
    }
}
