//! Hand-scripted three-step game for tree and indexer tests
//!
//!   history len 0: Chance      [0 → p=0.25, 1 → p=0.75]   (the coin)
//!   history len 1: Decision P0 [0, 1]                      (sees the coin)
//!   history len 2: Decision P1 [0, 1, 2]                   (sees P0's move only)
//!   history len 3: Terminal
//!
//! Info states: P0 = "c{coin}", P1 = "m{P0 move}". The full tree has
//! 1 + 2 + 4 + 12 = 19 histories.
//!
//! A `Defect` turns the game into a misbehaving collaborator.
//!
//! `Opening` is the same game without the coin: P0 moves first with an
//! empty information state, so the root is a decision node (9 histories).

use arbor_engine::{Action, ActionsAndProbs, Game, GameError, Player, PlayerId, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Defect {
    None,
    /// P1's decision reports no legal actions
    EmptyDecision,
    /// P1's action 2 is reported legal but cannot be applied
    BrokenChild,
    /// Terminal histories serialize like their parent
    CollidingHistory,
    /// P1's information state cannot be produced
    BrokenInfoState,
}

#[derive(Debug, Clone, Copy)]
pub struct ScriptedGame(pub Defect);

impl Game for ScriptedGame {
    fn name(&self) -> &str {
        "scripted"
    }

    fn num_players(&self) -> usize {
        2
    }

    fn num_distinct_actions(&self) -> usize {
        3
    }

    fn new_initial_state(&self) -> Box<dyn State> {
        Box::new(Scripted::new(self.0))
    }
}

#[derive(Debug, Clone)]
pub struct Scripted {
    defect: Defect,
    history: Vec<Action>,
}

impl Scripted {
    pub fn new(defect: Defect) -> Self {
        Scripted {
            defect,
            history: Vec::new(),
        }
    }
}

impl State for Scripted {
    fn current_player(&self) -> Player {
        match self.history.len() {
            0 => Player::Chance,
            1 => Player::Decision(0),
            2 => Player::Decision(1),
            _ => Player::Terminal,
        }
    }

    fn num_players(&self) -> usize {
        2
    }

    fn legal_actions(&self) -> Vec<Action> {
        match self.history.len() {
            0 | 1 => vec![0, 1],
            2 if self.defect == Defect::EmptyDecision => vec![],
            2 => vec![0, 1, 2],
            _ => vec![],
        }
    }

    fn chance_outcomes(&self) -> ActionsAndProbs {
        if self.history.is_empty() {
            vec![(0, 0.25), (1, 0.75)]
        } else {
            vec![]
        }
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        let broken = self.defect == Defect::BrokenChild && self.history.len() == 2 && action == 2;
        if broken || !self.legal_actions().contains(&action) {
            return Err(GameError::IllegalAction {
                action,
                history: self.history_string(),
            });
        }
        self.history.push(action);
        Ok(())
    }

    fn clone_state(&self) -> Box<dyn State> {
        Box::new(self.clone())
    }

    fn history(&self) -> &[Action] {
        &self.history
    }

    fn history_string(&self) -> String {
        let shown = match (self.defect, self.history.len()) {
            (Defect::CollidingHistory, 3) => &self.history[..2],
            _ => &self.history[..],
        };
        shown.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ")
    }

    fn information_state_string_for(&self, player: PlayerId) -> Result<String, GameError> {
        match player {
            1 if self.defect == Defect::BrokenInfoState => Err(GameError::InvalidParameter {
                game: "scripted".to_string(),
                name: "info_state".to_string(),
                reason: "unavailable".to_string(),
            }),
            0 => Ok(self.history.first().map(|coin| format!("c{}", coin)).unwrap_or_default()),
            1 => Ok(self.history.get(1).map(|mv| format!("m{}", mv)).unwrap_or_default()),
            _ => Err(GameError::PlayerOutOfRange { player, num_players: 2 }),
        }
    }

    fn returns(&self) -> Vec<f64> {
        if self.history.len() < 3 {
            return vec![0.0, 0.0];
        }
        let matched = self.history[2] % 2 == self.history[0];
        let payoff = if matched { 1.0 } else { -1.0 };
        vec![-payoff, payoff]
    }
}

/// Coin-less variant whose root is P0's decision
#[derive(Debug, Clone, Copy)]
pub struct OpeningGame;

impl Game for OpeningGame {
    fn name(&self) -> &str {
        "opening"
    }

    fn num_players(&self) -> usize {
        2
    }

    fn num_distinct_actions(&self) -> usize {
        3
    }

    fn new_initial_state(&self) -> Box<dyn State> {
        Box::new(Opening::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Opening {
    history: Vec<Action>,
}

impl State for Opening {
    fn current_player(&self) -> Player {
        match self.history.len() {
            0 => Player::Decision(0),
            1 => Player::Decision(1),
            _ => Player::Terminal,
        }
    }

    fn num_players(&self) -> usize {
        2
    }

    fn legal_actions(&self) -> Vec<Action> {
        match self.history.len() {
            0 => vec![0, 1],
            1 => vec![0, 1, 2],
            _ => vec![],
        }
    }

    fn chance_outcomes(&self) -> ActionsAndProbs {
        vec![]
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        if !self.legal_actions().contains(&action) {
            return Err(GameError::IllegalAction {
                action,
                history: self.history_string(),
            });
        }
        self.history.push(action);
        Ok(())
    }

    fn clone_state(&self) -> Box<dyn State> {
        Box::new(self.clone())
    }

    fn history(&self) -> &[Action] {
        &self.history
    }

    fn information_state_string_for(&self, player: PlayerId) -> Result<String, GameError> {
        match player {
            0 => Ok(String::new()),
            1 => Ok(self.history.first().map(|mv| format!("m{}", mv)).unwrap_or_default()),
            _ => Err(GameError::PlayerOutOfRange { player, num_players: 2 }),
        }
    }

    fn returns(&self) -> Vec<f64> {
        match self.history.get(1) {
            Some(&reply) if reply == self.history[0] => vec![-1.0, 1.0],
            Some(_) => vec![1.0, -1.0],
            None => vec![0.0, 0.0],
        }
    }
}
