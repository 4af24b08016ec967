//! Kuhn poker
//!
//! A deck of `players + 1` cards, one card dealt to each seat, one betting
//! round with a single bet size. Each player antes 1; a bet (or call) adds 1.
//! The betting ends once everyone has passed, or once every other player has
//! answered the first bet. The highest card among the players who put in a
//! bet wins; with no bet the highest card overall wins.

use crate::params::GameParameters;
use arbor_engine::{
    Action, ActionsAndProbs, Game, GameError, Player, PlayerId, PolicyError, State, TabularPolicy,
};

pub const NAME: &str = "kuhn_poker";

pub const PASS: Action = 0;
pub const BET: Action = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KuhnPoker {
    num_players: usize,
}

impl KuhnPoker {
    pub const DEFAULT_PLAYERS: usize = 2;

    pub fn new(num_players: usize) -> Result<Self, GameError> {
        GameParameters::new()
            .with("players", num_players as i64)
            .count(NAME, "players", Self::DEFAULT_PLAYERS, 2)
            .map(|num_players| KuhnPoker { num_players })
    }

    pub fn from_params(params: &GameParameters) -> Result<Self, GameError> {
        params.check_known(NAME, &["players"])?;
        let num_players = params.count(NAME, "players", Self::DEFAULT_PLAYERS, 2)?;
        Ok(KuhnPoker { num_players })
    }
}

impl Default for KuhnPoker {
    fn default() -> Self {
        KuhnPoker { num_players: Self::DEFAULT_PLAYERS }
    }
}

impl Game for KuhnPoker {
    fn name(&self) -> &str {
        NAME
    }

    fn num_players(&self) -> usize {
        self.num_players
    }

    fn num_distinct_actions(&self) -> usize {
        2
    }

    fn new_initial_state(&self) -> Box<dyn State> {
        Box::new(KuhnState::new(self.num_players))
    }
}

#[derive(Debug, Clone)]
pub struct KuhnState {
    num_players: usize,
    history: Vec<Action>,
    /// Card held by each seat, in dealing order
    cards: Vec<usize>,
    /// Betting actions in the order they were taken
    bets: Vec<Action>,
    /// Index into `bets` of the first bet, if any
    first_bet: Option<usize>,
}

impl KuhnState {
    fn new(num_players: usize) -> Self {
        KuhnState {
            num_players,
            history: Vec::new(),
            cards: Vec::with_capacity(num_players),
            bets: Vec::new(),
            first_bet: None,
        }
    }

    fn is_dealing(&self) -> bool {
        self.cards.len() < self.num_players
    }

    fn betting_over(&self) -> bool {
        match self.first_bet {
            None => self.bets.len() == self.num_players,
            Some(first) => self.bets.len() - first - 1 == self.num_players - 1,
        }
    }

    fn undealt(&self) -> Vec<usize> {
        (0..=self.num_players).filter(|card| !self.cards.contains(card)).collect()
    }

    /// Seats still contesting the pot at the end of the hand
    fn contenders(&self) -> Vec<PlayerId> {
        match self.first_bet {
            None => (0..self.num_players).collect(),
            Some(_) => self
                .bets
                .iter()
                .enumerate()
                .filter(|(_, action)| **action == BET)
                .map(|(i, _)| i % self.num_players)
                .collect(),
        }
    }
}

impl State for KuhnState {
    fn current_player(&self) -> Player {
        if self.is_dealing() {
            Player::Chance
        } else if self.betting_over() {
            Player::Terminal
        } else {
            Player::Decision(self.bets.len() % self.num_players)
        }
    }

    fn num_players(&self) -> usize {
        self.num_players
    }

    fn legal_actions(&self) -> Vec<Action> {
        match self.current_player() {
            Player::Chance => self.undealt().into_iter().map(|card| card as Action).collect(),
            Player::Decision(_) => vec![PASS, BET],
            Player::Terminal => vec![],
        }
    }

    fn chance_outcomes(&self) -> ActionsAndProbs {
        if !self.is_dealing() {
            return vec![];
        }
        let undealt = self.undealt();
        let p = 1.0 / undealt.len() as f64;
        undealt.into_iter().map(|card| (card as Action, p)).collect()
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        if !self.legal_actions().contains(&action) {
            return Err(GameError::IllegalAction {
                action,
                history: self.history_string(),
            });
        }
        if self.is_dealing() {
            self.cards.push(action as usize);
        } else {
            self.bets.push(action);
            if action == BET && self.first_bet.is_none() {
                self.first_bet = Some(self.bets.len() - 1);
            }
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
        if player >= self.num_players {
            return Err(GameError::PlayerOutOfRange {
                player,
                num_players: self.num_players,
            });
        }
        let Some(card) = self.cards.get(player) else {
            return Ok(String::new());
        };
        let mut info = card.to_string();
        info.extend(self.bets.iter().map(|&action| if action == BET { 'b' } else { 'p' }));
        Ok(info)
    }

    fn returns(&self) -> Vec<f64> {
        if !self.is_terminal() {
            return vec![0.0; self.num_players];
        }
        let mut contributed = vec![1.0; self.num_players];
        for (i, &action) in self.bets.iter().enumerate() {
            if action == BET {
                contributed[i % self.num_players] += 1.0;
            }
        }
        let pot: f64 = contributed.iter().sum();
        let winner = self
            .contenders()
            .into_iter()
            .max_by_key(|&seat| self.cards[seat])
            .unwrap_or_default();
        contributed
            .iter()
            .enumerate()
            .map(|(seat, paid)| if seat == winner { pot - paid } else { -paid })
            .collect()
    }
}

/// The two-player equilibrium family parameterised by player 0's bluffing
/// frequency with the lowest card. `alpha` must lie in `[0, 1/3]`.
pub fn optimal_policy(alpha: f64) -> Result<TabularPolicy, PolicyError> {
    if !(0.0..=1.0 / 3.0).contains(&alpha) {
        return Err(PolicyError::InvalidParameter(format!(
            "kuhn alpha must be within [0, 1/3], got {}",
            alpha
        )));
    }
    let mixed = |bet: f64| vec![(PASS, 1.0 - bet), (BET, bet)];
    Ok(TabularPolicy::new([
        // player 0
        ("0".to_string(), mixed(alpha)),
        ("0pb".to_string(), mixed(0.0)),
        ("1".to_string(), mixed(0.0)),
        ("1pb".to_string(), vec![(PASS, 2.0 / 3.0 - alpha), (BET, 1.0 / 3.0 + alpha)]),
        ("2".to_string(), mixed(3.0 * alpha)),
        ("2pb".to_string(), mixed(1.0)),
        // player 1
        ("0p".to_string(), vec![(PASS, 2.0 / 3.0), (BET, 1.0 / 3.0)]),
        ("0b".to_string(), mixed(0.0)),
        ("1p".to_string(), mixed(0.0)),
        ("1b".to_string(), vec![(PASS, 2.0 / 3.0), (BET, 1.0 / 3.0)]),
        ("2p".to_string(), mixed(1.0)),
        ("2b".to_string(), mixed(1.0)),
    ]))
}
