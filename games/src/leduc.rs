//! Leduc poker
//!
//! Two players, six cards (three ranks in two suits). Each player antes 1 and
//! receives one private card; a betting round follows, then a public card is
//! dealt and a second betting round is played. Raises are 2 in the first
//! round and 4 in the second, with at most two raises per round. At showdown
//! a private card pairing the public card wins, otherwise the higher rank
//! wins; equal ranks split the pot.

use crate::params::GameParameters;
use arbor_engine::{Action, ActionsAndProbs, Game, GameError, Player, PlayerId, State};

pub const NAME: &str = "leduc_poker";

pub const FOLD: Action = 0;
pub const CALL: Action = 1;
pub const RAISE: Action = 2;

const NUM_PLAYERS: usize = 2;
const DECK_SIZE: usize = 6;
const STARTING_MONEY: u32 = 100;
const ANTE: u32 = 1;
const MAX_RAISES: u32 = 2;
const RAISE_AMOUNTS: [u32; 2] = [2, 4];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeducPoker;

impl LeducPoker {
    pub fn from_params(params: &GameParameters) -> Result<Self, GameError> {
        params.check_known(NAME, &[])?;
        Ok(LeducPoker)
    }
}

impl Game for LeducPoker {
    fn name(&self) -> &str {
        NAME
    }

    fn num_players(&self) -> usize {
        NUM_PLAYERS
    }

    fn num_distinct_actions(&self) -> usize {
        3
    }

    fn new_initial_state(&self) -> Box<dyn State> {
        Box::new(LeducState::default())
    }
}

/// Rank of a card; suits are interchangeable.
fn rank(card: usize) -> usize {
    card / 2
}

#[derive(Debug, Clone)]
pub struct LeducState {
    history: Vec<Action>,
    private_cards: Vec<usize>,
    public_card: Option<usize>,
    /// 0 before the public card, 1 after
    round: usize,
    to_act: PlayerId,
    /// Chips each player has put in the pot
    committed: [u32; NUM_PLAYERS],
    /// Highest commitment so far
    stakes: u32,
    raises: u32,
    calls: u32,
    folded: Option<PlayerId>,
    sequences: [Vec<Action>; 2],
}

impl Default for LeducState {
    fn default() -> Self {
        LeducState {
            history: Vec::new(),
            private_cards: Vec::with_capacity(NUM_PLAYERS),
            public_card: None,
            round: 0,
            to_act: 0,
            committed: [ANTE; NUM_PLAYERS],
            stakes: ANTE,
            raises: 0,
            calls: 0,
            folded: None,
            sequences: [Vec::new(), Vec::new()],
        }
    }
}

impl LeducState {
    fn round_complete(&self) -> bool {
        if self.raises == 0 {
            self.calls as usize == NUM_PLAYERS
        } else {
            self.calls as usize == NUM_PLAYERS - 1
        }
    }

    fn awaiting_card(&self) -> bool {
        self.private_cards.len() < NUM_PLAYERS || (self.round == 0 && self.round_complete())
    }

    fn undealt(&self) -> Vec<usize> {
        (0..DECK_SIZE)
            .filter(|card| !self.private_cards.contains(card) && self.public_card != Some(*card))
            .collect()
    }

    /// Showdown strength; higher is better.
    fn hand_strength(&self, player: PlayerId) -> usize {
        let private = rank(self.private_cards[player]);
        match self.public_card {
            Some(public) if rank(public) == private => DECK_SIZE + private,
            _ => private,
        }
    }

    fn start_next_round(&mut self) {
        self.round += 1;
        self.to_act = 0;
        self.raises = 0;
        self.calls = 0;
    }

    fn apply_bet(&mut self, action: Action) {
        let player = self.to_act;
        self.sequences[self.round].push(action);
        match action {
            FOLD => self.folded = Some(player),
            CALL => {
                self.committed[player] = self.stakes;
                self.calls += 1;
            }
            _ => {
                self.stakes += RAISE_AMOUNTS[self.round];
                self.committed[player] = self.stakes;
                self.raises += 1;
                self.calls = 0;
            }
        }
        self.to_act = 1 - player;
    }

    fn format_sequence(sequence: &[Action]) -> String {
        sequence.iter().map(|action| action.to_string()).collect::<Vec<_>>().join(" ")
    }
}

impl State for LeducState {
    fn current_player(&self) -> Player {
        if self.folded.is_some() || (self.round == 1 && self.round_complete()) {
            Player::Terminal
        } else if self.awaiting_card() {
            Player::Chance
        } else {
            Player::Decision(self.to_act)
        }
    }

    fn num_players(&self) -> usize {
        NUM_PLAYERS
    }

    fn legal_actions(&self) -> Vec<Action> {
        match self.current_player() {
            Player::Chance => self.undealt().into_iter().map(|card| card as Action).collect(),
            Player::Decision(player) => {
                let mut actions = Vec::with_capacity(3);
                if self.stakes > self.committed[player] {
                    actions.push(FOLD);
                }
                actions.push(CALL);
                if self.raises < MAX_RAISES {
                    actions.push(RAISE);
                }
                actions
            }
            Player::Terminal => vec![],
        }
    }

    fn chance_outcomes(&self) -> ActionsAndProbs {
        if !self.is_chance_node() {
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
        if self.private_cards.len() < NUM_PLAYERS {
            self.private_cards.push(action as usize);
        } else if self.is_chance_node() {
            self.public_card = Some(action as usize);
            self.start_next_round();
        } else {
            self.apply_bet(action);
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
        if player >= NUM_PLAYERS {
            return Err(GameError::PlayerOutOfRange {
                player,
                num_players: NUM_PLAYERS,
            });
        }
        let private = self
            .private_cards
            .get(player)
            .map_or_else(|| "-".to_string(), |card| card.to_string());
        let public = self.public_card.map_or_else(|| "-".to_string(), |card| card.to_string());
        Ok(format!(
            "[Observer: {}][Private: {}][Round {}][Player: {}][Pot: {}][Money: {} {}][Public: {}][Round1: {}][Round2: {}]",
            player,
            private,
            self.round + 1,
            self.current_player(),
            self.committed.iter().sum::<u32>(),
            STARTING_MONEY - self.committed[0],
            STARTING_MONEY - self.committed[1],
            public,
            Self::format_sequence(&self.sequences[0]),
            Self::format_sequence(&self.sequences[1]),
        ))
    }

    fn returns(&self) -> Vec<f64> {
        if !self.is_terminal() {
            return vec![0.0; NUM_PLAYERS];
        }
        let winner = match self.folded {
            Some(folder) => Some(1 - folder),
            None => {
                let (s0, s1) = (self.hand_strength(0), self.hand_strength(1));
                match s0.cmp(&s1) {
                    std::cmp::Ordering::Greater => Some(0),
                    std::cmp::Ordering::Less => Some(1),
                    std::cmp::Ordering::Equal => None,
                }
            }
        };
        match winner {
            Some(winner) => {
                let won = self.committed[1 - winner] as f64;
                let mut returns = vec![-won; NUM_PLAYERS];
                returns[winner] = won;
                returns
            }
            None => vec![0.0; NUM_PLAYERS],
        }
    }
}
