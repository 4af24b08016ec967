//! Liar's dice
//!
//! Every player rolls `numdice` hidden dice. Players then take turns raising
//! a bid "at least `quantity` dice show `face`" until someone calls Liar. The
//! highest face is wild. If the bid holds the caller loses, otherwise the
//! bidder does.
//!
//! Bid actions are numbered `(quantity - 1) * sides + (face - 1)`, so a higher
//! action index is always a higher bid. Liar is the action after the last bid.

use crate::params::GameParameters;
use arbor_engine::{Action, ActionsAndProbs, Game, GameError, Player, PlayerId, State};

pub const NAME: &str = "liars_dice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiarsDice {
    num_players: usize,
    dice_per_player: usize,
    sides: usize,
}

impl LiarsDice {
    pub const DEFAULT_PLAYERS: usize = 2;
    pub const DEFAULT_DICE: usize = 1;
    pub const DEFAULT_SIDES: usize = 6;

    pub fn from_params(params: &GameParameters) -> Result<Self, GameError> {
        params.check_known(NAME, &["players", "numdice", "dice_sides"])?;
        Ok(LiarsDice {
            num_players: params.count(NAME, "players", Self::DEFAULT_PLAYERS, 2)?,
            dice_per_player: params.count(NAME, "numdice", Self::DEFAULT_DICE, 1)?,
            sides: params.count(NAME, "dice_sides", Self::DEFAULT_SIDES, 2)?,
        })
    }

    fn total_dice(&self) -> usize {
        self.num_players * self.dice_per_player
    }

    /// Action index of the Liar call
    pub fn liar_action(&self) -> Action {
        (self.total_dice() * self.sides) as Action
    }

    /// `(quantity, face)` of a bid action
    pub fn decode_bid(&self, bid: Action) -> (usize, usize) {
        let bid = bid as usize;
        (bid / self.sides + 1, bid % self.sides + 1)
    }
}

impl Default for LiarsDice {
    fn default() -> Self {
        LiarsDice {
            num_players: Self::DEFAULT_PLAYERS,
            dice_per_player: Self::DEFAULT_DICE,
            sides: Self::DEFAULT_SIDES,
        }
    }
}

impl Game for LiarsDice {
    fn name(&self) -> &str {
        NAME
    }

    fn num_players(&self) -> usize {
        self.num_players
    }

    fn num_distinct_actions(&self) -> usize {
        self.total_dice() * self.sides + 1
    }

    fn new_initial_state(&self) -> Box<dyn State> {
        Box::new(LiarsDiceState {
            game: *self,
            history: Vec::new(),
            dice: vec![Vec::with_capacity(self.dice_per_player); self.num_players],
            bids: Vec::new(),
            to_act: 0,
            caller: None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LiarsDiceState {
    game: LiarsDice,
    history: Vec<Action>,
    /// Faces rolled by each player, 1-based
    dice: Vec<Vec<usize>>,
    bids: Vec<Action>,
    to_act: PlayerId,
    caller: Option<PlayerId>,
}

impl LiarsDiceState {
    fn rolled(&self) -> usize {
        self.dice.iter().map(Vec::len).sum()
    }

    fn previous(&self, player: PlayerId) -> PlayerId {
        (player + self.game.num_players - 1) % self.game.num_players
    }

    /// Dice on the table matching `face`, wilds included
    fn matching(&self, face: usize) -> usize {
        self.dice
            .iter()
            .flatten()
            .filter(|&&rolled| rolled == face || rolled == self.game.sides)
            .count()
    }
}

impl State for LiarsDiceState {
    fn current_player(&self) -> Player {
        if self.rolled() < self.game.total_dice() {
            Player::Chance
        } else if self.caller.is_some() {
            Player::Terminal
        } else {
            Player::Decision(self.to_act)
        }
    }

    fn num_players(&self) -> usize {
        self.game.num_players
    }

    fn legal_actions(&self) -> Vec<Action> {
        match self.current_player() {
            Player::Chance => (0..self.game.sides as Action).collect(),
            Player::Decision(_) => {
                let liar = self.game.liar_action();
                match self.bids.last() {
                    None => (0..liar).collect(),
                    Some(&last) => (last + 1..=liar).collect(),
                }
            }
            Player::Terminal => vec![],
        }
    }

    fn chance_outcomes(&self) -> ActionsAndProbs {
        if !self.is_chance_node() {
            return vec![];
        }
        let p = 1.0 / self.game.sides as f64;
        (0..self.game.sides as Action).map(|face| (face, p)).collect()
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        if !self.legal_actions().contains(&action) {
            return Err(GameError::IllegalAction {
                action,
                history: self.history_string(),
            });
        }
        if self.is_chance_node() {
            let roller = self.rolled() / self.game.dice_per_player;
            self.dice[roller].push(action as usize + 1);
        } else if action == self.game.liar_action() {
            self.caller = Some(self.to_act);
        } else {
            self.bids.push(action);
            self.to_act = (self.to_act + 1) % self.game.num_players;
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
        if player >= self.game.num_players {
            return Err(GameError::PlayerOutOfRange {
                player,
                num_players: self.game.num_players,
            });
        }
        let mut info = self.dice[player].iter().map(|face| face.to_string()).collect::<String>();
        for &bid in &self.bids {
            let (quantity, face) = self.game.decode_bid(bid);
            info.push_str(&format!(" {}-{}", quantity, face));
        }
        if self.caller.is_some() {
            info.push_str(" Liar");
        }
        Ok(info)
    }

    fn returns(&self) -> Vec<f64> {
        let (Some(caller), Some(&bid)) = (self.caller, self.bids.last()) else {
            return vec![0.0; self.game.num_players];
        };
        let bidder = self.previous(caller);
        let (quantity, face) = self.game.decode_bid(bid);
        let loser = if self.matching(face) >= quantity { caller } else { bidder };
        let share = 1.0 / (self.game.num_players - 1) as f64;
        (0..self.game.num_players)
            .map(|player| if player == loser { -1.0 } else { share })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &LiarsDice, actions: &[Action]) -> Box<dyn State> {
        let mut state = game.new_initial_state();
        for &action in actions {
            state.apply_action(action).unwrap();
        }
        state
    }

    #[test]
    fn test_action_numbering() {
        let game = LiarsDice::default();
        assert_eq!(game.num_distinct_actions(), 13);
        assert_eq!(game.liar_action(), 12);
        assert_eq!(game.decode_bid(0), (1, 1));
        assert_eq!(game.decode_bid(5), (1, 6));
        assert_eq!(game.decode_bid(7), (2, 2));
    }

    #[test]
    fn test_bids_must_increase() {
        let game = LiarsDice::default();
        let first = play(&game, &[0, 3]);
        assert_eq!(first.current_player(), Player::Decision(0));
        assert_eq!(first.legal_actions(), (0..12).collect::<Vec<_>>());
        let raised = play(&game, &[0, 3, 9]);
        assert_eq!(raised.current_player(), Player::Decision(1));
        assert_eq!(raised.legal_actions(), vec![10, 11, 12]);
        let maxed = play(&game, &[0, 3, 11]);
        assert_eq!(maxed.legal_actions(), vec![12]);
    }

    #[test]
    fn test_caller_loses_true_bid() {
        let game = LiarsDice::default();
        // Rolls: 2 and 6. Bid "two 2s" holds thanks to the wild 6.
        let state = play(&game, &[1, 5, 7, 12]);
        assert!(state.is_terminal());
        assert_eq!(state.returns(), vec![1.0, -1.0]);
    }

    #[test]
    fn test_bidder_loses_false_bid() {
        let game = LiarsDice::default();
        // Rolls: 1 and 3. Bid "one 5" fails.
        let state = play(&game, &[0, 2, 4, 12]);
        assert_eq!(state.returns(), vec![-1.0, 1.0]);
    }

    #[test]
    fn test_information_state_shows_own_dice_only() {
        let game = LiarsDice::default();
        let a = play(&game, &[0, 2, 4]);
        let b = play(&game, &[0, 5, 4]);
        assert_eq!(a.information_state_string_for(0).unwrap(), "1 1-5");
        assert_eq!(b.information_state_string_for(0).unwrap(), "1 1-5");
        assert_eq!(a.information_state_string_for(1).unwrap(), "3 1-5");
    }

    #[test]
    fn test_multiple_dice_are_rolled_per_player() {
        let params = GameParameters::new().with("numdice", 2).with("dice_sides", 3);
        let game = LiarsDice::from_params(&params).unwrap();
        assert_eq!(game.liar_action(), 12);
        let state = play(&game, &[0, 1, 2, 2]);
        assert_eq!(state.current_player(), Player::Decision(0));
        assert_eq!(state.information_state_string_for(0).unwrap(), "12");
        assert_eq!(state.information_state_string_for(1).unwrap(), "33");
    }

    #[test]
    fn test_parameter_validation() {
        let params = GameParameters::new().with("dice_sides", 1);
        assert!(LiarsDice::from_params(&params).is_err());
        let params = GameParameters::new().with("bidding_rule", 1);
        assert!(LiarsDice::from_params(&params).is_err());
    }
}
