//! arbor Games - Reference extensive-form games
//!
//! Small poker and dice games with OpenSpiel-compatible action numbering,
//! used to exercise and regression-test the history tree. Games are looked
//! up by game string through `load_game`.

pub mod kuhn;
pub mod leduc;
pub mod liars_dice;
pub mod params;

use arbor_engine::{Game, GameError};
use params::parse_game_string;

pub use kuhn::KuhnPoker;
pub use leduc::LeducPoker;
pub use liars_dice::LiarsDice;
pub use params::GameParameters;

/// Names accepted by `load_game`
pub const REGISTERED_GAMES: [&str; 3] = [kuhn::NAME, leduc::NAME, liars_dice::NAME];

/// Build a game from a game string such as `kuhn_poker(players=3)`.
pub fn load_game(spec: &str) -> Result<Box<dyn Game>, GameError> {
    let (name, params) = parse_game_string(spec)?;
    let game: Box<dyn Game> = match name.as_str() {
        kuhn::NAME => Box::new(KuhnPoker::from_params(&params)?),
        leduc::NAME => Box::new(LeducPoker::from_params(&params)?),
        liars_dice::NAME => Box::new(LiarsDice::from_params(&params)?),
        _ => return Err(GameError::UnknownGame(name)),
    };
    log::debug!("loaded {} ({})", game.name(), params);
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_engine::State;

    #[test]
    fn test_every_registered_game_loads() {
        for name in REGISTERED_GAMES {
            let game = load_game(name).unwrap();
            assert_eq!(game.name(), name);
            assert_eq!(game.num_players(), 2);
            assert!(game.new_initial_state().is_chance_node());
        }
    }

    #[test]
    fn test_parameters_reach_the_game() {
        let game = load_game("kuhn_poker(players=3)").unwrap();
        assert_eq!(game.num_players(), 3);
        assert_eq!(game.new_initial_state().legal_actions(), vec![0, 1, 2, 3]);
        let dice = load_game("liars_dice(numdice=2)").unwrap();
        assert_eq!(dice.num_distinct_actions(), 25);
    }

    #[test]
    fn test_unknown_game() {
        assert!(matches!(load_game("chess"), Err(GameError::UnknownGame(name)) if name == "chess"));
        assert!(matches!(
            load_game("leduc_poker(players=3)"),
            Err(GameError::InvalidParameter { .. })
        ));
    }
}
