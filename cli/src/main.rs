//! arbor CLI - Command-line driver for history trees
//!
//! Builds history trees for the registered games, lists their histories and
//! indexes a player's information sets under a chosen opponent policy.
//! Set `RUST_LOG=debug` for build statistics.

use anyhow::{bail, ensure, Context, Result};
use arbor_engine::{FirstActionPolicy, Game, Policy, TabularPolicy, UniformRandomPolicy};
use arbor_games::{kuhn, load_game, REGISTERED_GAMES};
use arbor_tree::{compute_info_sets, HistoryTree};
use clap::Parser;
use rayon::prelude::*;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Command {
    #[command(about = "Count the histories of a game for each player", alias = "n")]
    Count {
        #[arg(required = true, help = "Game string, e.g. kuhn_poker(players=3)")]
        game: String,
        #[arg(short, long = "player", help = "Responder (repeatable; default every player)")]
        players: Vec<usize>,
    },
    #[command(about = "List every history with its type and information state", alias = "ls")]
    Histories {
        #[arg(required = true)]
        game: String,
        #[arg(short, long, default_value_t = 0)]
        player: usize,
        #[arg(long, help = "Print at most this many histories")]
        limit: Option<usize>,
    },
    #[command(about = "Index a player's information sets with counterfactual reach", alias = "is")]
    Infosets {
        #[arg(required = true)]
        game: String,
        #[arg(short, long, default_value_t = 0)]
        player: usize,
        #[arg(
            long,
            default_value = "uniform",
            help = "uniform, first-action, kuhn-optimal or a JSON file"
        )]
        policy: String,
        #[arg(long, default_value_t = 0.0, help = "Parameter of the kuhn-optimal policy")]
        alpha: f64,
    },
    #[command(about = "Print a tabular policy for a game as JSON")]
    Policy {
        #[arg(required = true)]
        game: String,
        #[arg(long, default_value = "uniform")]
        policy: String,
        #[arg(long, default_value_t = 0.0)]
        alpha: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    match Command::parse() {
        Command::Count { game, players } => count(&game, players),
        Command::Histories { game, player, limit } => histories(&game, player, limit),
        Command::Infosets {
            game,
            player,
            policy,
            alpha,
        } => infosets(&game, player, &policy, alpha),
        Command::Policy { game, policy, alpha } => {
            let game = load(&game)?;
            let table = tabular_policy(game.as_ref(), &policy, alpha)?;
            println!("{}", table.to_json()?);
            Ok(())
        }
    }
}

fn load(spec: &str) -> Result<Box<dyn Game>> {
    load_game(spec).with_context(|| {
        format!("cannot load game '{}' (known: {})", spec, REGISTERED_GAMES.join(", "))
    })
}

fn build(game: &dyn Game, player: usize) -> Result<HistoryTree> {
    ensure!(
        player < game.num_players(),
        "player {} out of range: {} has {} players",
        player,
        game.name(),
        game.num_players()
    );
    HistoryTree::build(game.new_initial_state(), player)
        .with_context(|| format!("building the {} tree for player {}", game.name(), player))
}

fn count(spec: &str, mut players: Vec<usize>) -> Result<()> {
    let game = load(spec)?;
    if players.is_empty() {
        players = (0..game.num_players()).collect();
    }
    let start = Instant::now();
    let counts = players
        .par_iter()
        .map(|&player| build(game.as_ref(), player).map(|tree| (player, tree.num_histories())))
        .collect::<Result<Vec<_>>>()?;

    println!("{}", game.name());
    for (player, histories) in counts {
        println!("  player {:<4}{:>12} histories", player, histories);
    }
    println!("  built in {} ms", start.elapsed().as_millis());
    Ok(())
}

fn histories(spec: &str, player: usize, limit: Option<usize>) -> Result<()> {
    let game = load(spec)?;
    let tree = build(game.as_ref(), player)?;
    for node in tree.iter().take(limit.unwrap_or(usize::MAX)) {
        println!(
            "{:<8}{:<10}[{}]  {}",
            node.id(),
            node.state_type(),
            node.history(),
            node.info_state()
        );
    }
    println!("{} histories", tree.num_histories());
    Ok(())
}

fn infosets(spec: &str, player: usize, policy: &str, alpha: f64) -> Result<()> {
    let game = load(spec)?;
    let tree = build(game.as_ref(), player)?;
    let policy = opponent_policy(game.as_ref(), policy, alpha)?;
    let initial = game.new_initial_state();
    let infosets = compute_info_sets(&tree, initial.as_ref(), player, policy.as_ref())
        .context("indexing information sets")?;

    let mut keys: Vec<&String> = infosets.keys().collect();
    keys.sort();
    for key in keys {
        println!("{:?}", key);
        for (node, reach) in &infosets[key] {
            println!("  [{}]  {:.9}", node.history(), reach);
        }
    }
    println!("{} information sets", infosets.len());
    Ok(())
}

fn opponent_policy(game: &dyn Game, name: &str, alpha: f64) -> Result<Box<dyn Policy>> {
    let policy: Box<dyn Policy> = match name {
        "uniform" => Box::new(UniformRandomPolicy),
        "first-action" => Box::new(FirstActionPolicy),
        _ => Box::new(tabular_policy(game, name, alpha)?),
    };
    Ok(policy)
}

fn tabular_policy(game: &dyn Game, name: &str, alpha: f64) -> Result<TabularPolicy> {
    let table = match name {
        "uniform" => TabularPolicy::uniform(game)?,
        "first-action" => TabularPolicy::first_action(game)?,
        "kuhn-optimal" => {
            if game.name() != kuhn::NAME || game.num_players() != 2 {
                bail!("kuhn-optimal only applies to two-player {}", kuhn::NAME);
            }
            kuhn::optimal_policy(alpha)?
        }
        path => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading policy file {}", path))?;
            TabularPolicy::from_json(&json)
                .with_context(|| format!("parsing policy file {}", path))?
        }
    };
    log::info!("policy {} covers {} info states", name, table.len());
    Ok(table)
}
