//! arbor Engine - Core game and policy abstractions
//!
//! This crate defines the capability sets the history tree consumes: the
//! `Game`/`State` traits every concrete game implements, the `Policy` trait
//! opponents are queried through, and the error types shared by both.
//!
//! The engine has no knowledge of any concrete game and no I/O.

pub mod error;
pub mod game;
pub mod policy;

pub use error::{GameError, PolicyError};
pub use game::{Action, ActionsAndProbs, Game, Player, PlayerId, State};
pub use policy::{CallbackPolicy, FirstActionPolicy, Policy, TabularPolicy, UniformRandomPolicy};
