//! Core engine types: players, phases, state, actions, RNG, configuration.
//!
//! Everything here is plain data plus accessors. The services in
//! `crate::services` are the only code that moves a game forward.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod phase;
pub mod state;

pub use player::{Player, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::SessionConfig;
pub use action::{Action, ActionRecord};
pub use phase::GamePhase;
pub use state::GameState;
