//! # kaboo-engine
//!
//! Rule engine for Kaboo, a two-player memory card game in the family of
//! Golf and Cabo.
//!
//! Each player holds a face-down 2×2 grid. On their turn a player draws
//! from the deck or takes the top discard, then swaps it into their grid,
//! discards it, or plays it as a power card (7/8 peek own, 9/10 peek
//! opponent, jack blind swap, queen peek and swap). Knocking, or running
//! the draw pile dry, starts the last round; the lower grid total wins.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: every operation either fails with the state
//!    untouched or completes fully.
//!
//! 2. **Closed phase machine**: `GamePhase` is an exhaustive enum and every
//!    operation matches on it.
//!
//! 3. **No globals**: a `Session` owns at most one active game, its RNG, and
//!    its observers.
//!
//! ## Modules
//!
//! - `core`: Players, phases, state, actions, RNG, configuration
//! - `cards`: Suits, ranks, power effects, card instances, the deck
//! - `zones`: Grid positions and card locations
//! - `events`: Observer notifications
//! - `rules`: Scoring, results, legal commands
//! - `services`: `Session` and the two services that drive a game
//! - `error`: `KabooError`

pub mod core;
pub mod cards;
pub mod zones;
pub mod events;
pub mod rules;
pub mod services;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, GamePhase, GameRng, GameRngState, GameState, Player, PlayerId,
    PlayerMap, SessionConfig,
};

pub use crate::cards::{Card, CardId, PowerEffect, Rank, Suit};

pub use crate::zones::{HandPosition, Location};

pub use crate::events::{EventBus, GameEvent, Observer};

pub use crate::rules::{legal_actions, score_hand, GameResult};

pub use crate::services::{GameFlowService, PlayerActionService, Session};

pub use crate::error::{KabooError, Result};
