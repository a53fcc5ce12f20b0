//! Game rules that are not tied to a service: scoring, the final result,
//! and which commands are legal in a given state.
//!
//! Services call into these functions but the functions never mutate state.

pub mod engine;

pub use engine::{legal_actions, score_hand, GameResult};
pub(crate) use engine::{single_selection, split_selection};
