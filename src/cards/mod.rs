//! Card system: faces, instances, and the standard deck.
//!
//! ## Key Types
//!
//! - `Suit`, `Rank`: Immutable card face
//! - `PowerEffect`: The fixed table of one-shot power-card effects
//! - `CardId`: Identity of one of the 52 instances in a game
//! - `Card`: Face plus the mutable face-up flag

pub mod deck;
pub mod definition;
pub mod instance;

pub use deck::{card_id_of, standard_deck, DECK_SIZE};
pub use definition::{PowerEffect, Rank, Suit};
pub use instance::{Card, CardId};
