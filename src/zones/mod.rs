//! Card locations.
//!
//! Kaboo has a fixed set of places a card can be: a slot in one of the two
//! 2×2 grids, a player's drawn-card slot, the draw pile, or the discard pile.

mod location;

pub use location::{HandPosition, Location};
