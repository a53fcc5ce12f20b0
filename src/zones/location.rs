//! Card locations.
//!
//! Every card is in exactly one `Location` at any time. Hands are addressed
//! by `HandPosition`; the two piles are LIFO stacks whose top is the end of
//! the backing `Vec`.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// Slot in a player's 2×2 grid. Row 0 is the top row, row 1 the bottom row
/// (the row peeked at during the opening).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandPosition {
    pub row: usize,
    pub col: usize,
}

impl HandPosition {
    /// All four slots in row-major (dealing) order.
    pub const ALL: [HandPosition; 4] = [
        HandPosition::new(0, 0),
        HandPosition::new(0, 1),
        HandPosition::new(1, 0),
        HandPosition::new(1, 1),
    ];

    /// The two bottom-row slots.
    pub const BOTTOM_ROW: [HandPosition; 2] = [HandPosition::new(1, 0), HandPosition::new(1, 1)];

    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for HandPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Where a card currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// In a player's grid.
    Hand { player: PlayerId, position: HandPosition },
    /// Held by a player between drawing and resolving.
    Drawn(PlayerId),
    /// Face-down draw pile.
    DrawPile,
    /// Discard pile, top card face-up.
    DiscardPile,
}

impl Location {
    /// The player whose grid holds the card, if it is in a hand.
    #[must_use]
    pub fn hand_owner(self) -> Option<PlayerId> {
        match self {
            Location::Hand { player, .. } => Some(player),
            Location::Drawn(_) | Location::DrawPile | Location::DiscardPile => None,
        }
    }
}
