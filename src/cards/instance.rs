//! Card instances - runtime card state.
//!
//! Each of the 52 cards in a game is a distinct instance with its own
//! `CardId`. Locations (hands, piles) hold ids, never copies, so two
//! instances can never be confused even if faces were ever equal.

use serde::{Deserialize, Serialize};

use super::definition::{PowerEffect, Rank, Suit};

/// Identity of a card instance within one game (0..52).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique instance id.
    pub id: CardId,

    pub suit: Suit,

    pub rank: Rank,

    /// Face-up for the current viewer.
    pub revealed: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self {
            id,
            suit,
            rank,
            revealed: false,
        }
    }

    /// Check if this is a power card (7, 8, 9, 10, J, Q).
    #[must_use]
    pub fn is_power_card(&self) -> bool {
        self.rank.is_power()
    }

    /// The effect this card triggers when played as a power card.
    #[must_use]
    pub fn power_effect(&self) -> Option<PowerEffect> {
        self.rank.power_effect()
    }

    /// Penalty points at the end of the game.
    #[must_use]
    pub fn points(&self) -> i32 {
        self.rank.points()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
