//! Game phases - the turn state machine.
//!
//! ```text
//! Initialized → PlayerAddition → PlayersAdded → ShowStartingHands1 → Reveal
//!   → ShowStartingHands2 → ReadyToDraw
//! ReadyToDraw → DrawFromDeck → PowerCardDrawn | PointCardDrawn
//! ReadyToDraw → DrawFromPile
//! PowerCardDrawn → PlayJack | PlayQueen | PlaySevenOrEight | PlayNineOrTen
//! PlayQueen → ShowCards → ConfirmQueenShow
//! … → EndTurn → ReadyToDraw            (normal hand-off)
//! … → Knocked → EndTurn → ReadyToDraw  (knock)
//! EndTurn → Finished                     (terminal)
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::PowerEffect;

/// Current phase of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Initialized,
    PlayerAddition,
    PlayersAdded,
    ShowStartingHands1,
    Reveal,
    ShowStartingHands2,
    ReadyToDraw,
    DrawFromDeck,
    PowerCardDrawn,
    PointCardDrawn,
    DrawFromPile,
    PlayJack,
    PlayQueen,
    ConfirmQueenShow,
    PlaySevenOrEight,
    PlayNineOrTen,
    ShowCards,
    Knocked,
    EndTurn,
    Finished,
}

impl GamePhase {
    /// The play phase a power effect leads into.
    #[must_use]
    pub const fn for_effect(effect: PowerEffect) -> Self {
        match effect {
            PowerEffect::PeekOwn => GamePhase::PlaySevenOrEight,
            PowerEffect::PeekOpponent => GamePhase::PlayNineOrTen,
            PowerEffect::BlindSwap => GamePhase::PlayJack,
            PowerEffect::PeekAndSwap => GamePhase::PlayQueen,
        }
    }

    /// Phases right after a draw, before the drawn card is resolved.
    #[must_use]
    pub const fn is_draw_resolution(self) -> bool {
        matches!(
            self,
            GamePhase::DrawFromDeck
                | GamePhase::PowerCardDrawn
                | GamePhase::PointCardDrawn
                | GamePhase::DrawFromPile
        )
    }

    /// Phases in which a power effect is being resolved.
    #[must_use]
    pub const fn is_power_resolution(self) -> bool {
        matches!(
            self,
            GamePhase::PlayJack
                | GamePhase::PlayQueen
                | GamePhase::ConfirmQueenShow
                | GamePhase::PlaySevenOrEight
                | GamePhase::PlayNineOrTen
                | GamePhase::ShowCards
        )
    }

    /// Phases before the first real turn (player registration and opening peek).
    #[must_use]
    pub const fn is_setup(self) -> bool {
        matches!(
            self,
            GamePhase::Initialized
                | GamePhase::PlayerAddition
                | GamePhase::PlayersAdded
                | GamePhase::ShowStartingHands1
                | GamePhase::Reveal
                | GamePhase::ShowStartingHands2
        )
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
