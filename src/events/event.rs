//! Game event types.
//!
//! One variant per notification the presentation layer can receive. Events
//! are emitted after the mutation they describe has completed, and carry
//! `CardId`s rather than card copies; observers look faces up in the
//! `GameState` snapshot passed alongside.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, PowerEffect};
use crate::core::PlayerId;

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Cards dealt, opening peek about to begin.
    GameStarted,

    /// A seat was given a name.
    PlayerAdded { player: PlayerId, name: String },

    /// A player's bottom row is face-up for the opening peek.
    StartingCardsShown {
        player: PlayerId,
        cards: Vec<CardId>,
    },

    StartingCardsHidden { player: PlayerId },

    /// Cards revealed by a power effect. `second` is only set for the queen.
    CardsShown {
        first: CardId,
        second: Option<CardId>,
    },

    PowerPlayed { card: CardId, effect: PowerEffect },

    CardSelected { card: CardId },

    /// Two cards traded places. For a swap with the drawn card, `first` is
    /// the card that entered the grid and `second` the one that left it.
    CardsSwapped { first: CardId, second: CardId },

    CardDiscarded { card: CardId },

    CardDrawnFromDeck { card: CardId },

    CardDrawnFromPile { card: CardId },

    Knocked { player: PlayerId },

    ChoiceConfirmed,

    TurnStarted { player: PlayerId },

    /// Play passed to `next`.
    TurnEnded { next: PlayerId },

    /// Final result. `score` is the winner's score, or the shared score on a
    /// tie (`winner` is `None`).
    GameOver {
        winner: Option<PlayerId>,
        score: i32,
    },

    /// Shown cards turned face-down again.
    HideCards,

    Quit,

    Restart,
}

impl GameEvent {
    /// Short name for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStarted => "game_started",
            GameEvent::PlayerAdded { .. } => "player_added",
            GameEvent::StartingCardsShown { .. } => "starting_cards_shown",
            GameEvent::StartingCardsHidden { .. } => "starting_cards_hidden",
            GameEvent::CardsShown { .. } => "cards_shown",
            GameEvent::PowerPlayed { .. } => "power_played",
            GameEvent::CardSelected { .. } => "card_selected",
            GameEvent::CardsSwapped { .. } => "cards_swapped",
            GameEvent::CardDiscarded { .. } => "card_discarded",
            GameEvent::CardDrawnFromDeck { .. } => "card_drawn_from_deck",
            GameEvent::CardDrawnFromPile { .. } => "card_drawn_from_pile",
            GameEvent::Knocked { .. } => "knocked",
            GameEvent::ChoiceConfirmed => "choice_confirmed",
            GameEvent::TurnStarted { .. } => "turn_started",
            GameEvent::TurnEnded { .. } => "turn_ended",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::HideCards => "hide_cards",
            GameEvent::Quit => "quit",
            GameEvent::Restart => "restart",
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(GameEvent::GameStarted.name(), "game_started");
        assert_eq!(
            GameEvent::GameOver { winner: None, score: 3 }.to_string(),
            "game_over"
        );
        assert_eq!(
            GameEvent::CardsShown { first: CardId::new(1), second: None }.name(),
            "cards_shown"
        );
    }

    #[test]
    fn test_event_serialization() {
        let events = vec![
            GameEvent::PlayerAdded { player: PlayerId::new(0), name: "Alice".into() },
            GameEvent::PowerPlayed { card: CardId::new(11), effect: PowerEffect::PeekAndSwap },
            GameEvent::GameOver { winner: Some(PlayerId::new(1)), score: -2 },
        ];

        let json = serde_json::to_string(&events).unwrap();
        let deserialized: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(events, deserialized);
    }
}
