//! Action representation.
//!
//! An `Action` is one command a presentation layer can issue on behalf of
//! the current player. `Session::apply` dispatches it to the owning service,
//! and successful applications are appended to the game's history as
//! `ActionRecord`s.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardId;

/// A player or UI command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    ShowStartingCards,
    HideStartingCards,
    StartTurn,
    DrawFromDeck,
    DrawFromPile,
    PlayPowerCard,
    SelectCard(CardId),
    ShowCards {
        first: CardId,
        second: Option<CardId>,
    },
    HideCards,
    ConfirmChoice,
    ConfirmQueenSwap,
    CancelPowerEffect,
    SwapCard,
    DiscardCard,
    Knock,
    EndTurn,
}

impl Action {
    /// Short name for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::ShowStartingCards => "show_starting_cards",
            Action::HideStartingCards => "hide_starting_cards",
            Action::StartTurn => "start_turn",
            Action::DrawFromDeck => "draw_from_deck",
            Action::DrawFromPile => "draw_from_pile",
            Action::PlayPowerCard => "play_power_card",
            Action::SelectCard(_) => "select_card",
            Action::ShowCards { .. } => "show_cards",
            Action::HideCards => "hide_cards",
            Action::ConfirmChoice => "confirm_choice",
            Action::ConfirmQueenSwap => "confirm_queen_swap",
            Action::CancelPowerEffect => "cancel_power_effect",
            Action::SwapCard => "swap_card",
            Action::DiscardCard => "discard_card",
            Action::Knock => "knock",
            Action::EndTurn => "end_turn",
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player whose turn it was.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the game.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
