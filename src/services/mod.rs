//! Services that drive a game.
//!
//! ## Key Types
//!
//! - `Session`: owns the (single) active game, the session RNG, and the
//!   observers
//! - `GameFlowService`: setup, opening peek, turn hand-off, scoring
//! - `PlayerActionService`: in-turn choices (draw, play, select, swap, knock)
//!
//! The two services are short-lived views borrowed from the session; they
//! call into each other by reborrowing it. Every operation validates before
//! it mutates and emits its events only after the mutation has completed.
//!
//! ## Example
//!
//! ```
//! use kaboo_engine::core::{GamePhase, SessionConfig};
//! use kaboo_engine::services::Session;
//!
//! let mut session = Session::new(SessionConfig::seeded(7));
//! session.game_flow().start_new_game("Alice", "Bob").unwrap();
//!
//! let game = session.game().unwrap();
//! assert_eq!(game.phase(), GamePhase::PlayersAdded);
//! assert_eq!(game.draw_pile().len(), 44);
//! ```

pub mod game_flow;
pub mod player_action;

pub use game_flow::GameFlowService;
pub use player_action::PlayerActionService;

use crate::core::{Action, GameRng, GameState, SessionConfig};
use crate::error::{KabooError, Result};
use crate::events::{EventBus, GameEvent, Observer};

/// Root service: at most one active game plus everything that outlives it.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    rng: GameRng,
    game: Option<GameState>,
    events: EventBus,
}

impl Session {
    /// Create a session with no active game.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let seed = config.resolve_seed();
        log::info!("session created with seed {seed}");
        Self {
            config,
            rng: GameRng::new(seed),
            game: None,
            events: EventBus::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The active game, if any.
    #[must_use]
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    #[must_use]
    pub fn has_game(&self) -> bool {
        self.game.is_some()
    }

    /// Register an observer for every future event.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.events.subscribe(observer);
    }

    pub fn game_flow(&mut self) -> GameFlowService<'_> {
        GameFlowService::new(self)
    }

    pub fn player_actions(&mut self) -> PlayerActionService<'_> {
        PlayerActionService::new(self)
    }

    /// Apply one command for the current player and record it in the
    /// game's history.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        let game = self.game_ref()?;
        let (player, turn) = (game.current_player_id(), game.turn_number());
        log::debug!("{player} applies {}", action.name());

        let outcome = match action {
            Action::ShowStartingCards => self.game_flow().show_starting_cards(),
            Action::HideStartingCards => self.game_flow().hide_starting_cards(),
            Action::StartTurn => self.game_flow().start_turn(),
            Action::ShowCards { first, second } => self.game_flow().show_cards(first, second),
            Action::HideCards => self.game_flow().hide_cards(),
            Action::DiscardCard => self.game_flow().discard_card(),
            Action::EndTurn => self.game_flow().end_turn(),
            Action::DrawFromDeck => self.player_actions().draw_from_deck(),
            Action::DrawFromPile => self.player_actions().draw_from_pile(),
            Action::PlayPowerCard => self.player_actions().play_power_card(),
            Action::SelectCard(card) => self.player_actions().select_card(card),
            Action::ConfirmChoice => self.player_actions().confirm_choice(),
            Action::ConfirmQueenSwap => self.player_actions().confirm_queen_swap(),
            Action::CancelPowerEffect => self.player_actions().cancel_power_effect(),
            Action::SwapCard => self.player_actions().swap_card(),
            Action::Knock => self.player_actions().knock(),
        };

        match outcome {
            Ok(()) => {
                if let Some(game) = self.game.as_mut() {
                    game.record(player, turn, action);
                }
                Ok(())
            }
            Err(err) => {
                log::warn!("{} rejected: {err}", action.name());
                Err(err)
            }
        }
    }

    pub(crate) fn game_ref(&self) -> Result<&GameState> {
        self.game.as_ref().ok_or(KabooError::NoActiveGame)
    }

    pub(crate) fn game_mut(&mut self) -> Result<&mut GameState> {
        self.game.as_mut().ok_or(KabooError::NoActiveGame)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.emit(&event, self.game.as_ref());
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
