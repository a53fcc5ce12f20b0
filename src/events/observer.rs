//! Observer registration and broadcast.

use crate::core::GameState;

use super::event::GameEvent;

/// Receives game events after each state change.
///
/// `game` is the state right after the mutation, or `None` once the game
/// has been cleared (`Quit`, `Restart`).
pub trait Observer {
    fn notify(&mut self, event: &GameEvent, game: Option<&GameState>);
}

impl<F> Observer for F
where
    F: FnMut(&GameEvent, Option<&GameState>),
{
    fn notify(&mut self, event: &GameEvent, game: Option<&GameState>) {
        self(event, game)
    }
}

/// Owns the registered observers and broadcasts to all of them, in
/// subscription order.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn Observer>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers stay registered for the lifetime of
    /// the bus, across games.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver an event to every observer.
    pub fn emit(&mut self, event: &GameEvent, game: Option<&GameState>) {
        log::debug!("event {event:?}");
        for observer in &mut self.observers {
            observer.notify(event, game);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
