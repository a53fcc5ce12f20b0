//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use kaboo_engine::cards::Rank;
use kaboo_engine::{GameEvent, GamePhase, GameState, Session, SessionConfig};

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every event an observer has seen, in order.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl Recorder {
    pub fn attach(session: &mut Session) -> Self {
        let recorder = Self::default();
        let sink = Rc::clone(&recorder.events);
        session.subscribe(move |event: &GameEvent, _: Option<&GameState>| {
            sink.borrow_mut().push(event.clone());
        });
        recorder
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(GameEvent::name).collect()
    }

    pub fn last(&self) -> Option<GameEvent> {
        self.events.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Start a game and run the opening peek for both players.
pub fn ready_session(seed: u64) -> (Session, Recorder) {
    init_logging();
    let mut session = Session::new(SessionConfig::seeded(seed));
    let recorder = Recorder::attach(&mut session);
    session.game_flow().start_new_game("Alice", "Bob").unwrap();
    for _ in 0..2 {
        session.game_flow().show_starting_cards().unwrap();
        session.game_flow().hide_starting_cards().unwrap();
    }
    assert_eq!(session.game().unwrap().phase(), GamePhase::ReadyToDraw);
    recorder.clear();
    (session, recorder)
}

/// First seed whose ready game has a card of `rank` on top of the draw pile.
pub fn seed_with_top(rank: Rank) -> u64 {
    (0..10_000)
        .find(|&seed| {
            let (session, _) = ready_session(seed);
            let game = session.game().unwrap();
            let top = *game.draw_pile().last().unwrap();
            game.card(top).unwrap().rank == rank
        })
        .expect("no seed puts the rank on top")
}
