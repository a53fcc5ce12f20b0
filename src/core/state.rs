//! Game state.
//!
//! `GameState` aggregates everything about one game:
//! - The 52 card instances, keyed by `CardId`
//! - Both players (grid, drawn card, starting cards)
//! - Draw pile and discard pile (LIFO, top = end of vec)
//! - Phase, current player, and the selection scratch list
//! - Knock/last-round bookkeeping
//! - The human-readable log and the action history
//!
//! Services mutate it in place; everything outside the crate reads it
//! through accessors. Log and history use `im` vectors so cloning a state
//! for an observer snapshot stays cheap.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::action::{Action, ActionRecord};
use super::phase::GamePhase;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{standard_deck, Card, CardId, DECK_SIZE};
use crate::error::{KabooError, Result};
use crate::rules::GameResult;
use crate::zones::{HandPosition, Location};

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Card instances by id.
    cards: FxHashMap<CardId, Card>,

    pub(crate) players: PlayerMap<Player>,

    pub(crate) current_player: PlayerId,

    pub(crate) phase: GamePhase,

    /// Face-down draw pile (top = end of vec).
    pub(crate) draw_pile: Vec<CardId>,

    /// Discard pile (top = end of vec), top card face-up.
    pub(crate) discard_pile: Vec<CardId>,

    /// Cards chosen while resolving an effect or a swap.
    pub(crate) selected: SmallVec<[CardId; 2]>,

    /// Set once someone knocks or the draw pile runs out. Never reset.
    pub(crate) last_round: bool,

    pub(crate) knock_initiator: Option<PlayerId>,

    pub(crate) log: Vector<String>,

    pub(crate) history: Vector<ActionRecord>,

    /// Starts at 1, incremented on every hand-off.
    pub(crate) turn_number: u32,

    action_sequence: u32,

    pub(crate) result: Option<GameResult>,

    pub(crate) rng: GameRng,
}

impl GameState {
    /// Create a fresh game with unnamed seats and the full deck in the
    /// card table. The starting player is drawn from `rng`.
    #[must_use]
    pub(crate) fn new(mut rng: GameRng) -> Self {
        let current_player = rng.pick_player();
        let cards = standard_deck().into_iter().map(|c| (c.id, c)).collect();

        Self {
            cards,
            players: PlayerMap::with_default(),
            current_player,
            phase: GamePhase::Initialized,
            draw_pile: Vec::with_capacity(DECK_SIZE),
            discard_pile: Vec::new(),
            selected: SmallVec::new(),
            last_round: false,
            knock_initiator: None,
            log: Vector::new(),
            history: Vector::new(),
            turn_number: 1,
            action_sequence: 0,
            result: None,
            rng,
        }
    }

    // === Accessors ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current_player
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// The player waiting for their turn.
    #[must_use]
    pub fn opponent(&self) -> &Player {
        &self.players[self.current_player.opponent()]
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Draw pile, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &[CardId] {
        &self.draw_pile
    }

    /// Discard pile, bottom first.
    #[must_use]
    pub fn discard_pile(&self) -> &[CardId] {
        &self.discard_pile
    }

    /// The face-up card on the discard pile.
    #[must_use]
    pub fn top_discard(&self) -> Option<CardId> {
        self.discard_pile.last().copied()
    }

    /// Current selection, in the order it was made.
    #[must_use]
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    #[must_use]
    pub fn is_last_round(&self) -> bool {
        self.last_round
    }

    /// The player who knocked, if anyone has.
    #[must_use]
    pub fn knock_initiator(&self) -> Option<PlayerId> {
        self.knock_initiator
    }

    /// Human-readable event log.
    #[must_use]
    pub fn log(&self) -> &Vector<String> {
        &self.log
    }

    /// Every action applied through `Session::apply`, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Final result, once the game is finished.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Look up a card instance.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// All card instances, in id order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by_key(|c| c.id);
        cards.into_iter()
    }

    /// Short label for a card ("Q♥"), or "?" for an unknown id.
    #[must_use]
    pub fn describe(&self, id: CardId) -> String {
        self.card(id).map_or_else(|| "?".to_string(), Card::to_string)
    }

    // === Locations ===

    /// Where a card currently is.
    #[must_use]
    pub fn location_of(&self, card: CardId) -> Option<Location> {
        for (player, p) in self.players.iter() {
            if let Some(position) = p.position_of(card) {
                return Some(Location::Hand { player, position });
            }
            if p.drawn_card == Some(card) {
                return Some(Location::Drawn(player));
            }
        }
        if self.draw_pile.contains(&card) {
            return Some(Location::DrawPile);
        }
        if self.discard_pile.contains(&card) {
            return Some(Location::DiscardPile);
        }
        None
    }

    /// The player whose grid holds `card`.
    #[must_use]
    pub fn hand_owner(&self, card: CardId) -> Option<PlayerId> {
        PlayerId::all().find(|&p| self.players[p].holds(card))
    }

    /// Position of a card in a player's grid.
    #[must_use]
    pub fn find_card_position_in_hand(&self, player: PlayerId, card: CardId) -> Option<HandPosition> {
        self.players[player].position_of(card)
    }

    /// Verify that the 52 cards are partitioned across hands, drawn slots,
    /// and piles with no duplicates and none missing.
    pub fn check_conservation(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        let mut total = 0usize;

        let located = self
            .players
            .iter()
            .flat_map(|(_, p)| p.hand_cards().chain(p.drawn_card))
            .chain(self.draw_pile.iter().copied())
            .chain(self.discard_pile.iter().copied());

        for card in located {
            total += 1;
            if !self.cards.contains_key(&card) {
                return Err(KabooError::state(format!("{card} is not part of this game")));
            }
            if !seen.insert(card) {
                return Err(KabooError::state(format!("{card} is in two places")));
            }
        }

        if total != DECK_SIZE {
            return Err(KabooError::state(format!(
                "{total} cards located, expected {DECK_SIZE}"
            )));
        }
        Ok(())
    }

    // === Mutation (crate-private) ===

    pub(crate) fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_player]
    }

    pub(crate) fn set_revealed(&mut self, card: CardId, revealed: bool) {
        if let Some(c) = self.cards.get_mut(&card) {
            c.revealed = revealed;
        }
    }

    /// Turn every card face-down.
    pub(crate) fn conceal_all(&mut self) {
        for card in self.cards.values_mut() {
            card.revealed = false;
        }
    }

    /// Put every card on the draw pile in random order.
    pub(crate) fn shuffle_into_draw_pile(&mut self) {
        let mut ids: Vec<_> = self.cards.keys().copied().collect();
        ids.sort();
        self.rng.shuffle(&mut ids);
        self.draw_pile = ids;
        self.discard_pile.clear();
    }

    /// Deal four cards to each grid, row-major, first seat first.
    pub(crate) fn deal(&mut self) {
        for player in PlayerId::all() {
            for position in HandPosition::ALL {
                if let Some(card) = self.draw_pile.pop() {
                    self.players[player].set_card(position, card);
                }
            }
        }
    }

    /// Move the current player's drawn card (if any) onto the discard pile.
    pub(crate) fn discard_drawn_card(&mut self) -> Option<CardId> {
        let card = self.current_player_mut().drawn_card.take()?;
        self.discard_pile.push(card);
        Some(card)
    }

    pub(crate) fn push_log(&mut self, line: impl Into<String>) {
        self.log.push_back(line.into());
    }

    /// Append to the history. `player` and `turn` are taken before the
    /// action ran, since it may have ended the turn.
    pub(crate) fn record(&mut self, player: PlayerId, turn: u32, action: Action) {
        let record = ActionRecord::new(player, action, turn, self.action_sequence);
        self.action_sequence += 1;
        self.history.push_back(record);
    }

    // === Test rigging ===

    /// Put `card` on top of the draw pile, keeping the partition intact.
    #[cfg(test)]
    pub(crate) fn rig_draw_top(&mut self, card: CardId) {
        match self.location_of(card) {
            Some(Location::DrawPile) => {
                self.draw_pile.retain(|&c| c != card);
                self.draw_pile.push(card);
            }
            Some(Location::DiscardPile) => {
                self.discard_pile.retain(|&c| c != card);
                self.draw_pile.push(card);
            }
            Some(Location::Hand { player, position }) => {
                let replacement = self.draw_pile.pop().expect("draw pile is empty");
                self.players[player].set_card(position, replacement);
                self.draw_pile.push(card);
            }
            Some(Location::Drawn(player)) => {
                self.players[player].drawn_card = None;
                self.draw_pile.push(card);
            }
            None => panic!("{card} not found"),
        }
    }

    /// Put `card` into a grid slot, sending the previous occupant to where
    /// `card` came from.
    #[cfg(test)]
    pub(crate) fn rig_hand(&mut self, player: PlayerId, position: HandPosition, card: CardId) {
        let previous = self.players[player].card_at(position).expect("slot is empty");
        if previous == card {
            return;
        }
        match self.location_of(card) {
            Some(Location::DrawPile) => {
                let i = self.draw_pile.iter().position(|&c| c == card).unwrap();
                self.draw_pile[i] = previous;
            }
            Some(Location::DiscardPile) => {
                let i = self.discard_pile.iter().position(|&c| c == card).unwrap();
                self.discard_pile[i] = previous;
            }
            Some(Location::Hand { player: other, position: other_pos }) => {
                self.players[other].set_card(other_pos, previous);
            }
            Some(Location::Drawn(other)) => {
                self.players[other].drawn_card = Some(previous);
            }
            None => panic!("{card} not found"),
        }
        self.players[player].set_card(position, card);
    }
}
