//! In-turn player choices: drawing, power cards, selection, swaps, knocking.
//!
//! A turn is always one of:
//! - draw from the deck, then discard it, swap it into the grid, or play it
//!   as a power card;
//! - take the top discard, then swap it into the grid;
//! - knock.
//!
//! Power cards go to the discard pile as soon as they are played. Their
//! effect is then resolved by selecting cards and confirming.

use super::game_flow::conceal_selection;
use super::{GameFlowService, Session};
use crate::cards::CardId;
use crate::core::{GamePhase, GameState, Player, PlayerId};
use crate::error::{KabooError, Result};
use crate::events::GameEvent;
use crate::rules::{single_selection, split_selection};
use crate::zones::HandPosition;

/// The current player's in-turn operations.
pub struct PlayerActionService<'a> {
    session: &'a mut Session,
}

impl<'a> PlayerActionService<'a> {
    pub(crate) fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    fn flow(&mut self) -> GameFlowService<'_> {
        GameFlowService::new(&mut *self.session)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Result<&Player> {
        Ok(self.session.game_ref()?.current_player())
    }

    /// Grid position of `card` in `player`'s hand, `None` if it is not there.
    pub fn find_card_position_in_hand(
        &self,
        player: PlayerId,
        card: CardId,
    ) -> Result<Option<HandPosition>> {
        Ok(self.session.game_ref()?.find_card_position_in_hand(player, card))
    }

    // === Drawing ===

    /// Take the top card of the draw pile. If the pile is already empty the
    /// turn ends instead, which ends the game.
    pub fn draw_from_deck(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        require_ready_to_draw(game)?;

        let Some(card) = game.draw_pile.pop() else {
            game.phase = GamePhase::EndTurn;
            return self.flow().end_turn();
        };
        game.current_player_mut().drawn_card = Some(card);
        let power = game.card(card).map_or(false, |c| c.is_power_card());
        game.phase = if power {
            GamePhase::PowerCardDrawn
        } else {
            GamePhase::PointCardDrawn
        };
        if game.draw_pile.is_empty() {
            game.last_round = true;
        }
        let line = format!(
            "{} drew a {} card ({}) from the draw pile.",
            game.current_player().name,
            if power { "power" } else { "point" },
            game.describe(card)
        );
        game.push_log(line);

        self.session.emit(GameEvent::CardDrawnFromDeck { card });
        Ok(())
    }

    /// Take the top card of the discard pile. It must be swapped into the
    /// grid; it cannot be discarded again or played.
    pub fn draw_from_pile(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        require_ready_to_draw(game)?;
        let card = game
            .discard_pile
            .pop()
            .ok_or_else(|| KabooError::state("the discard pile is empty"))?;

        game.current_player_mut().drawn_card = Some(card);
        game.phase = GamePhase::DrawFromPile;
        let line = format!(
            "{} took {} from the discard pile.",
            game.current_player().name,
            game.describe(card)
        );
        game.push_log(line);

        self.session.emit(GameEvent::CardDrawnFromPile { card });
        Ok(())
    }

    // === Power cards ===

    /// Play the drawn power card: it goes onto the discard pile and the game
    /// moves to the phase resolving its effect. Selections that are not
    /// valid for that effect are dropped.
    pub fn play_power_card(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        if game.phase != GamePhase::PowerCardDrawn {
            return Err(KabooError::state(format!(
                "power cards can only be played right after drawing, not in {}",
                game.phase
            )));
        }
        let card = game
            .current_player()
            .drawn_card
            .ok_or_else(|| KabooError::argument("there is no drawn card to play"))?;
        let effect = game
            .card(card)
            .and_then(|c| c.power_effect())
            .ok_or_else(|| KabooError::argument(format!("{} is not a power card", game.describe(card))))?;

        game.discard_drawn_card();
        game.phase = GamePhase::for_effect(effect);
        let me = game.current_player;
        let keep_owner = match game.phase {
            GamePhase::PlayNineOrTen => me.opponent(),
            _ => me,
        };
        game.selected = game
            .selected
            .iter()
            .copied()
            .filter(|&c| game.hand_owner(c) == Some(keep_owner))
            .collect();

        let line = format!(
            "{} plays {} and {}.",
            game.current_player().name,
            game.describe(card),
            effect.describe()
        );
        game.push_log(line);

        self.session.emit(GameEvent::PowerPlayed { card, effect });
        Ok(())
    }

    /// Pick a grid card for the pending swap or effect.
    ///
    /// - Draw phases and seven/eight: one own card, replacing any earlier pick.
    /// - Nine/ten: one opponent card, replacing any earlier pick.
    /// - Jack/queen: one own and one opponent card, in either order; picking
    ///   a second card from the same grid replaces the first.
    ///
    /// Picking an already selected card changes nothing.
    pub fn select_card(&mut self, card: CardId) -> Result<()> {
        let game = self.session.game_mut()?;
        let phase = game.phase;
        if !(phase.is_draw_resolution()
            || matches!(
                phase,
                GamePhase::PlayJack
                    | GamePhase::PlayQueen
                    | GamePhase::PlaySevenOrEight
                    | GamePhase::PlayNineOrTen
            ))
        {
            return Err(KabooError::state(format!("cards cannot be selected in {phase}")));
        }

        let me = game.current_player;
        let owner = game
            .hand_owner(card)
            .ok_or_else(|| KabooError::argument(format!("{card} is not in a hand")))?;
        match phase {
            GamePhase::PlayJack | GamePhase::PlayQueen => {}
            GamePhase::PlayNineOrTen if owner == me => {
                return Err(KabooError::argument("only opponent cards can be selected with a nine or ten"));
            }
            GamePhase::PlayNineOrTen => {}
            _ if owner != me => {
                return Err(KabooError::argument("only your own cards can be selected now"));
            }
            _ => {}
        }
        if game.selected.contains(&card) {
            return Ok(());
        }

        if matches!(phase, GamePhase::PlayJack | GamePhase::PlayQueen) {
            let same_owner = game
                .selected
                .iter()
                .position(|&c| game.hand_owner(c) == Some(owner));
            if let Some(i) = same_owner {
                game.selected.remove(i);
            }
        } else {
            game.selected.clear();
        }
        game.selected.push(card);

        let position = game.find_card_position_in_hand(owner, card);
        let line = format!(
            "{} selected {}'s card at {}.",
            game.current_player().name,
            game.players[owner].name,
            position.map_or_else(|| "?".to_string(), |p| p.to_string())
        );
        game.push_log(line);

        self.session.emit(GameEvent::CardSelected { card });
        Ok(())
    }

    /// Resolve the pending choice for the current phase.
    ///
    /// - Power card drawn: play it, then resolve at once if the selection
    ///   already fits the effect.
    /// - Queen: peek at both selected cards and wait for swap or cancel.
    /// - Queen shown: swap the peeked cards.
    /// - Seven/eight, nine/ten: peek at the selected card and end the turn.
    /// - Jack: swap the selected cards blind and end the turn.
    pub fn confirm_choice(&mut self) -> Result<()> {
        let game = self.session.game_ref()?;
        let me = game.current_player_id();
        match game.phase() {
            GamePhase::PowerCardDrawn => {
                self.play_power_card()?;
                let game = self.session.game_ref()?;
                let ready = match game.phase() {
                    GamePhase::PlaySevenOrEight => single_selection(game, me).is_some(),
                    GamePhase::PlayNineOrTen => single_selection(game, me.opponent()).is_some(),
                    GamePhase::PlayJack | GamePhase::PlayQueen => split_selection(game).is_some(),
                    _ => false,
                };
                if ready {
                    self.confirm_choice()
                } else {
                    Ok(())
                }
            }
            GamePhase::PlayQueen => {
                let (own, theirs) = split_selection(game).ok_or_else(|| {
                    KabooError::argument("select one of your cards and one opponent card")
                })?;
                self.flow().show_cards(own, Some(theirs))?;
                self.session.game_mut()?.phase = GamePhase::ConfirmQueenShow;
                self.session.emit(GameEvent::ChoiceConfirmed);
                Ok(())
            }
            GamePhase::ConfirmQueenShow => self.queen_swap(true),
            GamePhase::PlaySevenOrEight | GamePhase::PlayNineOrTen => {
                let owner = if game.phase() == GamePhase::PlaySevenOrEight {
                    me
                } else {
                    me.opponent()
                };
                let card = single_selection(game, owner).ok_or_else(|| {
                    KabooError::argument(if owner == me {
                        "select exactly one of your own cards"
                    } else {
                        "select exactly one opponent card"
                    })
                })?;
                self.flow().show_cards(card, None)?;
                self.discard_leftover()?;
                self.session.game_mut()?.phase = GamePhase::EndTurn;
                self.session.emit(GameEvent::ChoiceConfirmed);
                self.flow().end_turn()
            }
            GamePhase::PlayJack => {
                let (own, theirs) = split_selection(game).ok_or_else(|| {
                    KabooError::argument("select one of your cards and one opponent card")
                })?;
                self.discard_leftover()?;
                let game = self.session.game_mut()?;
                let line = format!(
                    "{} blindly swapped a card with {}.",
                    game.current_player().name,
                    game.opponent().name
                );
                game.push_log(line);
                self.trade(own, theirs)?;
                self.session.game_mut()?.phase = GamePhase::EndTurn;
                self.session.emit(GameEvent::ChoiceConfirmed);
                self.flow().end_turn()
            }
            phase => Err(KabooError::state(format!("there is nothing to confirm in {phase}"))),
        }
    }

    /// Swap the two cards peeked with a queen and end the turn.
    pub fn confirm_queen_swap(&mut self) -> Result<()> {
        self.queen_swap(false)
    }

    /// Keep both grids as they are after a queen peek and end the turn.
    pub fn cancel_power_effect(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        if game.phase != GamePhase::ConfirmQueenShow {
            return Err(KabooError::state(format!(
                "there is no power effect to cancel in {}",
                game.phase
            )));
        }

        conceal_selection(game);
        let name = game.current_player().name.clone();
        game.push_log(format!("{name} kept the cards where they were."));
        game.phase = GamePhase::EndTurn;

        self.session.emit(GameEvent::HideCards);
        self.flow().end_turn()
    }

    /// Swap and end the turn.
    ///
    /// After a draw, the drawn card takes the place of the one selected own
    /// card, which goes onto the discard pile. With a jack or queen in play,
    /// the two selected cards trade grid positions.
    pub fn swap_card(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        let me = game.current_player;
        match game.phase {
            phase if phase.is_draw_resolution() => {
                let own = single_selection(game, me)
                    .ok_or_else(|| KabooError::argument("select exactly one of your own cards"))?;
                let drawn = game
                    .current_player()
                    .drawn_card
                    .ok_or_else(|| KabooError::state("there is no drawn card to swap in"))?;
                let position = game
                    .find_card_position_in_hand(me, own)
                    .ok_or_else(|| KabooError::state(format!("{own} is no longer in your hand")))?;

                let player = game.current_player_mut();
                player.set_card(position, drawn);
                player.drawn_card = None;
                game.discard_pile.push(own);
                game.selected.clear();
                let line = format!(
                    "{} swapped {} into their hand and discarded {}.",
                    game.current_player().name,
                    game.describe(drawn),
                    game.describe(own)
                );
                game.push_log(line);
                game.phase = GamePhase::EndTurn;

                self.session.emit(GameEvent::CardsSwapped {
                    first: drawn,
                    second: own,
                });
                self.session.emit(GameEvent::CardDiscarded { card: own });
                self.flow().end_turn()
            }
            GamePhase::PlayJack | GamePhase::PlayQueen => {
                let (own, theirs) = split_selection(game).ok_or_else(|| {
                    KabooError::argument("select one of your cards and one opponent card")
                })?;
                self.trade(own, theirs)?;
                self.session.game_mut()?.phase = GamePhase::EndTurn;
                self.flow().end_turn()
            }
            phase => Err(KabooError::state(format!("cards cannot be swapped in {phase}"))),
        }
    }

    /// Declare the last round. The opponent gets exactly one more turn.
    /// Knocking again once the last round has started does nothing.
    pub fn knock(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        if game.last_round {
            return Ok(());
        }
        if game.phase.is_setup() {
            return Err(KabooError::state("cannot knock before the first turn"));
        }

        let player = game.current_player;
        game.knock_initiator = Some(player);
        game.last_round = true;
        game.phase = GamePhase::Knocked;
        let line = format!(
            "{} knocks! {} gets one more turn.",
            game.current_player().name,
            game.opponent().name
        );
        game.push_log(line);
        log::info!("{player} knocked");

        self.session.emit(GameEvent::Knocked { player });
        self.session.game_mut()?.phase = GamePhase::EndTurn;
        self.flow().end_turn()
    }

    // === Helpers ===

    fn queen_swap(&mut self, confirmed: bool) -> Result<()> {
        let game = self.session.game_ref()?;
        if game.phase() != GamePhase::ConfirmQueenShow {
            return Err(KabooError::state(format!(
                "there is no queen swap to confirm in {}",
                game.phase()
            )));
        }
        let (own, theirs) = split_selection(game)
            .ok_or_else(|| KabooError::state("a selected card is no longer in a hand"))?;

        self.discard_leftover()?;
        let game = self.session.game_mut()?;
        let line = format!(
            "{} swapped cards with {} after looking at them.",
            game.current_player().name,
            game.opponent().name
        );
        game.push_log(line);
        self.trade(own, theirs)?;
        conceal_selection(self.session.game_mut()?);
        self.session.game_mut()?.phase = GamePhase::EndTurn;
        if confirmed {
            self.session.emit(GameEvent::ChoiceConfirmed);
        }
        self.flow().end_turn()
    }

    /// Discard the drawn card if one is still held.
    fn discard_leftover(&mut self) -> Result<()> {
        if let Some(card) = self.session.game_mut()?.discard_drawn_card() {
            self.session.emit(GameEvent::CardDiscarded { card });
        }
        Ok(())
    }

    /// Exchange an own grid card with an opponent grid card, position for
    /// position.
    fn trade(&mut self, own: CardId, theirs: CardId) -> Result<()> {
        let game = self.session.game_mut()?;
        let me = game.current_player;
        let own_pos = game
            .find_card_position_in_hand(me, own)
            .ok_or_else(|| KabooError::state(format!("{own} is no longer in your hand")))?;
        let their_pos = game
            .find_card_position_in_hand(me.opponent(), theirs)
            .ok_or_else(|| KabooError::state(format!("{theirs} is no longer in the opponent's hand")))?;

        let (mine, other) = game.players.both_mut(me);
        mine.set_card(own_pos, theirs);
        other.set_card(their_pos, own);

        self.session.emit(GameEvent::CardsSwapped {
            first: own,
            second: theirs,
        });
        Ok(())
    }
}

fn require_ready_to_draw(game: &GameState) -> Result<()> {
    if game.phase != GamePhase::ReadyToDraw {
        return Err(KabooError::state(format!(
            "cards can only be drawn at the start of a turn, not in {}",
            game.phase
        )));
    }
    Ok(())
}
