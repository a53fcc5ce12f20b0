//! Game lifecycle: setup, the opening peek, turn hand-off, and scoring.

use smallvec::SmallVec;

use super::Session;
use crate::cards::CardId;
use crate::core::{GamePhase, GameState, Player, PlayerId, PlayerMap};
use crate::error::{KabooError, Result};
use crate::events::GameEvent;
use crate::rules::{score_hand, GameResult};
use crate::zones::HandPosition;

/// Lifecycle operations and the operations shared by several in-turn paths.
pub struct GameFlowService<'a> {
    session: &'a mut Session,
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(KabooError::argument("player name must not be blank"));
    }
    Ok(())
}

impl<'a> GameFlowService<'a> {
    pub(crate) fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    // === Setup ===

    /// Start a game between two named players: shuffle, deal 4 cards each,
    /// and wait for the opening peek.
    pub fn start_new_game(&mut self, first: &str, second: &str) -> Result<()> {
        if self.session.game.is_some() {
            return Err(KabooError::state("a game is already running"));
        }
        validate_name(first)?;
        validate_name(second)?;

        let rng = self.session.rng.fork();
        self.session.game = Some(GameState::new(rng));
        self.add_player(first)?;
        self.add_player(second)?;

        let game = self.session.game_mut()?;
        game.shuffle_into_draw_pile();
        game.deal();
        game.phase = GamePhase::PlayersAdded;
        let starter = game.current_player().name.clone();
        game.push_log(format!("New game started. {starter} begins."));
        log::info!("game started: {first} vs. {second}, {starter} begins");

        self.session.emit(GameEvent::GameStarted);
        Ok(())
    }

    /// Name the next empty seat. Only possible while the game is being set up.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId> {
        let game = self.session.game_mut()?;
        if !matches!(game.phase, GamePhase::Initialized | GamePhase::PlayerAddition) {
            return Err(KabooError::state(format!(
                "players can only be added during setup, not in {}",
                game.phase
            )));
        }
        validate_name(name)?;
        let seat = PlayerId::all()
            .find(|&p| game.players[p].name.is_empty())
            .ok_or_else(|| KabooError::state("both seats are already taken"))?;

        game.players[seat] = Player::new(name);
        game.phase = if seat.index() == 0 {
            GamePhase::PlayerAddition
        } else {
            GamePhase::PlayersAdded
        };
        game.push_log(format!("Player {name} joined."));

        self.session.emit(GameEvent::PlayerAdded {
            player: seat,
            name: name.to_string(),
        });
        Ok(seat)
    }

    /// Turn the current player's bottom row face-up. A no-op outside the
    /// two peek slots of the opening.
    pub fn show_starting_cards(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        let next = match game.phase {
            GamePhase::PlayersAdded => GamePhase::ShowStartingHands1,
            GamePhase::Reveal => GamePhase::ShowStartingHands2,
            _ => return Ok(()),
        };

        let player = game.current_player;
        let cards: SmallVec<[CardId; 2]> = HandPosition::BOTTOM_ROW
            .iter()
            .filter_map(|&pos| game.players[player].card_at(pos))
            .collect();
        for &card in &cards {
            game.set_revealed(card, true);
        }
        let seat = &mut game.players[player];
        if seat.starting_cards.is_empty() {
            seat.starting_cards = cards.clone();
        }
        let name = seat.name.clone();
        game.phase = next;
        game.push_log(format!("{name} looks at their starting cards."));

        self.session.emit(GameEvent::StartingCardsShown {
            player,
            cards: cards.to_vec(),
        });
        Ok(())
    }

    /// Turn the peeked cards face-down again. After the first peek the other
    /// player gets theirs; after the second the first turn begins with a
    /// randomly chosen player. A no-op at any other time.
    pub fn hide_starting_cards(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        let player = game.current_player;
        match game.phase {
            GamePhase::ShowStartingHands1 => {
                hide_bottom_row(game, player);
                game.current_player = player.opponent();
                game.phase = GamePhase::Reveal;
                let next = game.current_player().name.clone();
                game.push_log(format!("{next} may now look at their cards."));
            }
            GamePhase::ShowStartingHands2 => {
                hide_bottom_row(game, player);
                game.log.clear();
                game.current_player = game.rng.pick_player();
                game.phase = GamePhase::ReadyToDraw;
                let first = game.current_player().name.clone();
                game.push_log(format!("{first} takes the first turn."));
            }
            _ => return Ok(()),
        }

        self.session.emit(GameEvent::StartingCardsHidden { player });
        Ok(())
    }

    // === Power-card display ===

    /// Reveal one or two grid cards as the effect of a peeking power card.
    pub fn show_cards(&mut self, first: CardId, second: Option<CardId>) -> Result<()> {
        let game = self.session.game_mut()?;
        if !matches!(
            game.phase,
            GamePhase::PlayQueen | GamePhase::PlaySevenOrEight | GamePhase::PlayNineOrTen
        ) {
            return Err(KabooError::state(format!(
                "cards can only be shown while playing a peeking power card, not in {}",
                game.phase
            )));
        }
        if second == Some(first) {
            return Err(KabooError::argument("cannot show the same card twice"));
        }
        for card in std::iter::once(first).chain(second) {
            if game.hand_owner(card).is_none() {
                return Err(KabooError::argument(format!("{card} is not in a hand")));
            }
        }

        game.set_revealed(first, true);
        let mut line = format!("{} looks at {}", game.current_player().name, game.describe(first));
        if let Some(second) = second {
            game.set_revealed(second, true);
            line.push_str(&format!(" and {}", game.describe(second)));
        }
        line.push('.');
        game.push_log(line);
        game.phase = GamePhase::ShowCards;

        self.session.emit(GameEvent::CardsShown { first, second });
        Ok(())
    }

    /// Turn the shown cards face-down and end the turn.
    pub fn hide_cards(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        if !matches!(game.phase, GamePhase::ShowCards | GamePhase::ConfirmQueenShow) {
            return Err(KabooError::state(format!(
                "no cards are shown in {}",
                game.phase
            )));
        }

        conceal_selection(game);
        let name = game.current_player().name.clone();
        game.push_log(format!("{name} turned the cards face-down again."));
        game.phase = GamePhase::EndTurn;

        self.session.emit(GameEvent::HideCards);
        self.end_turn()
    }

    // === Turn structure ===

    /// Put the drawn card on the discard pile without using it.
    pub fn discard_card(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        if !matches!(game.phase, GamePhase::PowerCardDrawn | GamePhase::PointCardDrawn) {
            return Err(KabooError::state(format!(
                "only a card drawn from the deck can be discarded, not in {}",
                game.phase
            )));
        }
        let card = game
            .discard_drawn_card()
            .ok_or_else(|| KabooError::state("there is no drawn card to discard"))?;

        let line = format!("{} discarded {}.", game.current_player().name, game.describe(card));
        game.push_log(line);
        game.phase = GamePhase::EndTurn;

        self.session.emit(GameEvent::CardDiscarded { card });
        self.end_turn()
    }

    /// Announce the current player's turn. Does not change whose turn it is.
    pub fn start_turn(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        if game.phase != GamePhase::ReadyToDraw {
            return Err(KabooError::state(format!(
                "a turn can only start when ready to draw, not in {}",
                game.phase
            )));
        }
        let player = game.current_player;
        let line = format!(
            "Turn {}: {} to play.",
            game.turn_number,
            game.current_player().name
        );
        game.push_log(line);

        self.session.emit(GameEvent::TurnStarted { player });
        Ok(())
    }

    /// Finish the current turn.
    ///
    /// Checked in order:
    /// 1. Empty draw pile: the game ends, knock or not.
    /// 2. Last round and the hand-off would return play to the knocker: the
    ///    game ends.
    /// 3. Otherwise play passes to the opponent.
    ///
    /// A drawn card still held is discarded first, and every peeked card is
    /// turned face-down on hand-off.
    pub fn end_turn(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        if !matches!(game.phase, GamePhase::EndTurn | GamePhase::Knocked) {
            return Err(KabooError::state(format!(
                "a turn can only end from EndTurn or Knocked, not from {}",
                game.phase
            )));
        }

        let leftover = game.discard_drawn_card();
        if let Some(card) = leftover {
            self.session.emit(GameEvent::CardDiscarded { card });
        }

        let game = self.session.game_mut()?;
        if game.draw_pile.is_empty() {
            game.last_round = true;
            game.phase = GamePhase::EndTurn;
            game.push_log("The draw pile is empty. The game ends now.");
            return self.game_over();
        }
        if game.last_round && game.knock_initiator == Some(game.current_player.opponent()) {
            game.phase = GamePhase::EndTurn;
            return self.game_over();
        }

        let next = game.current_player.opponent();
        game.conceal_all();
        game.selected.clear();
        game.current_player = next;
        game.turn_number += 1;
        game.phase = GamePhase::ReadyToDraw;
        let line = format!("Turn over. {} to play.", game.players[next].name);
        game.push_log(line);

        self.session.emit(GameEvent::TurnEnded { next });
        Ok(())
    }

    /// Score both grids and finish the game. Lower score wins; equal scores
    /// are a draw.
    pub fn game_over(&mut self) -> Result<()> {
        let game = self.session.game_mut()?;
        if game.phase != GamePhase::EndTurn {
            return Err(KabooError::state(format!(
                "the game can only end from EndTurn, not from {}",
                game.phase
            )));
        }
        if !game.last_round {
            return Err(KabooError::state("the game can only end in the last round"));
        }

        let view: &GameState = game;
        let scores = PlayerMap::new(|p| score_hand(view, view.player(p)));
        let result = GameResult::from_scores(scores);
        game.phase = GamePhase::Finished;
        for player in PlayerId::all() {
            let line = format!("{} has {} points.", game.players[player].name, result.scores()[player]);
            game.push_log(line);
        }
        match result.winner() {
            Some(winner) => log::info!(
                "game over: {} wins with {} points",
                game.players[winner].name,
                result.winning_score()
            ),
            None => log::info!("game over: draw at {} points", result.winning_score()),
        }
        let event = GameEvent::GameOver {
            winner: result.winner(),
            score: result.winning_score(),
        };
        game.result = Some(result);

        self.session.emit(event);
        Ok(())
    }

    // === Leaving ===

    /// Abandon the active game.
    pub fn quit(&mut self) -> Result<()> {
        self.clear_game()?;
        log::info!("game quit");
        self.session.emit(GameEvent::Quit);
        Ok(())
    }

    /// Abandon the active game so a new one can be started.
    pub fn restart(&mut self) -> Result<()> {
        self.clear_game()?;
        log::info!("game restarted");
        self.session.emit(GameEvent::Restart);
        Ok(())
    }

    fn clear_game(&mut self) -> Result<GameState> {
        self.session.game.take().ok_or(KabooError::NoActiveGame)
    }
}

fn hide_bottom_row(game: &mut GameState, player: PlayerId) {
    for pos in HandPosition::BOTTOM_ROW {
        if let Some(card) = game.players[player].card_at(pos) {
            game.set_revealed(card, false);
        }
    }
}

/// Turn the selected cards face-down and forget the selection.
pub(crate) fn conceal_selection(game: &mut GameState) {
    let selected = std::mem::take(&mut game.selected);
    for card in selected {
        game.set_revealed(card, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{card_id_of, Rank, Suit};
    use crate::core::SessionConfig;
    use crate::services::test_support::*;

    fn rank_of(session: &Session, card: CardId) -> Rank {
        session.game().unwrap().card(card).unwrap().rank
    }

    #[test]
    fn test_start_new_game() {
        let (mut session, events) = recording_session(5);
        session.game_flow().start_new_game("Alice", "Bob").unwrap();

        let game = session.game().unwrap();
        assert_eq!(game.phase(), GamePhase::PlayersAdded);
        assert_eq!(game.draw_pile().len(), 44);
        assert!(game.discard_pile().is_empty());
        assert_eq!(game.player(PlayerId::new(0)).name, "Alice");
        assert_eq!(game.player(PlayerId::new(1)).name, "Bob");
        for (_, player) in game.players().iter() {
            assert_eq!(player.hand_cards().count(), 4);
        }
        game.check_conservation().unwrap();
        assert_eq!(names(&events), vec!["player_added", "player_added", "game_started"]);
    }

    #[test]
    fn test_start_rejects_blank_name() {
        let (mut session, events) = recording_session(5);

        let err = session.game_flow().start_new_game("Alice", "   ").unwrap_err();
        assert!(matches!(err, KabooError::InvalidArgument(_)));
        assert!(!session.has_game());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_start_twice_fails() {
        let (mut session, _) = recording_session(5);
        session.game_flow().start_new_game("Alice", "Bob").unwrap();
        let before = session.game().cloned();

        let err = session.game_flow().start_new_game("Carol", "Dave").unwrap_err();
        assert!(matches!(err, KabooError::InvalidState(_)));
        assert_eq!(session.game().cloned(), before);
    }

    #[test]
    fn test_third_player_rejected() {
        let (mut session, _) = recording_session(5);
        session.game_flow().start_new_game("Alice", "Bob").unwrap();

        let err = session.game_flow().add_player("Carol").unwrap_err();
        assert!(matches!(err, KabooError::InvalidState(_)));
    }

    #[test]
    fn test_opening_peek_sequence() {
        let (mut session, events) = recording_session(11);
        session.game_flow().start_new_game("Alice", "Bob").unwrap();
        let first = session.game().unwrap().current_player_id();

        // Hiding before showing does nothing.
        session.game_flow().hide_starting_cards().unwrap();
        assert_eq!(session.game().unwrap().phase(), GamePhase::PlayersAdded);

        session.game_flow().show_starting_cards().unwrap();
        let game = session.game().unwrap();
        assert_eq!(game.phase(), GamePhase::ShowStartingHands1);
        let peeked = game.player(first).starting_cards.clone();
        assert_eq!(peeked.len(), 2);
        assert!(peeked.iter().all(|&c| game.card(c).unwrap().revealed));
        assert_eq!(
            peeked.to_vec(),
            HandPosition::BOTTOM_ROW
                .iter()
                .filter_map(|&pos| game.player(first).card_at(pos))
                .collect::<Vec<_>>()
        );

        // Showing twice does nothing.
        session.game_flow().show_starting_cards().unwrap();
        assert_eq!(session.game().unwrap().phase(), GamePhase::ShowStartingHands1);

        session.game_flow().hide_starting_cards().unwrap();
        let game = session.game().unwrap();
        assert_eq!(game.phase(), GamePhase::Reveal);
        assert_eq!(game.current_player_id(), first.opponent());
        assert!(game.cards().all(|c| !c.revealed));

        session.game_flow().show_starting_cards().unwrap();
        assert_eq!(session.game().unwrap().phase(), GamePhase::ShowStartingHands2);
        assert_eq!(
            session.game().unwrap().player(first.opponent()).starting_cards.len(),
            2
        );

        session.game_flow().hide_starting_cards().unwrap();
        let game = session.game().unwrap();
        assert_eq!(game.phase(), GamePhase::ReadyToDraw);
        assert_eq!(game.log().len(), 1);
        assert!(game.log()[0].ends_with("takes the first turn."));
        assert_eq!(
            names(&events),
            vec![
                "player_added",
                "player_added",
                "game_started",
                "starting_cards_shown",
                "starting_cards_hidden",
                "starting_cards_shown",
                "starting_cards_hidden",
            ]
        );
    }

    #[test]
    fn test_show_cards_needs_peek_phase() {
        let (mut session, events) = ready_session(2);
        let card = session.game().unwrap().current_player().hand_cards().next().unwrap();

        let err = session.game_flow().show_cards(card, None).unwrap_err();
        assert!(matches!(err, KabooError::InvalidState(_)));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_show_and_hide_cards() {
        let (mut session, events) = ready_session(2);
        let own = session.game().unwrap().current_player().hand_cards().next().unwrap();
        session.game_mut().unwrap().phase = GamePhase::PlaySevenOrEight;
        session.game_mut().unwrap().selected.push(own);

        session.game_flow().show_cards(own, None).unwrap();
        let game = session.game().unwrap();
        assert_eq!(game.phase(), GamePhase::ShowCards);
        assert!(game.card(own).unwrap().revealed);

        let before = game.current_player_id();
        session.game_flow().hide_cards().unwrap();
        let game = session.game().unwrap();
        assert_eq!(game.phase(), GamePhase::ReadyToDraw);
        assert!(!game.card(own).unwrap().revealed);
        assert!(game.selected().is_empty());
        assert_eq!(game.current_player_id(), before.opponent());
        assert_eq!(names(&events), vec!["cards_shown", "hide_cards", "turn_ended"]);
    }

    #[test]
    fn test_show_cards_rejects_pile_card() {
        let (mut session, _) = ready_session(2);
        let top = *session.game().unwrap().draw_pile().last().unwrap();
        session.game_mut().unwrap().phase = GamePhase::PlayNineOrTen;

        let err = session.game_flow().show_cards(top, None).unwrap_err();
        assert!(matches!(err, KabooError::InvalidArgument(_)));
        assert_eq!(session.game().unwrap().phase(), GamePhase::PlayNineOrTen);
    }

    #[test]
    fn test_discard_card() {
        let (mut session, events) = ready_session(4);
        let five = card_id_of(Suit::Clubs, Rank::Five);
        session.game_mut().unwrap().rig_draw_top(five);
        let player = session.game().unwrap().current_player_id();

        session.player_actions().draw_from_deck().unwrap();
        assert_eq!(session.game().unwrap().phase(), GamePhase::PointCardDrawn);
        session.game_flow().discard_card().unwrap();

        let game = session.game().unwrap();
        assert_eq!(game.top_discard(), Some(five));
        assert_eq!(game.player(player).drawn_card, None);
        assert_eq!(game.current_player_id(), player.opponent());
        assert_eq!(game.phase(), GamePhase::ReadyToDraw);
        game.check_conservation().unwrap();
        assert_eq!(
            names(&events),
            vec!["card_drawn_from_deck", "card_discarded", "turn_ended"]
        );
    }

    #[test]
    fn test_discard_outside_draw_phase() {
        let (mut session, _) = ready_session(4);

        let err = session.game_flow().discard_card().unwrap_err();
        assert!(matches!(err, KabooError::InvalidState(_)));
    }

    #[test]
    fn test_start_turn() {
        let (mut session, events) = ready_session(4);
        let player = session.game().unwrap().current_player_id();

        session.game_flow().start_turn().unwrap();
        assert_eq!(session.game().unwrap().current_player_id(), player);
        assert_eq!(*events.borrow(), vec![GameEvent::TurnStarted { player }]);

        session.player_actions().draw_from_deck().unwrap();
        assert!(session.game_flow().start_turn().is_err());
    }

    #[test]
    fn test_end_turn_only_from_end_phases() {
        let (mut session, _) = ready_session(4);

        let err = session.game_flow().end_turn().unwrap_err();
        assert!(matches!(err, KabooError::InvalidState(_)));
    }

    #[test]
    fn test_empty_draw_pile_ends_game() {
        let (mut session, events) = ready_session(8);
        {
            let game = session.game_mut().unwrap();
            let rest = std::mem::take(&mut game.draw_pile);
            game.discard_pile.extend(rest);
            game.phase = GamePhase::EndTurn;
        }

        session.game_flow().end_turn().unwrap();

        let game = session.game().unwrap();
        assert_eq!(game.phase(), GamePhase::Finished);
        assert!(game.is_last_round());
        let result = game.result().unwrap();
        let scores = result.scores();
        for player in PlayerId::all() {
            assert_eq!(scores[player], score_hand(game, game.player(player)));
        }
        let last = events.borrow().last().cloned().unwrap();
        assert_eq!(
            last,
            GameEvent::GameOver {
                winner: result.winner(),
                score: result.winning_score(),
            }
        );
    }

    #[test]
    fn test_game_over_requirements() {
        let (mut session, _) = ready_session(8);

        session.game_mut().unwrap().phase = GamePhase::EndTurn;
        let err = session.game_flow().game_over().unwrap_err();
        assert!(matches!(err, KabooError::InvalidState(_)));

        session.game_mut().unwrap().last_round = true;
        session.game_mut().unwrap().phase = GamePhase::ReadyToDraw;
        let err = session.game_flow().game_over().unwrap_err();
        assert!(matches!(err, KabooError::InvalidState(_)));
    }

    #[test]
    fn test_scoring_and_winner() {
        let (mut session, events) = ready_session(8);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        let low = [
            card_id_of(Suit::Clubs, Rank::King),
            card_id_of(Suit::Spades, Rank::King),
            card_id_of(Suit::Hearts, Rank::Ace),
            card_id_of(Suit::Clubs, Rank::Two),
        ];
        let high = [
            card_id_of(Suit::Clubs, Rank::Queen),
            card_id_of(Suit::Spades, Rank::Jack),
            card_id_of(Suit::Hearts, Rank::Ten),
            card_id_of(Suit::Clubs, Rank::Nine),
        ];
        {
            let game = session.game_mut().unwrap();
            for (i, pos) in HandPosition::ALL.into_iter().enumerate() {
                game.rig_hand(p0, pos, low[i]);
                game.rig_hand(p1, pos, high[i]);
            }
            game.last_round = true;
            game.phase = GamePhase::EndTurn;
        }
        assert_eq!(rank_of(&session, low[0]), Rank::King);

        session.game_flow().game_over().unwrap();

        let game = session.game().unwrap();
        let result = game.result().unwrap();
        assert_eq!(result.scores()[p0], 1);
        assert_eq!(result.scores()[p1], 39);
        assert_eq!(result.winner(), Some(p0));
        assert!(game.log().iter().any(|l| l == "Alice has 1 points."));
        assert!(game.log().iter().any(|l| l == "Bob has 39 points."));
        assert_eq!(
            events.borrow().last(),
            Some(&GameEvent::GameOver { winner: Some(p0), score: 1 })
        );
    }

    #[test]
    fn test_tie_has_no_winner() {
        let (mut session, events) = ready_session(8);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        let left = [Suit::Clubs, Suit::Spades];
        let right = [Suit::Hearts, Suit::Diamonds];
        let ranks = [Rank::Two, Rank::Three];
        {
            let game = session.game_mut().unwrap();
            for (i, pos) in HandPosition::ALL.into_iter().enumerate() {
                let rank = ranks[i % 2];
                game.rig_hand(p0, pos, card_id_of(left[i / 2], rank));
                game.rig_hand(p1, pos, card_id_of(right[i / 2], rank));
            }
            game.last_round = true;
            game.phase = GamePhase::EndTurn;
        }

        session.game_flow().game_over().unwrap();

        assert_eq!(session.game().unwrap().result().unwrap().winner(), None);
        assert_eq!(
            events.borrow().last(),
            Some(&GameEvent::GameOver { winner: None, score: 10 })
        );
    }

    #[test]
    fn test_quit_and_restart() {
        let (mut session, events) = ready_session(6);

        session.game_flow().quit().unwrap();
        assert!(!session.has_game());
        assert_eq!(events.borrow().last(), Some(&GameEvent::Quit));
        assert_eq!(session.game_flow().restart(), Err(KabooError::NoActiveGame));
        assert_eq!(session.game_flow().show_starting_cards(), Err(KabooError::NoActiveGame));

        session.game_flow().start_new_game("Carol", "Dave").unwrap();
        session.game_flow().restart().unwrap();
        assert!(!session.has_game());
        assert_eq!(events.borrow().last(), Some(&GameEvent::Restart));
    }

    #[test]
    fn test_games_in_one_session_differ() {
        let mut session = Session::new(SessionConfig::seeded(21));
        session.game_flow().start_new_game("Alice", "Bob").unwrap();
        let first = session.game().unwrap().draw_pile().to_vec();
        session.game_flow().restart().unwrap();
        session.game_flow().start_new_game("Alice", "Bob").unwrap();

        assert_ne!(session.game().unwrap().draw_pile(), first.as_slice());
    }
}
