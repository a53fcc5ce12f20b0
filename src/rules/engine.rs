//! Scoring, results, and legal-command enumeration.
//!
//! - `score_hand`: penalty total of a grid
//! - `GameResult`: winner (strictly lower score) or draw
//! - `legal_actions`: commands that advance the game from a given state

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{Action, GamePhase, GameState, Player, PlayerId, PlayerMap};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner with the strictly lower score.
    Winner {
        player: PlayerId,
        scores: PlayerMap<i32>,
    },
    /// Equal scores, no winner.
    Draw { scores: PlayerMap<i32> },
}

impl GameResult {
    /// Decide the result from both final scores.
    #[must_use]
    pub fn from_scores(scores: PlayerMap<i32>) -> Self {
        let (a, b) = (PlayerId::new(0), PlayerId::new(1));
        match scores[a].cmp(&scores[b]) {
            std::cmp::Ordering::Less => GameResult::Winner { player: a, scores },
            std::cmp::Ordering::Greater => GameResult::Winner { player: b, scores },
            std::cmp::Ordering::Equal => GameResult::Draw { scores },
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }

    /// The winning player, `None` on a draw.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner { player, .. } => Some(*player),
            GameResult::Draw { .. } => None,
        }
    }

    /// Both final scores.
    #[must_use]
    pub fn scores(&self) -> &PlayerMap<i32> {
        match self {
            GameResult::Winner { scores, .. } | GameResult::Draw { scores } => scores,
        }
    }

    /// The winner's score, or the shared score on a draw.
    #[must_use]
    pub fn winning_score(&self) -> i32 {
        match self {
            GameResult::Winner { player, scores } => scores[*player],
            GameResult::Draw { scores } => scores[PlayerId::new(0)],
        }
    }
}

/// Penalty total of a player's grid (lower is better).
#[must_use]
pub fn score_hand(state: &GameState, player: &Player) -> i32 {
    player
        .hand_cards()
        .filter_map(|id| state.card(id))
        .map(|card| card.points())
        .sum()
}

/// The current selection as (own card, opponent card) if it holds exactly
/// one card from each grid.
#[must_use]
pub(crate) fn split_selection(state: &GameState) -> Option<(CardId, CardId)> {
    let me = state.current_player_id();
    match *state.selected() {
        [a, b] => match (state.hand_owner(a), state.hand_owner(b)) {
            (Some(x), Some(y)) if x == me && y == me.opponent() => Some((a, b)),
            (Some(x), Some(y)) if x == me.opponent() && y == me => Some((b, a)),
            _ => None,
        },
        _ => None,
    }
}

/// The single selected card if it is in `owner`'s grid.
#[must_use]
pub(crate) fn single_selection(state: &GameState, owner: PlayerId) -> Option<CardId> {
    match *state.selected() {
        [card] if state.hand_owner(card) == Some(owner) => Some(card),
        _ => None,
    }
}

/// Enumerate the commands that advance the game from `state`.
///
/// Pure building blocks (`ShowCards`, `EndTurn`) and the informational
/// `StartTurn` are not listed. Selections already made are not offered again.
#[must_use]
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    let me = state.current_player_id();
    let opponent = me.opponent();
    let drawn = state.current_player().drawn_card;
    let mut actions = Vec::new();

    let selectable = |owners: &[PlayerId], out: &mut Vec<Action>| {
        for &owner in owners {
            for card in state.player(owner).hand_cards() {
                if !state.selected().contains(&card) {
                    out.push(Action::SelectCard(card));
                }
            }
        }
    };

    match state.phase() {
        GamePhase::PlayersAdded | GamePhase::Reveal => actions.push(Action::ShowStartingCards),
        GamePhase::ShowStartingHands1 | GamePhase::ShowStartingHands2 => {
            actions.push(Action::HideStartingCards)
        }
        GamePhase::ReadyToDraw => {
            actions.push(Action::DrawFromDeck);
            if state.top_discard().is_some() {
                actions.push(Action::DrawFromPile);
            }
        }
        GamePhase::DrawFromDeck | GamePhase::PowerCardDrawn | GamePhase::PointCardDrawn => {
            if state.phase() == GamePhase::PowerCardDrawn {
                actions.push(Action::PlayPowerCard);
                actions.push(Action::ConfirmChoice);
            }
            if drawn.is_some() {
                actions.push(Action::DiscardCard);
                if single_selection(state, me).is_some() {
                    actions.push(Action::SwapCard);
                }
            }
            selectable(&[me], &mut actions);
        }
        GamePhase::DrawFromPile => {
            if drawn.is_some() && single_selection(state, me).is_some() {
                actions.push(Action::SwapCard);
            }
            selectable(&[me], &mut actions);
        }
        GamePhase::PlayJack | GamePhase::PlayQueen => {
            if split_selection(state).is_some() {
                actions.push(Action::ConfirmChoice);
                actions.push(Action::SwapCard);
            }
            selectable(&[me, opponent], &mut actions);
        }
        GamePhase::PlaySevenOrEight => {
            if single_selection(state, me).is_some() {
                actions.push(Action::ConfirmChoice);
            }
            selectable(&[me], &mut actions);
        }
        GamePhase::PlayNineOrTen => {
            if single_selection(state, opponent).is_some() {
                actions.push(Action::ConfirmChoice);
            }
            selectable(&[opponent], &mut actions);
        }
        GamePhase::ConfirmQueenShow => {
            actions.push(Action::ConfirmChoice);
            actions.push(Action::ConfirmQueenSwap);
            actions.push(Action::CancelPowerEffect);
            actions.push(Action::HideCards);
        }
        GamePhase::ShowCards => actions.push(Action::HideCards),
        GamePhase::Initialized
        | GamePhase::PlayerAddition
        | GamePhase::Knocked
        | GamePhase::EndTurn
        | GamePhase::Finished => {}
    }

    let in_turn = !state.phase().is_setup()
        && !matches!(state.phase(), GamePhase::Finished | GamePhase::Knocked | GamePhase::EndTurn);
    if in_turn && !state.is_last_round() {
        actions.push(Action::Knock);
    }

    actions
}
