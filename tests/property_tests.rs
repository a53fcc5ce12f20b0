//! Property tests over random playouts.
//!
//! Each playout starts from a seeded, ready game and applies a mix of legal
//! commands (from `legal_actions`) and arbitrary commands that are usually
//! rejected. After every step the game invariants are checked.

mod common;

use common::ready_session;
use kaboo_engine::cards::{CardId, DECK_SIZE};
use kaboo_engine::{legal_actions, Action, GameEvent, GamePhase, PlayerId};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const MAX_STEPS: usize = 5_000;

/// Any command, legal or not.
fn arbitrary_action(rng: &mut ChaCha8Rng) -> Action {
    let card = CardId::new(rng.gen_range(0..DECK_SIZE as u8));
    match rng.gen_range(0..16) {
        0 => Action::ShowStartingCards,
        1 => Action::HideStartingCards,
        2 => Action::StartTurn,
        3 => Action::DrawFromDeck,
        4 => Action::DrawFromPile,
        5 => Action::PlayPowerCard,
        6 => Action::SelectCard(card),
        7 => Action::ShowCards {
            first: card,
            second: None,
        },
        8 => Action::HideCards,
        9 => Action::ConfirmChoice,
        10 => Action::ConfirmQueenSwap,
        11 => Action::CancelPowerEffect,
        12 => Action::SwapCard,
        13 => Action::DiscardCard,
        14 => Action::Knock,
        _ => Action::EndTurn,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Invariant: cards are conserved, power cards stay at 24, the last round
    /// never ends, play passes only with a `TurnEnded`, and rejected commands
    /// leave the game untouched.
    #[test]
    fn playout_invariants(seed in any::<u64>(), knock_weight in 1u32..40) {
        let (mut session, recorder) = ready_session(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut was_last_round = false;

        for _ in 0..MAX_STEPS {
            let game = session.game().unwrap().clone();
            if game.phase() == GamePhase::Finished {
                break;
            }

            let legal = legal_actions(&game);
            prop_assert!(!legal.is_empty(), "stuck in {}", game.phase());
            let action = if rng.gen_bool(0.5) {
                arbitrary_action(&mut rng)
            } else {
                // Keep knocks rare so playouts also reach the draw-pile end.
                let moves: Vec<_> = legal
                    .iter()
                    .copied()
                    .filter(|a| *a != Action::Knock || rng.gen_range(0..knock_weight) == 0)
                    .collect();
                let moves = if moves.is_empty() { legal.clone() } else { moves };
                moves[rng.gen_range(0..moves.len())]
            };

            recorder.clear();
            let outcome = session.apply(action);
            let after = session.game().unwrap();

            match outcome {
                Err(err) => {
                    prop_assert!(!legal.contains(&action), "legal {:?} failed: {}", action, err);
                    prop_assert_eq!(after, &game);
                    prop_assert_eq!(recorder.len(), 0);
                    continue;
                }
                Ok(()) => {}
            }

            prop_assert!(after.check_conservation().is_ok());
            prop_assert_eq!(after.cards().count(), DECK_SIZE);
            prop_assert_eq!(after.cards().filter(|c| c.is_power_card()).count(), 24);
            prop_assert!(after.selected().len() <= 2);

            if was_last_round {
                prop_assert!(after.is_last_round());
            }
            was_last_round = after.is_last_round();

            let hand_offs: Vec<PlayerId> = recorder
                .events()
                .iter()
                .filter_map(|e| match e {
                    GameEvent::TurnEnded { next } => Some(*next),
                    _ => None,
                })
                .collect();
            if after.current_player_id() == game.current_player_id() {
                prop_assert!(hand_offs.is_empty());
            } else {
                prop_assert_eq!(hand_offs, vec![game.current_player_id().opponent()]);
                prop_assert_eq!(after.turn_number(), game.turn_number() + 1);
            }
        }
    }

    /// Invariant: legal-only playouts always finish, and the result names
    /// the strictly lower score.
    #[test]
    fn legal_playouts_finish(seed in any::<u64>()) {
        let (mut session, recorder) = ready_session(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);

        for _ in 0..MAX_STEPS {
            let game = session.game().unwrap();
            if game.phase() == GamePhase::Finished {
                break;
            }
            let legal = legal_actions(game);
            let action = legal[rng.gen_range(0..legal.len())];
            prop_assert!(session.apply(action).is_ok());
        }

        let game = session.game().unwrap();
        prop_assert_eq!(game.phase(), GamePhase::Finished);
        prop_assert!(game.is_last_round());
        let result = game.result().unwrap();
        let (a, b) = (result.scores()[PlayerId::new(0)], result.scores()[PlayerId::new(1)]);
        match result.winner() {
            Some(p) if p == PlayerId::new(0) => prop_assert!(a < b),
            Some(_) => prop_assert!(b < a),
            None => prop_assert_eq!(a, b),
        }
        let over = recorder
            .events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        prop_assert_eq!(over, 1);
    }
}
