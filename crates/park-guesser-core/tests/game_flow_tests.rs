//! Integration tests for complete Park Guesser game flows.
//!
//! These tests verify end-to-end scenarios including:
//! - Round selection over a realistic catalog
//! - Distractor pooling across both catalog lists
//! - Free-play and no-repeat session lifecycles
//! - Scoring and hint counting
//! - Save/load serialization mid-playthrough

use park_guesser_core::{
    entry::{Catalog, Entry, EntryId},
    round::{select_round, RoundError},
    session::{GameSession, NextRound},
    settings::{GameSettings, SessionMode},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

// =============================================================================
// Test Helpers
// =============================================================================

/// Create a catalog with six photographed parks and six decoys.
fn create_full_catalog() -> Catalog {
    Catalog::new(
        vec![
            Entry::answerable(1, "Arches National Park", "images/arches.jpg"),
            Entry::answerable(2, "Canyonlands National Park", "images/canyonlands.jpg"),
            Entry::answerable(3, "Denali National Park", "images/denali.jpg"),
            Entry::answerable(4, "Glacier National Park", "images/glacier.jpg"),
            Entry::answerable(5, "Rocky Mountain National Park", "images/rocky-mountain.jpg"),
            Entry::answerable(6, "Yosemite National Park", "images/yosemite.jpg"),
        ],
        vec![
            Entry::distractor(7, "Yellowstone National Park"),
            Entry::distractor(8, "Zion National Park"),
            Entry::distractor(9, "Grand Canyon National Park"),
            Entry::distractor(10, "Olympic National Park"),
            Entry::distractor(11, "Everglades National Park"),
            Entry::distractor(12, "Badlands National Park"),
        ],
    )
    .expect("Should build full catalog")
}

/// Create the smallest catalog that can still host a default round.
fn create_minimal_catalog() -> Catalog {
    Catalog::new(
        vec![Entry::answerable(1, "Arches National Park", "images/arches.jpg")],
        vec![
            Entry::distractor(2, "Zion National Park"),
            Entry::distractor(3, "Badlands National Park"),
            Entry::distractor(4, "Olympic National Park"),
        ],
    )
    .expect("Should build minimal catalog")
}

fn deal_question(session: &mut GameSession, rng: &mut StdRng) -> park_guesser_core::Round {
    match session.next_round(rng).expect("Should deal a round") {
        NextRound::Question(round) => round,
        NextRound::GameComplete => panic!("expected a question, got game complete"),
    }
}

// =============================================================================
// 1. Round Selection Tests
// =============================================================================

mod round_selection {
    use super::*;

    #[test]
    fn test_round_presents_four_options_with_correct_among_them() {
        let catalog = create_full_catalog();
        let settings = GameSettings::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let round = select_round(&catalog, &settings, &mut rng).unwrap();

            assert_eq!(round.options.len(), 4);
            assert!(round.contains(round.correct.id));

            let ids: HashSet<EntryId> = round.option_ids().into_iter().collect();
            assert_eq!(ids.len(), 4, "options must be pairwise distinct");
        }
    }

    #[test]
    fn test_correct_answer_always_has_a_photo() {
        let catalog = create_full_catalog();
        let settings = GameSettings::new();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..100 {
            let round = select_round(&catalog, &settings, &mut rng).unwrap();
            assert!(round.correct.has_image);
            assert!(round.correct.image_ref.is_some());
        }
    }

    #[test]
    fn test_wrong_answers_draw_from_both_lists() {
        let catalog = create_full_catalog();
        let settings = GameSettings::new();
        let mut rng = StdRng::seed_from_u64(2);

        let mut wrong_ids = HashSet::new();
        for _ in 0..200 {
            let round = select_round(&catalog, &settings, &mut rng).unwrap();
            for option in &round.options {
                if option.id != round.correct.id {
                    wrong_ids.insert(option.id);
                }
            }
        }

        // Decoys appear as wrong answers
        assert!(wrong_ids.iter().any(|id| *id >= 7));
        // So do photographed parks that were not the correct answer
        assert!(wrong_ids.iter().any(|id| *id <= 6));
    }

    #[test]
    fn test_minimal_catalog_still_fills_a_round() {
        let catalog = create_minimal_catalog();
        let settings = GameSettings::new();
        let mut rng = StdRng::seed_from_u64(3);

        let round = select_round(&catalog, &settings, &mut rng).unwrap();

        assert_eq!(round.correct.id, 1);
        let mut ids = round.option_ids();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_catalog_too_small_for_a_round() {
        // Three distinct entries: removing the correct one leaves only two
        // wrong-answer candidates, one short of the default three.
        let catalog = Catalog::new(
            vec![
                Entry::answerable(1, "Arches National Park", "images/arches.jpg"),
                Entry::answerable(2, "Denali National Park", "images/denali.jpg"),
            ],
            vec![Entry::distractor(3, "Zion National Park")],
        )
        .unwrap();
        let settings = GameSettings::new();
        let mut rng = StdRng::seed_from_u64(4);

        let result = select_round(&catalog, &settings, &mut rng);
        assert_eq!(
            result.unwrap_err(),
            RoundError::InsufficientCatalog {
                needed: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_no_answerable_entries() {
        let catalog = Catalog::new(
            vec![],
            vec![
                Entry::distractor(1, "Zion National Park"),
                Entry::distractor(2, "Badlands National Park"),
                Entry::distractor(3, "Olympic National Park"),
            ],
        )
        .unwrap();
        let settings = GameSettings::new();
        let mut rng = StdRng::seed_from_u64(5);

        let result = select_round(&catalog, &settings, &mut rng);
        assert_eq!(result.unwrap_err(), RoundError::EmptyCatalog);
    }

    #[test]
    fn test_answerable_only_catalog_fills_rounds_from_itself() {
        // No decoys at all: wrong answers come from the other photographed parks
        let catalog = Catalog::new(
            vec![
                Entry::answerable(1, "Arches National Park", "images/arches.jpg"),
                Entry::answerable(2, "Canyonlands National Park", "images/canyonlands.jpg"),
                Entry::answerable(3, "Denali National Park", "images/denali.jpg"),
                Entry::answerable(4, "Glacier National Park", "images/glacier.jpg"),
                Entry::answerable(5, "Yosemite National Park", "images/yosemite.jpg"),
            ],
            vec![],
        )
        .unwrap();
        let settings = GameSettings::new();
        let mut rng = StdRng::seed_from_u64(15);

        for _ in 0..50 {
            let round = select_round(&catalog, &settings, &mut rng).unwrap();

            assert_eq!(round.options.len(), 4);
            assert!(round.contains(round.correct.id));
            let ids: HashSet<EntryId> = round.option_ids().into_iter().collect();
            assert_eq!(ids.len(), 4);
            // Every option is a photographed park
            assert!(round.options.iter().all(|e| e.has_image));
        }
    }

    #[test]
    fn test_single_entry_catalog_cannot_fill_wrong_answers() {
        let catalog = Catalog::new(
            vec![Entry::answerable(1, "Arches National Park", "images/arches.jpg")],
            vec![],
        )
        .unwrap();
        let settings = GameSettings::new();
        let mut rng = StdRng::seed_from_u64(16);

        let result = select_round(&catalog, &settings, &mut rng);
        assert_eq!(
            result.unwrap_err(),
            RoundError::InsufficientCatalog {
                needed: 3,
                available: 0
            }
        );
    }
}

// =============================================================================
// 2. Free Play Session Tests
// =============================================================================

mod free_play {
    use super::*;

    #[test]
    fn test_repeats_are_possible() {
        // Four draws over three answerable entries must repeat one
        let catalog = Catalog::new(
            vec![
                Entry::answerable(1, "Arches National Park", "images/arches.jpg"),
                Entry::answerable(2, "Canyonlands National Park", "images/canyonlands.jpg"),
                Entry::answerable(3, "Denali National Park", "images/denali.jpg"),
            ],
            vec![
                Entry::distractor(4, "Zion National Park"),
                Entry::distractor(5, "Badlands National Park"),
                Entry::distractor(6, "Olympic National Park"),
            ],
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(6);
        let mut session = GameSession::new(catalog, GameSettings::new(), &mut rng).unwrap();

        let mut correct_ids = Vec::new();
        for _ in 0..4 {
            let round = deal_question(&mut session, &mut rng);
            correct_ids.push(round.correct.id);
            session.submit_guess(round.correct.id).unwrap();
        }

        let distinct: HashSet<EntryId> = correct_ids.iter().copied().collect();
        assert!(distinct.len() < correct_ids.len());
    }

    #[test]
    fn test_session_never_completes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session =
            GameSession::new(create_full_catalog(), GameSettings::new(), &mut rng).unwrap();

        for _ in 0..50 {
            let round = deal_question(&mut session, &mut rng);
            session.submit_guess(round.correct.id).unwrap();
        }

        assert!(!session.is_complete());
        assert_eq!(session.remaining(), None);
        assert_eq!(session.rounds_dealt(), 50);
    }
}

// =============================================================================
// 3. No-Repeat Playthrough Tests
// =============================================================================

mod no_repeat_playthrough {
    use super::*;

    #[test]
    fn test_full_playthrough_visits_each_park_exactly_once() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut session =
            GameSession::new(create_full_catalog(), GameSettings::no_repeat(), &mut rng)
                .unwrap();
        assert_eq!(session.remaining(), Some(6));

        let mut seen = Vec::new();
        loop {
            match session.next_round(&mut rng).unwrap() {
                NextRound::Question(round) => {
                    seen.push(round.correct.id);
                    session.submit_guess(round.correct.id).unwrap();
                }
                NextRound::GameComplete => break,
            }
        }

        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
        assert!(session.is_complete());
        assert_eq!(session.score().correct, 6);
    }

    #[test]
    fn test_playthrough_order_is_shuffled() {
        // Orders across several seeds should not all coincide
        let mut orders = HashSet::new();
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session =
                GameSession::new(create_full_catalog(), GameSettings::no_repeat(), &mut rng)
                    .unwrap();

            let mut order = Vec::new();
            loop {
                match session.next_round(&mut rng).unwrap() {
                    NextRound::Question(round) => {
                        order.push(round.correct.id);
                        session.submit_guess(round.correct.id).unwrap();
                    }
                    NextRound::GameComplete => break,
                }
            }
            orders.insert(order);
        }

        assert!(orders.len() > 1);
    }

    #[test]
    fn test_same_seed_reproduces_playthrough() {
        let run = |seed: u64| -> Vec<EntryId> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session =
                GameSession::new(create_full_catalog(), GameSettings::no_repeat(), &mut rng)
                    .unwrap();

            let mut order = Vec::new();
            loop {
                match session.next_round(&mut rng).unwrap() {
                    NextRound::Question(round) => {
                        order.push(round.correct.id);
                        session.submit_guess(round.correct.id).unwrap();
                    }
                    NextRound::GameComplete => break,
                }
            }
            order
        };

        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_game_complete_signal_repeats_after_exhaustion() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session =
            GameSession::new(create_full_catalog(), GameSettings::no_repeat(), &mut rng)
                .unwrap();

        loop {
            match session.next_round(&mut rng).unwrap() {
                NextRound::Question(round) => {
                    session.submit_guess(round.correct.id).unwrap();
                }
                NextRound::GameComplete => break,
            }
        }

        // Asking again keeps signaling completion rather than erroring
        for _ in 0..3 {
            assert_eq!(
                session.next_round(&mut rng).unwrap(),
                NextRound::GameComplete
            );
        }
    }

    #[test]
    fn test_skipping_rounds_still_drains_the_queue() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut session =
            GameSession::new(create_full_catalog(), GameSettings::no_repeat(), &mut rng)
                .unwrap();

        // Skip every question without answering
        let mut dealt = 0;
        loop {
            match session.next_round(&mut rng).unwrap() {
                NextRound::Question(_) => dealt += 1,
                NextRound::GameComplete => break,
            }
        }

        assert_eq!(dealt, 6);
        assert_eq!(session.score().answered(), 0);
        assert!(session.is_complete());
    }
}

// =============================================================================
// 4. Scoring Tests
// =============================================================================

mod scoring {
    use super::*;

    #[test]
    fn test_mixed_results_accumulate() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut session =
            GameSession::new(create_full_catalog(), GameSettings::new(), &mut rng).unwrap();

        // Two right, one wrong, one hint
        let round = deal_question(&mut session, &mut rng);
        session.submit_guess(round.correct.id).unwrap();

        let round = deal_question(&mut session, &mut rng);
        session.record_hint().unwrap();
        session.submit_guess(round.correct.id).unwrap();

        let round = deal_question(&mut session, &mut rng);
        let wrong = round
            .options
            .iter()
            .find(|e| e.id != round.correct.id)
            .unwrap()
            .id;
        let outcome = session.submit_guess(wrong).unwrap();

        assert_eq!(outcome.score.correct, 2);
        assert_eq!(outcome.score.incorrect, 1);
        assert_eq!(outcome.score.hints_used, 1);
        assert!((session.score().accuracy() - 66.66).abs() < 0.01);
    }

    #[test]
    fn test_wrong_guess_reveals_correct_entry() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut session =
            GameSession::new(create_full_catalog(), GameSettings::new(), &mut rng).unwrap();

        let round = deal_question(&mut session, &mut rng);
        let wrong = round
            .options
            .iter()
            .find(|e| e.id != round.correct.id)
            .unwrap()
            .id;
        let outcome = session.submit_guess(wrong).unwrap();

        assert!(!outcome.was_correct);
        assert_eq!(outcome.correct.id, round.correct.id);
        assert_eq!(outcome.correct.name, round.correct.name);
    }
}

// =============================================================================
// 5. Save/Load Tests
// =============================================================================

mod save_load {
    use super::*;

    #[test]
    fn test_resumed_playthrough_finishes_without_repeats() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut session =
            GameSession::new(create_full_catalog(), GameSettings::no_repeat(), &mut rng)
                .unwrap();

        let mut seen = Vec::new();
        for _ in 0..3 {
            let round = deal_question(&mut session, &mut rng);
            seen.push(round.correct.id);
            session.submit_guess(round.correct.id).unwrap();
        }

        // Suspend, then resume under a different generator
        let saved = serde_json::to_string(&session).expect("Should serialize session");
        let mut resumed: GameSession =
            serde_json::from_str(&saved).expect("Should deserialize session");
        let mut rng2 = StdRng::seed_from_u64(99);

        loop {
            match resumed.next_round(&mut rng2).unwrap() {
                NextRound::Question(round) => {
                    seen.push(round.correct.id);
                    resumed.submit_guess(round.correct.id).unwrap();
                }
                NextRound::GameComplete => break,
            }
        }

        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(resumed.score().correct, 6);
        assert!(resumed.is_complete());
    }

    #[test]
    fn test_saved_session_preserves_mode_and_score() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut session =
            GameSession::new(create_full_catalog(), GameSettings::no_repeat(), &mut rng)
                .unwrap();

        let round = deal_question(&mut session, &mut rng);
        session.record_hint().unwrap();
        session.submit_guess(round.correct.id).unwrap();

        let saved = serde_json::to_string(&session).unwrap();
        let resumed: GameSession = serde_json::from_str(&saved).unwrap();

        assert_eq!(resumed.settings().mode, SessionMode::NoRepeat);
        assert_eq!(resumed.score(), session.score());
        assert_eq!(resumed.remaining(), Some(5));
        assert_eq!(resumed.rounds_dealt(), 1);
    }
}
