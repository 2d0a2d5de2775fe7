use northstar_game::{
    ConfigError, GameConfig, GameMode, InputError, PuzzleSession, QuestionBank, UiDirective,
};
use std::collections::HashSet;

fn new_session(mode: GameMode, seed: u64) -> PuzzleSession {
    PuzzleSession::new(GameConfig::default(), mode, seed, QuestionBank::builtin()).unwrap()
}

fn correct_option(session: &PuzzleSession, slot_index: usize) -> usize {
    let question_index = session
        .placement()
        .slot(slot_index)
        .unwrap()
        .question_index;
    session.bank().get(question_index).unwrap().correct_index
}

fn answer(session: &mut PuzzleSession, slot_index: usize, correctly: bool) -> UiDirective {
    let location = session
        .placement()
        .location_of(slot_index)
        .unwrap()
        .to_string();
    let right = correct_option(session, slot_index);
    let option = if correctly { right } else { (right + 1) % 4 };
    session.submit_answer(slot_index, option, &location).unwrap()
}

fn solve_all(session: &mut PuzzleSession) {
    for slot_index in 0..session.placement().slot_count() {
        answer(session, slot_index, true);
    }
}

fn punch_code(session: &mut PuzzleSession, code: [u8; 4]) -> UiDirective {
    for digit in code {
        session.keypad_press(digit).unwrap();
    }
    session.keypad_submit().unwrap()
}

fn assert_placement_invariants(session: &PuzzleSession) {
    let placement = session.placement();
    let mut locations = HashSet::new();
    let mut questions = HashSet::new();
    for slot_index in 0..placement.slot_count() {
        let location = placement.location_of(slot_index).unwrap();
        assert_eq!(placement.slot_at(location), Some(slot_index));
        assert!(locations.insert(location.to_string()));
        let slot = placement.slot(slot_index).unwrap();
        assert!(questions.insert(slot.question_index));
        assert!(slot.question_index < session.bank().len());
    }
}

#[test]
fn fresh_classic_session_places_four_distinct_clues() {
    let session = new_session(GameMode::Classic, 0xA11CE);
    assert_eq!(session.config().locations.len(), 28);
    assert_eq!(session.placement().slot_count(), 4);
    assert_eq!(session.placement().solved_count(), 0);
    assert!(!session.exit_unlockable());
    assert_placement_invariants(&session);

    let digits: Vec<u8> = (0..4)
        .map(|i| session.placement().slot(i).unwrap().digit)
        .collect();
    assert_eq!(digits, vec![1, 8, 5, 8]);
}

#[test]
fn same_seed_reproduces_the_same_room_different_seed_does_not() {
    let a = new_session(GameMode::Classic, 7);
    let b = new_session(GameMode::Classic, 7);
    let c = new_session(GameMode::Classic, 8);
    let layout = |s: &PuzzleSession| -> Vec<String> {
        (0..4)
            .map(|i| s.placement().location_of(i).unwrap().to_string())
            .collect()
    };
    assert_eq!(layout(&a), layout(&b));
    assert_ne!(layout(&a), layout(&c));
}

#[test]
fn relocation_never_lands_on_the_vacated_location() {
    // Churn the placement hard and re-check every invariant after each miss.
    for seed in 0..8u64 {
        let mut session = new_session(GameMode::Classic, seed);
        for round in 0..40 {
            let slot_index = round % 4;
            let before = session
                .placement()
                .location_of(slot_index)
                .unwrap()
                .to_string();
            let directive = answer(&mut session, slot_index, false);
            let UiDirective::AnswerFeedback {
                correct: false,
                relocated,
                ..
            } = directive
            else {
                panic!("expected wrong-answer feedback");
            };
            if relocated {
                assert_ne!(session.placement().location_of(slot_index).unwrap(), before);
                assert_eq!(session.placement().slot_at(&before), None);
            }
            assert_placement_invariants(&session);
        }
        assert_eq!(session.placement().solved_count(), 0);
    }
}

#[test]
fn solved_clues_survive_other_slots_relocating() {
    let mut session = new_session(GameMode::Classic, 0xF00D);
    answer(&mut session, 0, true);
    answer(&mut session, 1, true);
    let kept: Vec<String> = (0..2)
        .map(|i| session.placement().location_of(i).unwrap().to_string())
        .collect();
    for _ in 0..10 {
        answer(&mut session, 3, false);
        assert_placement_invariants(&session);
    }
    for (slot_index, location) in kept.iter().enumerate() {
        assert_eq!(session.placement().location_of(slot_index).unwrap(), location);
        assert!(session.placement().slot(slot_index).unwrap().solved);
    }
    assert_eq!(session.placement().collected_digits(), vec![1, 8]);
}

#[test]
fn classic_full_run_safe_key_then_door() {
    let mut session = new_session(GameMode::Classic, 0xCAFE);
    solve_all(&mut session);
    assert_eq!(session.placement().collected_digits(), vec![1, 5, 8, 8]);

    let directive = session.on_interact("safe").unwrap();
    assert!(matches!(directive, UiDirective::Keypad { enabled: true, .. }));
    let directive = punch_code(&mut session, [1, 8, 5, 8]);
    assert!(matches!(directive, UiDirective::Flavor { .. }));
    assert!(session.flags().has_skeleton_key);
    session.close_modal();

    let directive = session.on_interact("door").unwrap();
    assert_eq!(directive, UiDirective::Victory { countdown_secs: 600 });
    // Victory is terminal: further interaction is refused.
    session.close_modal();
    assert!(session.on_interact("mug").is_none());
}

#[test]
fn keypad_attempts_decrease_monotonically_until_lockout() {
    let mut session = new_session(GameMode::Classic, 0xD00F);
    solve_all(&mut session);

    let mut seen = Vec::new();
    for _ in 0..2 {
        let directive = punch_code(&mut session, [0, 0, 0, 0]);
        let UiDirective::Keypad {
            attempts_remaining, ..
        } = directive
        else {
            panic!("expected keypad after rejection");
        };
        seen.push(attempts_remaining);
    }
    assert_eq!(seen, vec![2, 1]);

    let directive = punch_code(&mut session, [0, 0, 0, 0]);
    assert!(matches!(directive, UiDirective::Reset { .. }));
    assert_eq!(session.placement().solved_count(), 0);
    assert!(!session.flags().has_skeleton_key);
    assert_placement_invariants(&session);
}

#[test]
fn trail_mode_enforces_order_and_opens_the_exit() {
    let mut session = new_session(GameMode::Trail, 0x7AA1);

    let ahead = session.placement().location_of(3).unwrap().to_string();
    let directive = session.on_interact(&ahead).unwrap();
    assert!(matches!(directive, UiDirective::LockedMessage { .. }));
    session.close_modal();

    for step in 0..4 {
        let location = session.placement().location_of(step).unwrap().to_string();
        let directive = session.on_interact(&location).unwrap();
        assert!(matches!(directive, UiDirective::Question { .. }));
        session.close_modal();
        answer(&mut session, step, true);
        assert_eq!(session.flags().trail_step, step + 1);
    }
    assert!(session.exit_unlockable());
    let directive = session.on_interact("door").unwrap();
    assert!(matches!(directive, UiDirective::Victory { .. }));
}

#[test]
fn hidden_key_mode_hunts_without_relocation() {
    let mut session = new_session(GameMode::HiddenKey, 0x5EED);
    let winning = session.flags().winning_object.clone().unwrap();
    assert!(session.placement().slot_at(&winning).is_some());

    // Misses never move clues in this mode.
    let frozen: Vec<String> = (0..4)
        .map(|i| session.placement().location_of(i).unwrap().to_string())
        .collect();
    for slot_index in 0..4 {
        answer(&mut session, slot_index, false);
    }
    let still: Vec<String> = (0..4)
        .map(|i| session.placement().location_of(i).unwrap().to_string())
        .collect();
    assert_eq!(frozen, still);

    let winning_slot = session.placement().slot_at(&winning).unwrap();
    answer(&mut session, winning_slot, true);
    assert!(session.flags().has_skeleton_key);
    assert!(session.inventory().has("skeleton_key"));
    let directive = session.on_interact("door").unwrap();
    assert!(matches!(directive, UiDirective::Victory { .. }));
}

#[test]
fn access_cards_mode_needs_every_card() {
    let mut session = new_session(GameMode::AccessCards, 0xACCE);
    for slot_index in 0..4 {
        assert!(!session.exit_unlockable());
        answer(&mut session, slot_index, true);
    }
    assert!(session.exit_unlockable());
    let directive = session.on_interact("door").unwrap();
    assert!(matches!(directive, UiDirective::Victory { .. }));
}

#[test]
fn code_door_mode_moves_the_keypad_to_the_door() {
    let mut session = new_session(GameMode::CodeDoor, 0xD002);
    let directive = session.on_interact("safe").unwrap();
    let UiDirective::Flavor { body, .. } = directive else {
        panic!("expected disabled-safe flavor");
    };
    assert!(body.contains("door"));
    session.close_modal();

    solve_all(&mut session);
    let directive = session.on_interact("door").unwrap();
    assert!(matches!(directive, UiDirective::Keypad { enabled: true, .. }));
    let directive = punch_code(&mut session, [1, 8, 5, 8]);
    assert_eq!(directive, UiDirective::Victory { countdown_secs: 600 });
}

#[test]
fn computer_terminal_narrows_as_clues_are_solved() {
    let mut session = new_session(GameMode::Classic, 0xC0C0);
    let first = session.submit_password("gopher");
    let UiDirective::Flavor { body: before, .. } = first else {
        panic!("expected terminal hint");
    };
    answer(&mut session, 0, true);
    answer(&mut session, 1, true);
    let UiDirective::Flavor { body: after, .. } = session.submit_password("gopher") else {
        panic!("expected terminal hint");
    };
    assert!(before.len() > after.len());
}

#[test]
fn lockout_reset_rerolls_the_hidden_key_target_eventually() {
    // A reset draws a fresh winning object; across several seeds at least one
    // draw must land somewhere new.
    let mut changed = false;
    for seed in 0..16u64 {
        let mut session = new_session(GameMode::HiddenKey, seed);
        let before = session.flags().winning_object.clone().unwrap();
        session.reset();
        let after = session.flags().winning_object.clone().unwrap();
        assert!(session.placement().slot_at(&after).is_some());
        if before != after {
            changed = true;
        }
    }
    assert!(changed);
}

#[test]
fn configuration_errors_surface_before_any_play() {
    let cfg = GameConfig {
        unlock_code: "12AB".to_string(),
        ..GameConfig::default()
    };
    let err =
        PuzzleSession::new(cfg, GameMode::Classic, 1, QuestionBank::builtin()).unwrap_err();
    assert!(matches!(err, ConfigError::BadUnlockCode { .. }));

    let mut cfg = GameConfig::default();
    cfg.locations.push("mug".to_string());
    let err =
        PuzzleSession::new(cfg, GameMode::Classic, 1, QuestionBank::builtin()).unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateLocation {
            name: "mug".to_string()
        }
    );
}

#[test]
fn mediator_rejects_stale_location_claims() {
    let mut session = new_session(GameMode::Classic, 0x57A1);
    let before = session.placement().location_of(0).unwrap().to_string();
    answer(&mut session, 0, false);
    if session.placement().slot_at(&before).is_none() {
        // The renderer still shows the old modal; a submit against the stale
        // location must bounce without consuming anything.
        let err = session.submit_answer(0, 0, &before).unwrap_err();
        assert!(matches!(err, InputError::LocationMismatch { .. }));
    }
}
