// Integration tests (native) for the session state machine.
// These avoid wasm-specific functionality and exercise the pure orchestration
// logic so they run under `cargo test` on the host.

use micro_party::minigames::MinigameId;
use micro_party::rng::Lcg;
use micro_party::session::core::{CountdownEvent, MAX_LIVES, Phase, SessionCore};

fn countdown_to_play(core: &mut SessionCore) {
    loop {
        match core.countdown_step() {
            Some(CountdownEvent::Final) => break,
            Some(CountdownEvent::Tick(_)) => {}
            None => panic!("countdown stepped outside Transitioning"),
        }
    }
    assert_eq!(core.phase(), Phase::Playing);
}

#[test]
fn full_shift_walk_until_exhausted() {
    let mut core = SessionCore::new(&MinigameId::ALL);
    let mut rng = Lcg::new(2024);
    assert_eq!(core.phase(), Phase::Idle);
    core.start_run(|n| rng.roll(n)).expect("start from idle");

    let mut prev_score = 0;
    let mut wins = 0;
    let mut round = 0;
    loop {
        countdown_to_play(&mut core);
        // Alternate wins and losses; losses outnumber wins so the shift ends.
        let win = round % 3 == 0;
        round += 1;
        let end = core.end_round(win, 42.0).expect("round was active");
        if win {
            wins += 1;
            assert!(end.reward >= 42, "multiplier never shrinks the base");
            assert!(core.total_score() > prev_score);
        } else {
            assert_eq!(end.reward, 0);
            assert_eq!(core.total_score(), prev_score, "score survives failures");
        }
        prev_score = core.total_score();
        assert!(core.lives().value() <= MAX_LIVES);
        if end.exhausted {
            break;
        }
        core.next_round(|n| rng.roll(n)).expect("resolving -> next");
    }
    assert_eq!(core.phase(), Phase::Exhausted);
    assert_eq!(core.rounds_completed(), wins);
    assert!(core.lives().is_exhausted());
    // Frozen for display until explicit reset.
    assert_eq!(core.total_score(), prev_score);
    assert!(core.next_round(|_| 0).is_none());
}

#[test]
fn exhausted_requires_reset_before_a_new_shift() {
    let mut core = SessionCore::new(&MinigameId::ALL);
    core.start_run(|_| 0).unwrap();
    for _ in 0..MAX_LIVES {
        countdown_to_play(&mut core);
        let end = core.end_round(false, 0.0).unwrap();
        if !end.exhausted {
            core.next_round(|_| 0).unwrap();
        }
    }
    assert_eq!(core.phase(), Phase::Exhausted);
    assert!(core.start_run(|_| 0).is_none(), "no run from exhausted");
    core.reset();
    let mut rng = Lcg::new(5);
    core.start_run(|n| rng.roll(n)).expect("fresh shift after reset");
    assert_eq!(core.lives().value(), MAX_LIVES);
    assert_eq!(core.total_score(), 0);
}

#[test]
fn abandon_mid_countdown_leaves_no_pending_round() {
    let mut core = SessionCore::new(&MinigameId::ALL);
    core.start_run(|_| 0).unwrap();
    assert_eq!(core.countdown_step(), Some(CountdownEvent::Tick(2)));
    core.reset();
    assert_eq!(core.phase(), Phase::Idle);
    // A timer firing after cancellation is ignored, and there is no round to
    // resolve.
    assert_eq!(core.countdown_step(), None);
    assert!(core.end_round(true, 50.0).is_none());
}

#[test]
fn long_shift_never_plays_the_same_game_twice_in_a_row() {
    let mut core = SessionCore::new(&MinigameId::ALL);
    let mut rng = Lcg::new(77);
    let mut prev = core.start_run(|n| rng.roll(n)).unwrap();
    for _ in 0..100 {
        countdown_to_play(&mut core);
        core.end_round(true, 30.0).unwrap();
        let next = core.next_round(|n| rng.roll(n)).unwrap();
        assert_ne!(next, prev);
        prev = next;
    }
}
