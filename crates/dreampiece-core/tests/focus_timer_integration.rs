//! Integration tests for the focus timer.
//!
//! Drives `FocusTimer` through full countdowns on a virtual clock and
//! persists session totals the way a real caller does.

use std::time::Duration;

use dreampiece_core::timer::{
    load_sessions, persist_events, FocusMode, FocusTimer, ManualScheduler, Phase,
    RecordingFeedback, Scheduler, TimerStatus, POMODORO_BREAK_SECS, POMODORO_WORK_SECS,
};
use dreampiece_core::{Database, Event};
use proptest::prelude::*;

type Timer = FocusTimer<ManualScheduler, RecordingFeedback>;

fn open_timer(db: &Database) -> Timer {
    let sessions = load_sessions(db).unwrap();
    FocusTimer::new(ManualScheduler::new(), RecordingFeedback::new(), sessions)
}

/// Advance the virtual clock one second at a time, persisting as we go.
fn run_for(timer: &mut Timer, db: &Database, secs: u64) -> Vec<Event> {
    let mut all = Vec::new();
    for _ in 0..secs {
        timer.scheduler_mut().advance(Duration::from_secs(1));
        let events = timer.pump();
        persist_events(db, &events).unwrap();
        all.extend(events);
    }
    all
}

#[test]
fn test_every_mode_resets_to_table_duration() {
    let db = Database::open_memory().unwrap();
    let mut timer = open_timer(&db);
    timer.start();
    run_for(&mut timer, &db, 5);

    for mode in FocusMode::ALL {
        timer.select_mode(mode);
        assert_eq!(timer.state().remaining_secs, mode.duration_secs());
        assert!(!timer.state().running());
        assert_eq!(timer.scheduler().active_count(), 0);
    }
}

#[test]
fn test_sessions_survive_reopen() {
    let db = Database::open_memory().unwrap();
    {
        let mut timer = open_timer(&db);
        timer.set_manual_duration(1);
        timer.start();
        run_for(&mut timer, &db, 60);
        assert_eq!(timer.state().status, TimerStatus::Completed);
    }
    assert_eq!(load_sessions(&db).unwrap(), 1);

    let mut timer = open_timer(&db);
    assert_eq!(timer.sessions(), 1);
    timer.set_manual_duration(1);
    timer.start();
    run_for(&mut timer, &db, 60);
    assert_eq!(load_sessions(&db).unwrap(), 2);
    assert_eq!(
        timer.feedback().messages().last().copied(),
        Some("🔥 You’ve completed 2 focus sessions!")
    );
}

#[test]
fn test_two_pomodoro_cycles() {
    let db = Database::open_memory().unwrap();
    let mut timer = open_timer(&db);
    timer.select_mode(FocusMode::Pomodoro);
    timer.start();

    let cycle = (POMODORO_WORK_SECS + 2 + POMODORO_BREAK_SECS + 2) as u64;
    let events = run_for(&mut timer, &db, cycle * 2);

    let breaks = events
        .iter()
        .filter(|e| matches!(e, Event::BreakStarted { .. }))
        .count();
    assert_eq!(breaks, 2);
    assert_eq!(load_sessions(&db).unwrap(), 2);
    assert_eq!(timer.state().phase, Phase::Working);
    assert!(timer.state().running());
    assert!(timer.feedback().alerts.is_empty());
}

#[test]
fn test_zen_ambient_stops_on_reset() {
    let db = Database::open_memory().unwrap();
    let mut timer = open_timer(&db);
    timer.select_mode(FocusMode::Zen);
    timer.start();
    run_for(&mut timer, &db, 3);
    assert!(timer.feedback().ambient_playing());

    timer.reset();
    assert!(!timer.feedback().ambient_playing());
    assert_eq!(timer.display(), "60:00");
}

#[test]
fn test_start_is_idempotent_under_repeated_calls() {
    let db = Database::open_memory().unwrap();
    let mut timer = open_timer(&db);
    for _ in 0..5 {
        timer.start();
        timer.resume();
    }
    assert_eq!(timer.scheduler().active_count(), 1);
    run_for(&mut timer, &db, 10);
    assert_eq!(timer.state().remaining_secs, 3600 - 10);
}

proptest! {
    #[test]
    fn pause_resume_loses_no_time(before in 0u64..300, paused in 0u64..600, after in 0u64..300) {
        let db = Database::open_memory().unwrap();
        let mut timer = open_timer(&db);
        timer.select_mode(FocusMode::Flow);
        timer.start();
        run_for(&mut timer, &db, before);
        timer.pause();
        run_for(&mut timer, &db, paused);
        timer.resume();
        run_for(&mut timer, &db, after);
        prop_assert_eq!(
            timer.state().remaining_secs as u64,
            FocusMode::Flow.duration_secs() as u64 - before - after
        );
    }
}
