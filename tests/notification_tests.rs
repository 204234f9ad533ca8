// Host-side tests for the song notification timing.

use pulse_sphere::core::constants::{NOTIFICATION_DISMISS_MS, NOTIFICATION_EXIT_MS};
use pulse_sphere::core::{NotificationEvent, NotificationState, NotificationStatus, TimerKind};

fn state() -> NotificationState {
    NotificationState::new(NOTIFICATION_DISMISS_MS, NOTIFICATION_EXIT_MS)
}

#[test]
fn starts_hidden() {
    let s = state();
    assert!(!s.visible());
    assert!(!s.entered());
    assert_eq!(s.track_label(), "");
}

#[test]
fn loading_stays_until_replaced() {
    let mut s = state();
    let timer = s.show(&NotificationEvent::loading("/music/House_Final.wav"));
    assert!(timer.is_none());
    assert!(s.entered());
    assert_eq!(s.status(), NotificationStatus::Loading);
    assert_eq!(s.status().heading(), "LOADING...");
    assert_eq!(s.track_label(), "House Final");
    assert_eq!(s.pending_track_path(), "/music/House_Final.wav");
}

#[test]
fn now_playing_dismisses_after_timeout_then_exits() {
    let mut s = state();
    let dismiss = s
        .show(&NotificationEvent::now_playing("/music/Space.wav"))
        .expect("now playing schedules a dismiss");
    assert_eq!(dismiss.kind, TimerKind::Dismiss);
    assert_eq!(dismiss.delay_ms, 3000);
    assert_eq!(s.status().heading(), "NOW PLAYING");

    let exit = s.timer_fired(dismiss).expect("dismiss starts the exit");
    assert_eq!(exit.kind, TimerKind::ExitDone);
    assert_eq!(exit.delay_ms, 300);
    assert!(s.visible());
    assert!(!s.entered());

    assert!(s.timer_fired(exit).is_none());
    assert!(!s.visible());
}

#[test]
fn newer_notification_replaces_and_voids_old_timers() {
    let mut s = state();
    let old = s.show(&NotificationEvent::now_playing("/music/Air.wav")).unwrap();
    s.show(&NotificationEvent::loading("/music/Glitch.wav"));
    assert!(s.epoch() > old.epoch);

    assert!(s.timer_fired(old).is_none());
    assert!(s.entered());
    assert_eq!(s.track_label(), "Glitch");
    assert_eq!(s.status(), NotificationStatus::Loading);
}

#[test]
fn stale_exit_timer_does_not_hide_new_notification() {
    let mut s = state();
    let dismiss = s.show(&NotificationEvent::now_playing("/music/Air.wav")).unwrap();
    let exit = s.timer_fired(dismiss).unwrap();
    s.show(&NotificationEvent::now_playing("/music/Water.wav"));
    assert!(s.timer_fired(exit).is_none());
    assert!(s.entered());
    assert_eq!(s.track_label(), "Water");
}

#[test]
fn close_runs_exit_transition() {
    let mut s = state();
    s.show(&NotificationEvent::loading("/music/Air.wav"));
    let exit = s.close().expect("close while shown");
    assert_eq!(exit.kind, TimerKind::ExitDone);
    assert!(!s.entered());
    // A second click during the transition is a no-op.
    assert!(s.close().is_none());
    s.timer_fired(exit);
    assert!(!s.visible());
}

#[test]
fn close_when_hidden_does_nothing() {
    let mut s = state();
    assert!(s.close().is_none());
    assert!(!s.visible());
}

#[test]
fn clear_hides_and_invalidates() {
    let mut s = state();
    let dismiss = s.show(&NotificationEvent::now_playing("/music/Air.wav")).unwrap();
    s.clear();
    assert!(!s.visible());
    assert!(s.timer_fired(dismiss).is_none());
    assert!(!s.visible());
}

#[test]
fn custom_timings_are_honoured() {
    let mut s = NotificationState::new(1200, 50);
    let dismiss = s.show(&NotificationEvent::now_playing("/a/b.wav")).unwrap();
    assert_eq!(dismiss.delay_ms, 1200);
    assert_eq!(s.timer_fired(dismiss).unwrap().delay_ms, 50);
}
