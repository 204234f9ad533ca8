// Host-side tests for the playback state machine.
// Only `core` is built off-wasm, so these drive the controller directly and
// inspect the effects it asks the browser side to run.

use pulse_sphere::core::{
    Effect, Effects, NotificationEvent, NotificationStatus, Phase, PlaybackController, Playlist,
};

fn controller() -> PlaybackController {
    PlaybackController::new(Playlist::bundled("/music"))
}

fn load_of(effects: &Effects) -> Option<(usize, String, u64)> {
    effects.iter().find_map(|e| match e {
        Effect::Load {
            index,
            path,
            generation,
        } => Some((*index, path.clone(), *generation)),
        _ => None,
    })
}

fn notifications(effects: &Effects) -> Vec<NotificationEvent> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Notify(ev) => Some(ev.clone()),
            _ => None,
        })
        .collect()
}

/// Mount and complete the first load, leaving the controller `Ready`.
fn mounted_ready() -> PlaybackController {
    let mut c = controller();
    let fx = c.mount();
    let (_, _, gen) = load_of(&fx).expect("mount loads the first track");
    c.load_succeeded(gen);
    assert_eq!(c.phase(), Phase::Ready);
    c
}

/// Start playing the bound track and return the live generation.
fn playing() -> (PlaybackController, u64) {
    let mut c = mounted_ready();
    c.play_pause();
    assert_eq!(c.phase(), Phase::Playing);
    let gen = c.state().load_generation;
    (c, gen)
}

#[test]
fn mount_loads_first_track_without_playing() {
    let mut c = controller();
    let fx = c.mount();
    assert_eq!(c.state().current_index, 0);
    assert!(!c.state().is_playing);
    assert_eq!(c.phase(), Phase::Loading);
    assert_eq!(
        fx.as_slice(),
        &[
            Effect::Notify(NotificationEvent::loading("/music/Air.wav")),
            Effect::StopSound,
            Effect::Load {
                index: 0,
                path: "/music/Air.wav".to_string(),
                generation: 1,
            },
        ]
    );
}

#[test]
fn initial_load_binds_but_stays_paused() {
    let mut c = controller();
    let fx = c.mount();
    let (_, _, gen) = load_of(&fx).unwrap();
    let fx = c.load_succeeded(gen);
    assert_eq!(fx.as_slice(), &[Effect::Bind { generation: gen }]);
    assert_eq!(c.phase(), Phase::Ready);
    assert_eq!(c.bound_track().map(|t| t.path.as_str()), Some("/music/Air.wav"));
}

#[test]
fn next_five_times_visits_every_track_and_wraps() {
    let mut c = mounted_ready();
    let mut seen = Vec::new();
    for _ in 0..5 {
        let fx = c.next();
        let (index, _, gen) = load_of(&fx).unwrap();
        seen.push(index);
        c.load_succeeded(gen);
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 0]);
    assert_eq!(c.state().current_index, 0);
}

#[test]
fn prev_from_first_wraps_to_last() {
    let mut c = mounted_ready();
    let fx = c.prev();
    let (index, path, _) = load_of(&fx).unwrap();
    assert_eq!(index, 4);
    assert_eq!(path, "/music/Water.wav");
}

#[test]
fn next_then_prev_returns_to_same_track() {
    for start in 0..5 {
        let mut c = mounted_ready();
        for _ in 0..start {
            c.next();
        }
        let before = c.state().current_index;
        c.next();
        c.prev();
        assert_eq!(c.state().current_index, before);
    }
}

#[test]
fn skipping_announces_loading_then_now_playing() {
    let mut c = mounted_ready();
    let fx = c.next();
    assert!(c.state().is_playing);
    assert_eq!(
        notifications(&fx),
        vec![NotificationEvent::loading("/music/Glitch.wav")]
    );
    assert_eq!(fx[1], Effect::StopSound);

    let (_, _, gen) = load_of(&fx).unwrap();
    let fx = c.load_succeeded(gen);
    assert_eq!(
        fx.as_slice(),
        &[
            Effect::Bind { generation: gen },
            Effect::StartPlayback { generation: gen },
            Effect::Notify(NotificationEvent::now_playing("/music/Glitch.wav")),
        ]
    );
    assert_eq!(c.phase(), Phase::Playing);
}

#[test]
fn stale_load_completion_is_ignored() {
    let mut c = mounted_ready();
    let first = load_of(&c.next()).unwrap().2;
    let second = load_of(&c.next()).unwrap().2;
    assert!(second > first);

    // The slower, superseded load lands first.
    let before = c.state();
    assert!(c.load_succeeded(first).is_empty());
    assert!(c.load_failed(first).is_empty());
    assert_eq!(c.state(), before);
    assert_eq!(c.phase(), Phase::Loading);

    let fx = c.load_succeeded(second);
    assert!(fx.contains(&Effect::Bind { generation: second }));
    assert_eq!(c.bound_track().map(|t| t.path.as_str()), Some("/music/House_Final.wav"));
}

#[test]
fn failed_load_moves_on_to_following_track() {
    let mut c = mounted_ready();
    let fx = c.next();
    let (index, _, gen) = load_of(&fx).unwrap();
    assert_eq!(index, 1);

    let fx = c.load_failed(gen);
    let (index, path, retry_gen) = load_of(&fx).unwrap();
    assert_eq!(index, 2);
    assert_eq!(path, "/music/House_Final.wav");
    assert!(retry_gen > gen);
    assert_eq!(
        notifications(&fx),
        vec![NotificationEvent::loading("/music/House_Final.wav")]
    );

    let fx = c.load_succeeded(retry_gen);
    assert!(fx.contains(&Effect::StartPlayback { generation: retry_gen }));
}

#[test]
fn pause_is_silent_and_resume_announces() {
    let mut c = mounted_ready();
    let fx = c.play_pause();
    assert_eq!(
        notifications(&fx),
        vec![NotificationEvent::now_playing("/music/Air.wav")]
    );

    let fx = c.play_pause();
    assert_eq!(fx.as_slice(), &[Effect::Pause]);
    assert_eq!(c.phase(), Phase::Ready);
    assert!(!c.state().is_playing);

    let fx = c.play_pause();
    let gen = c.state().load_generation;
    assert_eq!(
        fx.as_slice(),
        &[
            Effect::StartPlayback { generation: gen },
            Effect::Notify(NotificationEvent::now_playing("/music/Air.wav")),
        ]
    );
}

#[test]
fn pause_resume_does_not_reload() {
    let (mut c, gen) = playing();
    c.play_pause();
    c.play_pause();
    assert_eq!(c.state().load_generation, gen);
}

#[test]
fn toggling_while_loading_only_changes_intent() {
    let mut c = controller();
    let fx = c.mount();
    let (_, _, gen) = load_of(&fx).unwrap();

    assert!(c.play_pause().is_empty());
    assert!(c.state().is_playing);
    let fx = c.load_succeeded(gen);
    assert!(fx.contains(&Effect::StartPlayback { generation: gen }));

    let fx = c.next();
    let (_, _, gen) = load_of(&fx).unwrap();
    assert!(c.play_pause().is_empty());
    assert!(!c.state().is_playing);
    let fx = c.load_succeeded(gen);
    assert_eq!(fx.as_slice(), &[Effect::Bind { generation: gen }]);
    assert_eq!(c.phase(), Phase::Ready);
}

#[test]
fn track_end_advances_by_one_without_notification() {
    let (mut c, gen) = playing();
    let fx = c.track_ended(gen);
    let (index, _, next_gen) = load_of(&fx).unwrap();
    assert_eq!(index, 1);
    assert!(notifications(&fx).is_empty());
    assert!(c.state().is_playing);

    let fx = c.load_succeeded(next_gen);
    assert!(fx.contains(&Effect::StartPlayback { generation: next_gen }));
}

#[test]
fn track_end_from_old_generation_is_ignored() {
    let (mut c, gen) = playing();
    c.next();
    assert!(c.track_ended(gen).is_empty());
    assert_eq!(c.state().current_index, 1);
}

#[test]
fn track_end_while_paused_is_ignored() {
    let (mut c, gen) = playing();
    c.play_pause();
    assert!(c.track_ended(gen).is_empty());
    assert_eq!(c.state().current_index, 0);
}

#[test]
fn every_track_failing_stops_after_one_cycle() {
    let mut c = controller();
    let mut fx = c.mount();
    let mut attempts = 0;
    loop {
        let Some((_, _, gen)) = load_of(&fx) else {
            break;
        };
        attempts += 1;
        fx = c.load_failed(gen);
    }
    assert_eq!(attempts, 5);
    assert_eq!(fx.as_slice(), &[Effect::Exhausted]);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(!c.state().is_playing);
    assert!(c.bound_track().is_none());
}

#[test]
fn play_after_exhaustion_retries() {
    let mut c = controller().with_retry_limit(2);
    let gen = load_of(&c.mount()).unwrap().2;
    let gen = load_of(&c.load_failed(gen)).unwrap().2;
    assert_eq!(c.load_failed(gen).as_slice(), &[Effect::Exhausted]);

    let fx = c.play_pause();
    let (index, _, gen) = load_of(&fx).unwrap();
    assert_eq!(index, c.state().current_index);
    assert_eq!(notifications(&fx)[0].status, NotificationStatus::Loading);
    assert!(c.state().is_playing);
    assert!(c.load_succeeded(gen).contains(&Effect::StartPlayback { generation: gen }));
}

#[test]
fn success_resets_failure_count() {
    let mut c = controller().with_retry_limit(2);
    let gen = load_of(&c.mount()).unwrap().2;
    let gen = load_of(&c.load_failed(gen)).unwrap().2;
    c.load_succeeded(gen);

    let gen = load_of(&c.next()).unwrap().2;
    // One failure after a success is not exhaustion.
    let fx = c.load_failed(gen);
    assert!(load_of(&fx).is_some());
}

#[test]
fn generations_strictly_increase() {
    let mut c = mounted_ready();
    let mut last = c.state().load_generation;
    for fx in [c.next(), c.prev(), c.next()] {
        let gen = load_of(&fx).unwrap().2;
        assert!(gen > last);
        last = gen;
    }
}
