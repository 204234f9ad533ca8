use crate::core::notification::NotificationEvent;
use crate::core::playlist::{Playlist, Track};
use smallvec::{smallvec, SmallVec};

/// Fetching or decoding a track failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("fetch failed for '{path}': {reason}")]
    Fetch { path: String, reason: String },
    #[error("'{path}' answered with HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("could not decode '{path}': {reason}")]
    Decode { path: String, reason: String },
}

impl LoadError {
    pub fn path(&self) -> &str {
        match self {
            LoadError::Fetch { path, .. }
            | LoadError::Status { path, .. }
            | LoadError::Decode { path, .. } => path,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Not mounted yet, or gave up after every track failed.
    Idle,
    /// A load is in flight for `current_index`.
    Loading,
    /// A buffer is bound and playback is paused.
    Ready,
    Playing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_index: usize,
    /// Transport intent: whether the user wants audio running.
    pub is_playing: bool,
    pub load_generation: u64,
}

/// Work the host performs on behalf of the controller, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Stop whatever source is currently sounding.
    StopSound,
    /// Fetch and decode `path`; report back with `generation`.
    Load {
        index: usize,
        path: String,
        generation: u64,
    },
    /// Bind the buffer just decoded for `generation` and build a fresh analyser.
    Bind { generation: u64 },
    /// Start (or resume) the bound buffer and arm its end-of-track callback.
    StartPlayback { generation: u64 },
    Pause,
    Notify(NotificationEvent),
    /// Every track failed in a row; playback has stopped retrying.
    Exhausted,
}

pub type Effects = SmallVec<[Effect; 4]>;

/// Transport state machine for the looping playlist.
///
/// Pure: it never touches audio or the DOM. Each operation returns the
/// effects the caller must execute. Load completions carry the generation
/// they were issued with; anything older than the latest request is dropped
/// without mutating state.
#[derive(Clone, Debug)]
pub struct PlaybackController {
    playlist: Playlist,
    state: PlaybackState,
    phase: Phase,
    bound_index: Option<usize>,
    consecutive_failures: usize,
    max_consecutive_failures: usize,
}

impl PlaybackController {
    pub fn new(playlist: Playlist) -> Self {
        let max_consecutive_failures = playlist.len();
        Self {
            playlist,
            state: PlaybackState::default(),
            phase: Phase::Idle,
            bound_index: None,
            consecutive_failures: 0,
            max_consecutive_failures,
        }
    }

    /// Give up after `limit` failed loads in a row (defaults to one full cycle).
    pub fn with_retry_limit(mut self, limit: usize) -> Self {
        self.max_consecutive_failures = limit.max(1);
        self
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_track(&self) -> &Track {
        self.playlist.get(self.state.current_index)
    }

    /// Track whose buffer is currently bound, if any.
    pub fn bound_track(&self) -> Option<&Track> {
        self.bound_index.map(|i| self.playlist.get(i))
    }

    #[inline]
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.state.load_generation
    }

    pub fn mount(&mut self) -> Effects {
        self.state.current_index = 0;
        self.state.is_playing = false;
        self.bound_index = None;
        self.consecutive_failures = 0;
        let mut out: Effects = smallvec![Effect::Notify(NotificationEvent::loading(
            self.current_track().path.clone()
        ))];
        self.request_load(&mut out);
        out
    }

    pub fn load_succeeded(&mut self, generation: u64) -> Effects {
        if !self.is_current(generation) || self.phase != Phase::Loading {
            log::debug!("[playback] dropping stale load gen={}", generation);
            return Effects::new();
        }
        self.consecutive_failures = 0;
        self.bound_index = Some(self.state.current_index);
        let mut out: Effects = smallvec![Effect::Bind { generation }];
        if self.state.is_playing {
            self.phase = Phase::Playing;
            out.push(Effect::StartPlayback { generation });
            out.push(Effect::Notify(NotificationEvent::now_playing(
                self.current_track().path.clone(),
            )));
        } else {
            // Leave any loading notification in place until playback starts.
            self.phase = Phase::Ready;
        }
        out
    }

    pub fn load_failed(&mut self, generation: u64) -> Effects {
        if !self.is_current(generation) || self.phase != Phase::Loading {
            log::debug!("[playback] dropping stale failure gen={}", generation);
            return Effects::new();
        }
        self.consecutive_failures += 1;
        if self.consecutive_failures >= self.max_consecutive_failures {
            log::error!(
                "[playback] {} loads failed in a row; giving up",
                self.consecutive_failures
            );
            self.phase = Phase::Idle;
            self.state.is_playing = false;
            self.bound_index = None;
            return smallvec![Effect::Exhausted];
        }
        self.state.current_index = self.playlist.next_index(self.state.current_index);
        let mut out: Effects = smallvec![Effect::Notify(NotificationEvent::loading(
            self.current_track().path.clone()
        ))];
        self.request_load(&mut out);
        out
    }

    pub fn play_pause(&mut self) -> Effects {
        match self.phase {
            Phase::Playing => {
                self.phase = Phase::Ready;
                self.state.is_playing = false;
                smallvec![Effect::Pause]
            }
            Phase::Ready => {
                self.phase = Phase::Playing;
                self.state.is_playing = true;
                let path = self
                    .bound_track()
                    .unwrap_or_else(|| self.current_track())
                    .path
                    .clone();
                smallvec![
                    Effect::StartPlayback {
                        generation: self.state.load_generation
                    },
                    Effect::Notify(NotificationEvent::now_playing(path)),
                ]
            }
            Phase::Loading => {
                // Completion of the in-flight load honours the new intent.
                self.state.is_playing = !self.state.is_playing;
                Effects::new()
            }
            Phase::Idle => {
                self.consecutive_failures = 0;
                self.state.is_playing = true;
                let mut out: Effects = smallvec![Effect::Notify(NotificationEvent::loading(
                    self.current_track().path.clone()
                ))];
                self.request_load(&mut out);
                out
            }
        }
    }

    pub fn next(&mut self) -> Effects {
        let target = self.playlist.next_index(self.state.current_index);
        self.skip_to(target)
    }

    pub fn prev(&mut self) -> Effects {
        let target = self.playlist.prev_index(self.state.current_index);
        self.skip_to(target)
    }

    /// Natural end of the bound buffer. Only the live, playing generation counts.
    pub fn track_ended(&mut self, generation: u64) -> Effects {
        if self.phase != Phase::Playing || !self.is_current(generation) {
            return Effects::new();
        }
        self.state.current_index = self.playlist.next_index(self.state.current_index);
        let mut out = Effects::new();
        self.request_load(&mut out);
        out
    }

    fn skip_to(&mut self, index: usize) -> Effects {
        self.consecutive_failures = 0;
        self.state.current_index = index;
        self.state.is_playing = true;
        let mut out: Effects = smallvec![Effect::Notify(NotificationEvent::loading(
            self.current_track().path.clone()
        ))];
        self.request_load(&mut out);
        out
    }

    fn request_load(&mut self, out: &mut Effects) {
        self.state.load_generation += 1;
        self.phase = Phase::Loading;
        let index = self.state.current_index;
        log::info!(
            "[playback] loading index {} ({}) gen={}",
            index,
            self.playlist.get(index).path,
            self.state.load_generation
        );
        out.push(Effect::StopSound);
        out.push(Effect::Load {
            index,
            path: self.playlist.get(index).path.clone(),
            generation: self.state.load_generation,
        });
    }
}
