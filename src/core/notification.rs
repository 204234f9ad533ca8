use crate::core::playlist::track_label;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationStatus {
    Loading,
    NowPlaying,
}

impl NotificationStatus {
    pub fn heading(self) -> &'static str {
        match self {
            NotificationStatus::Loading => "LOADING...",
            NotificationStatus::NowPlaying => "NOW PLAYING",
        }
    }
}

/// Request from the playback side to show a notification for a track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationEvent {
    pub status: NotificationStatus,
    pub track_path: String,
}

impl NotificationEvent {
    pub fn loading(track_path: impl Into<String>) -> Self {
        Self {
            status: NotificationStatus::Loading,
            track_path: track_path.into(),
        }
    }

    pub fn now_playing(track_path: impl Into<String>) -> Self {
        Self {
            status: NotificationStatus::NowPlaying,
            track_path: track_path.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Auto-dismiss window elapsed; start the exit transition.
    Dismiss,
    /// Exit transition finished; hide the surface.
    ExitDone,
}

/// A timeout the host must schedule and report back via
/// [`NotificationState::timer_fired`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerRequest {
    pub kind: TimerKind,
    pub epoch: u64,
    pub delay_ms: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Hidden,
    Shown,
    Exiting,
}

/// The single live notification.
///
/// Every `show` bumps the epoch, so timers scheduled for a replaced
/// notification are ignored when they fire. There is no queue: a new event
/// overwrites whatever is on screen.
#[derive(Clone, Debug)]
pub struct NotificationState {
    stage: Stage,
    status: NotificationStatus,
    track_label: String,
    pending_track_path: String,
    epoch: u64,
    dismiss_ms: u32,
    exit_ms: u32,
}

impl NotificationState {
    pub fn new(dismiss_ms: u32, exit_ms: u32) -> Self {
        Self {
            stage: Stage::Hidden,
            status: NotificationStatus::NowPlaying,
            track_label: String::new(),
            pending_track_path: String::new(),
            epoch: 0,
            dismiss_ms,
            exit_ms,
        }
    }

    /// True while the surface is on screen, including the exit transition.
    #[inline]
    pub fn visible(&self) -> bool {
        self.stage != Stage::Hidden
    }

    /// True while the surface is fully entered (not fading out).
    #[inline]
    pub fn entered(&self) -> bool {
        self.stage == Stage::Shown
    }

    pub fn status(&self) -> NotificationStatus {
        self.status
    }

    pub fn track_label(&self) -> &str {
        &self.track_label
    }

    pub fn pending_track_path(&self) -> &str {
        &self.pending_track_path
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn show(&mut self, event: &NotificationEvent) -> Option<TimerRequest> {
        self.epoch += 1;
        self.stage = Stage::Shown;
        self.status = event.status;
        self.track_label = track_label(&event.track_path);
        self.pending_track_path = event.track_path.clone();
        match event.status {
            // Loading stays up until replaced or closed.
            NotificationStatus::Loading => None,
            NotificationStatus::NowPlaying => Some(TimerRequest {
                kind: TimerKind::Dismiss,
                epoch: self.epoch,
                delay_ms: self.dismiss_ms,
            }),
        }
    }

    /// User pressed the close button.
    pub fn close(&mut self) -> Option<TimerRequest> {
        if self.stage != Stage::Shown {
            return None;
        }
        self.stage = Stage::Exiting;
        Some(self.exit_timer())
    }

    /// Hide immediately without a transition and invalidate pending timers.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.stage = Stage::Hidden;
    }

    pub fn timer_fired(&mut self, timer: TimerRequest) -> Option<TimerRequest> {
        if timer.epoch != self.epoch {
            return None;
        }
        match (timer.kind, self.stage) {
            (TimerKind::Dismiss, Stage::Shown) => {
                self.stage = Stage::Exiting;
                Some(self.exit_timer())
            }
            (TimerKind::ExitDone, Stage::Exiting) => {
                self.stage = Stage::Hidden;
                None
            }
            _ => None,
        }
    }

    fn exit_timer(&self) -> TimerRequest {
        TimerRequest {
            kind: TimerKind::ExitDone,
            epoch: self.epoch,
            delay_ms: self.exit_ms,
        }
    }
}
