// DOM hooks the host page may provide. All of them are optional except the
// visualizer container.

pub const PLAY_PAUSE_BUTTON_ID: &str = "play-pause";
pub const PREV_BUTTON_ID: &str = "prev-track";
pub const NEXT_BUTTON_ID: &str = "next-track";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";

pub const NOTIFICATION_ID: &str = "song-notification";
pub const NOTIFICATION_STATUS_ID: &str = "song-notification-status";
pub const NOTIFICATION_LABEL_ID: &str = "song-notification-label";
pub const NOTIFICATION_CLOSE_ID: &str = "song-notification-close";

// localStorage key shared with the rest of the page
pub const THEME_STORAGE_KEY: &str = "theme";
