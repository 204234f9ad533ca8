/// User-facing controls, whichever surface they arrive from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportAction {
    PlayPause,
    Next,
    Prev,
    ToggleTheme,
}

impl TransportAction {
    /// Page-wide actions are wired once per page, not per mounted visualizer.
    #[inline]
    pub fn is_page_wide(self) -> bool {
        matches!(self, TransportAction::ToggleTheme)
    }
}

#[inline]
pub fn action_for_key(key: &str) -> Option<TransportAction> {
    match key {
        " " | "MediaPlayPause" => Some(TransportAction::PlayPause),
        "ArrowRight" | "MediaTrackNext" => Some(TransportAction::Next),
        "ArrowLeft" | "MediaTrackPrevious" => Some(TransportAction::Prev),
        "t" | "T" => Some(TransportAction::ToggleTheme),
        _ => None,
    }
}
