use crate::core::constants::MAX_MAGNITUDE;

/// Mean of byte-scaled frequency bins, in `[0, 255]`.
///
/// Returns 0 for an empty slice, which is what the analyser reports before the
/// first audio frame has been rendered.
#[inline]
pub fn average_magnitude(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    (sum as f32 / bins.len() as f32).clamp(0.0, MAX_MAGNITUDE)
}

/// Something hanging off the audio graph that has to be unhooked explicitly.
pub trait AudioTap {
    /// Remove every edge into and out of the tap.
    fn detach(&self);
}

/// Holds at most one attached analyser tap.
///
/// Replacing or clearing the slot detaches the previous tap, so rebinding on
/// every track change never leaves stale analysers wired to the output.
pub struct AnalyserSlot<A: AudioTap> {
    current: Option<A>,
}

impl<A: AudioTap> Default for AnalyserSlot<A> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<A: AudioTap> AnalyserSlot<A> {
    pub fn replace(&mut self, tap: A) {
        self.clear();
        self.current = Some(tap);
    }

    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            old.detach();
        }
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.current.is_some()
    }

    pub fn get_mut(&mut self) -> Option<&mut A> {
        self.current.as_mut()
    }
}

impl<A: AudioTap> Drop for AnalyserSlot<A> {
    fn drop(&mut self) {
        self.clear();
    }
}
