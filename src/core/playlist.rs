/// File names of the bundled tracks, in playback order.
pub const DEFAULT_TRACKS: [&str; 5] = [
    "Air.wav",
    "Glitch.wav",
    "House_Final.wav",
    "Space.wav",
    "Water.wav",
];

/// A playable asset. Identity is its path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Track {
    pub path: String,
}

impl Track {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn label(&self) -> String {
        track_label(&self.path)
    }
}

/// Human-readable name: last path segment, extension stripped, `_` as spaces.
pub fn track_label(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    };
    stem.replace('_', " ")
}

/// Fixed, cyclic list of tracks. Indices wrap in both directions.
#[derive(Clone, Debug)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Panics on an empty track list; the controller relies on `len() > 0`.
    pub fn new(tracks: Vec<Track>) -> Self {
        assert!(!tracks.is_empty(), "playlist needs at least one track");
        Self { tracks }
    }

    /// The bundled playlist rooted at `asset_root` (e.g. `/music`).
    pub fn bundled(asset_root: &str) -> Self {
        let root = asset_root.trim_end_matches('/');
        Self::new(
            DEFAULT_TRACKS
                .iter()
                .map(|name| Track::new(format!("{}/{}", root, name)))
                .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> &Track {
        &self.tracks[index % self.tracks.len()]
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    #[inline]
    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.tracks.len() - 1) % self.tracks.len()
    }
}
