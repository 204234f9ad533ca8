//! Browser-independent pieces of the visualizer: playback state machine,
//! notification timing, camera easing, noise and geometry.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod handoff;
pub mod noise;
pub mod notification;
pub mod observable;
pub mod playback;
pub mod playlist;
pub mod scene;
pub mod theme;
pub mod transport;

pub use analysis::{average_magnitude, AnalyserSlot, AudioTap};
pub use config::VisualizerConfig;
pub use geometry::{wire_icosphere, SphereVertex, WireMesh};
pub use notification::{
    NotificationEvent, NotificationState, NotificationStatus, TimerKind,
    TimerRequest,
};
pub use observable::Observable;
pub use playback::{Effect, Effects, LoadError, Phase, PlaybackController, PlaybackState};
pub use playlist::{track_label, Playlist, Track, DEFAULT_TRACKS};
pub use scene::{CameraRig, PointerOffset, RenderState, SphereUniforms};
pub use theme::{Theme, ThemePreset};
pub use transport::{action_for_key, TransportAction};

// Shaders bundled as string constants
pub static SPHERE_WGSL: &str = include_str!("../../shaders/sphere.wgsl");
