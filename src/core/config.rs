use crate::core::constants::{NOTIFICATION_DISMISS_MS, NOTIFICATION_EXIT_MS};

/// Runtime settings for one mounted visualizer.
///
/// Defaults match the portfolio page. The web front-end lets the container
/// element override some of them through `data-*` attributes; see
/// [`VisualizerConfig::with_overrides`].
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub container_id: String,
    pub asset_root: String,
    pub dismiss_ms: u32,
    pub exit_ms: u32,
    pub max_pixel_ratio: f64,
    /// Consecutive failed loads before giving up; `None` means one full cycle.
    pub retry_limit: Option<usize>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            container_id: "visualizer".to_string(),
            asset_root: "/music".to_string(),
            dismiss_ms: NOTIFICATION_DISMISS_MS,
            exit_ms: NOTIFICATION_EXIT_MS,
            max_pixel_ratio: 2.0,
            retry_limit: None,
        }
    }
}

impl VisualizerConfig {
    pub fn for_container(container_id: &str) -> Self {
        Self {
            container_id: container_id.to_string(),
            ..Self::default()
        }
    }

    /// Apply overrides from a key lookup (the container's `data-*` attributes).
    /// Unparseable values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(root) = lookup("data-asset-root") {
            if !root.trim().is_empty() {
                self.asset_root = root.trim().to_string();
            }
        }
        if let Some(v) = lookup("data-dismiss-ms") {
            match v.trim().parse::<u32>() {
                Ok(ms) => self.dismiss_ms = ms,
                Err(_) => log::warn!("[config] ignoring data-dismiss-ms={:?}", v),
            }
        }
        if let Some(v) = lookup("data-max-pixel-ratio") {
            match v.trim().parse::<f64>() {
                Ok(r) if r > 0.0 => self.max_pixel_ratio = r,
                _ => log::warn!("[config] ignoring data-max-pixel-ratio={:?}", v),
            }
        }
        if let Some(v) = lookup("data-retry-limit") {
            match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.retry_limit = Some(n),
                _ => log::warn!("[config] ignoring data-retry-limit={:?}", v),
            }
        }
        self
    }
}
