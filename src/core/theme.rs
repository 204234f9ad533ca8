/// Page theme supplied by the host page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Unknown or missing values fall back to dark, the page default.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn preset(self) -> ThemePreset {
        match self {
            Theme::Dark => ThemePreset {
                line_rgb: [1.0, 1.0, 1.0],
                clear_rgba: [0.0, 0.0, 0.0, 0.0],
                canvas_background: "transparent",
                page_background: "#0a0a0a",
            },
            Theme::Light => ThemePreset {
                line_rgb: [0.0, 0.0, 0.0],
                clear_rgba: [1.0, 1.0, 1.0, 1.0],
                canvas_background: "#ffffff",
                page_background: "#ffffff",
            },
        }
    }
}

/// Colors applied for a theme.
///
/// Dark mode clears to transparent so the page background shows through;
/// light mode clears to opaque white to avoid dark bleed at the edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemePreset {
    pub line_rgb: [f32; 3],
    pub clear_rgba: [f64; 4],
    pub canvas_background: &'static str,
    pub page_background: &'static str,
}
