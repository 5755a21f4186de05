// HUD settings: row spacing, watermark placement, gauge colors and what
// to draw. Read from an optional TOML file; anything left out keeps its default.

use std::path::Path;

use serde::Deserialize;

use crate::catalog::GaugeColor;
use crate::error::Error;

/// HUD layout and color settings, loaded from an optional TOML file.
/// Every field falls back to the built-in default when omitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Vertical distance between stacked rows, in pixels.
    pub row_spacing: i32,
    /// Gap between the watermark and the top/right frame edges.
    pub logo_inset: i32,
    /// Widest the watermark may be, as a fraction of the frame width.
    pub logo_max_width_fraction: f64,
    /// Gauges drawn in green.
    pub green_classifiers: Vec<String>,
    /// Gauges drawn in red.
    pub red_classifiers: Vec<String>,
    pub gauge_color: GaugeColor,
    /// Draw the tracking id above the left stack.
    pub draw_face_id: bool,
    /// Draw facial landmarks.
    pub draw_points: bool,
    pub window_title: String,
    /// How long `show_image` yields after presenting a frame.
    pub wait_ms: u64,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            row_spacing: 20,
            logo_inset: 10,
            logo_max_width_fraction: 0.25,
            green_classifiers: vec!["joy".to_string()],
            red_classifiers: vec!["anger".to_string()],
            gauge_color: GaugeColor::Neutral,
            draw_face_id: false,
            draw_points: true,
            window_title: "analyze video".to_string(),
            wait_ms: 5,
        }
    }
}

impl HudConfig {
    /// Parse settings from TOML text.
    pub fn from_toml(src: &str) -> Result<Self, Error> {
        toml::from_str(src).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read `path` if given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => {
                let src = std::fs::read_to_string(path)?;
                Self::from_toml(&src).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
            }
            None => Ok(Self::default()),
        }
    }
}
