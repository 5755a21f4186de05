// Facial-metrics HUD: draws per-face gauges, labels, boxes and a watermark
// onto live frames and hands the result to a display.

pub mod camera;
pub mod catalog;
pub mod color;
pub mod compositor;
pub mod config;
pub mod display;
pub mod draw;
pub mod error;
pub mod hud;
pub mod layout;
pub mod metrics;
pub mod types;
pub mod visualizer;

pub use config::HudConfig;
pub use display::{DisplaySink, Drawer, Headless};
pub use error::Error;
pub use metrics::Scene;
pub use types::{BoundingBox, Color, FrameBuffer, Point};
pub use visualizer::Visualizer;
