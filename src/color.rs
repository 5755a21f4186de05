// Value -> color ramps used by bounding boxes and gauges.
// Both are pure: same value in, same color out.

use crate::types::Color;

/// Linear red-to-green ramp, clamped to the two end colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorgenRedGreen {
    red_val: f32,
    green_val: f32,
}

impl ColorgenRedGreen {
    /// `red_val` maps to pure red, `green_val` to pure green.
    pub const fn new(red_val: f32, green_val: f32) -> Self {
        Self { red_val, green_val }
    }

    /// Pure red at or below `red_val`, pure green at or above `green_val`.
    pub fn color(&self, val: f32) -> Color {
        let norm = ((val - self.red_val) / (self.green_val - self.red_val)).clamp(0.0, 1.0);
        // float -> u8 truncates, blue stays off
        let g = (norm * 255.0) as u8;
        let r = ((1.0 - norm) * 255.0) as u8;
        Color::rgb(r, g, 0)
    }
}

/// Linear ramp between any two colors. Values outside the domain extrapolate
/// (each channel saturates at 0/255).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorgenLinear {
    val1: f32,
    val2: f32,
    color1: Color,
    color2: Color,
}

impl ColorgenLinear {
    /// `val1` maps to `color1`, `val2` to `color2`.
    pub const fn new(val1: f32, val2: f32, color1: Color, color2: Color) -> Self {
        Self {
            val1,
            val2,
            color1,
            color2,
        }
    }

    /// Channel-wise interpolation (or extrapolation) at `val`.
    pub fn color(&self, val: f32) -> Color {
        let norm = (val - self.val1) / (self.val2 - self.val1);
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - norm) + b as f32 * norm) as u8;
        Color::rgb(
            mix(self.color1.r, self.color2.r),
            mix(self.color1.g, self.color2.g),
            mix(self.color1.b, self.color2.b),
        )
    }
}

/// Bounding-box and valence-gauge ramp over the signed valence range.
pub const VALENCE_RAMP: ColorgenRedGreen = ColorgenRedGreen::new(-100.0, 100.0);

/// Optional plain-gauge ramp over 0..100 %.
pub const WHITE_YELLOW_RAMP: ColorgenLinear =
    ColorgenLinear::new(0.0, 100.0, Color::WHITE, Color::YELLOW);
