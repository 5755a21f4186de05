// Core types shared by every drawing step.

use image::{Rgb, RgbImage};
use serde::Deserialize;

/// The frame we draw on and present. Three color channels, no alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is on screen (pixels)
    pub height: usize,    // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A frame of the given size with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.pack(); width * height],
        }
    }

    /// Color at (x, y). Panics outside the frame; use the clipped drawing
    /// helpers for anything that may fall off the edge.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Color {
        Color::unpack(self.pixels[y * self.width + x])
    }

    /// Overwrite (x, y). Same bounds rule as `get`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        self.pixels[y * self.width + x] = color.pack();
    }

    /// Pack an `image` RGB buffer into window pixels.
    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        Self::from_rgb_bytes(w as usize, h as usize, img.as_raw())
    }

    /// Pack tightly interleaved `RGBRGB...` bytes, row by row. Trailing bytes
    /// that do not make up a whole pixel are ignored; missing pixels are black.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Self {
        let mut pixels: Vec<u32> = bytes
            .chunks_exact(3)
            .take(width * height)
            .map(|p| Color::rgb(p[0], p[1], p[2]).pack())
            .collect();
        pixels.resize(width * height, Color::BLACK.pack());
        Self { width, height, pixels }
    }

    /// Unpack into an `image` RGB buffer (e.g. for saving to disk).
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = self.get(x as usize, y as usize);
            Rgb([c.r, c.g, c.b])
        })
    }
}

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    /// Text outline behind every HUD label.
    pub const OUTLINE: Color = Color::rgb(50, 50, 50);
    /// Unlit equalizer blocks.
    pub const DIMMED: Color = Color::rgb(186, 186, 186);

    /// Color from its three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Window pixel layout, `0x00RRGGBB`.
    #[inline]
    pub fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Inverse of `pack`; the top byte is ignored.
    #[inline]
    pub fn unpack(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }
}

/// Pixel coordinate in frame space. May lie outside the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Point at (x, y).
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box given by two corners, supplied fresh every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct BoundingBox {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl BoundingBox {
    /// Box from its two corners.
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }
}
