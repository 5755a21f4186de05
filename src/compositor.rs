// Watermark stamping: alpha-blend an RGBA image onto the frame.
// The watermark is shrunk once, on the first frame, to at most a fraction
// of the frame width; every later frame reuses that size.

use image::{RgbaImage, imageops::{self, FilterType}};

use crate::types::{Color, FrameBuffer, Point};

/// Alpha-blend `fg` onto `bg` with its top-left corner at `location`.
/// `location` may be negative or push `fg` past the frame; only the overlap
/// is touched. Fully transparent pixels leave `bg` as is.
pub fn overlay_image(fg: &RgbaImage, bg: &mut FrameBuffer, location: Point) {
    let (fw, fh) = (fg.width() as i64, fg.height() as i64);
    let (lx, ly) = (location.x as i64, location.y as i64);

    for y in ly.max(0)..bg.height as i64 {
        let fy = y - ly;
        if fy >= fh {
            break;
        }
        for x in lx.max(0)..bg.width as i64 {
            let fx = x - lx;
            if fx >= fw {
                break;
            }
            let px = fg.get_pixel(fx as u32, fy as u32);
            let opacity = px[3] as f64 / 255.0;
            if opacity <= 0.0 {
                continue;
            }
            let under = bg.get(x as usize, y as usize);
            // truncating, not rounding
            let mix = |f: u8, b: u8| (b as f64 * (1.0 - opacity) + f as f64 * opacity) as u8;
            bg.set(
                x as usize,
                y as usize,
                Color::rgb(mix(px[0], under.r), mix(px[1], under.g), mix(px[2], under.b)),
            );
        }
    }
}

/// Owns the watermark and stamps it into the top-right corner of each frame.
pub struct Compositor {
    logo: Option<RgbaImage>,
    resized: bool,
    inset: i32,
    max_width_fraction: f64,
}

impl Compositor {
    /// `inset` is the gap to the top and right edges; the logo is shrunk to
    /// at most `max_width_fraction` of the frame width.
    pub fn new(logo: Option<RgbaImage>, inset: i32, max_width_fraction: f64) -> Self {
        Self {
            logo,
            resized: false,
            inset,
            max_width_fraction,
        }
    }

    /// The watermark at its current size.
    pub fn logo(&self) -> Option<&RgbaImage> {
        self.logo.as_ref()
    }

    /// True once the first frame has fixed the watermark size.
    pub fn is_resized(&self) -> bool {
        self.resized
    }

    /// Stamp the watermark onto `frame`, sizing it on the first call.
    /// Frames are assumed to keep one resolution for the whole session.
    pub fn stamp(&mut self, frame: &mut FrameBuffer) {
        if !self.resized {
            if let Some(logo) = self.logo.as_mut() {
                fit_width(logo, frame.width as f64 * self.max_width_fraction);
            }
            self.resized = true;
        }
        if let Some(logo) = &self.logo {
            let location = Point::new(frame.width as i32 - logo.width() as i32 - self.inset, self.inset);
            overlay_image(logo, frame, location);
        }
    }
}

/// Shrink `logo` to at most `max_width` wide, keeping its aspect ratio.
fn fit_width(logo: &mut RgbaImage, max_width: f64) {
    let (w, h) = logo.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let new_w = (w as f64).min(max_width);
    let new_h = new_w * (h as f64 / w as f64);
    let (new_w, new_h) = ((new_w as u32).max(1), (new_h as u32).max(1));
    tracing::debug!(from = ?(w, h), to = ?(new_w, new_h), "resizing watermark");
    *logo = imageops::resize(logo, new_w, new_h, FilterType::Triangle);
}
