// Software drawing on a FrameBuffer.
// Everything here clips to the frame: geometry outside the buffer is
// silently dropped, never an error.
// 1) Single pixels and alpha-weighted rectangles.
// 2) Lines, rectangles, polygons and circles (via embedded-graphics).
// 3) Monospace text with an optional thick stroke for outlines.

use std::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_7X13},
    pixelcolor::{PixelColor, raw::RawU24},
    prelude::{Dimensions, Point as EgPoint, Primitive, Size},
    primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Baseline, Text, renderer::TextRenderer},
    Drawable, Pixel,
};

use crate::types::{Color, FrameBuffer, Point};

/// Font used for every HUD label.
pub const HUD_FONT: &MonoFont<'static> = &FONT_7X13;

impl PixelColor for Color {
    type Raw = RawU24;
}

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.set(x, y, color);
}

/// Blend a solid `w`x`h` rectangle over the frame:
/// `dst = color * alpha + dst * (1 - alpha)`, rounded.
/// The caller is responsible for keeping the rectangle inside the frame;
/// anything past the edge is skipped.
pub fn blend_rect(fb: &mut FrameBuffer, x: usize, y: usize, w: usize, h: usize, color: Color, alpha: f32) {
    let x_end = (x + w).min(fb.width);
    let y_end = (y + h).min(fb.height);
    let mix = |fg: u8, bg: u8| (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8;
    for py in y..y_end {
        for px in x..x_end {
            let bg = fb.get(px, py);
            fb.set(px, py, Color::rgb(mix(color.r, bg.r), mix(color.g, bg.g), mix(color.b, bg.b)));
        }
    }
}

/// Straight line with the given stroke width.
pub fn draw_line(fb: &mut FrameBuffer, start: Point, end: Point, color: Color, stroke_width: u32) {
    let Some((start, end)) = clip_segment(fb, start, end, stroke_width as i32 + 2) else {
        return;
    };
    let line = Line::new(eg(start), eg(end)).into_styled(PrimitiveStyle::with_stroke(color, stroke_width));
    match line.draw(&mut Target(fb)) {
        Ok(_) => {}
        Err(infallible) => match infallible {},
    }
}

/// Rectangle outline between two corners; the stroke is centered on the edges.
pub fn draw_rect(fb: &mut FrameBuffer, top_left: Point, bottom_right: Point, color: Color, stroke_width: u32) {
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(stroke_width)
        .stroke_alignment(StrokeAlignment::Center)
        .build();
    // Pull far-off edges in to just outside the frame; what is visible stays the same.
    let margin = stroke_width as i64 + 2;
    let clamp = |p: Point| {
        let x = (p.x as i64).clamp(-margin, fb.width as i64 + margin);
        let y = (p.y as i64).clamp(-margin, fb.height as i64 + margin);
        EgPoint::new(x as i32, y as i32)
    };
    let rect = Rectangle::with_corners(clamp(top_left), clamp(bottom_right)).into_styled(style);
    match rect.draw(&mut Target(fb)) {
        Ok(_) => {}
        Err(infallible) => match infallible {},
    }
}

/// Closed outline through `points` (last point joins the first).
pub fn draw_polygon(fb: &mut FrameBuffer, points: &[Point], color: Color, stroke_width: u32) {
    if points.len() < 2 {
        return;
    }
    for edge in points.windows(2) {
        draw_line(fb, edge[0], edge[1], color, stroke_width);
    }
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        draw_line(fb, last, first, color, stroke_width);
    }
}

/// Unfilled circle centered at `center`.
pub fn draw_circle(fb: &mut FrameBuffer, center: Point, radius: u32, color: Color) {
    let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
    if cx + r < 0 || cy + r < 0 || cx - r >= fb.width as i64 || cy - r >= fb.height as i64 {
        return;
    }
    let circle = Circle::with_center(eg(center), 2 * radius + 1).into_styled(PrimitiveStyle::with_stroke(color, 1));
    match circle.draw(&mut Target(fb)) {
        Ok(_) => {}
        Err(infallible) => match infallible {},
    }
}

/// Rendered width of `text` in pixels, including the extra spread of a
/// `thickness`-wide stroke.
pub fn text_width(text: &str, thickness: u32) -> i32 {
    let style = MonoTextStyle::new(HUD_FONT, Color::WHITE);
    let metrics = style.measure_string(text, EgPoint::zero(), Baseline::Alphabetic);
    metrics.bounding_box.size.width as i32 + 2 * stroke_radius(thickness)
}

/// Draw `text` with its left end at `x` and its baseline at `y`.
/// `thickness > 1` spreads every glyph pixel into a disc, which is how the
/// dark outline behind HUD labels is made.
pub fn draw_text(fb: &mut FrameBuffer, text: &str, x: i32, y: i32, color: Color, thickness: u32) {
    let style = MonoTextStyle::new(HUD_FONT, color);
    let r = stroke_radius(thickness);
    let width = text_width(text, thickness) as i64;
    let height = HUD_FONT.character_size.height as i64 + 2 * r as i64;
    let (x64, y64) = (x as i64, y as i64);
    if x64 + width < 0 || x64 - (r as i64) >= fb.width as i64 || y64 + height < 0 || y64 - height >= fb.height as i64 {
        return;
    }
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let text = Text::with_baseline(text, EgPoint::new(x + dx, y + dy), style, Baseline::Alphabetic);
            match text.draw(&mut Target(fb)) {
                Ok(_) => {}
                Err(infallible) => match infallible {},
            }
        }
    }
}

#[inline]
fn stroke_radius(thickness: u32) -> i32 {
    (thickness.max(1) as i32 - 1) / 2
}

/// Cut a segment down to the frame grown by `margin` on every side, so the
/// rasterizer never sees far-off coordinates. None if nothing is left.
fn clip_segment(fb: &FrameBuffer, start: Point, end: Point, margin: i32) -> Option<(Point, Point)> {
    let (x0, y0) = (start.x as f64, start.y as f64);
    let (dx, dy) = (end.x as f64 - x0, end.y as f64 - y0);
    let m = margin as f64;
    let (x_max, y_max) = (fb.width as f64 + m, fb.height as f64 + m);

    // Liang-Barsky
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, x0 + m), (dx, x_max - x0), (-dy, y0 + m), (dy, y_max - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }
    let at = |t: f64| Point::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    Some((at(t0), at(t1)))
}

#[inline]
fn eg(p: Point) -> EgPoint {
    EgPoint::new(p.x, p.y)
}

struct Target<'a>(&'a mut FrameBuffer);

impl Dimensions for Target<'_> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle {
            top_left: EgPoint::zero(),
            size: Size::new(self.0.width as u32, self.0.height as u32),
        }
    }
}

impl DrawTarget for Target<'_> {
    type Color = Color;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(pos, color) in pixels {
            put_pixel(self.0, pos.x, pos.y, color);
        }
        Ok(())
    }
}
