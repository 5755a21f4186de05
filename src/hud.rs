// HUD building blocks: "name: value" labels and equalizer gauges.
// Both are anchored at a point and justified left or right of it:
//   left-justified  -> content grows rightwards from the anchor
//   right-justified -> content grows leftwards, ending a fixed gauge width
//                      before the anchor

use crate::draw::{blend_rect, draw_text as draw_string, text_width};
use crate::types::{Color, FrameBuffer, Point};

pub const BLOCK_WIDTH: i32 = 8;
pub const BLOCK_HEIGHT: i32 = 10;
pub const BLOCK_MARGIN: i32 = 2;
/// Percentage covered by one block.
pub const BLOCK_SIZE: f32 = 10.0;
pub const MAX_BLOCKS: i32 = 10;
/// Horizontal room reserved for a full gauge.
pub const GAUGE_WIDTH: i32 = (BLOCK_MARGIN + BLOCK_WIDTH) * MAX_BLOCKS;

const OUTLINE_THICKNESS: u32 = 5;
const TEXT_THICKNESS: u32 = 1;
const LIT_ALPHA: f32 = 0.8;
const UNLIT_ALPHA: f32 = 0.3;

/// Number of lit blocks for a gauge magnitude. Not clamped: magnitudes
/// past 100 light more than `MAX_BLOCKS`, negative ones light none.
pub fn lit_blocks(magnitude: f32) -> i32 {
    (magnitude / BLOCK_SIZE).round() as i32
}

/// Left x of a label so right-justified text always ends at the same column,
/// however long it is.
pub fn label_origin(text: &str, anchor_x: i32, align_right: bool) -> i32 {
    if align_right {
        anchor_x
            .saturating_sub(GAUGE_WIDTH)
            .saturating_sub(text_width(text, OUTLINE_THICKNESS))
    } else {
        anchor_x
    }
}

/// Draw `"name: value"` at `loc` (baseline), outlined in `bg` for contrast.
pub fn draw_text(
    fb: &mut FrameBuffer,
    name: &str,
    value: &str,
    loc: Point,
    align_right: bool,
    color: Color,
    bg: Color,
) {
    let text = format!("{name}: {value}");
    let x = label_origin(&text, loc.x, align_right);
    draw_outlined(fb, &text, x, loc.y, color, bg);
}

/// Draw a 10-block gauge for a 0..100 magnitude, then its name label past
/// the far end of the gauge. Lit blocks use `color`; the rest are dimmed.
pub fn draw_equalizer(fb: &mut FrameBuffer, name: &str, magnitude: f32, loc: Point, align_right: bool, color: Color) {
    let lit = lit_blocks(magnitude);
    let step = if align_right {
        -(BLOCK_MARGIN + BLOCK_WIDTH)
    } else {
        BLOCK_MARGIN + BLOCK_WIDTH
    };

    let (fw, fh) = (fb.width as i32, fb.height as i32);
    let mut x = loc.x;
    let y = loc.y.saturating_sub(BLOCK_HEIGHT);
    for block in 0..MAX_BLOCKS {
        let bx = x.max(0);
        let by = y.max(0);
        let width = BLOCK_WIDTH.min(fw.saturating_sub(bx));
        let height = BLOCK_HEIGHT.min(fh.saturating_sub(by));
        x = x.saturating_add(step);
        if width < 0 || height < 0 {
            continue;
        }
        let (fill, alpha) = if block < lit {
            (color, LIT_ALPHA)
        } else {
            (Color::DIMMED, UNLIT_ALPHA)
        };
        blend_rect(fb, bx as usize, by as usize, width as usize, height as usize, fill, alpha);
    }

    // Labels mirror the gauge: "name: [====]" on the left, "[====] :name" on the right.
    let label = if align_right {
        format!("{name}: ")
    } else {
        format!(" :{name}")
    };
    let lx = if align_right {
        loc.x
            .saturating_sub(GAUGE_WIDTH)
            .saturating_sub(text_width(&label, OUTLINE_THICKNESS))
    } else {
        loc.x.saturating_add(GAUGE_WIDTH)
    };
    draw_outlined(fb, &label, lx, loc.y, Color::WHITE, Color::OUTLINE);
}

/// One stacked HUD row, resolved but not yet drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub anchor: Point,
    pub align_right: bool,
    pub content: RowContent,
}

/// A labelled value as text, or a labelled gauge.
#[derive(Debug, Clone, PartialEq)]
pub enum RowContent {
    Text { name: &'static str, value: String, color: Color },
    Gauge { name: &'static str, magnitude: f32, color: Color },
}

impl Row {
    /// Draw the row onto `fb`.
    pub fn paint(&self, fb: &mut FrameBuffer) {
        match &self.content {
            RowContent::Text { name, value, color } => {
                draw_text(fb, name, value, self.anchor, self.align_right, *color, Color::OUTLINE)
            }
            RowContent::Gauge { name, magnitude, color } => {
                draw_equalizer(fb, name, *magnitude, self.anchor, self.align_right, *color)
            }
        }
    }
}

fn draw_outlined(fb: &mut FrameBuffer, text: &str, x: i32, y: i32, color: Color, bg: Color) {
    draw_string(fb, text, x, y, bg, OUTLINE_THICKNESS);
    draw_string(fb, text, x, y, color, TEXT_THICKNESS);
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIT_WHITE: Color = Color::rgb(204, 204, 204);
    const UNLIT: Color = Color::rgb(56, 56, 56);

    /// Color at the center of gauge block `k`.
    fn block_center(fb: &FrameBuffer, loc: Point, k: i32, align_right: bool) -> Color {
        let step = if align_right { -10 } else { 10 };
        let x = loc.x + k * step + BLOCK_WIDTH / 2;
        let y = loc.y - BLOCK_HEIGHT / 2;
        fb.get(x as usize, y as usize)
    }

    #[test]
    fn test_lit_blocks_rounding() {
        assert_eq!(lit_blocks(0.0), 0);
        assert_eq!(lit_blocks(4.9), 0);
        assert_eq!(lit_blocks(5.0), 1);
        assert_eq!(lit_blocks(54.0), 5);
        assert_eq!(lit_blocks(100.0), 10);
        assert_eq!(lit_blocks(130.0), 13);
    }

    #[test]
    fn test_equalizer_lit_then_unlit() {
        for magnitude in [0.0, 30.0, 50.0, 80.0, 100.0] {
            let mut fb = FrameBuffer::filled(300, 60, Color::BLACK);
            let loc = Point::new(20, 30);
            draw_equalizer(&mut fb, "smile", magnitude, loc, false, Color::WHITE);
            let lit = lit_blocks(magnitude);
            for k in 0..MAX_BLOCKS {
                let expected = if k < lit { LIT_WHITE } else { UNLIT };
                assert_eq!(block_center(&fb, loc, k, false), expected, "magnitude {magnitude}, block {k}");
            }
        }
    }

    #[test]
    fn test_equalizer_right_justified_grows_left() {
        let mut fb = FrameBuffer::filled(400, 60, Color::BLACK);
        let loc = Point::new(300, 30);
        draw_equalizer(&mut fb, "joy", 20.0, loc, true, Color::GREEN);
        assert_eq!(block_center(&fb, loc, 0, true), Color::rgb(0, 204, 0));
        assert_eq!(block_center(&fb, loc, 1, true), Color::rgb(0, 204, 0));
        assert_eq!(block_center(&fb, loc, 2, true), UNLIT);
        assert_eq!(block_center(&fb, loc, 9, true), UNLIT);
    }

    #[test]
    fn test_equalizer_near_edges_does_not_panic() {
        let mut fb = FrameBuffer::filled(50, 30, Color::BLACK);
        draw_equalizer(&mut fb, "edge", 100.0, Point::new(45, 5), false, Color::WHITE);
        draw_equalizer(&mut fb, "edge", 100.0, Point::new(-30, 200), true, Color::WHITE);
        draw_equalizer(&mut fb, "edge", 100.0, Point::new(500, -20), true, Color::WHITE);
        // block clamped into the top-right corner
        assert_eq!(fb.get(47, 0), LIT_WHITE);
    }

    #[test]
    fn test_extreme_anchors_clip_silently() {
        let mut fb = FrameBuffer::filled(64, 64, Color::BLACK);
        for x in [i32::MAX - 5, i32::MAX] {
            for align_right in [false, true] {
                draw_equalizer(&mut fb, "smile", 100.0, Point::new(x, 10), align_right, Color::WHITE);
                draw_text(&mut fb, "mood", "NEUTRAL", Point::new(x, 30), align_right, Color::WHITE, Color::OUTLINE);
            }
        }
        draw_equalizer(&mut fb, "smile", 100.0, Point::new(20, i32::MAX), false, Color::WHITE);
        assert_eq!(fb, FrameBuffer::filled(64, 64, Color::BLACK));

        // far left piles the blocks into column 0, like any other negative anchor
        for x in [i32::MIN + 5, i32::MIN] {
            for align_right in [false, true] {
                draw_equalizer(&mut fb, "smile", 100.0, Point::new(x, 20), align_right, Color::WHITE);
                draw_text(&mut fb, "mood", "NEUTRAL", Point::new(x, 40), align_right, Color::WHITE, Color::OUTLINE);
            }
        }
        assert_ne!(fb.get(4, 15), Color::BLACK);
    }

    #[test]
    fn test_right_justified_text_ends_at_fixed_column() {
        let anchor = 400;
        for text in ["mood: NEUTRAL", "identity: UNKNOWN", "age: 7"] {
            let x = label_origin(text, anchor, true);
            assert_eq!(x + text_width(text, OUTLINE_THICKNESS), anchor - GAUGE_WIDTH);
        }
        assert_eq!(label_origin("anything", anchor, false), anchor);
    }

    #[test]
    fn test_right_justified_text_stays_left_of_gauge() {
        let mut fb = FrameBuffer::filled(500, 40, Color::BLACK);
        let anchor = Point::new(450, 25);
        draw_text(&mut fb, "identity", "UNKNOWN", anchor, true, Color::WHITE, Color::OUTLINE);
        let limit = (anchor.x - GAUGE_WIDTH) as usize;
        for y in 0..fb.height {
            for x in limit..fb.width {
                assert_eq!(fb.get(x, y), Color::BLACK, "pixel ({x},{y}) inside gauge area");
            }
        }
        assert!(fb.pixels.iter().any(|&p| p == Color::WHITE.pack()));
    }
}
