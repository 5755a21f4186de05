// Vertical stacking of HUD rows beside a bounding box.

/// Row offset for one side of a subject. Created at the box top for every
/// subject, then advanced by a fixed spacing before each row is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutCursor {
    y: i32,
    spacing: i32,
}

impl LayoutCursor {
    /// Start a stack whose first row lands one `spacing` below `top`.
    pub fn new(top: i32, spacing: i32) -> Self {
        Self { y: top, spacing }
    }

    /// Move down one row and return the new baseline.
    pub fn advance(&mut self) -> i32 {
        self.y = self.y.saturating_add(self.spacing);
        self.y
    }

    /// Baseline of the last row handed out (the top if none yet).
    pub fn y(&self) -> i32 {
        self.y
    }
}
