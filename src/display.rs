// Where finished frames go.
// The window sink shows each frame in a minifb window; the headless sink
// just keeps the last frame (for tests and `--headless` runs).

use std::time::Duration;

use minifb::{Key, Window, WindowOptions};

use crate::error::Error;
use crate::types::FrameBuffer;

/// Presents composed frames and yields for a while afterwards.
pub trait DisplaySink {
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error>;

    /// Give the host a bounded slice of time. This is the only place the
    /// render loop suspends.
    fn wait(&mut self, interval: Duration);

    /// False once the viewer is gone and the loop should stop.
    fn is_open(&self) -> bool {
        true
    }
}

/// minifb window sink.
pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the incoming frames.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// True while ESC is held down.
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }
}

impl DisplaySink for Drawer {
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&frame.pixels, frame.width, frame.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    fn wait(&mut self, interval: Duration) {
        std::thread::sleep(interval);
        // pump input so ESC / close are seen promptly
        self.window.update();
    }

    fn is_open(&self) -> bool {
        self.window.is_open() && !self.esc_pressed()
    }
}

/// Sink without a window. Remembers the last presented frame.
#[derive(Default)]
pub struct Headless {
    pub presented: usize,
    pub last: Option<FrameBuffer>,
    pub waited: Duration,
}

impl DisplaySink for Headless {
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error> {
        self.presented += 1;
        self.last = Some(frame.clone());
        Ok(())
    }

    fn wait(&mut self, interval: Duration) {
        self.waited += interval;
    }
}
