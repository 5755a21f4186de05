// Live input: opens a webcam and hands out frames as window-ready buffers,
// plus a sampler that thins a stream down to a target rate.

use crate::error::Error;
use crate::types::FrameBuffer;

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution},
};

/// An open webcam stream. Frames come out already packed for the window.
pub struct CameraCapture {
    cam: Camera,
    resolution: (u32, u32),
}

impl CameraCapture {
    /// Open camera `index`, asking for RGB frames as close to
    /// `width`x`height` at 30 fps as the device offers.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let wanted = CameraFormat::new(Resolution::new(width, height), FrameFormat::YUYV, 30);
        let request = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(wanted));

        let mut cam = Camera::new(CameraIndex::Index(index), request)
            .map_err(|e| Error::CameraInit(format!("camera {index}: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("camera {index} stream: {e}")))?;

        // the device may settle on another size; the window follows it
        let actual = cam.resolution();
        tracing::debug!(index, width = actual.width(), height = actual.height(), "camera stream open");
        Ok(Self {
            cam,
            resolution: (actual.width(), actual.height()),
        })
    }

    /// Block until the next frame arrives and convert it for drawing.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let raw = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("fetch: {e}")))?;
        let rgb = raw
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("decode: {e}")))?;
        let (w, h) = rgb.dimensions();
        Ok(FrameBuffer::from_rgb_bytes(w as usize, h as usize, rgb.as_raw()))
    }

    /// Size of the frames `next_frame` returns.
    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }
}

/// Decides which frames of a timestamped stream get processed.
///
/// A frame passes when at least `1000 / rate` ms have gone by since the last
/// frame that passed. The first frame always passes; a rate of 0 lets every
/// frame through.
#[derive(Debug, Clone)]
pub struct FrameSampler {
    sampling_frame_rate: u32,
    last_timestamp_ms: Option<u64>,
}

impl FrameSampler {
    /// Sampler letting through at most `sampling_frame_rate` frames a second.
    pub fn new(sampling_frame_rate: u32) -> Self {
        Self {
            sampling_frame_rate,
            last_timestamp_ms: None,
        }
    }

    /// True if the frame stamped `timestamp_ms` should be processed.
    pub fn should_process(&mut self, timestamp_ms: u64) -> bool {
        if self.sampling_frame_rate == 0 {
            return true;
        }
        let min_gap = 1000 / self.sampling_frame_rate as u64;
        let due = match self.last_timestamp_ms {
            None => true,
            Some(last) => timestamp_ms.saturating_sub(last) >= min_gap,
        };
        if due {
            self.last_timestamp_ms = Some(timestamp_ms);
        } else {
            tracing::debug!(timestamp_ms, "frame skipped by sampler");
        }
        due
    }
}
