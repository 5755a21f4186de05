// One error type for the whole crate.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String), // Pushing a frame to the window failed
    #[error("camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed
    #[error("camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("metrics script error: {0}")]
    Metrics(String),
    /// A catalog category has no value in the subject's score mapping.
    /// Callers must supply a complete metric set per subject per frame.
    #[error("missing measurement for category `{category}`")]
    MissingMeasurement { category: &'static str },
}
